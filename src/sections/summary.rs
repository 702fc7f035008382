// src/sections/summary.rs

use crate::direction::Direction;
use crate::layout::Node;
use crate::richtext::parse_rich_text;
use crate::style::StyleTable;
use crate::types::ResumeData;

pub fn summary(data: &ResumeData, direction: Direction, style: &StyleTable) -> Option<Node> {
    let blocks = parse_rich_text(data.summary.as_deref().unwrap_or(""));
    if blocks.is_empty() {
        return None;
    }
    let title = match direction {
        Direction::Ltr => "Summary",
        Direction::Rtl => "الملخص المهني",
    };
    Node::section(title, style.heading_glyph, vec![Node::RichText(blocks)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates;

    #[test]
    fn test_empty_summary_renders_nothing() {
        let style = templates::resolve("classic").style;
        assert!(summary(&ResumeData::default(), Direction::Ltr, &style).is_none());

        let mut data = ResumeData::default();
        data.summary = Some("  ".to_string());
        assert!(summary(&data, Direction::Ltr, &style).is_none());
    }

    #[test]
    fn test_summary_parses_rich_text() {
        let style = templates::resolve("classic").style;
        let mut data = ResumeData::default();
        data.summary = Some("<p>Seasoned <b>backend</b> engineer.</p>".to_string());

        let node = summary(&data, Direction::Ltr, &style).expect("summary node");
        match node {
            Node::Section { title, children, .. } => {
                assert_eq!(title, "Summary");
                assert_eq!(children.len(), 1);
            }
            other => panic!("expected section, got {:?}", other),
        }
    }
}
