// src/sections/languages.rs

use crate::direction::Direction;
use crate::format::language_proficiency_to_percent;
use crate::layout::{Meter, Node};
use crate::style::StyleTable;
use crate::types::ResumeData;

pub fn languages(data: &ResumeData, direction: Direction, style: &StyleTable) -> Option<Node> {
    let meters: Vec<Meter> = data
        .languages
        .iter()
        .filter(|lang| !lang.name.trim().is_empty())
        .map(|lang| Meter {
            label: lang.name.trim().to_string(),
            percent: language_proficiency_to_percent(lang.proficiency.as_deref().unwrap_or("")),
        })
        .collect();
    if meters.is_empty() {
        return None;
    }

    let title = match direction {
        Direction::Ltr => "Languages",
        Direction::Rtl => "اللغات",
    };
    Node::section(title, style.heading_glyph, vec![Node::Meters(meters)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates;
    use crate::types::Language;

    #[test]
    fn test_empty_languages_render_nothing() {
        let style = templates::resolve("classic").style;
        assert!(languages(&ResumeData::default(), Direction::Ltr, &style).is_none());
    }

    #[test]
    fn test_cefr_mapping_flows_through() {
        let style = templates::resolve("classic").style;
        let mut data = ResumeData::default();
        data.languages.push(Language {
            id: "l1".to_string(),
            name: "German".to_string(),
            proficiency: Some("B2".to_string()),
        });

        let node = languages(&data, Direction::Ltr, &style).expect("section");
        match node {
            Node::Section { children, .. } => match &children[0] {
                Node::Meters(meters) => assert_eq!(meters[0].percent, 65),
                other => panic!("expected meters, got {:?}", other),
            },
            other => panic!("expected section, got {:?}", other),
        }
    }
}
