// src/sections/education.rs

use crate::direction::Direction;
use crate::format::format_date_range;
use crate::layout::Node;
use crate::richtext::{parse_rich_text, Block, Span};
use crate::style::StyleTable;
use crate::types::ResumeData;

pub fn education(data: &ResumeData, direction: Direction, style: &StyleTable) -> Option<Node> {
    let entries: Vec<Node> = data
        .education
        .iter()
        .enumerate()
        .map(|(idx, edu)| {
            let title = match edu.field.as_deref().map(str::trim) {
                Some(field) if !field.is_empty() => {
                    format!("{}, {}", edu.degree.trim(), field)
                }
                _ => edu.degree.trim().to_string(),
            };

            let subtitle = match edu.location.as_deref().map(str::trim) {
                Some(location) if !location.is_empty() && !edu.institution.trim().is_empty() => {
                    Some(format!("{} · {}", edu.institution.trim(), location))
                }
                Some(location) if !location.is_empty() => Some(location.to_string()),
                _ if !edu.institution.trim().is_empty() => {
                    Some(edu.institution.trim().to_string())
                }
                _ => None,
            };

            let mut body = parse_rich_text(edu.description.as_deref().unwrap_or(""));
            if let Some(gpa) = edu.gpa.as_deref().map(str::trim).filter(|g| !g.is_empty()) {
                let label = match direction {
                    Direction::Ltr => format!("GPA: {}", gpa),
                    Direction::Rtl => format!("المعدل: {}", gpa),
                };
                body.push(Block::Paragraph(vec![Span::plain(label)]));
            }

            let range =
                format_date_range(&edu.start_date, edu.end_date.as_deref(), edu.current, direction);

            Node::Entry {
                title,
                subtitle,
                meta: (!range.is_empty()).then_some(range),
                body,
                tags: Vec::new(),
                first_in_section: idx == 0,
            }
        })
        .collect();

    let title = match direction {
        Direction::Ltr => "Education",
        Direction::Rtl => "التعليم",
    };
    Node::section(title, style.heading_glyph, entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates;
    use crate::types::Education;

    #[test]
    fn test_empty_education_renders_nothing() {
        let style = templates::resolve("classic").style;
        assert!(education(&ResumeData::default(), Direction::Ltr, &style).is_none());
    }

    #[test]
    fn test_degree_field_and_gpa() {
        let style = templates::resolve("classic").style;
        let mut data = ResumeData::default();
        data.education.push(Education {
            id: "ed1".to_string(),
            degree: "BSc".to_string(),
            field: Some("Computer Science".to_string()),
            institution: "ETH".to_string(),
            start_date: "2014".to_string(),
            end_date: Some("2017".to_string()),
            gpa: Some("5.6".to_string()),
            ..Default::default()
        });

        let node = education(&data, Direction::Ltr, &style).expect("section");
        match node {
            Node::Section { children, .. } => match &children[0] {
                Node::Entry { title, body, .. } => {
                    assert_eq!(title, "BSc, Computer Science");
                    assert!(body
                        .iter()
                        .any(|b| crate::richtext::block_text(b).contains("GPA: 5.6")));
                }
                other => panic!("expected entry, got {:?}", other),
            },
            other => panic!("expected section, got {:?}", other),
        }
    }
}
