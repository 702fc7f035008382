// src/sections/experience.rs

use crate::direction::Direction;
use crate::format::format_date_range;
use crate::layout::Node;
use crate::richtext::parse_rich_text;
use crate::style::StyleTable;
use crate::types::ResumeData;

pub fn experience(data: &ResumeData, direction: Direction, style: &StyleTable) -> Option<Node> {
    let entries: Vec<Node> = data
        .experience
        .iter()
        .enumerate()
        .map(|(idx, exp)| {
            let mut body = parse_rich_text(exp.description.as_deref().unwrap_or(""));
            if let Some(achievements) = &exp.achievements {
                body.extend(parse_rich_text(achievements));
            }

            let subtitle = match exp.location.as_deref().map(str::trim) {
                Some(location) if !location.is_empty() && !exp.company.trim().is_empty() => {
                    Some(format!("{} · {}", exp.company.trim(), location))
                }
                Some(location) if !location.is_empty() => Some(location.to_string()),
                _ if !exp.company.trim().is_empty() => Some(exp.company.trim().to_string()),
                _ => None,
            };

            let range =
                format_date_range(&exp.start_date, exp.end_date.as_deref(), exp.current, direction);

            Node::Entry {
                title: exp.title.trim().to_string(),
                subtitle,
                meta: (!range.is_empty()).then_some(range),
                body,
                tags: Vec::new(),
                first_in_section: idx == 0,
            }
        })
        .collect();

    let title = match direction {
        Direction::Ltr => "Experience",
        Direction::Rtl => "الخبرة العملية",
    };
    Node::section(title, style.heading_glyph, entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates;
    use crate::types::Experience;

    #[test]
    fn test_empty_experience_renders_nothing() {
        let style = templates::resolve("classic").style;
        assert!(experience(&ResumeData::default(), Direction::Ltr, &style).is_none());
    }

    #[test]
    fn test_entry_fields_and_first_marker() {
        let style = templates::resolve("classic").style;
        let mut data = ResumeData::default();
        data.experience.push(Experience {
            id: "e1".to_string(),
            title: "Senior Engineer".to_string(),
            company: "Acme".to_string(),
            location: Some("Berlin".to_string()),
            start_date: "2020-01-01".to_string(),
            current: true,
            description: Some("<ul><li>Built things</li></ul>".to_string()),
            ..Default::default()
        });
        data.experience.push(Experience {
            id: "e2".to_string(),
            title: "Engineer".to_string(),
            company: "Beta".to_string(),
            start_date: "2017-05".to_string(),
            end_date: Some("2019-12".to_string()),
            ..Default::default()
        });

        let node = experience(&data, Direction::Ltr, &style).expect("section");
        let children = match node {
            Node::Section { children, .. } => children,
            other => panic!("expected section, got {:?}", other),
        };
        assert_eq!(children.len(), 2);
        match &children[0] {
            Node::Entry {
                subtitle,
                meta,
                body,
                first_in_section,
                ..
            } => {
                assert_eq!(subtitle.as_deref(), Some("Acme · Berlin"));
                assert!(meta.as_deref().unwrap().ends_with("Present"));
                assert!(!body.is_empty());
                assert!(first_in_section);
            }
            other => panic!("expected entry, got {:?}", other),
        }
        match &children[1] {
            Node::Entry {
                first_in_section, ..
            } => assert!(!first_in_section),
            other => panic!("expected entry, got {:?}", other),
        }
    }
}
