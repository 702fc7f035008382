// src/sections/certifications.rs

use crate::direction::Direction;
use crate::format::format_full_date;
use crate::layout::Node;
use crate::style::StyleTable;
use crate::types::ResumeData;

pub fn certifications(data: &ResumeData, direction: Direction, style: &StyleTable) -> Option<Node> {
    let entries: Vec<Node> = data
        .certifications
        .iter()
        .filter(|cert| !cert.name.trim().is_empty())
        .enumerate()
        .map(|(idx, cert)| {
            let subtitle = cert
                .issuer
                .as_deref()
                .map(str::trim)
                .filter(|issuer| !issuer.is_empty())
                .map(str::to_string);

            let meta = cert
                .date
                .as_deref()
                .map(str::trim)
                .filter(|date| !date.is_empty())
                .map(|date| format_full_date(date, direction));

            Node::Entry {
                title: cert.name.trim().to_string(),
                subtitle,
                meta,
                body: Vec::new(),
                tags: Vec::new(),
                first_in_section: idx == 0,
            }
        })
        .collect();

    let title = match direction {
        Direction::Ltr => "Certifications",
        Direction::Rtl => "الشهادات",
    };
    Node::section(title, style.heading_glyph, entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates;
    use crate::types::Certification;

    #[test]
    fn test_empty_certifications_render_nothing() {
        let style = templates::resolve("classic").style;
        assert!(certifications(&ResumeData::default(), Direction::Ltr, &style).is_none());
    }

    #[test]
    fn test_date_uses_long_form() {
        let style = templates::resolve("classic").style;
        let mut data = ResumeData::default();
        data.certifications.push(Certification {
            id: "c1".to_string(),
            name: "CKA".to_string(),
            issuer: Some("CNCF".to_string()),
            date: Some("2023-06-01".to_string()),
            ..Default::default()
        });

        let node = certifications(&data, Direction::Ltr, &style).expect("section");
        match node {
            Node::Section { children, .. } => match &children[0] {
                Node::Entry { meta, subtitle, .. } => {
                    assert_eq!(meta.as_deref(), Some("June 1, 2023"));
                    assert_eq!(subtitle.as_deref(), Some("CNCF"));
                }
                other => panic!("expected entry, got {:?}", other),
            },
            other => panic!("expected section, got {:?}", other),
        }
    }
}
