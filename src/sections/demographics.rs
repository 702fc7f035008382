// src/sections/demographics.rs

use crate::direction::Direction;
use crate::format::{demographic_label, format_full_date, DemographicField};
use crate::layout::{Fact, Node};
use crate::style::StyleTable;
use crate::types::ResumeData;

pub fn demographics(data: &ResumeData, direction: Direction, style: &StyleTable) -> Option<Node> {
    let demo = data.personal.demographics.as_ref()?;
    if demo.is_empty() {
        return None;
    }

    let mut facts = Vec::new();
    let mut push = |field: DemographicField, value: &Option<String>, long_date: bool| {
        if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            let value = if long_date {
                format_full_date(value, direction)
            } else {
                value.to_string()
            };
            facts.push(Fact {
                label: demographic_label(field, direction).to_string(),
                value,
            });
        }
    };
    push(DemographicField::DateOfBirth, &demo.date_of_birth, true);
    push(DemographicField::Nationality, &demo.nationality, false);
    push(DemographicField::MaritalStatus, &demo.marital_status, false);
    push(DemographicField::Gender, &demo.gender, false);
    push(DemographicField::MilitaryStatus, &demo.military_status, false);

    if facts.is_empty() {
        return None;
    }

    let title = match direction {
        Direction::Ltr => "Personal Details",
        Direction::Rtl => "البيانات الشخصية",
    };
    Node::section(title, style.heading_glyph, vec![Node::Facts(facts)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates;
    use crate::types::Demographics;

    #[test]
    fn test_absent_demographics_render_nothing() {
        let style = templates::resolve("classic").style;
        assert!(demographics(&ResumeData::default(), Direction::Ltr, &style).is_none());

        let mut data = ResumeData::default();
        data.personal.demographics = Some(Demographics::default());
        assert!(demographics(&data, Direction::Ltr, &style).is_none());
    }

    #[test]
    fn test_facts_are_labelled_and_dates_formatted() {
        let style = templates::resolve("classic").style;
        let mut data = ResumeData::default();
        data.personal.demographics = Some(Demographics {
            date_of_birth: Some("1990-04-12".to_string()),
            nationality: Some("Dutch".to_string()),
            ..Default::default()
        });

        let node = demographics(&data, Direction::Ltr, &style).expect("section");
        match node {
            Node::Section { children, .. } => match &children[0] {
                Node::Facts(facts) => {
                    assert_eq!(facts.len(), 2);
                    assert_eq!(facts[0].label, "Date of Birth");
                    assert_eq!(facts[0].value, "April 12, 1990");
                }
                other => panic!("expected facts, got {:?}", other),
            },
            other => panic!("expected section, got {:?}", other),
        }
    }
}
