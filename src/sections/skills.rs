// src/sections/skills.rs

use crate::direction::Direction;
use crate::format::skill_level_to_percent;
use crate::layout::{Meter, Node};
use crate::style::{SkillPresentation, StyleTable};
use crate::types::ResumeData;

pub fn skills(data: &ResumeData, direction: Direction, style: &StyleTable) -> Option<Node> {
    let named: Vec<_> = data
        .skills
        .iter()
        .filter(|skill| !skill.name.trim().is_empty())
        .collect();
    if named.is_empty() {
        return None;
    }

    let content = match style.skill_presentation {
        SkillPresentation::Meters => Node::Meters(
            named
                .iter()
                .map(|skill| Meter {
                    label: skill.name.trim().to_string(),
                    percent: skill_level_to_percent(skill.level.as_deref().unwrap_or("")),
                })
                .collect(),
        ),
        SkillPresentation::Tags => Node::Tags(
            named
                .iter()
                .map(|skill| skill.name.trim().to_string())
                .collect(),
        ),
    };

    let title = match direction {
        Direction::Ltr => "Skills",
        Direction::Rtl => "المهارات",
    };
    Node::section(title, style.heading_glyph, vec![content])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates;
    use crate::types::Skill;

    fn skill(name: &str, level: Option<&str>) -> Skill {
        Skill {
            id: format!("s-{}", name),
            name: name.to_string(),
            level: level.map(str::to_string),
        }
    }

    #[test]
    fn test_empty_skills_render_nothing() {
        let style = templates::resolve("onyx").style;
        assert!(skills(&ResumeData::default(), Direction::Ltr, &style).is_none());
    }

    #[test]
    fn test_meter_presentation_uses_percent_mapping() {
        let style = templates::resolve("onyx").style;
        assert_eq!(style.skill_presentation, SkillPresentation::Meters);

        let mut data = ResumeData::default();
        data.skills.push(skill("Rust", Some("expert")));
        data.skills.push(skill("Go", None));

        let node = skills(&data, Direction::Ltr, &style).expect("section");
        match node {
            Node::Section { children, .. } => match &children[0] {
                Node::Meters(meters) => {
                    assert_eq!(meters.len(), 2);
                    assert_eq!(meters[0].percent, 90);
                    assert_eq!(meters[1].percent, crate::format::DEFAULT_SKILL_PERCENT);
                }
                other => panic!("expected meters, got {:?}", other),
            },
            other => panic!("expected section, got {:?}", other),
        }
    }

    #[test]
    fn test_tag_presentation() {
        let style = templates::resolve("meridian").style;
        assert_eq!(style.skill_presentation, SkillPresentation::Tags);

        let mut data = ResumeData::default();
        data.skills.push(skill("Kubernetes", None));

        let node = skills(&data, Direction::Ltr, &style).expect("section");
        match node {
            Node::Section { children, .. } => {
                assert!(matches!(&children[0], Node::Tags(tags) if tags == &vec!["Kubernetes".to_string()]));
            }
            other => panic!("expected section, got {:?}", other),
        }
    }
}
