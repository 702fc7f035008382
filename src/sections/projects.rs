// src/sections/projects.rs

use crate::direction::Direction;
use crate::format::format_date_range;
use crate::layout::Node;
use crate::richtext::parse_rich_text;
use crate::style::StyleTable;
use crate::types::ResumeData;

pub fn projects(data: &ResumeData, direction: Direction, style: &StyleTable) -> Option<Node> {
    let entries: Vec<Node> = data
        .projects
        .iter()
        .filter(|project| !project.name.trim().is_empty())
        .enumerate()
        .map(|(idx, project)| {
            let range = match project.start_date.as_deref() {
                Some(start) => format_date_range(
                    start,
                    project.end_date.as_deref(),
                    project.current,
                    direction,
                ),
                None => String::new(),
            };

            Node::Entry {
                title: project.name.trim().to_string(),
                subtitle: project
                    .url
                    .as_deref()
                    .map(str::trim)
                    .filter(|url| !url.is_empty())
                    .map(str::to_string),
                meta: (!range.is_empty()).then_some(range),
                body: parse_rich_text(project.description.as_deref().unwrap_or("")),
                tags: project
                    .technologies
                    .iter()
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .collect(),
                first_in_section: idx == 0,
            }
        })
        .collect();

    let title = match direction {
        Direction::Ltr => "Projects",
        Direction::Rtl => "المشاريع",
    };
    Node::section(title, style.heading_glyph, entries)
}
