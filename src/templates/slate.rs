// src/templates/slate.rs
//! Narrow-sidebar template, no photo, no section decoration; the densest
//! of the set.

use super::push_some;
use crate::direction::Direction;
use crate::layout::{Document, Geometry};
use crate::sections;
use crate::style::{AccentStyle, Palette, PhotoShape, SkillPresentation, StyleTable};
use crate::types::ResumeData;

pub const STYLE: StyleTable = StyleTable {
    palette: Palette {
        primary: "#475569",
        accent: "#94A3B8",
        text: "#0F172A",
        muted: "#64748B",
        sidebar_bg: "#334155",
        sidebar_text: "#F1F5F9",
    },
    sidebar_frac: 0.26,
    section_gap: 14.0,
    entry_gap: 8.0,
    base_font_size: 9.5,
    heading_glyph: None,
    photo_shape: PhotoShape::Hidden,
    skill_presentation: SkillPresentation::Meters,
    accent: AccentStyle::None,
    header_band: false,
};

pub fn compose(data: &ResumeData, direction: Direction, style: &StyleTable) -> Document {
    let mut sidebar = Vec::new();
    push_some(&mut sidebar, sections::contact_section(data, direction, style));
    push_some(&mut sidebar, sections::skills(data, direction, style));
    push_some(&mut sidebar, sections::languages(data, direction, style));
    push_some(&mut sidebar, sections::demographics(data, direction, style));

    let mut main = Vec::new();
    push_some(&mut main, sections::summary(data, direction, style));
    push_some(&mut main, sections::experience(data, direction, style));
    push_some(&mut main, sections::education(data, direction, style));
    push_some(&mut main, sections::projects(data, direction, style));
    push_some(&mut main, sections::certifications(data, direction, style));

    let mut header = sections::header(data, direction, style);
    header.contact.clear();

    Document {
        direction,
        style: *style,
        geometry: Geometry::Sidebar {
            width_frac: style.sidebar_frac,
        },
        header,
        sidebar,
        main,
        watermark: false,
    }
}
