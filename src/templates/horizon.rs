// src/templates/horizon.rs
//! Light sidebar template with a teal accent; demographics stay in the
//! main column.

use super::push_some;
use crate::direction::Direction;
use crate::layout::{Document, Geometry};
use crate::sections;
use crate::style::{AccentStyle, Palette, PhotoShape, SkillPresentation, StyleTable};
use crate::types::ResumeData;

pub const STYLE: StyleTable = StyleTable {
    palette: Palette {
        primary: "#0D9488",
        accent: "#14B8A6",
        text: "#1C1917",
        muted: "#78716C",
        sidebar_bg: "#F1F5F9",
        sidebar_text: "#1C1917",
    },
    sidebar_frac: 0.30,
    section_gap: 16.0,
    entry_gap: 9.0,
    base_font_size: 10.0,
    heading_glyph: None,
    photo_shape: PhotoShape::Rounded,
    skill_presentation: SkillPresentation::Meters,
    accent: AccentStyle::Underline,
    header_band: false,
};

pub fn compose(data: &ResumeData, direction: Direction, style: &StyleTable) -> Document {
    let mut sidebar = Vec::new();
    push_some(&mut sidebar, sections::contact_section(data, direction, style));
    push_some(&mut sidebar, sections::skills(data, direction, style));
    push_some(&mut sidebar, sections::languages(data, direction, style));

    let mut main = Vec::new();
    push_some(&mut main, sections::summary(data, direction, style));
    push_some(&mut main, sections::experience(data, direction, style));
    push_some(&mut main, sections::projects(data, direction, style));
    push_some(&mut main, sections::education(data, direction, style));
    push_some(&mut main, sections::certifications(data, direction, style));
    push_some(&mut main, sections::demographics(data, direction, style));

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
