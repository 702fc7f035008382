// src/templates/classic.rs
//! Default single-column template with an accent underline per section.

use super::push_some;
use crate::direction::Direction;
use crate::layout::{Document, Geometry};
use crate::sections;
use crate::style::{AccentStyle, Palette, PhotoShape, SkillPresentation, StyleTable};
use crate::types::ResumeData;

pub const STYLE: StyleTable = StyleTable {
    palette: Palette {
        primary: "#14A4E6",
        accent: "#14A4E6",
        text: "#222222",
        muted: "#757575",
        sidebar_bg: "#FFFFFF",
        sidebar_text: "#222222",
    },
    sidebar_frac: 0.0,
    section_gap: 18.0,
    entry_gap: 10.0,
    base_font_size: 10.0,
    heading_glyph: None,
    photo_shape: PhotoShape::Rounded,
    skill_presentation: SkillPresentation::Tags,
    accent: AccentStyle::Underline,
    header_band: false,
};

pub fn compose(data: &ResumeData, direction: Direction, style: &StyleTable) -> Document {
    let mut main = Vec::new();
    push_some(&mut main, sections::summary(data, direction, style));
    push_some(&mut main, sections::experience(data, direction, style));
    push_some(&mut main, sections::education(data, direction, style));
    push_some(&mut main, sections::projects(data, direction, style));
    push_some(&mut main, sections::certifications(data, direction, style));
    push_some(&mut main, sections::skills(data, direction, style));
    push_some(&mut main, sections::languages(data, direction, style));
    push_some(&mut main, sections::demographics(data, direction, style));

    Document {
        direction,
        style: *style,
        geometry: Geometry::SingleColumn,
        header: sections::header(data, direction, style),
        sidebar: Vec::new(),
        main,
        watermark: false,
    }
}
