// src/templates/meridian.rs
//! Single-column template with a colored banner header and skill tags
//! placed right under the summary.

use super::push_some;
use crate::direction::Direction;
use crate::layout::{Document, Geometry};
use crate::sections;
use crate::style::{AccentStyle, Palette, PhotoShape, SkillPresentation, StyleTable};
use crate::types::ResumeData;

pub const STYLE: StyleTable = StyleTable {
    palette: Palette {
        primary: "#7C3AED",
        accent: "#A78BFA",
        text: "#1E1B4B",
        muted: "#6D28D9",
        sidebar_bg: "#FFFFFF",
        sidebar_text: "#1E1B4B",
    },
    sidebar_frac: 0.0,
    section_gap: 17.0,
    entry_gap: 10.0,
    base_font_size: 10.0,
    heading_glyph: None,
    photo_shape: PhotoShape::Square,
    skill_presentation: SkillPresentation::Tags,
    accent: AccentStyle::None,
    header_band: true,
};

pub fn compose(data: &ResumeData, direction: Direction, style: &StyleTable) -> Document {
    let mut main = Vec::new();
    push_some(&mut main, sections::summary(data, direction, style));
    push_some(&mut main, sections::skills(data, direction, style));
    push_some(&mut main, sections::experience(data, direction, style));
    push_some(&mut main, sections::projects(data, direction, style));
    push_some(&mut main, sections::education(data, direction, style));
    push_some(&mut main, sections::certifications(data, direction, style));
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
