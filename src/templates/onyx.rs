// src/templates/onyx.rs
//! Dark sidebar template; contact, skill meters and languages live in the
//! sidebar, on the start side of the resolved direction.

use super::push_some;
use crate::direction::Direction;
use crate::layout::{Document, Geometry};
use crate::sections;
use crate::style::{AccentStyle, Palette, PhotoShape, SkillPresentation, StyleTable};
use crate::types::ResumeData;

pub const STYLE: StyleTable = StyleTable {
    palette: Palette {
        primary: "#0EA5E9",
        accent: "#38BDF8",
        text: "#1F2937",
        muted: "#6B7280",
        sidebar_bg: "#1E293B",
        sidebar_text: "#E2E8F0",
    },
    sidebar_frac: 0.32,
    section_gap: 16.0,
    entry_gap: 10.0,
    base_font_size: 10.0,
    heading_glyph: None,
    photo_shape: PhotoShape::Circle,
    skill_presentation: SkillPresentation::Meters,
    accent: AccentStyle::StartBar,
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

    // Contact renders in the sidebar for this template, not under the name.
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
