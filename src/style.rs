// src/style.rs
//! Declarative per-template style tables.
//!
//! Every template is a static `StyleTable` plus a composer function; the
//! engine holds no per-render style state. Column widths are fractions of
//! the page width so both backends scale them against their own page
//! models.

use crate::direction::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: &'static str,
    pub accent: &'static str,
    pub text: &'static str,
    pub muted: &'static str,
    pub sidebar_bg: &'static str,
    pub sidebar_text: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoShape {
    Circle,
    Rounded,
    Square,
    /// Template never shows a photo even when one is present.
    Hidden,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkillPresentation {
    Meters,
    Tags,
}

/// Decoration drawn with section titles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccentStyle {
    Underline,
    /// Vertical bar on the start side of the title.
    StartBar,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleTable {
    pub palette: Palette,
    /// Sidebar width as a fraction of the page width; 0.0 means single
    /// column.
    pub sidebar_frac: f32,
    /// Vertical gap between sections, in points.
    pub section_gap: f32,
    /// Vertical gap between entries, in points.
    pub entry_gap: f32,
    pub base_font_size: f32,
    pub heading_glyph: Option<char>,
    pub photo_shape: PhotoShape,
    pub skill_presentation: SkillPresentation,
    pub accent: AccentStyle,
    /// Full-width colored band behind the header.
    pub header_band: bool,
}

impl StyleTable {
    pub fn has_sidebar(&self) -> bool {
        self.sidebar_frac > 0.0
    }
}

/// Font stacks per script; the RTL stack leads with Arabic-capable faces.
pub fn font_stack(direction: Direction) -> &'static str {
    match direction {
        Direction::Ltr => "'Inter', 'Helvetica Neue', Arial, sans-serif",
        Direction::Rtl => "'Noto Kufi Arabic', 'Cairo', Tahoma, Arial, sans-serif",
    }
}

/// Parses a `#rrggbb` color into unit-range RGB; unparseable values fall
/// back to mid gray rather than failing a render.
pub fn hex_to_rgb(hex: &str) -> (f32, f32, f32) {
    let raw = hex.trim_start_matches('#');
    if raw.len() != 6 {
        return (0.5, 0.5, 0.5);
    }
    // get() instead of indexing: a 6-byte value can still split a
    // multi-byte character, and indexing would panic there.
    let channel = |range: std::ops::Range<usize>| {
        raw.get(range)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
            .map(|v| v as f32 / 255.0)
            .unwrap_or(0.5)
    };
    (channel(0..2), channel(2..4), channel(4..6))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#000000"), (0.0, 0.0, 0.0));
        assert_eq!(hex_to_rgb("#ff0000"), (1.0, 0.0, 0.0));
        let (r, g, b) = hex_to_rgb("not-a-color");
        assert_eq!((r, g, b), (0.5, 0.5, 0.5));
    }

    #[test]
    fn test_hex_to_rgb_multibyte_input_does_not_panic() {
        // 6 bytes but only 5 chars; the slice bounds land mid-character.
        assert_eq!(hex_to_rgb("aaaéa"), (2.0 / 3.0, 0.5, 0.5));
        assert_eq!(hex_to_rgb("#ééé"), (0.5, 0.5, 0.5));
    }

    #[test]
    fn test_font_stack_varies_by_direction() {
        assert_ne!(font_stack(Direction::Ltr), font_stack(Direction::Rtl));
    }
}
