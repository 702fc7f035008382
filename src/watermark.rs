// src/watermark.rs
//! Watermark decorator constants shared by both backends.
//!
//! The overlay is purely visual: rendered above all content, never
//! selectable or interactive. Both backends read the same table so mark
//! count and placement always agree between preview and export.

/// Relative page positions (x, y as fractions of page width/height) of the
/// five marks.
pub const MARKS: [(f32, f32); 5] = [
    (0.22, 0.16),
    (0.68, 0.28),
    (0.38, 0.48),
    (0.72, 0.66),
    (0.28, 0.84),
];

/// Counter-clockwise rotation applied to each mark, in degrees.
pub const ANGLE_DEG: f32 = 32.0;

pub const TEXT: &str = "PREVIEW";
