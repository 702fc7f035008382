// src/backends/typeface.rs
//! Embedded Arabic typeface support for the PDF backend.
//!
//! The base-14 Helvetica faces carry no Arabic glyphs, so RTL text would
//! otherwise degrade to replacement characters in the export. This module
//! locates an Arabic-capable TrueType face on the host, shapes Arabic runs
//! with rustybuzz, and embeds the font program as a CIDFontType2/Identity-H
//! font. Discovery tries well-known font paths first and then scans the
//! system font directories; when no capable face exists the backend falls
//! back to the lossy Latin mapping rather than failing the render.
//!
//! The loaded font is process-global: font files do not change underneath
//! a running service, and re-reading them per render would dominate the
//! serialization cost.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use pdf_writer::types::{CidFontType, FontFlags, SystemInfo, UnicodeCmap};
use pdf_writer::{Finish, Name, Pdf, Rect, Ref, Str};
use rustybuzz::ttf_parser::{self, GlyphId};
use rustybuzz::{Direction as ShapeDirection, Face, UnicodeBuffer};
use tracing::debug;

/// PDF name of the embedded font program.
const BASE_FONT: Name<'static> = Name(b"EmbeddedArabic");

/// ALEF; a face that cannot map it cannot render Arabic.
const COVERAGE_CHECK: char = '\u{0627}';

/// Well-known Arabic-capable faces, checked before any directory scan.
const CANDIDATE_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/noto/NotoNaskhArabic-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSansArabic-Regular.ttf",
    "/usr/share/fonts/noto/NotoSansArabic-Regular.ttf",
    "/usr/share/fonts/truetype/amiri/Amiri-Regular.ttf",
    "/usr/share/fonts/TTF/Amiri-Regular.ttf",
    "/usr/share/fonts/truetype/kacst-one/KacstOne.ttf",
    "/System/Library/Fonts/Supplemental/GeezaPro.ttc",
    "C:/Windows/Fonts/tahoma.ttf",
    "C:/Windows/Fonts/arial.ttf",
];

const SCAN_DIRS: &[&str] = &["/usr/share/fonts", "/usr/local/share/fonts"];
const SCAN_DEPTH: usize = 4;

static ARABIC_FONT: OnceLock<Option<ArabicFont>> = OnceLock::new();

/// The process-wide Arabic face, loaded on first use; `None` when the host
/// has no Arabic-capable font installed.
pub fn arabic() -> Option<&'static ArabicFont> {
    ARABIC_FONT.get_or_init(load).as_ref()
}

fn load() -> Option<ArabicFont> {
    for path in CANDIDATE_PATHS {
        if let Some(font) = try_load(Path::new(path)) {
            debug!("Embedding Arabic font from {}", path);
            return Some(font);
        }
    }
    for dir in SCAN_DIRS {
        if let Some(font) = scan_dir(Path::new(dir), SCAN_DEPTH) {
            return Some(font);
        }
    }
    debug!("No Arabic-capable font found; PDF Arabic text will degrade");
    None
}

fn scan_dir(dir: &Path, depth: usize) -> Option<ArabicFont> {
    if depth == 0 {
        return None;
    }
    let entries = fs::read_dir(dir).ok()?;
    let mut subdirs = Vec::new();
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            subdirs.push(path);
        } else if matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("ttf") | Some("otf") | Some("ttc")
        ) {
            if let Some(font) = try_load(&path) {
                debug!("Embedding Arabic font from {}", path.display());
                return Some(font);
            }
        }
    }
    subdirs
        .into_iter()
        .find_map(|sub| scan_dir(&sub, depth - 1))
}

fn try_load(path: &Path) -> Option<ArabicFont> {
    let data = fs::read(path).ok()?;
    let (units_per_em, ascent, descent, cap_height, bbox);
    {
        let face = ttf_parser::Face::parse(&data, 0).ok()?;
        face.glyph_index(COVERAGE_CHECK)?;
        units_per_em = face.units_per_em();
        let scale = 1000.0 / units_per_em as f32;
        ascent = face.ascender() as f32 * scale;
        descent = face.descender() as f32 * scale;
        cap_height = face.capital_height().unwrap_or(face.ascender()) as f32 * scale;
        let gb = face.global_bounding_box();
        bbox = [
            gb.x_min as f32 * scale,
            gb.y_min as f32 * scale,
            gb.x_max as f32 * scale,
            gb.y_max as f32 * scale,
        ];
    }
    Some(ArabicFont {
        data,
        units_per_em,
        ascent,
        descent,
        cap_height,
        bbox,
    })
}

/// One positioned glyph of a shaped run, in thousandths of an em.
pub struct ShapedGlyph {
    pub gid: u16,
    pub advance: f32,
    /// First code point of the source cluster, for the ToUnicode map.
    pub ch: char,
}

pub struct ArabicFont {
    data: Vec<u8>,
    units_per_em: u16,
    ascent: f32,
    descent: f32,
    cap_height: f32,
    bbox: [f32; 4],
}

impl ArabicFont {
    /// Shapes a run into glyphs in visual order; rustybuzz handles the
    /// RTL reversal, so callers draw the result left to right.
    pub fn shape(&self, text: &str, rtl: bool) -> Option<Vec<ShapedGlyph>> {
        let face = Face::from_slice(&self.data, 0)?;
        let scale = 1000.0 / self.units_per_em as f32;

        let mut buffer = UnicodeBuffer::new();
        buffer.push_str(text);
        buffer.set_direction(if rtl {
            ShapeDirection::RightToLeft
        } else {
            ShapeDirection::LeftToRight
        });
        let output = rustybuzz::shape(&face, &[], buffer);

        let glyphs = output
            .glyph_infos()
            .iter()
            .zip(output.glyph_positions())
            .map(|(info, pos)| ShapedGlyph {
                gid: info.glyph_id as u16,
                advance: pos.x_advance as f32 * scale,
                ch: text
                    .get(info.cluster as usize..)
                    .and_then(|s| s.chars().next())
                    .unwrap_or('\u{FFFD}'),
            })
            .collect::<Vec<_>>();
        if glyphs.is_empty() {
            None
        } else {
            Some(glyphs)
        }
    }

    /// Shaped width of a run in thousandths of an em.
    pub fn measure(&self, text: &str, rtl: bool) -> Option<f32> {
        Some(self.shape(text, rtl)?.iter().map(|g| g.advance).sum())
    }

    /// Writes the embedded font program and its Type0 wrapper. The widths
    /// array carries the nominal hmtx advances, which is what viewers use
    /// to step through a shown run.
    pub fn write_embedded(&self, pdf: &mut Pdf, refs: &FontRefs, usage: &GlyphUsage) {
        {
            let mut stream = pdf.stream(refs.font_file, &self.data);
            stream.pair(Name(b"Length1"), self.data.len() as i32);
        }

        pdf.font_descriptor(refs.descriptor)
            .name(BASE_FONT)
            .flags(FontFlags::NON_SYMBOLIC)
            .bbox(Rect::new(self.bbox[0], self.bbox[1], self.bbox[2], self.bbox[3]))
            .italic_angle(0.0)
            .ascent(self.ascent)
            .descent(self.descent)
            .cap_height(self.cap_height)
            .stem_v(80.0)
            .font_file2(refs.font_file);

        let face = ttf_parser::Face::parse(&self.data, 0).ok();
        let scale = 1000.0 / self.units_per_em as f32;
        let mut cid = pdf.cid_font(refs.cid);
        cid.subtype(CidFontType::Type2)
            .base_font(BASE_FONT)
            .system_info(SystemInfo {
                registry: Str(b"Adobe"),
                ordering: Str(b"Identity"),
                supplement: 0,
            })
            .font_descriptor(refs.descriptor)
            .default_width(500.0)
            .cid_to_gid_map_predefined(Name(b"Identity"));
        {
            let mut widths = cid.widths();
            for &gid in usage.glyphs.keys() {
                let advance = face
                    .as_ref()
                    .and_then(|f| f.glyph_hor_advance(GlyphId(gid)))
                    .map(|adv| adv as f32 * scale)
                    .unwrap_or(500.0);
                widths.consecutive(gid, [advance]);
            }
        }
        cid.finish();

        let mut cmap = UnicodeCmap::new(
            Name(b"Custom"),
            SystemInfo {
                registry: Str(b"Adobe"),
                ordering: Str(b"UCS"),
                supplement: 0,
            },
        );
        for (&gid, &ch) in &usage.glyphs {
            cmap.pair(gid, ch);
        }
        pdf.cmap(refs.cmap, &cmap.finish());

        pdf.type0_font(refs.type0)
            .base_font(BASE_FONT)
            .encoding_predefined(Name(b"Identity-H"))
            .descendant_font(refs.cid)
            .to_unicode(refs.cmap);
    }
}

/// Object ids reserved for the embedded font.
pub struct FontRefs {
    pub type0: Ref,
    pub cid: Ref,
    pub descriptor: Ref,
    pub font_file: Ref,
    pub cmap: Ref,
}

/// Glyphs actually shown in the document, for the widths array and the
/// ToUnicode map.
#[derive(Default)]
pub struct GlyphUsage {
    glyphs: BTreeMap<u16, char>,
}

impl GlyphUsage {
    pub fn record(&mut self, gid: u16, ch: char) {
        self.glyphs.entry(gid).or_insert(ch);
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_keeps_first_mapping() {
        let mut usage = GlyphUsage::default();
        usage.record(7, 'ب');
        usage.record(7, 'ت');
        assert_eq!(usage.glyphs.get(&7), Some(&'ب'));
    }

    #[test]
    fn test_loaded_font_shapes_arabic() {
        // Host-dependent: only meaningful where an Arabic face exists.
        let Some(font) = arabic() else { return };
        let glyphs = font.shape("مهندس", true).expect("shaped run");
        assert!(!glyphs.is_empty());
        assert!(glyphs.iter().all(|g| g.gid != 0));
        let width = font.measure("مهندس", true).expect("measured run");
        assert!(width > 0.0);
    }
}
