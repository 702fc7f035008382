// src/backends/pdf.rs
//! Paginated vector PDF backend.
//!
//! This backend owns its measurement and pagination model; it shares the
//! composed `Document` and the rich-text block tree with the HTML backend
//! but none of its layout logic. Text is measured with an average
//! character-width estimate against the base-14 Helvetica faces, content
//! flows into per-column page slots, and repeating chrome (sidebar
//! background, watermark) is replayed on every physical page.
//!
//! Entries are kept together across page breaks, with one deliberate
//! exception: the first entry of a section that shares a page with its
//! section title may break, so a title is never orphaned with zero content
//! beneath it.
//!
//! Serialization failure here is the engine's one hard-error class; there
//! is no safe degraded PDF to return.

use anyhow::{bail, Context as _, Result};
use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};
use tracing::{debug, trace};

use super::typeface::{self, ArabicFont, FontRefs, GlyphUsage};
use crate::direction::{contains_rtl, Direction};
use crate::layout::{ContactItem, Document, Fact, Geometry, Header, Meter, Node};
use crate::richtext::{Block, ListKind, Span};
use crate::style::{hex_to_rgb, AccentStyle, PhotoShape};
use crate::watermark;

const PAGE_WIDTH: f32 = 595.276;
const PAGE_HEIGHT: f32 = 841.89;
const MARGIN_TOP: f32 = 46.0;
const MARGIN_BOTTOM: f32 = 46.0;
const MARGIN_SIDE: f32 = 44.0;
const COLUMN_GAP: f32 = 18.0;
const SIDEBAR_PAD: f32 = 14.0;
const HEADER_BAND_HEIGHT: f32 = 108.0;

/// Hard ceiling; hitting it means the layout ran away, which is a backend
/// fault, not an input-shape problem.
const MAX_PAGES: usize = 200;

const FONT_REGULAR: Name<'static> = Name(b"F1");
const FONT_BOLD: Name<'static> = Name(b"F2");
const FONT_OBLIQUE: Name<'static> = Name(b"F3");
const FONT_BOLD_OBLIQUE: Name<'static> = Name(b"F4");
/// Embedded Arabic face; only referenced when the document carries RTL text.
const FONT_ARABIC: Name<'static> = Name(b"F5");
const GS_WATERMARK: Name<'static> = Name(b"GS1");

/// Serializes a composed document to PDF bytes.
///
/// The serialization step is CPU-bound, so it runs on the blocking pool;
/// callers await it to completion before treating the bytes as final.
pub async fn render(doc: Document) -> Result<Vec<u8>> {
    tokio::task::spawn_blocking(move || render_sync(&doc))
        .await
        .context("PDF serialization task failed")?
}

pub(crate) fn render_sync(doc: &Document) -> Result<Vec<u8>> {
    trace!(
        "Rendering PDF document, direction={:?}, watermark={}",
        doc.direction,
        doc.watermark
    );
    let layout = LayoutPass::run(doc)?;
    debug!("PDF layout produced {} page(s)", layout.page_count);
    Ok(serialize(doc, &layout))
}

// ===== Measurement =====

/// Average-width estimate for the Helvetica faces; exact metrics are not
/// needed because the wrap width only feeds pagination, not glyph
/// placement.
fn text_width(text: &str, size: f32, bold: bool) -> f32 {
    let factor = if bold { 0.56 } else { 0.52 };
    text.chars().count() as f32 * size * factor
}

fn font_for(bold: bool, italic: bool) -> Name<'static> {
    match (bold, italic) {
        (false, false) => FONT_REGULAR,
        (true, false) => FONT_BOLD,
        (false, true) => FONT_OBLIQUE,
        (true, true) => FONT_BOLD_OBLIQUE,
    }
}

/// Lossy WinAnsi-style mapping; glyphs outside Latin-1 degrade to '?'.
fn encode_text(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{0000}'..='\u{00FF}' => c as u8,
            '\u{2013}' => 0x96, // en dash
            '\u{2014}' => 0x97, // em dash
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95, // bullet
            '\u{2026}' => 0x85, // ellipsis
            '\u{00B7}' | '\u{2219}' => 0xB7,
            _ => b'?',
        })
        .collect()
}

// ===== Layout model =====

#[derive(Debug, Clone)]
struct Seg {
    text: String,
    bold: bool,
    italic: bool,
}

#[derive(Debug, Clone)]
struct TextLine {
    segs: Vec<Seg>,
    /// Drawn at the end side of the column (entry date lines).
    trailing: Option<Seg>,
    size: f32,
    rgb: (f32, f32, f32),
    /// Indent from the start side, for list bullets.
    indent: f32,
}

#[derive(Debug, Clone)]
enum AtomKind {
    Line(TextLine),
    /// Meter track and fill, anchored to the start side.
    Bar { percent: u8, rgb: (f32, f32, f32) },
    /// Accent rule under a section title.
    Rule { rgb: (f32, f32, f32) },
    /// Photo placeholder disc with initials; the PDF backend renders
    /// initials instead of decoding image bytes.
    Avatar { initials: String },
    Gap,
}

#[derive(Debug, Clone)]
struct Atom {
    height: f32,
    kind: AtomKind,
}

impl Atom {
    fn gap(height: f32) -> Self {
        Atom {
            height,
            kind: AtomKind::Gap,
        }
    }
}

/// Keep policy for a run of atoms.
#[derive(Debug, Clone, Copy, PartialEq)]
enum KeepPolicy {
    /// Page-break before the chunk rather than splitting it.
    Together,
    /// Atoms may flow across page boundaries.
    Flow,
}

#[derive(Debug, Clone)]
struct Chunk {
    atoms: Vec<Atom>,
    keep: KeepPolicy,
    /// Extra room required after the chunk before it may be placed; used
    /// by section titles so they are never orphaned at a page bottom.
    min_follow: f32,
}

impl Chunk {
    fn height(&self) -> f32 {
        self.atoms.iter().map(|a| a.height).sum()
    }
}

#[derive(Debug, Clone, Copy)]
struct Column {
    x: f32,
    width: f32,
    top: f32,
}

#[derive(Debug)]
struct PlacedAtom {
    page: usize,
    /// Top edge, in top-down page coordinates.
    y: f32,
    column: Column,
    atom: Atom,
}

struct LayoutPass {
    placed: Vec<PlacedAtom>,
    page_count: usize,
}

impl LayoutPass {
    fn run(doc: &Document) -> Result<LayoutPass> {
        let (sidebar_col, main_col) = columns(doc);

        let mut placed = Vec::new();
        let mut max_page = 0usize;

        let mut main_chunks = header_chunks(doc, main_col.width);
        main_chunks.extend(region_chunks(&doc.main, doc, main_col.width, false));
        max_page = max_page.max(place_chunks(&main_chunks, main_col, &mut placed)?);

        if let Some(col) = sidebar_col {
            let sidebar_chunks = region_chunks(&doc.sidebar, doc, col.width, true);
            max_page = max_page.max(place_chunks(&sidebar_chunks, col, &mut placed)?);
        }

        Ok(LayoutPass {
            placed,
            page_count: max_page + 1,
        })
    }
}

/// Resolves column geometry from the page fraction in the style table; the
/// sidebar sits on the start side of the resolved direction.
fn columns(doc: &Document) -> (Option<Column>, Column) {
    match doc.geometry {
        Geometry::SingleColumn => (
            None,
            Column {
                x: MARGIN_SIDE,
                width: PAGE_WIDTH - 2.0 * MARGIN_SIDE,
                top: MARGIN_TOP,
            },
        ),
        Geometry::Sidebar { width_frac } => {
            let sidebar_width = PAGE_WIDTH * width_frac;
            let inner_sidebar = Column {
                x: if doc.direction.is_rtl() {
                    PAGE_WIDTH - sidebar_width + SIDEBAR_PAD
                } else {
                    SIDEBAR_PAD
                },
                width: sidebar_width - 2.0 * SIDEBAR_PAD,
                top: MARGIN_TOP,
            };
            let main = Column {
                x: if doc.direction.is_rtl() {
                    MARGIN_SIDE
                } else {
                    sidebar_width + COLUMN_GAP
                },
                width: PAGE_WIDTH - sidebar_width - COLUMN_GAP - MARGIN_SIDE,
                top: MARGIN_TOP,
            };
            (Some(inner_sidebar), main)
        }
    }
}

fn place_chunks(chunks: &[Chunk], column: Column, placed: &mut Vec<PlacedAtom>) -> Result<usize> {
    let usable = PAGE_HEIGHT - MARGIN_BOTTOM;
    let mut page = 0usize;
    let mut y = column.top;

    for chunk in chunks {
        let height = chunk.height();
        let fits_whole_column = height + chunk.min_follow <= usable - column.top;
        let overflows_here = y + height + chunk.min_follow > usable;

        let must_break = match chunk.keep {
            KeepPolicy::Together => overflows_here && fits_whole_column,
            // Flow chunks only break early for the orphan-title guard.
            KeepPolicy::Flow => chunk.min_follow > 0.0 && overflows_here && fits_whole_column,
        };
        if must_break {
            page += 1;
            y = column.top;
        }

        for atom in &chunk.atoms {
            if y + atom.height > usable && atom.height <= usable - column.top {
                page += 1;
                y = column.top;
                if page > MAX_PAGES {
                    bail!("PDF layout exceeded {} pages", MAX_PAGES);
                }
            }
            placed.push(PlacedAtom {
                page,
                y,
                column,
                atom: atom.clone(),
            });
            y += atom.height;
        }
        if page > MAX_PAGES {
            bail!("PDF layout exceeded {} pages", MAX_PAGES);
        }
    }
    Ok(page)
}

// ===== Node flattening =====

fn line_height(size: f32, direction: Direction) -> f32 {
    size * direction.line_height()
}

/// Greedy word wrap over styled spans.
fn wrap_spans(
    spans: &[Span],
    size: f32,
    rgb: (f32, f32, f32),
    max_width: f32,
    indent: f32,
) -> Vec<TextLine> {
    let mut words: Vec<Seg> = Vec::new();
    for span in spans {
        if span.is_line_break() {
            words.push(Seg {
                text: "\n".to_string(),
                bold: false,
                italic: false,
            });
            continue;
        }
        for word in span.text.split_whitespace() {
            words.push(Seg {
                text: word.to_string(),
                bold: span.bold,
                italic: span.italic,
            });
        }
    }

    let avail = (max_width - indent).max(size);
    let mut lines = Vec::new();
    let mut current: Vec<Seg> = Vec::new();
    let mut current_width = 0.0f32;

    let mut flush = |current: &mut Vec<Seg>, current_width: &mut f32, lines: &mut Vec<TextLine>| {
        if !current.is_empty() {
            lines.push(TextLine {
                segs: std::mem::take(current),
                trailing: None,
                size,
                rgb,
                indent,
            });
            *current_width = 0.0;
        }
    };

    for word in words {
        if word.text == "\n" {
            flush(&mut current, &mut current_width, &mut lines);
            continue;
        }
        let word_width = text_width(&word.text, size, word.bold);
        let space = if current.is_empty() {
            0.0
        } else {
            text_width(" ", size, false)
        };
        if !current.is_empty() && current_width + space + word_width > avail {
            flush(&mut current, &mut current_width, &mut lines);
        }
        if let Some(last) = current.last_mut() {
            if last.bold == word.bold && last.italic == word.italic {
                last.text.push(' ');
                last.text.push_str(&word.text);
            } else {
                current.push(Seg {
                    text: format!(" {}", word.text),
                    ..word
                });
            }
        } else {
            current.push(word);
        }
        current_width += space + word_width;
    }
    flush(&mut current, &mut current_width, &mut lines);
    lines
}

fn plain_line(
    text: &str,
    size: f32,
    rgb: (f32, f32, f32),
    bold: bool,
    max_width: f32,
) -> Vec<TextLine> {
    let span = Span {
        text: text.to_string(),
        bold,
        italic: false,
    };
    wrap_spans(std::slice::from_ref(&span), size, rgb, max_width, 0.0)
}

fn lines_to_atoms(lines: Vec<TextLine>, direction: Direction) -> Vec<Atom> {
    lines
        .into_iter()
        .map(|line| Atom {
            height: line_height(line.size, direction),
            kind: AtomKind::Line(line),
        })
        .collect()
}

fn block_atoms(
    blocks: &[Block],
    doc: &Document,
    width: f32,
    rgb: (f32, f32, f32),
) -> Vec<Atom> {
    let size = doc.style.base_font_size;
    let mut atoms = Vec::new();
    let mut ordinal = 0usize;
    for block in blocks {
        match block {
            Block::Paragraph(spans) => {
                ordinal = 0;
                atoms.extend(lines_to_atoms(
                    wrap_spans(spans, size, rgb, width, 0.0),
                    doc.direction,
                ));
                atoms.push(Atom::gap(2.0));
            }
            Block::ListItem { kind, spans } => {
                let marker = match kind {
                    ListKind::Unordered => "\u{2022}".to_string(),
                    ListKind::Ordered => {
                        ordinal += 1;
                        format!("{}.", ordinal)
                    }
                };
                let indent = size * 1.2;
                let mut lines = wrap_spans(spans, size, rgb, width, indent);
                if let Some(first) = lines.first_mut() {
                    first.segs.insert(
                        0,
                        Seg {
                            text: format!("{} ", marker),
                            bold: false,
                            italic: false,
                        },
                    );
                    first.indent = 0.0;
                }
                atoms.extend(lines_to_atoms(lines, doc.direction));
            }
        }
    }
    atoms
}

fn entry_chunk(
    title: &str,
    subtitle: &Option<String>,
    meta: &Option<String>,
    body: &[Block],
    tags: &[String],
    doc: &Document,
    width: f32,
    in_sidebar: bool,
    first_in_section: bool,
) -> Chunk {
    let style = &doc.style;
    let text_rgb = region_text(doc, in_sidebar);
    let muted_rgb = hex_to_rgb(style.palette.muted);
    let size = style.base_font_size;

    let mut atoms = Vec::new();
    let mut title_lines = plain_line(title, size + 1.0, text_rgb, true, width);
    if let Some(meta) = meta {
        if let Some(first) = title_lines.first_mut() {
            first.trailing = Some(Seg {
                text: meta.clone(),
                bold: false,
                italic: false,
            });
        } else {
            title_lines = plain_line(meta, size - 0.5, muted_rgb, false, width);
        }
    }
    atoms.extend(lines_to_atoms(title_lines, doc.direction));
    if let Some(subtitle) = subtitle {
        atoms.extend(lines_to_atoms(
            plain_line(subtitle, size, muted_rgb, false, width),
            doc.direction,
        ));
    }
    atoms.extend(block_atoms(body, doc, width, text_rgb));
    if !tags.is_empty() {
        let joined = tags.join(" \u{00B7} ");
        atoms.extend(lines_to_atoms(
            plain_line(&joined, size - 0.5, muted_rgb, false, width),
            doc.direction,
        ));
    }
    atoms.push(Atom::gap(style.entry_gap));

    Chunk {
        atoms,
        // The first entry under a section title is allowed to break so the
        // title is never left alone at the bottom of a page.
        keep: if first_in_section {
            KeepPolicy::Flow
        } else {
            KeepPolicy::Together
        },
        min_follow: 0.0,
    }
}

fn region_text(doc: &Document, in_sidebar: bool) -> (f32, f32, f32) {
    if in_sidebar {
        hex_to_rgb(doc.style.palette.sidebar_text)
    } else {
        hex_to_rgb(doc.style.palette.text)
    }
}

fn region_chunks(nodes: &[Node], doc: &Document, width: f32, in_sidebar: bool) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    for node in nodes {
        flatten_node(node, doc, width, in_sidebar, &mut chunks);
    }
    chunks
}

fn flatten_node(
    node: &Node,
    doc: &Document,
    width: f32,
    in_sidebar: bool,
    chunks: &mut Vec<Chunk>,
) {
    let style = &doc.style;
    let size = style.base_font_size;
    let text_rgb = region_text(doc, in_sidebar);
    let primary_rgb = if in_sidebar {
        hex_to_rgb(style.palette.sidebar_text)
    } else {
        hex_to_rgb(style.palette.primary)
    };

    match node {
        Node::Section {
            title,
            glyph,
            children,
        } => {
            let title_text = match glyph {
                Some(glyph) => format!("{} {}", glyph, title),
                None => title.clone(),
            };
            let mut atoms = vec![Atom::gap(style.section_gap * 0.4)];
            atoms.extend(lines_to_atoms(
                plain_line(&title_text.to_uppercase(), size + 2.0, primary_rgb, true, width),
                doc.direction,
            ));
            if style.accent != AccentStyle::None {
                atoms.push(Atom {
                    height: 6.0,
                    kind: AtomKind::Rule {
                        rgb: hex_to_rgb(style.palette.accent),
                    },
                });
            } else {
                atoms.push(Atom::gap(4.0));
            }
            chunks.push(Chunk {
                atoms,
                keep: KeepPolicy::Flow,
                // Never strand a title: require room for two body lines.
                min_follow: line_height(size, doc.direction) * 2.0,
            });
            for child in children {
                flatten_node(child, doc, width, in_sidebar, chunks);
            }
            chunks.push(Chunk {
                atoms: vec![Atom::gap(style.section_gap * 0.6)],
                keep: KeepPolicy::Flow,
                min_follow: 0.0,
            });
        }
        Node::Entry {
            title,
            subtitle,
            meta,
            body,
            tags,
            first_in_section,
        } => {
            chunks.push(entry_chunk(
                title,
                subtitle,
                meta,
                body,
                tags,
                doc,
                width,
                in_sidebar,
                *first_in_section,
            ));
        }
        Node::RichText(blocks) => {
            chunks.push(Chunk {
                atoms: block_atoms(blocks, doc, width, text_rgb),
                keep: KeepPolicy::Flow,
                min_follow: 0.0,
            });
        }
        Node::Meters(meters) => {
            for meter in meters {
                chunks.push(meter_chunk(meter, doc, width, text_rgb));
            }
        }
        Node::Tags(tags) => {
            let joined = tags.join(" \u{00B7} ");
            chunks.push(Chunk {
                atoms: lines_to_atoms(
                    plain_line(&joined, size, text_rgb, false, width),
                    doc.direction,
                ),
                keep: KeepPolicy::Flow,
                min_follow: 0.0,
            });
        }
        Node::Facts(facts) => {
            let mut atoms = Vec::new();
            for Fact { label, value } in facts {
                let spans = [
                    Span {
                        text: format!("{}: ", label),
                        bold: true,
                        italic: false,
                    },
                    Span {
                        text: value.clone(),
                        bold: false,
                        italic: false,
                    },
                ];
                atoms.extend(lines_to_atoms(
                    wrap_spans(&spans, size, text_rgb, width, 0.0),
                    doc.direction,
                ));
                atoms.push(Atom::gap(1.5));
            }
            chunks.push(Chunk {
                atoms,
                keep: KeepPolicy::Flow,
                min_follow: 0.0,
            });
        }
        Node::ContactList(items) => {
            let mut atoms = Vec::new();
            for ContactItem { value, .. } in items {
                atoms.extend(lines_to_atoms(
                    plain_line(value, size, text_rgb, false, width),
                    doc.direction,
                ));
                atoms.push(Atom::gap(1.5));
            }
            chunks.push(Chunk {
                atoms,
                keep: KeepPolicy::Flow,
                min_follow: 0.0,
            });
        }
    }
}

/// Each meter row keeps its label and bar together.
fn meter_chunk(meter: &Meter, doc: &Document, width: f32, rgb: (f32, f32, f32)) -> Chunk {
    let size = doc.style.base_font_size - 0.5;
    let mut atoms = lines_to_atoms(
        plain_line(&meter.label, size, rgb, false, width),
        doc.direction,
    );
    atoms.push(Atom {
        height: 9.0,
        kind: AtomKind::Bar {
            percent: meter.percent,
            rgb: hex_to_rgb(doc.style.palette.accent),
        },
    });
    Chunk {
        atoms,
        keep: KeepPolicy::Together,
        min_follow: 0.0,
    }
}

fn header_chunks(doc: &Document, width: f32) -> Vec<Chunk> {
    let Header {
        name,
        title,
        contact,
        photo,
    } = &doc.header;
    let style = &doc.style;
    let name_rgb = if style.header_band {
        (1.0, 1.0, 1.0)
    } else {
        hex_to_rgb(style.palette.primary)
    };
    let muted_rgb = if style.header_band {
        (0.92, 0.92, 0.96)
    } else {
        hex_to_rgb(style.palette.muted)
    };

    let mut atoms = Vec::new();
    if style.header_band {
        atoms.push(Atom::gap(14.0));
    }
    if photo.is_some() && style.photo_shape != PhotoShape::Hidden {
        atoms.push(Atom {
            height: 58.0,
            kind: AtomKind::Avatar {
                initials: initials(name),
            },
        });
    }
    atoms.extend(lines_to_atoms(
        plain_line(name, 22.0, name_rgb, true, width),
        doc.direction,
    ));
    if let Some(title) = title {
        atoms.extend(lines_to_atoms(
            plain_line(title, 12.0, muted_rgb, false, width),
            doc.direction,
        ));
    }
    if !contact.is_empty() {
        let joined = contact
            .iter()
            .map(|item| item.value.as_str())
            .collect::<Vec<_>>()
            .join("  \u{00B7}  ");
        atoms.extend(lines_to_atoms(
            plain_line(&joined, 9.0, muted_rgb, false, width),
            doc.direction,
        ));
    }
    atoms.push(Atom::gap(style.section_gap));

    vec![Chunk {
        atoms,
        keep: KeepPolicy::Flow,
        min_follow: 0.0,
    }]
}

fn initials(name: &str) -> String {
    name.split_whitespace()
        .take(2)
        .filter_map(|word| word.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

// ===== Serialization =====

/// True when any drawn text needs glyphs outside the Latin faces.
fn needs_arabic_face(layout: &LayoutPass) -> bool {
    layout.placed.iter().any(|placed| match &placed.atom.kind {
        AtomKind::Line(line) => {
            line.segs.iter().any(|seg| contains_rtl(&seg.text))
                || line
                    .trailing
                    .as_ref()
                    .is_some_and(|t| contains_rtl(&t.text))
        }
        AtomKind::Avatar { initials } => contains_rtl(initials),
        _ => false,
    })
}

fn serialize(doc: &Document, layout: &LayoutPass) -> Vec<u8> {
    let mut pdf = Pdf::new();
    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let font_ids = [Ref::new(3), Ref::new(4), Ref::new(5), Ref::new(6)];
    let gs_id = Ref::new(7);
    let arabic_refs = FontRefs {
        type0: Ref::new(8),
        cid: Ref::new(9),
        descriptor: Ref::new(10),
        font_file: Ref::new(11),
        cmap: Ref::new(12),
    };
    let mut next_id = 13;

    let arabic = if needs_arabic_face(layout) {
        typeface::arabic()
    } else {
        None
    };
    let mut usage = GlyphUsage::default();

    pdf.catalog(catalog_id).pages(page_tree_id);
    for (font_id, base) in font_ids.iter().zip([
        "Helvetica",
        "Helvetica-Bold",
        "Helvetica-Oblique",
        "Helvetica-BoldOblique",
    ]) {
        pdf.type1_font(*font_id).base_font(Name(base.as_bytes()));
    }
    pdf.ext_graphics(gs_id)
        .non_stroking_alpha(0.14)
        .stroking_alpha(0.14);

    let mut page_ids = Vec::with_capacity(layout.page_count);
    for page_index in 0..layout.page_count {
        let page_id = Ref::new(next_id);
        let content_id = Ref::new(next_id + 1);
        next_id += 2;
        page_ids.push(page_id);

        let mut content = Content::new();
        draw_chrome(&mut content, doc, page_index);
        for placed in layout.placed.iter().filter(|p| p.page == page_index) {
            draw_atom(&mut content, doc, placed, arabic, &mut usage);
        }
        if doc.watermark {
            draw_watermark(&mut content);
        }
        pdf.stream(content_id, &content.finish());

        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, PAGE_WIDTH, PAGE_HEIGHT));
        page.parent(page_tree_id);
        page.contents(content_id);
        {
            let mut resources = page.resources();
            {
                let mut fonts = resources.fonts();
                fonts.pair(FONT_REGULAR, font_ids[0]);
                fonts.pair(FONT_BOLD, font_ids[1]);
                fonts.pair(FONT_OBLIQUE, font_ids[2]);
                fonts.pair(FONT_BOLD_OBLIQUE, font_ids[3]);
                if arabic.is_some() {
                    fonts.pair(FONT_ARABIC, arabic_refs.type0);
                }
            }
            resources.ext_g_states().pair(GS_WATERMARK, gs_id);
        }
        page.finish();
    }

    if let Some(font) = arabic {
        font.write_embedded(&mut pdf, &arabic_refs, &usage);
    }

    pdf.pages(page_tree_id)
        .kids(page_ids.iter().copied())
        .count(layout.page_count as i32);
    pdf.finish()
}

/// Repeating per-page chrome: sidebar background on every page, header
/// band on the first.
fn draw_chrome(content: &mut Content, doc: &Document, page_index: usize) {
    if let Geometry::Sidebar { width_frac } = doc.geometry {
        let width = PAGE_WIDTH * width_frac;
        let x = if doc.direction.is_rtl() {
            PAGE_WIDTH - width
        } else {
            0.0
        };
        let (r, g, b) = hex_to_rgb(doc.style.palette.sidebar_bg);
        content.save_state();
        content.set_fill_rgb(r, g, b);
        content.rect(x, 0.0, width, PAGE_HEIGHT);
        content.fill_nonzero();
        content.restore_state();
    }
    if doc.style.header_band && page_index == 0 {
        let (r, g, b) = hex_to_rgb(doc.style.palette.primary);
        content.save_state();
        content.set_fill_rgb(r, g, b);
        content.rect(0.0, PAGE_HEIGHT - HEADER_BAND_HEIGHT, PAGE_WIDTH, HEADER_BAND_HEIGHT);
        content.fill_nonzero();
        content.restore_state();
    }
}

/// Five translucent diagonal marks at fixed relative positions, drawn
/// above all content.
fn draw_watermark(content: &mut Content) {
    let angle = watermark::ANGLE_DEG.to_radians();
    let (sin, cos) = angle.sin_cos();
    let size = 46.0;
    let text_w = text_width(watermark::TEXT, size, true);

    for (rx, ry) in watermark::MARKS {
        let x = rx * PAGE_WIDTH;
        let y = PAGE_HEIGHT - ry * PAGE_HEIGHT;
        content.save_state();
        content.set_parameters(GS_WATERMARK);
        content.transform([cos, sin, -sin, cos, x, y]);
        content.begin_text();
        content.set_font(FONT_BOLD, size);
        content.set_fill_rgb(0.45, 0.45, 0.45);
        content.next_line(-text_w / 2.0, 0.0);
        content.show(Str(watermark::TEXT.as_bytes()));
        content.end_text();
        content.restore_state();
    }
}

fn draw_atom(
    content: &mut Content,
    doc: &Document,
    placed: &PlacedAtom,
    arabic: Option<&ArabicFont>,
    usage: &mut GlyphUsage,
) {
    let col = placed.column;
    match &placed.atom.kind {
        AtomKind::Line(line) => draw_line(content, doc, line, col, placed.y, arabic, usage),
        AtomKind::Bar { percent, rgb } => {
            let track_h = 3.5;
            let y = PAGE_HEIGHT - placed.y - track_h;
            let fill_w = col.width * (*percent as f32 / 100.0);
            let (r, g, b) = *rgb;
            content.save_state();
            content.set_fill_rgb(0.82, 0.82, 0.82);
            content.rect(col.x, y, col.width, track_h);
            content.fill_nonzero();
            content.set_fill_rgb(r, g, b);
            let fill_x = if doc.direction.is_rtl() {
                col.x + col.width - fill_w
            } else {
                col.x
            };
            content.rect(fill_x, y, fill_w, track_h);
            content.fill_nonzero();
            content.restore_state();
        }
        AtomKind::Rule { rgb } => {
            let (r, g, b) = *rgb;
            let y = PAGE_HEIGHT - placed.y - 2.0;
            content.save_state();
            content.set_fill_rgb(r, g, b);
            content.rect(col.x, y, col.width, 1.5);
            content.fill_nonzero();
            content.restore_state();
        }
        AtomKind::Avatar { initials } => {
            draw_avatar(content, doc, initials, col, placed.y, arabic, usage);
        }
        AtomKind::Gap => {}
    }
}

/// Width of one styled run, using the shaped Arabic width when the run
/// carries RTL text and an embedded face is available.
fn run_width(text: &str, size: f32, bold: bool, arabic: Option<&ArabicFont>) -> f32 {
    if contains_rtl(text) {
        if let Some(w) = arabic.and_then(|font| font.measure(text, true)) {
            return w * size / 1000.0;
        }
    }
    text_width(text, size, bold)
}

/// Shows one styled run at `x`/`baseline`. RTL runs go through the embedded
/// Arabic face as shaped glyph ids (rustybuzz already emits them in visual
/// order); everything else takes the WinAnsi path.
#[allow(clippy::too_many_arguments)]
fn show_run(
    content: &mut Content,
    text: &str,
    size: f32,
    bold: bool,
    italic: bool,
    rgb: (f32, f32, f32),
    x: f32,
    baseline: f32,
    arabic: Option<&ArabicFont>,
    usage: &mut GlyphUsage,
) {
    let (r, g, b) = rgb;
    if contains_rtl(text) {
        if let Some(glyphs) = arabic.and_then(|font| font.shape(text, true)) {
            let mut bytes = Vec::with_capacity(glyphs.len() * 2);
            for glyph in &glyphs {
                bytes.extend_from_slice(&glyph.gid.to_be_bytes());
                usage.record(glyph.gid, glyph.ch);
            }
            content.begin_text();
            content.set_font(FONT_ARABIC, size);
            content.set_fill_rgb(r, g, b);
            content.next_line(x, baseline);
            content.show(Str(&bytes));
            content.end_text();
            return;
        }
    }
    content.begin_text();
    content.set_font(font_for(bold, italic), size);
    content.set_fill_rgb(r, g, b);
    content.next_line(x, baseline);
    content.show(Str(&encode_text(text)));
    content.end_text();
}

fn draw_line(
    content: &mut Content,
    doc: &Document,
    line: &TextLine,
    col: Column,
    y_top: f32,
    arabic: Option<&ArabicFont>,
    usage: &mut GlyphUsage,
) {
    let baseline = PAGE_HEIGHT - y_top - line.size;
    let line_w: f32 = line
        .segs
        .iter()
        .map(|seg| run_width(&seg.text, line.size, seg.bold, arabic))
        .sum();

    let mut x = if doc.direction.is_rtl() {
        col.x + col.width - line.indent - line_w
    } else {
        col.x + line.indent
    };

    for seg in &line.segs {
        show_run(
            content, &seg.text, line.size, seg.bold, seg.italic, line.rgb, x, baseline, arabic,
            usage,
        );
        x += run_width(&seg.text, line.size, seg.bold, arabic);
    }

    if let Some(trailing) = &line.trailing {
        let size = line.size - 1.5;
        let w = run_width(&trailing.text, size, trailing.bold, arabic);
        let tx = if doc.direction.is_rtl() {
            col.x
        } else {
            col.x + col.width - w
        };
        let muted = hex_to_rgb(doc.style.palette.muted);
        show_run(
            content,
            &trailing.text,
            size,
            trailing.bold,
            trailing.italic,
            muted,
            tx,
            baseline,
            arabic,
            usage,
        );
    }
}

/// Photo slot stand-in: a filled disc (or rounded square) with the
/// person's initials.
fn draw_avatar(
    content: &mut Content,
    doc: &Document,
    initials: &str,
    col: Column,
    y_top: f32,
    arabic: Option<&ArabicFont>,
    usage: &mut GlyphUsage,
) {
    let diameter = 50.0;
    let radius = diameter / 2.0;
    let cx = if doc.direction.is_rtl() {
        col.x + col.width - radius
    } else {
        col.x + radius
    };
    let cy = PAGE_HEIGHT - y_top - radius;
    let (r, g, b) = hex_to_rgb(doc.style.palette.accent);

    content.save_state();
    content.set_fill_rgb(r, g, b);
    match doc.style.photo_shape {
        PhotoShape::Circle => {
            // Cubic approximation of a circle.
            let k = 0.5523 * radius;
            content.move_to(cx + radius, cy);
            content.cubic_to(cx + radius, cy + k, cx + k, cy + radius, cx, cy + radius);
            content.cubic_to(cx - k, cy + radius, cx - radius, cy + k, cx - radius, cy);
            content.cubic_to(cx - radius, cy - k, cx - k, cy - radius, cx, cy - radius);
            content.cubic_to(cx + k, cy - radius, cx + radius, cy - k, cx + radius, cy);
            content.close_path();
            content.fill_nonzero();
        }
        _ => {
            content.rect(cx - radius, cy - radius, diameter, diameter);
            content.fill_nonzero();
        }
    }

    let size = 18.0;
    let w = run_width(initials, size, true, arabic);
    show_run(
        content,
        initials,
        size,
        true,
        false,
        (1.0, 1.0, 1.0),
        cx - w / 2.0,
        cy - size * 0.35,
        arabic,
        usage,
    );
    content.restore_state();
}
