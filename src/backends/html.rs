// src/backends/html.rs
//! Screen/print HTML backend.
//!
//! Emits one self-contained HTML document; pagination is driven entirely
//! by CSS. The sidebar background is a `position: fixed` layer that repeats
//! on every printed page; it is anchored to the edge of the centered page
//! box and capped at the sidebar's share of the 210mm page width, so it
//! stays flush with the logical sidebar on viewports wider than the page.
//! Sections and entries are marked break-avoid so headings and entries are
//! never split across a page boundary.

use tracing::trace;

use crate::layout::{ContactItem, ContactKind, Document, Geometry, Node};
use crate::richtext::{Block, ListKind, Span};
use crate::style::{font_stack, AccentStyle, PhotoShape};
use crate::watermark;

/// Serializes a composed document to a standalone HTML string.
pub fn render(doc: &Document) -> String {
    trace!(
        "Rendering HTML document, direction={:?}, watermark={}",
        doc.direction,
        doc.watermark
    );

    let mut out = String::with_capacity(16 * 1024);
    out.push_str("<!DOCTYPE html>\n");
    out.push_str(&format!(
        "<html lang=\"{}\" dir=\"{}\">\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n",
        doc.direction.locale(),
        doc.direction.dir_attr(),
        esc(&doc.header.name)
    ));
    out.push_str("<style>\n");
    out.push_str(&stylesheet(doc));
    out.push_str("</style>\n</head>\n<body>\n");

    if let Some(frac) = doc.geometry.sidebar_frac() {
        // Capped at the fraction of the 210mm page so the layer tracks the
        // centered page instead of the viewport on wide screens.
        out.push_str(&format!(
            "<div class=\"sidebar-layer\" style=\"width:min({pct}%, {mm}mm)\"></div>\n",
            pct = percent(frac),
            mm = percent(frac * 2.1)
        ));
    }
    if doc.watermark {
        render_watermark(&mut out);
    }

    out.push_str("<div class=\"page\">\n");
    render_header(doc, &mut out);

    match doc.geometry {
        Geometry::SingleColumn => {
            out.push_str("<main class=\"main\">\n");
            for node in &doc.main {
                render_node(node, doc, &mut out);
            }
            out.push_str("</main>\n");
        }
        Geometry::Sidebar { width_frac } => {
            out.push_str("<div class=\"columns\">\n");
            out.push_str(&format!(
                "<aside class=\"sidebar\" style=\"width:{}%\">\n",
                percent(width_frac)
            ));
            for node in &doc.sidebar {
                render_node(node, doc, &mut out);
            }
            out.push_str("</aside>\n<main class=\"main\">\n");
            for node in &doc.main {
                render_node(node, doc, &mut out);
            }
            out.push_str("</main>\n</div>\n");
        }
    }

    out.push_str("</div>\n</body>\n</html>\n");
    out
}

fn percent(frac: f32) -> String {
    format!("{:.1}", frac * 100.0)
}

fn stylesheet(doc: &Document) -> String {
    let style = &doc.style;
    let palette = &style.palette;
    let accent_rule = match style.accent {
        AccentStyle::Underline => format!(
            ".section-title {{ border-bottom: 2px solid {}; padding-bottom: 3px; }}\n",
            palette.accent
        ),
        AccentStyle::StartBar => format!(
            ".section-title {{ border-{}: 3px solid {}; padding-{}: 8px; }}\n",
            doc.direction.start_side(),
            palette.accent,
            doc.direction.start_side()
        ),
        AccentStyle::None => String::new(),
    };
    let photo_radius = match style.photo_shape {
        PhotoShape::Circle => "50%",
        PhotoShape::Rounded => "10px",
        PhotoShape::Square | PhotoShape::Hidden => "0",
    };
    let header_band = if style.header_band {
        format!(
            ".header {{ background: {}; color: #ffffff; padding: 28px 32px; }}\n\
             .header .title, .header .contact {{ color: rgba(255,255,255,0.85); }}\n",
            palette.primary
        )
    } else {
        format!(".header h1 {{ color: {}; }}\n", palette.primary)
    };

    format!(
        "* {{ margin: 0; padding: 0; box-sizing: border-box; }}\n\
         @page {{ size: A4; margin: 0; }}\n\
         html {{ -webkit-print-color-adjust: exact; print-color-adjust: exact; }}\n\
         body {{ font-family: {font}; font-size: {size}pt; color: {text}; \
         line-height: {lh}; text-align: {align}; }}\n\
         .page {{ position: relative; z-index: 1; max-width: 210mm; margin: 0 auto; \
         padding: 14mm 16mm; }}\n\
         .sidebar-layer {{ position: fixed; top: 0; bottom: 0; \
         {side}: max(0px, calc(50% - 105mm)); \
         background: {sidebar_bg}; z-index: 0; }}\n\
         .columns {{ display: flex; gap: 8mm; }}\n\
         .sidebar {{ color: {sidebar_text}; padding: 6mm 4mm; flex-shrink: 0; }}\n\
         .main {{ flex: 1; min-width: 0; }}\n\
         .header {{ display: flex; gap: 8mm; align-items: center; margin-bottom: {gap}pt; \
         break-inside: avoid; page-break-inside: avoid; }}\n\
         .header h1 {{ font-size: 24pt; font-weight: 700; }}\n\
         .header .title {{ font-size: 12pt; color: {muted}; margin-top: 2px; }}\n\
         {header_band}\
         .photo {{ width: 30mm; height: 30mm; object-fit: cover; border-radius: {photo_radius}; }}\n\
         .contact {{ list-style: none; margin-top: 6px; }}\n\
         .contact li {{ display: inline-block; margin-{endside}: 10px; font-size: 9pt; }}\n\
         .section {{ margin-bottom: {gap}pt; break-inside: avoid; page-break-inside: avoid; }}\n\
         .section-title {{ font-size: 12pt; font-weight: 700; color: {primary}; \
         text-transform: uppercase; letter-spacing: 0.06em; margin-bottom: 8px; }}\n\
         {accent_rule}\
         .entry {{ margin-bottom: {entry_gap}pt; break-inside: avoid; page-break-inside: avoid; }}\n\
         .entry-head {{ display: flex; justify-content: space-between; gap: 10px; \
         align-items: baseline; }}\n\
         .entry-head h3 {{ font-size: 11pt; font-weight: 600; }}\n\
         .meta {{ font-size: 9pt; color: {muted}; white-space: nowrap; }}\n\
         .subtitle {{ font-size: 10pt; color: {muted}; margin-bottom: 3px; }}\n\
         .entry p, .entry li, .richtext p, .richtext li {{ margin-bottom: 3px; }}\n\
         .entry ul, .entry ol, .richtext ul, .richtext ol {{ padding-{side}: 16px; \
         margin-bottom: 4px; }}\n\
         .meters {{ list-style: none; }}\n\
         .meters li {{ margin-bottom: 6px; }}\n\
         .meter-label {{ display: block; font-size: 9pt; margin-bottom: 2px; }}\n\
         .meter-track {{ display: block; height: 5px; border-radius: 3px; \
         background: rgba(127,127,127,0.25); overflow: hidden; }}\n\
         .meter-fill {{ display: block; height: 100%; background: {accent}; \
         float: {side}; }}\n\
         .tags {{ list-style: none; }}\n\
         .tags li {{ display: inline-block; border: 1px solid {accent}; border-radius: 10px; \
         padding: 1px 8px; margin: 0 4px 4px 0; font-size: 9pt; }}\n\
         .facts {{ font-size: 9.5pt; }}\n\
         .facts dt {{ font-weight: 600; }}\n\
         .facts dd {{ margin-bottom: 4px; }}\n\
         .wm-layer {{ pointer-events: none; }}\n\
         .wm {{ position: fixed; transform: translate(-50%, -50%) rotate(-{wm_angle}deg); \
         font-size: 56pt; font-weight: 700; color: rgba(120,120,120,0.16); \
         letter-spacing: 0.2em; z-index: 40; pointer-events: none; \
         user-select: none; -webkit-user-select: none; }}\n",
        font = font_stack(doc.direction),
        size = style.base_font_size,
        text = palette.text,
        lh = doc.direction.line_height(),
        align = doc.direction.text_align(),
        side = doc.direction.start_side(),
        endside = doc.direction.end_side(),
        sidebar_bg = palette.sidebar_bg,
        sidebar_text = palette.sidebar_text,
        gap = style.section_gap,
        entry_gap = style.entry_gap,
        muted = palette.muted,
        primary = palette.primary,
        accent = palette.accent,
        header_band = header_band,
        accent_rule = accent_rule,
        photo_radius = photo_radius,
        wm_angle = watermark::ANGLE_DEG,
    )
}

fn render_watermark(out: &mut String) {
    out.push_str("<div class=\"wm-layer\" aria-hidden=\"true\">\n");
    for (x, y) in watermark::MARKS {
        out.push_str(&format!(
            "<div class=\"wm\" style=\"left:{:.0}%;top:{:.0}%\">{}</div>\n",
            x * 100.0,
            y * 100.0,
            watermark::TEXT
        ));
    }
    out.push_str("</div>\n");
}

fn render_header(doc: &Document, out: &mut String) {
    let header = &doc.header;
    out.push_str("<header class=\"header\">\n");
    if let Some(photo) = &header.photo {
        out.push_str(&format!(
            "<img class=\"photo\" src=\"{}\" alt=\"\">\n",
            esc(photo)
        ));
    }
    out.push_str("<div class=\"identity\">\n");
    out.push_str(&format!("<h1>{}</h1>\n", esc(&header.name)));
    if let Some(title) = &header.title {
        out.push_str(&format!("<p class=\"title\">{}</p>\n", esc(title)));
    }
    if !header.contact.is_empty() {
        render_contact(&header.contact, out);
    }
    out.push_str("</div>\n</header>\n");
}

fn render_contact(items: &[ContactItem], out: &mut String) {
    out.push_str("<ul class=\"contact\">\n");
    for item in items {
        out.push_str(&format!(
            "<li class=\"contact-{}\">{}</li>\n",
            contact_class(item.kind),
            esc(&item.value)
        ));
    }
    out.push_str("</ul>\n");
}

fn contact_class(kind: ContactKind) -> &'static str {
    match kind {
        ContactKind::Email => "email",
        ContactKind::Phone => "phone",
        ContactKind::Address => "address",
        ContactKind::Website => "website",
        ContactKind::LinkedIn => "linkedin",
    }
}

fn render_node(node: &Node, doc: &Document, out: &mut String) {
    match node {
        Node::Section {
            title,
            glyph,
            children,
        } => {
            out.push_str("<section class=\"section\">\n");
            let title_text = match glyph {
                Some(glyph) => format!("{} {}", glyph, title),
                None => title.clone(),
            };
            out.push_str(&format!(
                "<h2 class=\"section-title\">{}</h2>\n",
                esc(&title_text)
            ));
            for child in children {
                render_node(child, doc, out);
            }
            out.push_str("</section>\n");
        }
        Node::Entry {
            title,
            subtitle,
            meta,
            body,
            tags,
            ..
        } => {
            out.push_str("<article class=\"entry\">\n<div class=\"entry-head\">\n");
            out.push_str(&format!("<h3>{}</h3>\n", esc(title)));
            if let Some(meta) = meta {
                out.push_str(&format!("<span class=\"meta\">{}</span>\n", esc(meta)));
            }
            out.push_str("</div>\n");
            if let Some(subtitle) = subtitle {
                out.push_str(&format!("<p class=\"subtitle\">{}</p>\n", esc(subtitle)));
            }
            render_blocks(body, out);
            if !tags.is_empty() {
                render_tags(tags, out);
            }
            out.push_str("</article>\n");
        }
        Node::RichText(blocks) => {
            out.push_str("<div class=\"richtext\">\n");
            render_blocks(blocks, out);
            out.push_str("</div>\n");
        }
        Node::Meters(meters) => {
            out.push_str("<ul class=\"meters\">\n");
            for meter in meters {
                out.push_str(&format!(
                    "<li><span class=\"meter-label\">{}</span>\
                     <span class=\"meter-track\"><span class=\"meter-fill\" \
                     style=\"width:{}%\"></span></span></li>\n",
                    esc(&meter.label),
                    meter.percent
                ));
            }
            out.push_str("</ul>\n");
        }
        Node::Tags(tags) => render_tags(tags, out),
        Node::Facts(facts) => {
            out.push_str("<dl class=\"facts\">\n");
            for fact in facts {
                out.push_str(&format!(
                    "<dt>{}</dt><dd>{}</dd>\n",
                    esc(&fact.label),
                    esc(&fact.value)
                ));
            }
            out.push_str("</dl>\n");
        }
        Node::ContactList(items) => render_contact(items, out),
    }
}

fn render_tags(tags: &[String], out: &mut String) {
    out.push_str("<ul class=\"tags\">\n");
    for tag in tags {
        out.push_str(&format!("<li>{}</li>\n", esc(tag)));
    }
    out.push_str("</ul>\n");
}

/// Emits block runs, folding consecutive list items of the same kind into
/// one list element.
fn render_blocks(blocks: &[Block], out: &mut String) {
    let mut open_list: Option<ListKind> = None;
    for block in blocks {
        match block {
            Block::Paragraph(spans) => {
                close_list(&mut open_list, out);
                out.push_str("<p>");
                render_spans(spans, out);
                out.push_str("</p>\n");
            }
            Block::ListItem { kind, spans } => {
                if open_list != Some(*kind) {
                    close_list(&mut open_list, out);
                    out.push_str(match kind {
                        ListKind::Unordered => "<ul>\n",
                        ListKind::Ordered => "<ol>\n",
                    });
                    open_list = Some(*kind);
                }
                out.push_str("<li>");
                render_spans(spans, out);
                out.push_str("</li>\n");
            }
        }
    }
    close_list(&mut open_list, out);
}

fn close_list(open_list: &mut Option<ListKind>, out: &mut String) {
    if let Some(kind) = open_list.take() {
        out.push_str(match kind {
            ListKind::Unordered => "</ul>\n",
            ListKind::Ordered => "</ol>\n",
        });
    }
}

fn render_spans(spans: &[Span], out: &mut String) {
    for span in spans {
        if span.is_line_break() {
            out.push_str("<br>");
            continue;
        }
        if span.bold {
            out.push_str("<strong>");
        }
        if span.italic {
            out.push_str("<em>");
        }
        out.push_str(&esc(&span.text));
        if span.italic {
            out.push_str("</em>");
        }
        if span.bold {
            out.push_str("</strong>");
        }
    }
}

fn esc(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates;
    use crate::types::ResumeData;
    use crate::RenderOptions;

    fn minimal_resume() -> ResumeData {
        let mut data = ResumeData::default();
        data.personal.full_name = "Jane Doe".to_string();
        data
    }

    #[test]
    fn test_escapes_markup_in_data() {
        let mut data = minimal_resume();
        data.personal.full_name = "Jane <script>".to_string();
        let doc = templates::compose_document(
            "classic",
            &data,
            &RenderOptions { watermark: false },
        );
        let html = render(&doc);
        assert!(html.contains("Jane &lt;script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_sidebar_layer_present_only_for_sidebar_templates() {
        let data = minimal_resume();
        let options = RenderOptions { watermark: false };

        let classic = render(&templates::compose_document("classic", &data, &options));
        assert!(!classic.contains("sidebar-layer"));

        let onyx = render(&templates::compose_document("onyx", &data, &options));
        assert!(onyx.contains("sidebar-layer"));
        assert!(onyx.contains("width:min(32.0%, 67.2mm)"));
    }

    #[test]
    fn test_sidebar_layer_anchored_to_centered_page() {
        let data = minimal_resume();
        let html = render(&templates::compose_document(
            "onyx",
            &data,
            &RenderOptions { watermark: false },
        ));
        // The layer must follow the page box, not the viewport edge, so it
        // stays flush with the sidebar on screens wider than the page.
        assert!(html.contains("max(0px, calc(50% - 105mm))"));
        assert!(!html.contains("left: 0;"));
    }

    #[test]
    fn test_rtl_document_sets_dir_and_alignment() {
        let mut data = ResumeData::default();
        data.personal.full_name = "أحمد محمد".to_string();
        let doc = templates::compose_document(
            "classic",
            &data,
            &RenderOptions { watermark: false },
        );
        let html = render(&doc);
        assert!(html.contains("dir=\"rtl\""));
        assert!(html.contains("text-align: right"));
    }

    #[test]
    fn test_watermark_marks_count() {
        let data = minimal_resume();
        let with = render(&templates::compose_document(
            "classic",
            &data,
            &RenderOptions { watermark: true },
        ));
        let without = render(&templates::compose_document(
            "classic",
            &data,
            &RenderOptions { watermark: false },
        ));
        assert_eq!(with.matches("class=\"wm\"").count(), 5);
        assert_eq!(without.matches("class=\"wm\"").count(), 0);
    }

    #[test]
    fn test_break_avoid_rules_present() {
        let data = minimal_resume();
        let html = render(&templates::compose_document(
            "classic",
            &data,
            &RenderOptions { watermark: false },
        ));
        assert!(html.contains("break-inside: avoid"));
    }
}
