// src/richtext.rs
//! Rich-text-to-block parser.
//!
//! Resume fields like job descriptions arrive as a constrained HTML subset
//! (`p`, `ul`/`ol`/`li`, `b`/`strong`, `i`/`em`, `br`), pre-sanitized
//! upstream. The HTML backend could inject that markup directly, but the
//! PDF backend has no HTML interpreter, so both consume the block tree
//! produced here instead. Parsing is tolerant: malformed markup degrades to
//! plain-text blocks, it never errors.

use scraper::{ElementRef, Html};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Unordered,
    Ordered,
}

/// A run of text with uniform inline styling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
}

impl Span {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            bold: false,
            italic: false,
        }
    }

    /// Explicit line break inside a paragraph.
    pub fn line_break() -> Self {
        Self::plain("\n")
    }

    pub fn is_line_break(&self) -> bool {
        self.text == "\n"
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(Vec<Span>),
    ListItem { kind: ListKind, spans: Vec<Span> },
}

/// Parses a rich-text fragment into the block tree shared by both backends.
pub fn parse_rich_text(input: &str) -> Vec<Block> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    // Fast path: no markup at all.
    if !trimmed.contains('<') {
        return vec![Block::Paragraph(vec![Span::plain(trimmed)])];
    }

    let fragment = Html::parse_fragment(trimmed);
    let mut blocks = Vec::new();
    let mut pending = Vec::new();

    for child in fragment.root_element().children() {
        if let Some(text) = child.value().as_text() {
            push_text(&mut pending, &text.text, false, false);
        } else if let Some(element) = ElementRef::wrap(child) {
            walk_block(element, &mut blocks, &mut pending);
        }
    }
    flush_paragraph(&mut blocks, &mut pending);

    if blocks.is_empty() {
        // Markup collapsed to nothing readable; degrade to plain text.
        let stripped = fragment.root_element().text().collect::<String>();
        let stripped = stripped.trim();
        if stripped.is_empty() {
            Vec::new()
        } else {
            vec![Block::Paragraph(vec![Span::plain(stripped)])]
        }
    } else {
        blocks
    }
}

/// Concatenated plain text of a block, used for measurement and tests.
pub fn block_text(block: &Block) -> String {
    let spans = match block {
        Block::Paragraph(spans) => spans,
        Block::ListItem { spans, .. } => spans,
    };
    spans.iter().map(|s| s.text.as_str()).collect()
}

fn walk_block(element: ElementRef, blocks: &mut Vec<Block>, pending: &mut Vec<Span>) {
    match element.value().name() {
        "p" | "div" => {
            flush_paragraph(blocks, pending);
            let mut spans = Vec::new();
            collect_inline(element, false, false, &mut spans);
            trim_spans(&mut spans);
            if !spans.is_empty() {
                blocks.push(Block::Paragraph(spans));
            }
        }
        "ul" => {
            flush_paragraph(blocks, pending);
            collect_list(element, ListKind::Unordered, blocks);
        }
        "ol" => {
            flush_paragraph(blocks, pending);
            collect_list(element, ListKind::Ordered, blocks);
        }
        // A stray li outside any list still becomes a list item.
        "li" => {
            flush_paragraph(blocks, pending);
            push_list_item(element, ListKind::Unordered, blocks);
        }
        "br" => {
            flush_paragraph(blocks, pending);
        }
        "b" | "strong" => collect_inline(element, true, false, pending),
        "i" | "em" => collect_inline(element, false, true, pending),
        // Unknown wrapper: recurse so its content is not lost.
        _ => {
            for child in element.children() {
                if let Some(text) = child.value().as_text() {
                    push_text(pending, &text.text, false, false);
                } else if let Some(inner) = ElementRef::wrap(child) {
                    walk_block(inner, blocks, pending);
                }
            }
        }
    }
}

fn collect_list(element: ElementRef, kind: ListKind, blocks: &mut Vec<Block>) {
    for child in element.children() {
        if let Some(item) = ElementRef::wrap(child) {
            // Non-li children are tolerated as items rather than dropped.
            push_list_item(item, kind, blocks);
        }
    }
}

fn push_list_item(element: ElementRef, kind: ListKind, blocks: &mut Vec<Block>) {
    let mut spans = Vec::new();
    collect_inline(element, false, false, &mut spans);
    trim_spans(&mut spans);
    if !spans.is_empty() {
        blocks.push(Block::ListItem { kind, spans });
    }
}

fn collect_inline(element: ElementRef, bold: bool, italic: bool, out: &mut Vec<Span>) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            push_text(out, &text.text, bold, italic);
        } else if let Some(inner) = ElementRef::wrap(child) {
            match inner.value().name() {
                "b" | "strong" => collect_inline(inner, true, italic, out),
                "i" | "em" => collect_inline(inner, bold, true, out),
                "br" => out.push(Span::line_break()),
                _ => collect_inline(inner, bold, italic, out),
            }
        }
    }
}

fn push_text(out: &mut Vec<Span>, raw: &str, bold: bool, italic: bool) {
    let normalized = normalize_whitespace(raw);
    if normalized.is_empty() {
        return;
    }
    // Merge with the previous span when styling matches.
    if let Some(last) = out.last_mut() {
        if last.bold == bold && last.italic == italic && !last.is_line_break() {
            last.text.push_str(&normalized);
            return;
        }
    }
    out.push(Span {
        text: normalized,
        bold,
        italic,
    });
}

/// Collapses whitespace runs while keeping a single boundary space, so
/// "one <b>two</b>" keeps the gap between its spans.
fn normalize_whitespace(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        if raw.chars().any(char::is_whitespace) {
            return " ".to_string();
        }
        return String::new();
    }
    let mut result = String::new();
    if raw.starts_with(char::is_whitespace) {
        result.push(' ');
    }
    result.push_str(&collapsed);
    if raw.ends_with(char::is_whitespace) {
        result.push(' ');
    }
    result
}

fn trim_spans(spans: &mut Vec<Span>) {
    if let Some(first) = spans.first_mut() {
        let trimmed = first.text.trim_start().to_string();
        first.text = trimmed;
    }
    if let Some(last) = spans.last_mut() {
        let trimmed = last.text.trim_end().to_string();
        last.text = trimmed;
    }
    spans.retain(|span| !span.text.is_empty());
}

fn flush_paragraph(blocks: &mut Vec<Block>, pending: &mut Vec<Span>) {
    let mut spans = std::mem::take(pending);
    trim_spans(&mut spans);
    if !spans.is_empty() {
        blocks.push(Block::Paragraph(spans));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_becomes_single_paragraph() {
        let blocks = parse_rich_text("Shipped the billing rewrite.");
        assert_eq!(blocks.len(), 1);
        assert_eq!(block_text(&blocks[0]), "Shipped the billing rewrite.");
    }

    #[test]
    fn test_empty_input_yields_no_blocks() {
        assert!(parse_rich_text("").is_empty());
        assert!(parse_rich_text("   ").is_empty());
        assert!(parse_rich_text("<p>  </p>").is_empty());
    }

    #[test]
    fn test_paragraphs_and_bold() {
        let blocks = parse_rich_text("<p>Led a team of <b>12 engineers</b>.</p><p>Second.</p>");
        assert_eq!(blocks.len(), 2);
        match &blocks[0] {
            Block::Paragraph(spans) => {
                assert_eq!(spans.len(), 3);
                assert!(!spans[0].bold);
                assert!(spans[1].bold);
                assert_eq!(spans[1].text, "12 engineers");
            }
            other => panic!("expected paragraph, got {:?}", other),
        }
    }

    #[test]
    fn test_unordered_list_items() {
        let blocks = parse_rich_text("<ul><li>First win</li><li>Second <i>win</i></li></ul>");
        assert_eq!(blocks.len(), 2);
        for block in &blocks {
            assert!(matches!(
                block,
                Block::ListItem {
                    kind: ListKind::Unordered,
                    ..
                }
            ));
        }
        assert_eq!(block_text(&blocks[1]), "Second win");
    }

    #[test]
    fn test_ordered_list_kind() {
        let blocks = parse_rich_text("<ol><li>Step one</li></ol>");
        assert!(matches!(
            blocks[0],
            Block::ListItem {
                kind: ListKind::Ordered,
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_markup_degrades_to_text() {
        let blocks = parse_rich_text("<p>Unclosed <b>bold and <li>confusion");
        assert!(!blocks.is_empty());
        let all_text: String = blocks.iter().map(|b| block_text(b)).collect();
        assert!(all_text.contains("Unclosed"));
    }

    #[test]
    fn test_unknown_tags_keep_their_text() {
        let blocks = parse_rich_text("<section><p>Kept</p></section>");
        assert_eq!(blocks.len(), 1);
        assert_eq!(block_text(&blocks[0]), "Kept");
    }

    #[test]
    fn test_whitespace_preserved_between_spans() {
        let blocks = parse_rich_text("<p>one <b>two</b> three</p>");
        assert_eq!(block_text(&blocks[0]), "one two three");
    }

    #[test]
    fn test_deterministic_parse() {
        let input = "<p>Alpha <b>beta</b></p><ul><li>gamma</li></ul>";
        assert_eq!(parse_rich_text(input), parse_rich_text(input));
    }
}
