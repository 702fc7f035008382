// src/lib.rs
//! Resume rendering engine.
//!
//! Turns structured resume data plus a template id into a finished
//! document. Composition is shared: a template builds a backend-neutral
//! layout tree, and the HTML and PDF backends each render that tree with
//! their own pagination model.
//!
//! Rendering is total over input shape. Unknown template ids fall back to
//! the default template, malformed dates pass through verbatim, and
//! malformed rich text degrades to plain paragraphs; the only hard error
//! class is PDF serialization itself.

use anyhow::Result;

pub mod backends;
pub mod direction;
pub mod format;
pub mod layout;
pub mod richtext;
pub mod sections;
pub mod style;
pub mod templates;
pub mod types;
pub mod watermark;

pub use direction::{detect_direction, Direction};
pub use layout::Document;
pub use templates::{compose_document, resolve, template_ids, TemplateDefinition};
pub use types::ResumeData;

/// Caller-facing rendering switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Overlay translucent diagonal preview marks on every page.
    pub watermark: bool,
}

/// Requested output backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Html,
    Pdf,
}

/// A finished document from one of the two backends.
#[derive(Debug, Clone)]
pub enum RenderedDocument {
    Html(String),
    Pdf(Vec<u8>),
}

/// Composes and renders in one call.
///
/// HTML rendering is pure string assembly and never fails; the PDF branch
/// is awaited to completion so callers only ever see finished bytes.
pub async fn render(
    data: &ResumeData,
    template_id: &str,
    format: OutputFormat,
    options: &RenderOptions,
) -> Result<RenderedDocument> {
    let doc = compose_document(template_id, data, options);
    match format {
        OutputFormat::Html => Ok(RenderedDocument::Html(backends::html::render(&doc))),
        OutputFormat::Pdf => Ok(RenderedDocument::Pdf(backends::pdf::render(doc).await?)),
    }
}

/// Renders a composed document to a self-contained HTML page.
pub fn render_html(doc: &Document) -> String {
    backends::html::render(doc)
}

/// Renders a composed document to PDF bytes on the blocking pool.
pub async fn render_pdf(doc: Document) -> Result<Vec<u8>> {
    backends::pdf::render(doc).await
}
