//! Turns plain-text resumes into PDF and DOCX documents.
//!
//! The PDF path classifies every line ([`classify`]), resolves a style per
//! category ([`style`]), lays the result out as styled blocks ([`layout`]) and
//! paginates it with `genpdf` ([`builder`]).  The DOCX path writes one plain
//! paragraph per line ([`docx`]).

pub mod builder;
pub mod classify;
pub mod docx;
pub mod elements;
pub mod encoding;
pub mod error;
pub mod fonts;
pub mod layout;
pub mod options;
pub mod style;

#[cfg(feature = "bookmarks")]
pub mod bookmarks;

pub use builder::{PdfRenderer, RenderedPdf};
pub use classify::{classify, classify_text, split_lines, ClassifiedLine, Line, LineCategory};
pub use elements::HeadingAnchor;
pub use error::{OutputFormat, RenderError, Result};
pub use layout::{Document, LayoutBuilder, PageGeometry, PageMargins, PaperSize, StyledBlock};
pub use options::RenderOptions;
pub use style::{StyleDescriptor, StyleTable};

/// Renders `text` as a paginated PDF with the default options.
pub fn render_pdf(text: &str) -> Result<Vec<u8>> {
    render_pdf_with(text, &RenderOptions::default())
}

/// Renders `text` as a paginated PDF using `options`.
pub fn render_pdf_with(text: &str, options: &RenderOptions) -> Result<Vec<u8>> {
    PdfRenderer::new(options.clone())
        .render_text(text)
        .map(|rendered| rendered.bytes)
}

/// Exports `text` as a DOCX document, one paragraph per line.
pub fn render_docx(text: &str) -> Result<Vec<u8>> {
    docx::export_simple(text)
}
