//! Error types shared by the PDF renderer and the DOCX exporter.

use std::fmt;

use thiserror::Error;

/// Output container a render call was producing when it failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Paginated PDF produced by [`crate::builder::PdfRenderer`].
    Pdf,
    /// Word document produced by [`crate::docx::export_simple`].
    Docx,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pdf => f.write_str("PDF"),
            Self::Docx => f.write_str("DOCX"),
        }
    }
}

/// Errors that can occur while turning resume text into a binary document.
///
/// Every variant is fatal for the call that produced it: no partial byte
/// stream is ever handed back alongside an error.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The input contains a character the target container cannot encode.
    #[error(
        "{format} output cannot encode character {character:?} ({}) on line {line}",
        code_point(.character)
    )]
    UnsupportedCharacter {
        /// Target format that rejected the character.
        format: OutputFormat,
        /// 1-based line number in the input text.
        line: usize,
        /// The offending character.
        character: char,
    },

    /// The font family used for text metrics could not be located or loaded.
    #[error("Failed to load fonts: {0}")]
    FontLoad(#[source] genpdf::error::Error),

    /// `genpdf` failed while laying out or serialising the PDF.
    #[error("PDF rendering failed: {0}")]
    Pdf(#[source] genpdf::error::Error),

    /// Writing the DOCX zip container failed.
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// Writing DOCX XML parts failed.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Error writing to the in-memory output buffer.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Section heading outlines could not be embedded into the PDF.
    #[cfg(feature = "bookmarks")]
    #[error("Failed to embed bookmarks: {0}")]
    Bookmarks(#[from] crate::bookmarks::BookmarkError),
}

fn code_point(character: &char) -> String {
    format!("U+{:04X}", u32::from(*character))
}

/// Result type for render operations.
pub type Result<T> = std::result::Result<T, RenderError>;
