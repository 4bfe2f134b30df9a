//! Caller-facing render configuration.

use std::env;
use std::path::PathBuf;

use log::warn;

use crate::layout::{PageGeometry, PageMargins, PaperSize};

/// Environment variable selecting the paper size (`a4` or `letter`).
pub const PAPER_ENV: &str = "RESUME_RENDER_PAPER";

/// Title written into the PDF metadata when none is configured.
pub const DEFAULT_TITLE: &str = "Resume";

/// Options for [`crate::builder::PdfRenderer`].
#[derive(Clone, Debug, PartialEq)]
pub struct RenderOptions {
    /// Paper size and margins.
    pub geometry: PageGeometry,
    /// Directory searched first for the metric font family.
    pub fonts_dir: Option<PathBuf>,
    /// Document title stored in the PDF metadata.
    pub title: String,
    /// Adds an outline entry per section heading (requires the `bookmarks` feature).
    pub bookmarks: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            geometry: PageGeometry::default(),
            fonts_dir: None,
            title: DEFAULT_TITLE.to_owned(),
            bookmarks: cfg!(feature = "bookmarks"),
        }
    }
}

impl RenderOptions {
    /// Creates the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Default options adjusted by `RESUME_RENDER_PAPER`.
    ///
    /// Font directories are picked up from the environment by
    /// [`crate::fonts::font_family`] regardless of these options.
    pub fn from_env() -> Self {
        let mut options = Self::default();
        if let Ok(value) = env::var(PAPER_ENV) {
            match PaperSize::parse(&value) {
                Some(paper) => options.geometry.paper = paper,
                None => warn!("Ignoring unknown {PAPER_ENV} value '{value}'"),
            }
        }
        options
    }

    /// Sets the paper size.
    pub fn with_paper(mut self, paper: PaperSize) -> Self {
        self.geometry.paper = paper;
        self
    }

    /// Sets all four margins.
    pub fn with_margins(mut self, margins: PageMargins) -> Self {
        self.geometry.margins = margins;
        self
    }

    /// Sets the directory searched first for fonts.
    pub fn with_fonts_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.fonts_dir = Some(dir.into());
        self
    }

    /// Sets the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Enables or disables heading bookmarks.
    pub fn with_bookmarks(mut self, bookmarks: bool) -> Self {
        self.bookmarks = bookmarks;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_resume_layout() {
        let options = RenderOptions::default();
        assert_eq!(options.geometry.paper, PaperSize::A4);
        assert_eq!(options.title, DEFAULT_TITLE);
        assert!(options.fonts_dir.is_none());
    }

    #[test]
    fn builders_override_fields() {
        let options = RenderOptions::new()
            .with_paper(PaperSize::Letter)
            .with_margins(PageMargins::uniform(10.0))
            .with_title("Jane Doe");
        assert_eq!(options.geometry.paper, PaperSize::Letter);
        assert_eq!(options.geometry.margins.top, 10.0);
        assert_eq!(options.title, "Jane Doe");
    }
}
