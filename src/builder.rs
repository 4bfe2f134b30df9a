//! Paginated PDF rendering on top of `genpdf`.
//!
//! [`PdfRenderer`] turns a [`Document`] into PDF bytes: every styled block
//! becomes one `genpdf` element and `genpdf` flows them across as many pages as
//! needed.

use genpdf::error::Error;
use genpdf::fonts::{FontData, FontFamily};
use genpdf::style::{self, Color, Style};
use genpdf::{Alignment, Margins, PageDecorator, Size};
use log::{debug, warn};

use crate::classify::{classify_text, LineCategory};
use crate::elements::{
    mm_from_f64, AnchorSink, Frame, HeadingAnchor, PageCounter, Spacer, TextBlock,
};
use crate::encoding::check_line;
use crate::error::{OutputFormat, RenderError, Result};
use crate::fonts;
use crate::layout::{pt_to_mm, Document, LayoutBuilder, PageGeometry, StyledBlock};
use crate::options::RenderOptions;
use crate::style::{
    FontWeight, HorizontalAlignment, Rgb, StyleDescriptor, StyleTable, DEFAULT_FONT_FAMILY,
};

/// Builder for `genpdf::Document` instances configured from a [`PageGeometry`].
#[derive(Default)]
pub struct DocumentBuilder {
    paper_size: Option<Size>,
    margins: Option<Margins>,
    title: Option<String>,
    pages: PageCounter,
}

impl DocumentBuilder {
    /// Creates a new builder instance with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies paper size and margins from `geometry`.
    pub fn with_geometry(self, geometry: PageGeometry) -> Self {
        let (width, height) = geometry.paper.dimensions_mm();
        let margins = geometry.margins;
        self.with_paper_size(Size::new(mm_from_f64(width), mm_from_f64(height)))
            .with_margins(Margins::trbl(
                mm_from_f64(margins.top),
                mm_from_f64(margins.right),
                mm_from_f64(margins.bottom),
                mm_from_f64(margins.left),
            ))
    }

    /// Sets the paper size used for newly created documents.
    pub fn with_paper_size(mut self, paper_size: impl Into<Size>) -> Self {
        self.paper_size = Some(paper_size.into());
        self
    }

    /// Sets the margins applied through the page decorator.
    pub fn with_margins(mut self, margins: impl Into<Margins>) -> Self {
        self.margins = Some(margins.into());
        self
    }

    /// Sets the title stored in the PDF metadata.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Shares `pages` with the page decorator so elements can see page numbers.
    pub fn with_page_counter(mut self, pages: PageCounter) -> Self {
        self.pages = pages;
        self
    }

    /// Builds a fully configured `genpdf::Document` using `font_family`.
    pub fn build(self, font_family: FontFamily<FontData>) -> genpdf::Document {
        let mut document = genpdf::Document::new(font_family);

        if let Some(paper_size) = self.paper_size {
            document.set_paper_size(paper_size);
        }

        if let Some(title) = self.title {
            document.set_title(title);
        }

        document.set_page_decorator(CountingPageDecorator::new(self.margins, self.pages));
        document
    }
}

/// Applies margins and advances the shared page counter for every page.
struct CountingPageDecorator {
    margins: Option<Margins>,
    pages: PageCounter,
}

impl CountingPageDecorator {
    fn new(margins: Option<Margins>, pages: PageCounter) -> Self {
        Self { margins, pages }
    }
}

impl PageDecorator for CountingPageDecorator {
    fn decorate_page<'a>(
        &mut self,
        _context: &genpdf::Context,
        mut area: genpdf::render::Area<'a>,
        _style: style::Style,
    ) -> std::result::Result<genpdf::render::Area<'a>, Error> {
        self.pages.advance();

        if let Some(margins) = self.margins {
            area.add_margins(margins);
        }

        Ok(area)
    }
}

/// The output of a successful PDF render.
#[derive(Clone, Debug)]
pub struct RenderedPdf {
    /// Complete PDF file.
    pub bytes: Vec<u8>,
    /// Number of pages produced.
    pub page_count: usize,
    /// Section headings and the pages they landed on.
    pub headings: Vec<HeadingAnchor>,
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}

fn alignment(alignment: HorizontalAlignment) -> Alignment {
    match alignment {
        HorizontalAlignment::Left => Alignment::Left,
        HorizontalAlignment::Center => Alignment::Center,
        HorizontalAlignment::Right => Alignment::Right,
    }
}

fn text_style(descriptor: &StyleDescriptor) -> Style {
    let mut style = Style::new()
        .with_font_size(descriptor.size_pt)
        .with_color(color(descriptor.color));
    if descriptor.weight == FontWeight::Bold {
        style.set_bold();
    }
    style
}

/// Renders [`Document`]s into PDF bytes.
#[derive(Clone, Debug, Default)]
pub struct PdfRenderer {
    options: RenderOptions,
    styles: StyleTable,
}

impl PdfRenderer {
    /// Creates a renderer with the resume style table.
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            styles: StyleTable::resume(),
        }
    }

    /// Replaces the style table used by [`PdfRenderer::render_text`].
    pub fn with_styles(mut self, styles: StyleTable) -> Self {
        self.styles = styles;
        self
    }

    /// Returns the configured options.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Classifies `text`, lays it out and renders it.
    pub fn render_text(&self, text: &str) -> Result<RenderedPdf> {
        let classified = classify_text(text);
        let document = LayoutBuilder::new()
            .with_geometry(self.options.geometry)
            .build(&classified, &self.styles);
        self.render(&document)
    }

    /// Renders `document`.
    ///
    /// Text is checked for characters the built-in fonts cannot encode before
    /// fonts are loaded or any output is produced.
    pub fn render(&self, document: &Document) -> Result<RenderedPdf> {
        for (index, block) in document.blocks().iter().enumerate() {
            if let Some(text) = block.text() {
                check_line(text, index, OutputFormat::Pdf)?;
            }
        }

        let font_family =
            fonts::font_family(self.options.fonts_dir.as_deref()).map_err(RenderError::FontLoad)?;

        let pages = PageCounter::new();
        let anchors = AnchorSink::new(pages.clone());
        let mut pdf = DocumentBuilder::new()
            .with_geometry(document.geometry())
            .with_title(self.options.title.clone())
            .with_page_counter(pages.clone())
            .build(font_family);

        for block in document.blocks() {
            push_block(&mut pdf, block, &anchors);
        }

        let mut bytes = Vec::new();
        pdf.render(&mut bytes).map_err(RenderError::Pdf)?;

        let page_count = pages.current();
        let headings = anchors.anchors();
        debug!(
            "Rendered {} blocks into {} pages ({} bytes)",
            document.blocks().len(),
            page_count,
            bytes.len()
        );

        #[cfg(feature = "bookmarks")]
        let bytes = if self.options.bookmarks {
            crate::bookmarks::apply_heading_bookmarks(&bytes, &headings)?
        } else {
            bytes
        };

        Ok(RenderedPdf {
            bytes,
            page_count,
            headings,
        })
    }
}

fn mm(points: f64) -> genpdf::Mm {
    mm_from_f64(pt_to_mm(points))
}

fn push_block(pdf: &mut genpdf::Document, block: &StyledBlock, anchors: &AnchorSink) {
    match block {
        StyledBlock::Spacer { height_pt } => {
            pdf.push(Spacer::new(mm(*height_pt)));
        }
        StyledBlock::Text {
            category,
            text,
            style,
        } => {
            if style.font_family != DEFAULT_FONT_FAMILY {
                warn!(
                    "Font family '{}' is not available; using {}",
                    style.font_family, DEFAULT_FONT_FAMILY
                );
            }

            let mut element = TextBlock::new(text.clone(), text_style(style))
                .with_alignment(alignment(style.alignment))
                .with_indent(mm(style.left_indent_pt))
                .with_spacing(mm(style.space_before_pt), mm(style.space_after_pt));

            // Borders are stroked at the PDF default of 1pt.
            if let Some(border) = style.border {
                element = element.with_frame(Frame {
                    border: color(border.color),
                    background: color(border.background),
                    padding: mm(border.padding_pt),
                });
            }

            if *category == LineCategory::SectionHeading {
                element = element.with_anchor_sink(anchors.clone());
            }

            pdf.push(element);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{DATE_STYLE, NAME_STYLE};

    #[test]
    fn bold_descriptors_map_to_bold_styles() {
        let style = text_style(&NAME_STYLE);
        assert!(style.is_bold());
        assert_eq!(style.font_size(), NAME_STYLE.size_pt);
        assert_eq!(style.color(), Some(Color::Rgb(0x00, 0x00, 0x8B)));
    }

    #[test]
    fn regular_descriptors_stay_regular() {
        let style = text_style(&DATE_STYLE);
        assert!(!style.is_bold());
        assert_eq!(style.color(), Some(Color::Rgb(0x80, 0x80, 0x80)));
    }

    #[test]
    fn alignment_maps_one_to_one() {
        assert!(matches!(
            alignment(HorizontalAlignment::Right),
            Alignment::Right
        ));
        assert!(matches!(
            alignment(HorizontalAlignment::Center),
            Alignment::Center
        ));
    }

    #[test]
    fn unsupported_characters_fail_before_fonts_load() {
        let renderer = PdfRenderer::new(
            RenderOptions::default().with_fonts_dir("/__resume_render_missing_fonts__"),
        );
        let err = renderer
            .render_text("JANE DOE\nSkills: 日本語")
            .expect_err("CJK text cannot use the built-in fonts");
        assert!(matches!(
            err,
            RenderError::UnsupportedCharacter {
                format: OutputFormat::Pdf,
                line: 2,
                ..
            }
        ));
    }
}
