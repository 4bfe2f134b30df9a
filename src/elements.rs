//! Custom `genpdf` elements used by the resume renderer.
//!
//! `genpdf`'s own paragraph drops any word wider than the column and cannot
//! draw a background, and its line breaks are sized in text lines rather than
//! points.  The elements here cover those gaps: [`Spacer`] for blank input
//! lines and [`TextBlock`] for every line of text, optionally inside a shaded
//! [`Frame`].

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use genpdf::error::Error;
use genpdf::fonts::FontCache;
use genpdf::style::{Color, Style};
use genpdf::{render, Alignment, Element, Mm, Position, RenderResult, Size};

/// Vertical distance between the strokes that fill a frame's background.
///
/// PDF strokes default to 1pt (~0.35mm), so this leaves no gaps.
const FILL_STEP_MM: f64 = 0.25;

/// Converts millimetres expressed as `f64` into a `genpdf` length.
pub fn mm_from_f64(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value))
}

/// Converts a `genpdf` length back into millimetres.
pub fn mm_to_f64(value: Mm) -> f64 {
    let mm: printpdf::Mm = value.into();
    mm.0
}

/// Shared 1-based number of the page currently being laid out.
///
/// The page decorator advances the counter before any element is drawn on a
/// new page, so elements can read it to learn where they end up.
#[derive(Clone, Debug, Default)]
pub struct PageCounter(Rc<Cell<usize>>);

impl PageCounter {
    /// Creates a counter that has not seen any page yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves to the next page and returns its number.
    pub fn advance(&self) -> usize {
        let next = self.0.get() + 1;
        self.0.set(next);
        next
    }

    /// Number of the current page, `0` before the first page starts.
    pub fn current(&self) -> usize {
        self.0.get()
    }
}

/// Page on which a section heading was drawn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeadingAnchor {
    /// Heading text as displayed.
    pub title: String,
    /// 1-based page number.
    pub page: usize,
}

/// Collects [`HeadingAnchor`]s while a document renders.
#[derive(Clone, Debug, Default)]
pub struct AnchorSink {
    pages: PageCounter,
    anchors: Rc<RefCell<Vec<HeadingAnchor>>>,
}

impl AnchorSink {
    /// Creates a sink that reads page numbers from `pages`.
    pub fn new(pages: PageCounter) -> Self {
        Self {
            pages,
            anchors: Rc::default(),
        }
    }

    fn record(&self, title: &str) {
        self.anchors.borrow_mut().push(HeadingAnchor {
            title: title.to_owned(),
            page: self.pages.current(),
        });
    }

    /// Returns the anchors recorded so far.
    pub fn anchors(&self) -> Vec<HeadingAnchor> {
        self.anchors.borrow().clone()
    }
}

/// Fixed-height vertical gap.
///
/// At the bottom of a page the gap is truncated to the remaining space rather
/// than carried over.
pub struct Spacer {
    height: Mm,
}

impl Spacer {
    /// Creates a spacer of the given height.
    pub fn new(height: impl Into<Mm>) -> Self {
        Self {
            height: height.into(),
        }
    }
}

impl Element for Spacer {
    fn render(
        &mut self,
        _context: &genpdf::Context,
        area: render::Area<'_>,
        _style: Style,
    ) -> Result<RenderResult, Error> {
        let mut result = RenderResult::default();
        result.size = Size::new(0, clamp_height(self.height, area.size().height));
        Ok(result)
    }
}

fn clamp_height(height: Mm, available: Mm) -> Mm {
    if height > available {
        available
    } else {
        height
    }
}

/// Border and background drawn around a [`TextBlock`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    /// Colour of the 1pt border.
    pub border: Color,
    /// Fill colour behind the text.
    pub background: Color,
    /// Distance between the border and the text.
    pub padding: Mm,
}

/// One logical line of input, wrapped to the column width.
///
/// Lines that do not fit on the current page continue on the next one, so a
/// block of any length renders completely.  A word wider than the column is
/// broken between characters instead of being dropped.
pub struct TextBlock {
    text: String,
    style: Style,
    alignment: Alignment,
    indent: Mm,
    space_before: Mm,
    space_after: Mm,
    frame: Option<Frame>,
    anchors: Option<AnchorSink>,
    lines: Option<Vec<String>>,
    next_line: usize,
}

impl TextBlock {
    /// Creates a left-aligned block without spacing or frame.
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
            alignment: Alignment::Left,
            indent: Mm::default(),
            space_before: Mm::default(),
            space_after: Mm::default(),
            frame: None,
            anchors: None,
            lines: None,
            next_line: 0,
        }
    }

    /// Sets the horizontal alignment of every wrapped line.
    pub fn with_alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Moves the block away from the left edge of the column.
    pub fn with_indent(mut self, indent: impl Into<Mm>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Sets the gaps above and below the block.
    pub fn with_spacing(mut self, before: impl Into<Mm>, after: impl Into<Mm>) -> Self {
        self.space_before = before.into();
        self.space_after = after.into();
        self
    }

    /// Draws the block inside `frame`.
    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.frame = Some(frame);
        self
    }

    /// Records the page the block starts on into `sink`.
    pub fn with_anchor_sink(mut self, sink: AnchorSink) -> Self {
        self.anchors = Some(sink);
        self
    }
}

impl Element for TextBlock {
    fn render(
        &mut self,
        context: &genpdf::Context,
        mut area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let style = style.and(self.style);
        let font_cache = &context.font_cache;
        let line_height = style.line_height(font_cache);
        let padding = self.frame.map(|frame| frame.padding).unwrap_or_default();
        let mut result = RenderResult::default();

        let starting = self.next_line == 0;
        let top = if starting {
            self.space_before
        } else {
            Mm::default()
        };

        area.add_offset(Position::new(self.indent, 0));
        let width = area.size().width;
        let column = width - padding * 2.0;
        let lines = self
            .lines
            .get_or_insert_with(|| wrap_text(&self.text, style, font_cache, column));

        let room = area.size().height - top - padding * 2.0;
        let fitting = (mm_to_f64(room) / mm_to_f64(line_height)).floor().max(0.0) as usize;
        let count = fitting.min(lines.len() - self.next_line);
        if count == 0 {
            result.has_more = true;
            return Ok(result);
        }

        let chunk = &lines[self.next_line..self.next_line + count];
        let box_height = line_height * count as f64 + padding * 2.0;

        if let Some(frame) = self.frame {
            draw_frame(&area, frame, top, width, box_height);
        }

        let mut rendered = 0;
        for (index, line) in chunk.iter().enumerate() {
            let line_width = style.str_width(font_cache, line);
            let x = match self.alignment {
                Alignment::Left => padding,
                Alignment::Center => (width - line_width) / 2.0,
                Alignment::Right => width - padding - line_width,
            };
            let y = top + padding + line_height * index as f64;

            match area.text_section(font_cache, Position::new(x, y), style) {
                Some(mut section) => section.print_str(line, style)?,
                None => break,
            }
            rendered += 1;
        }
        if rendered == 0 {
            result.has_more = true;
            return Ok(result);
        }

        if starting {
            if let Some(sink) = &self.anchors {
                sink.record(&self.text);
            }
        }

        self.next_line += rendered;
        let mut height = top + box_height;
        if self.next_line < lines.len() {
            result.has_more = true;
        } else {
            height += clamp_height(self.space_after, area.size().height - height);
        }

        result.size = Size::new(width + self.indent, height);
        Ok(result)
    }
}

fn draw_frame(area: &render::Area<'_>, frame: Frame, top: Mm, width: Mm, height: Mm) {
    let fill = Style::new().with_color(frame.background);
    let step = mm_from_f64(FILL_STEP_MM);
    let mut y = top + step / 2.0;
    while y < top + height {
        area.draw_line(vec![Position::new(0, y), Position::new(width, y)], fill);
        y += step;
    }

    area.draw_line(
        vec![
            Position::new(0, top),
            Position::new(width, top),
            Position::new(width, top + height),
            Position::new(0, top + height),
            Position::new(0, top),
        ],
        Style::new().with_color(frame.border),
    );
}

fn text_width(text: &str, style: Style, font_cache: &FontCache) -> Mm {
    style.str_width(font_cache, text)
}

/// Breaks `word` into pieces no wider than `max_width`.
///
/// Every piece holds at least one character, even when that character alone
/// is wider than `max_width`.
fn split_word(word: &str, style: Style, font_cache: &FontCache, max_width: Mm) -> Vec<String> {
    if text_width(word, style, font_cache) <= max_width {
        return vec![word.to_owned()];
    }

    let mut pieces = Vec::new();
    let mut piece = String::new();
    for ch in word.chars() {
        piece.push(ch);
        if piece.chars().nth(1).is_some() && text_width(&piece, style, font_cache) > max_width {
            piece.pop();
            pieces.push(std::mem::replace(&mut piece, ch.to_string()));
        }
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

/// Greedy word wrap over whitespace-separated words.
///
/// Always yields at least one line.  Overlong words are split with
/// [`split_word`], so no line is wider than `max_width` unless a single
/// character is.
pub fn wrap_text(text: &str, style: Style, font_cache: &FontCache, max_width: Mm) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        for piece in split_word(word, style, font_cache, max_width) {
            if current.is_empty() {
                current = piece;
                continue;
            }

            let candidate = format!("{current} {piece}");
            if text_width(&candidate, style, font_cache) > max_width {
                lines.push(std::mem::replace(&mut current, piece));
            } else {
                current = candidate;
            }
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
