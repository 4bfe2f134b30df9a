//! The document model handed to the PDF renderer.
//!
//! [`LayoutBuilder`] projects classified lines onto styled blocks one-to-one.
//! The types here intentionally avoid referencing `genpdf` so a layout can be
//! inspected and tested without loading any fonts.

use log::debug;

use crate::classify::{ClassifiedLine, LineCategory};
use crate::style::{StyleDescriptor, StyleTable};

/// Height of the spacer emitted for a blank line, in points.
pub const SPACER_HEIGHT_PT: f64 = 3.0;

/// Millimetres per inch.
pub const MM_PER_INCH: f64 = 25.4;

/// Points per inch.
pub const PT_PER_INCH: f64 = 72.0;

/// Converts points to millimetres.
pub fn pt_to_mm(points: f64) -> f64 {
    points * MM_PER_INCH / PT_PER_INCH
}

/// Supported paper sizes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PaperSize {
    /// ISO A4, 210 x 297 mm.
    #[default]
    A4,
    /// US Letter, 8.5 x 11 in.
    Letter,
}

impl PaperSize {
    /// Width and height in millimetres.
    pub fn dimensions_mm(self) -> (f64, f64) {
        match self {
            Self::A4 => (210.0, 297.0),
            Self::Letter => (215.9, 279.4),
        }
    }

    /// Parses `a4` or `letter`, ignoring case.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "a4" => Some(Self::A4),
            "letter" | "us-letter" => Some(Self::Letter),
            _ => None,
        }
    }
}

/// Page margins in millimetres.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageMargins {
    /// Top margin.
    pub top: f64,
    /// Right margin.
    pub right: f64,
    /// Bottom margin.
    pub bottom: f64,
    /// Left margin.
    pub left: f64,
}

impl PageMargins {
    /// Uses the same margin on all four sides.
    pub fn uniform(mm: f64) -> Self {
        Self {
            top: mm,
            right: mm,
            bottom: mm,
            left: mm,
        }
    }
}

impl Default for PageMargins {
    fn default() -> Self {
        Self::uniform(0.75 * MM_PER_INCH)
    }
}

/// Paper size plus margins.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PageGeometry {
    /// Paper size.
    pub paper: PaperSize,
    /// Margins on each side.
    pub margins: PageMargins,
}

/// Atomic unit consumed by the renderer.
#[derive(Clone, Debug, PartialEq)]
pub enum StyledBlock {
    /// A non-blank line with its resolved style.
    Text {
        /// Category assigned by the classifier.
        category: LineCategory,
        /// Display text.
        text: String,
        /// Resolved style.
        style: StyleDescriptor,
    },
    /// Fixed-height vertical gap produced by a blank line.
    Spacer {
        /// Height in points.
        height_pt: f64,
    },
}

impl StyledBlock {
    /// Category of the block; spacers report [`LineCategory::Blank`].
    pub fn category(&self) -> LineCategory {
        match self {
            Self::Text { category, .. } => *category,
            Self::Spacer { .. } => LineCategory::Blank,
        }
    }

    /// Display text, `None` for spacers.
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text { text, .. } => Some(text),
            Self::Spacer { .. } => None,
        }
    }

    /// Returns `true` for spacer blocks.
    pub fn is_spacer(&self) -> bool {
        matches!(self, Self::Spacer { .. })
    }
}

/// Ordered styled blocks plus page geometry.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    blocks: Vec<StyledBlock>,
    geometry: PageGeometry,
}

impl Document {
    /// Creates an empty document with the given geometry.
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            blocks: Vec::new(),
            geometry,
        }
    }

    /// The blocks in input order.
    pub fn blocks(&self) -> &[StyledBlock] {
        &self.blocks
    }

    /// Page geometry used when rendering.
    pub fn geometry(&self) -> PageGeometry {
        self.geometry
    }

    /// Appends a block and returns the updated document.
    pub fn with_block(mut self, block: StyledBlock) -> Self {
        self.blocks.push(block);
        self
    }

    /// Number of non-spacer blocks.
    pub fn text_block_count(&self) -> usize {
        self.blocks.iter().filter(|block| !block.is_spacer()).count()
    }
}

/// Builds a [`Document`] from classified lines.
#[derive(Clone, Debug, Default)]
pub struct LayoutBuilder {
    geometry: PageGeometry,
}

impl LayoutBuilder {
    /// Creates a builder using the default geometry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page geometry for built documents.
    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Resolves a style for every line and emits blocks in input order.
    pub fn build(&self, lines: &[ClassifiedLine], styles: &StyleTable) -> Document {
        let blocks: Vec<StyledBlock> = lines
            .iter()
            .map(|line| match line.category() {
                LineCategory::Blank => StyledBlock::Spacer {
                    height_pt: SPACER_HEIGHT_PT,
                },
                category => StyledBlock::Text {
                    category,
                    text: line.text().to_owned(),
                    style: *styles.style_for(category),
                },
            })
            .collect();

        debug!(
            "Laid out {} lines into {} blocks",
            lines.len(),
            blocks.len()
        );

        Document {
            blocks,
            geometry: self.geometry,
        }
    }
}
