//! Visual styles assigned to each line category.
//!
//! The values in this module are plain data: they do not reference the
//! rendering crate so the table can be inspected, tweaked or serialised without
//! pulling in `genpdf`.  [`crate::builder`] maps them onto `genpdf` styles.

use crate::classify::LineCategory;

/// An sRGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Pure black.
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    /// Accent color used for the name and headings.
    pub const DARK_BLUE: Rgb = Rgb(0x00, 0x00, 0x8B);
    /// Muted color used for dates.
    pub const GREY: Rgb = Rgb(0x80, 0x80, 0x80);
    /// Heading background.
    pub const LIGHT_GREY: Rgb = Rgb(0xD3, 0xD3, 0xD3);
}

/// Horizontal placement of a block within the page's text column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HorizontalAlignment {
    /// Left aligned content.
    #[default]
    Left,
    /// Center aligned content.
    Center,
    /// Right aligned content.
    Right,
}

/// Font weight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FontWeight {
    /// Regular face.
    #[default]
    Regular,
    /// Bold face.
    Bold,
}

/// Frame drawn around a block, with a filled background.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Border {
    /// Stroke width in points.
    pub width_pt: f64,
    /// Stroke color.
    pub color: Rgb,
    /// Distance between the frame and the text, in points.
    pub padding_pt: f64,
    /// Fill color behind the text.
    pub background: Rgb,
}

/// Immutable description of how a block of text is drawn.
///
/// All lengths are in points (1/72 inch).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StyleDescriptor {
    /// Font family name.
    pub font_family: &'static str,
    /// Font size in points.
    pub size_pt: u8,
    /// Font weight.
    pub weight: FontWeight,
    /// Text color.
    pub color: Rgb,
    /// Horizontal alignment.
    pub alignment: HorizontalAlignment,
    /// Vertical space above the block.
    pub space_before_pt: f64,
    /// Vertical space below the block.
    pub space_after_pt: f64,
    /// Indentation from the left margin.
    pub left_indent_pt: f64,
    /// Optional frame and background.
    pub border: Option<Border>,
}

/// Family every default style uses.
pub const DEFAULT_FONT_FAMILY: &str = "Helvetica";

const BODY: StyleDescriptor = StyleDescriptor {
    font_family: DEFAULT_FONT_FAMILY,
    size_pt: 10,
    weight: FontWeight::Regular,
    color: Rgb::BLACK,
    alignment: HorizontalAlignment::Left,
    space_before_pt: 0.0,
    space_after_pt: 4.0,
    left_indent_pt: 0.0,
    border: None,
};

/// Large, bold, centered candidate name.
pub const NAME_STYLE: StyleDescriptor = StyleDescriptor {
    size_pt: 18,
    weight: FontWeight::Bold,
    color: Rgb::DARK_BLUE,
    alignment: HorizontalAlignment::Center,
    space_after_pt: 12.0,
    ..BODY
};

/// Small centered contact details.
pub const CONTACT_STYLE: StyleDescriptor = StyleDescriptor {
    alignment: HorizontalAlignment::Center,
    space_after_pt: 12.0,
    ..BODY
};

/// Bold, framed and shaded section heading.
pub const SECTION_HEADING_STYLE: StyleDescriptor = StyleDescriptor {
    size_pt: 12,
    weight: FontWeight::Bold,
    color: Rgb::DARK_BLUE,
    space_before_pt: 12.0,
    space_after_pt: 14.0,
    border: Some(Border {
        width_pt: 1.0,
        color: Rgb::DARK_BLUE,
        padding_pt: 4.0,
        background: Rgb::LIGHT_GREY,
    }),
    ..BODY
};

/// Bold job title.
pub const JOB_TITLE_STYLE: StyleDescriptor = StyleDescriptor {
    size_pt: 11,
    weight: FontWeight::Bold,
    space_after_pt: 2.0,
    ..BODY
};

/// Regular employer line.
pub const COMPANY_STYLE: StyleDescriptor = StyleDescriptor {
    space_after_pt: 2.0,
    ..BODY
};

/// Small grey right-aligned date.
pub const DATE_STYLE: StyleDescriptor = StyleDescriptor {
    size_pt: 9,
    color: Rgb::GREY,
    alignment: HorizontalAlignment::Right,
    ..BODY
};

/// Indented list item.
pub const BULLET_STYLE: StyleDescriptor = StyleDescriptor {
    space_after_pt: 3.0,
    left_indent_pt: 15.0,
    ..BODY
};

/// Default body text.
pub const PARAGRAPH_STYLE: StyleDescriptor = BODY;

/// Mapping from [`LineCategory`] to [`StyleDescriptor`].
///
/// Lookups for categories without an entry (including [`LineCategory::Blank`],
/// which is rendered as a spacer) resolve to the fallback style.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleTable {
    entries: Vec<(LineCategory, StyleDescriptor)>,
    fallback: StyleDescriptor,
}

impl StyleTable {
    /// Creates an empty table that resolves every category to `fallback`.
    pub fn new(fallback: StyleDescriptor) -> Self {
        Self {
            entries: Vec::new(),
            fallback,
        }
    }

    /// The professional resume styling used by default.
    pub fn resume() -> Self {
        Self::new(PARAGRAPH_STYLE)
            .with_style(LineCategory::Name, NAME_STYLE)
            .with_style(LineCategory::Contact, CONTACT_STYLE)
            .with_style(LineCategory::SectionHeading, SECTION_HEADING_STYLE)
            .with_style(LineCategory::JobTitle, JOB_TITLE_STYLE)
            .with_style(LineCategory::Company, COMPANY_STYLE)
            .with_style(LineCategory::Date, DATE_STYLE)
            .with_style(LineCategory::Bullet, BULLET_STYLE)
            .with_style(LineCategory::Paragraph, PARAGRAPH_STYLE)
    }

    /// Sets the style of `category`, replacing any previous entry.
    pub fn with_style(mut self, category: LineCategory, style: StyleDescriptor) -> Self {
        match self.entries.iter_mut().find(|(entry, _)| *entry == category) {
            Some((_, existing)) => *existing = style,
            None => self.entries.push((category, style)),
        }
        self
    }

    /// Resolves the style for `category`.
    pub fn style_for(&self, category: LineCategory) -> &StyleDescriptor {
        self.entries
            .iter()
            .find(|(entry, _)| *entry == category)
            .map(|(_, style)| style)
            .unwrap_or(&self.fallback)
    }
}

impl Default for StyleTable {
    fn default() -> Self {
        Self::resume()
    }
}
