//! Character checks performed before any output is built.
//!
//! The PDF renderer draws text with the built-in Helvetica faces, which only
//! cover the WinAnsi (Windows-1252) repertoire.  DOCX parts are XML 1.0, which
//! forbids most C0 control characters.  Checking up front keeps both renderers
//! all-or-nothing: a bad character never leaves a half-written buffer behind.

use crate::error::{OutputFormat, RenderError, Result};

/// Characters Windows-1252 maps into 0x80..=0x9F.
const WIN_ANSI_EXTRAS: &[char] = &[
    '€', '‚', 'ƒ', '„', '…', '†', '‡', 'ˆ', '‰', 'Š', '‹', 'Œ', 'Ž', '‘', '’', '“', '”', '•', '–',
    '—', '˜', '™', 'š', '›', 'œ', 'ž', 'Ÿ',
];

/// Returns `true` when the built-in PDF fonts can draw `ch`.
pub fn is_win_ansi(ch: char) -> bool {
    matches!(ch, '\t' | ' '..='~' | '\u{A0}'..='\u{FF}') || WIN_ANSI_EXTRAS.contains(&ch)
}

/// Returns `true` when `ch` may appear in XML 1.0 character data.
pub fn is_xml_char(ch: char) -> bool {
    matches!(
        ch,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Checks `text` (one logical line, 0-based `index`) for `format`.
pub fn check_line(text: &str, index: usize, format: OutputFormat) -> Result<()> {
    let supported: fn(char) -> bool = match format {
        OutputFormat::Pdf => is_win_ansi,
        OutputFormat::Docx => is_xml_char,
    };

    match text.chars().find(|ch| !supported(*ch)) {
        Some(character) => Err(RenderError::UnsupportedCharacter {
            format,
            line: index + 1,
            character,
        }),
        None => Ok(()),
    }
}
