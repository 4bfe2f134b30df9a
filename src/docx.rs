//! Minimal WordprocessingML export.
//!
//! Every input line becomes one unstyled `<w:p>`; blank lines become empty
//! paragraphs.  No classification or styling takes place.  The package holds
//! only the parts Word needs to open it, and every zip entry carries a fixed
//! timestamp so identical input yields identical bytes.

use std::io::{Cursor, Write};

use log::debug;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::encoding::check_line;
use crate::error::{OutputFormat, Result};

const WORDPROCESSING_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// A4 in twentieths of a point.
const PAGE_WIDTH_TWIPS: u32 = 11906;
const PAGE_HEIGHT_TWIPS: u32 = 16838;
/// 0.75 inch.
const MARGIN_TWIPS: u32 = 1080;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/><Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/></Types>"#;

const PACKAGE_RELATIONSHIPS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/></Relationships>"#;

const CORE_PROPERTIES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" xmlns:dc="http://purl.org/dc/elements/1.1/"><dc:title>Resume</dc:title></cp:coreProperties>"#;

/// Converts `text` into a DOCX package, one paragraph per line.
///
/// Non-blank lines keep their leading and trailing whitespace.  Characters XML 1.0
/// cannot carry fail the whole call before any part is written.
pub fn export_simple(text: &str) -> Result<Vec<u8>> {
    let lines: Vec<&str> = text.lines().collect();
    for (index, line) in lines.iter().enumerate() {
        check_line(line, index, OutputFormat::Docx)?;
    }

    let document = document_xml(&lines)?;

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(zip::DateTime::default());

    for (name, contents) in [
        ("[Content_Types].xml", CONTENT_TYPES.as_bytes()),
        ("_rels/.rels", PACKAGE_RELATIONSHIPS.as_bytes()),
        ("docProps/core.xml", CORE_PROPERTIES.as_bytes()),
        ("word/document.xml", document.as_slice()),
    ] {
        zip.start_file(name, options)?;
        zip.write_all(contents)?;
    }

    let bytes = zip.finish()?.into_inner();
    debug!(
        "Exported {} lines into {} DOCX bytes",
        lines.len(),
        bytes.len()
    );
    Ok(bytes)
}

/// Serialises the `word/document.xml` part.
fn document_xml(lines: &[&str]) -> Result<Vec<u8>> {
    let mut writer = Writer::new(Vec::new());

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    writer.write_event(Event::Start(
        BytesStart::new("w:document").with_attributes([("xmlns:w", WORDPROCESSING_NS)]),
    ))?;
    writer.write_event(Event::Start(BytesStart::new("w:body")))?;

    for line in lines {
        write_paragraph(&mut writer, line)?;
    }

    write_section_properties(&mut writer)?;

    writer.write_event(Event::End(BytesEnd::new("w:body")))?;
    writer.write_event(Event::End(BytesEnd::new("w:document")))?;

    Ok(writer.into_inner())
}

fn write_paragraph(writer: &mut Writer<Vec<u8>>, line: &str) -> Result<()> {
    if line.trim().is_empty() {
        writer.write_event(Event::Empty(BytesStart::new("w:p")))?;
        return Ok(());
    }

    writer.write_event(Event::Start(BytesStart::new("w:p")))?;
    writer.write_event(Event::Start(BytesStart::new("w:r")))?;
    writer.write_event(Event::Start(
        BytesStart::new("w:t").with_attributes([("xml:space", "preserve")]),
    ))?;
    writer.write_event(Event::Text(BytesText::new(line)))?;
    writer.write_event(Event::End(BytesEnd::new("w:t")))?;
    writer.write_event(Event::End(BytesEnd::new("w:r")))?;
    writer.write_event(Event::End(BytesEnd::new("w:p")))?;
    Ok(())
}

fn write_section_properties(writer: &mut Writer<Vec<u8>>) -> Result<()> {
    let width = PAGE_WIDTH_TWIPS.to_string();
    let height = PAGE_HEIGHT_TWIPS.to_string();
    let margin = MARGIN_TWIPS.to_string();

    writer.write_event(Event::Start(BytesStart::new("w:sectPr")))?;
    writer.write_event(Event::Empty(
        BytesStart::new("w:pgSz").with_attributes([("w:w", width.as_str()), ("w:h", height.as_str())]),
    ))?;
    writer.write_event(Event::Empty(BytesStart::new("w:pgMar").with_attributes([
        ("w:top", margin.as_str()),
        ("w:right", margin.as_str()),
        ("w:bottom", margin.as_str()),
        ("w:left", margin.as_str()),
    ])))?;
    writer.write_event(Event::End(BytesEnd::new("w:sectPr")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;

    fn document_text(lines: &[&str]) -> String {
        String::from_utf8(document_xml(lines).expect("document xml")).expect("utf-8")
    }

    #[test]
    fn one_paragraph_per_line() {
        let xml = document_text(&["JANE DOE", "  ", "EXPERIENCE"]);
        assert_eq!(xml.matches("<w:p>").count(), 2);
        assert_eq!(xml.matches("<w:p/>").count(), 1);
        assert!(xml.contains(r#"<w:t xml:space="preserve">JANE DOE</w:t>"#));
    }

    #[test]
    fn markup_is_escaped_not_interpreted() {
        let xml = document_text(&["R&D <b>lead</b>"]);
        assert!(xml.contains("R&amp;D &lt;b&gt;lead&lt;/b&gt;"));
    }

    #[test]
    fn page_setup_is_a4_with_three_quarter_inch_margins() {
        let xml = document_text(&[]);
        assert!(xml.contains(r#"<w:pgSz w:w="11906" w:h="16838"/>"#));
        assert!(xml.contains(r#"w:left="1080""#));
    }

    #[test]
    fn control_characters_are_rejected() {
        let err = export_simple("ok\nbell \u{7} here").unwrap_err();
        assert!(matches!(
            err,
            RenderError::UnsupportedCharacter {
                format: OutputFormat::Docx,
                line: 2,
                character: '\u{7}',
            }
        ));
    }

    #[test]
    fn empty_input_still_produces_a_package() {
        let bytes = export_simple("").expect("empty docx");
        assert!(bytes.starts_with(b"PK"));
    }
}
