use std::io::{Cursor, Read};

use resume_render::{render_docx, OutputFormat, RenderError};
use zip::ZipArchive;

fn read_part(bytes: &[u8], name: &str) -> String {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("open docx package");
    let mut part = archive.by_name(name).expect("part present");
    let mut contents = String::new();
    part.read_to_string(&mut contents).expect("read part");
    contents
}

#[test]
fn package_contains_required_parts() {
    let bytes = render_docx("JANE DOE").expect("export docx");
    let archive = ZipArchive::new(Cursor::new(bytes.as_slice())).expect("open docx package");
    let mut names: Vec<&str> = archive.file_names().collect();
    names.sort_unstable();
    assert_eq!(
        names,
        [
            "[Content_Types].xml",
            "_rels/.rels",
            "docProps/core.xml",
            "word/document.xml"
        ]
    );
}

#[test]
fn every_input_line_becomes_a_paragraph() {
    let text = "JANE DOE\njane@example.com\n\nEXPERIENCE\n- Led team of 5 engineers";
    let document = read_part(&render_docx(text).expect("export docx"), "word/document.xml");

    assert_eq!(document.matches("<w:p>").count(), 4);
    assert_eq!(document.matches("<w:p/>").count(), 1);
    // Lines are written as-is, without classification.
    assert!(document.contains(">- Led team of 5 engineers</w:t>"));
    assert!(!document.contains("•"));
}

#[test]
fn crlf_input_splits_like_lf() {
    let lf = render_docx("A\nB\n").expect("lf");
    let crlf = render_docx("A\r\nB\r\n").expect("crlf");
    assert_eq!(lf, crlf);
}

#[test]
fn export_is_deterministic() {
    let text = "JANE DOE\nSenior Engineer\nAcme Corp | 2019-2022";
    assert_eq!(
        render_docx(text).expect("first"),
        render_docx(text).expect("second")
    );
}

#[test]
fn empty_input_yields_an_empty_body() {
    let bytes = render_docx("").expect("empty input is not an error");
    let document = read_part(&bytes, "word/document.xml");
    assert!(!document.contains("<w:p>"));
    assert!(!document.contains("<w:p/>"));
    assert!(document.contains("<w:sectPr>"));
}

#[test]
fn output_grows_with_line_count() {
    let short = render_docx(&"- bullet line\n".repeat(2)).expect("short");
    let long = render_docx(&"- bullet line with more words\n".repeat(200)).expect("long");
    assert!(!short.is_empty());
    assert!(short.len() <= long.len());
}

#[test]
fn control_characters_fail_without_output() {
    let err = render_docx("JANE DOE\n\u{1B}[31mred").unwrap_err();
    match err {
        RenderError::UnsupportedCharacter {
            format, line, ..
        } => {
            assert_eq!(format, OutputFormat::Docx);
            assert_eq!(line, 2);
        }
        other => panic!("unexpected error: {other}"),
    }
}
