//! Section heading outlines built on top of `lopdf`.

use std::collections::BTreeMap;

use lopdf::{Dictionary, Document, Object, ObjectId, StringFormat};
use thiserror::Error;

use crate::elements::HeadingAnchor;

/// Errors that can occur while embedding bookmarks into a rendered PDF document.
#[derive(Error, Debug)]
pub enum BookmarkError {
    /// The PDF bytes could not be parsed or written by `lopdf`.
    #[error("Failed to process PDF bytes: {0}")]
    Parse(#[from] lopdf::Error),
    /// Writing the updated document failed.
    #[error("Failed to write PDF bytes: {0}")]
    Io(#[from] std::io::Error),
    /// The trailer has no usable `/Root` catalog reference.
    #[error("PDF catalog entry is missing")]
    MissingCatalog,
    /// The catalog object was not a dictionary, preventing outline injection.
    #[error("PDF catalog entry is not a dictionary")]
    InvalidCatalog,
    /// A heading refers to a page that does not exist in the rendered document.
    #[error("Heading '{title}' refers to missing page {page}")]
    MissingPage {
        /// Heading text.
        title: String,
        /// The requested (1-indexed) page number.
        page: usize,
    },
}

/// Adds a flat outline with one entry per heading.
///
/// Each entry gets a `/Dest [page /Fit]` pointing at the page the heading was
/// drawn on.  Without headings the input bytes are returned unchanged.
pub fn apply_heading_bookmarks(
    pdf_bytes: &[u8],
    headings: &[HeadingAnchor],
) -> Result<Vec<u8>, BookmarkError> {
    if headings.is_empty() {
        return Ok(pdf_bytes.to_vec());
    }

    let mut document = Document::load_mem(pdf_bytes)?;
    let pages = document.get_pages();
    let entries = collect_outline_entries(&mut document, headings, &pages)?;

    let outlines_id = document.new_object_id();
    link_outline_entries(outlines_id, &mut document, &entries);
    insert_outlines_root(outlines_id, &mut document, &entries)?;

    let mut buffer = Vec::new();
    document.save_to(&mut buffer)?;
    Ok(buffer)
}

struct OutlineEntry {
    object_id: ObjectId,
    page_ref: ObjectId,
    title: String,
}

fn collect_outline_entries(
    document: &mut Document,
    headings: &[HeadingAnchor],
    pages: &BTreeMap<u32, ObjectId>,
) -> Result<Vec<OutlineEntry>, BookmarkError> {
    headings
        .iter()
        .map(|heading| {
            let page_ref = u32::try_from(heading.page)
                .ok()
                .and_then(|page| pages.get(&page).copied())
                .ok_or_else(|| BookmarkError::MissingPage {
                    title: heading.title.clone(),
                    page: heading.page,
                })?;

            Ok(OutlineEntry {
                object_id: document.new_object_id(),
                page_ref,
                title: heading.title.clone(),
            })
        })
        .collect()
}

/// Encodes `title` as a UTF-16BE text string with a byte order mark.
fn outline_title(title: &str) -> Object {
    let mut bytes = vec![0xFE, 0xFF];
    bytes.extend(title.encode_utf16().flat_map(u16::to_be_bytes));
    Object::String(bytes, StringFormat::Hexadecimal)
}

fn link_outline_entries(outlines_id: ObjectId, document: &mut Document, entries: &[OutlineEntry]) {
    for (index, entry) in entries.iter().enumerate() {
        let mut dictionary = Dictionary::new();
        dictionary.set("Title", outline_title(&entry.title));
        dictionary.set(
            "Dest",
            Object::Array(vec![
                Object::Reference(entry.page_ref),
                Object::Name("Fit".into()),
            ]),
        );
        dictionary.set("Parent", Object::Reference(outlines_id));

        if index > 0 {
            dictionary.set("Prev", Object::Reference(entries[index - 1].object_id));
        }

        if let Some(next) = entries.get(index + 1) {
            dictionary.set("Next", Object::Reference(next.object_id));
        }

        document
            .objects
            .insert(entry.object_id, Object::Dictionary(dictionary));
    }
}

fn insert_outlines_root(
    outlines_id: ObjectId,
    document: &mut Document,
    entries: &[OutlineEntry],
) -> Result<(), BookmarkError> {
    let catalog_id = document
        .trailer
        .get(b"Root")
        .and_then(Object::as_reference)
        .map_err(|_| BookmarkError::MissingCatalog)?;

    let mut dictionary = Dictionary::new();
    dictionary.set("Type", Object::Name("Outlines".into()));
    dictionary.set("Count", Object::Integer(entries.len() as i64));
    if let Some(first) = entries.first() {
        dictionary.set("First", Object::Reference(first.object_id));
    }
    if let Some(last) = entries.last() {
        dictionary.set("Last", Object::Reference(last.object_id));
    }
    document
        .objects
        .insert(outlines_id, Object::Dictionary(dictionary));

    let catalog = document
        .objects
        .get_mut(&catalog_id)
        .ok_or(BookmarkError::MissingCatalog)?
        .as_dict_mut()
        .map_err(|_| BookmarkError::InvalidCatalog)?;
    catalog.set("Outlines", Object::Reference(outlines_id));
    catalog.set("PageMode", Object::Name("UseOutlines".into()));

    Ok(())
}
