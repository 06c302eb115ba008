//! DOCX text extraction.
//!
//! A `.docx` file is a ZIP archive; the body lives in `word/document.xml`.
//! Text runs (`<w:t>`) are concatenated per paragraph (`<w:p>`), and
//! paragraphs are separated by a blank line so the segmenter sees the same
//! paragraph breaks the author did.

use std::io::{Cursor, Read};

use quick_xml::Reader;
use quick_xml::events::Event;

use paperstyle_core::{ExtractError, TextExtractor};

pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const DOCUMENT_PART: &str = "word/document.xml";

/// Upper bound on the decompressed size of `word/document.xml`.
pub const MAX_DOCUMENT_XML_BYTES: u64 = 64 * 1024 * 1024;

fn decode_error(detail: impl ToString) -> ExtractError {
    ExtractError::Decode {
        kind: "DOCX",
        detail: detail.to_string(),
    }
}

/// Plain text of a DOCX document's main body.
pub fn document_text(bytes: &[u8]) -> Result<String, ExtractError> {
    document_text_with_limit(bytes, MAX_DOCUMENT_XML_BYTES)
}

/// Like [`document_text`], failing once the document part inflates past
/// `max_xml_bytes`. The size declared in the archive is not trusted.
pub fn document_text_with_limit(bytes: &[u8], max_xml_bytes: u64) -> Result<String, ExtractError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).map_err(decode_error)?;
    let part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| decode_error(format!("{}: {}", DOCUMENT_PART, e)))?;
    let mut raw = Vec::new();
    part.take(max_xml_bytes + 1).read_to_end(&mut raw)?;
    if raw.len() as u64 > max_xml_bytes {
        return Err(decode_error(format!(
            "{} exceeds {} bytes",
            DOCUMENT_PART, max_xml_bytes
        )));
    }
    let xml = String::from_utf8(raw).map_err(decode_error)?;
    paragraphs_from_xml(&xml)
}

fn paragraphs_from_xml(xml: &str) -> Result<String, ExtractError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(false);

    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                if e.local_name().as_ref() == b"t" {
                    in_text = true;
                }
            }
            Ok(Event::Empty(ref e)) => match e.local_name().as_ref() {
                b"tab" => current.push('\t'),
                b"br" | b"cr" => current.push('\n'),
                b"p" => paragraphs.push(String::new()),
                _ => {}
            },
            Ok(Event::Text(ref e)) => {
                if in_text {
                    let text = e.unescape().map_err(decode_error)?;
                    current.push_str(&text);
                }
            }
            Ok(Event::CData(ref e)) => {
                if in_text {
                    current.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            Ok(Event::End(ref e)) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"p" => paragraphs.push(std::mem::take(&mut current)),
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(decode_error(format!(
                    "{} at position {}",
                    e,
                    reader.buffer_position()
                )));
            }
            _ => {}
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }

    tracing::debug!(paragraphs = paragraphs.len(), "extracted DOCX text");
    Ok(paragraphs
        .iter()
        .map(|p| p.trim_end())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join("\n\n"))
}

/// Word 2007+ documents.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxExtractor;

impl TextExtractor for DocxExtractor {
    fn mime_types(&self) -> &[&'static str] {
        &[DOCX_MIME]
    }

    fn extract(&self, bytes: &[u8], _mime: &str) -> Result<String, ExtractError> {
        document_text(bytes)
    }
}
