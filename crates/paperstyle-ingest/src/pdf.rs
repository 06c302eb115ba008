//! PDF text extraction through `pdf-extract`.

use paperstyle_core::{ExtractError, TextExtractor};

pub const PDF_MIME: &str = "application/pdf";

fn decode_error(detail: impl ToString) -> ExtractError {
    ExtractError::Decode {
        kind: "PDF",
        detail: detail.to_string(),
    }
}

/// Text of every page, one page after another, separated by a newline.
pub fn document_text(bytes: &[u8]) -> Result<String, ExtractError> {
    if !bytes.starts_with(b"%PDF") {
        return Err(decode_error("missing %PDF header"));
    }
    // pdf-extract panics on some malformed documents instead of erroring.
    let pages = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes))
        .map_err(|_| decode_error("malformed PDF"))?
        .map_err(decode_error)?;
    tracing::debug!(pages = pages.len(), "extracted PDF text");
    Ok(pages
        .iter()
        .map(|page| page.trim_end())
        .collect::<Vec<_>>()
        .join("\n"))
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn mime_types(&self) -> &[&'static str] {
        &[PDF_MIME]
    }

    fn extract(&self, bytes: &[u8], _mime: &str) -> Result<String, ExtractError> {
        document_text(bytes)
    }
}
