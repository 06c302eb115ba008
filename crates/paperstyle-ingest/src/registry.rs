use std::path::Path;

use paperstyle_core::{ExtractError, TextExtractor};
use paperstyle_parsing::normalize_text;

use crate::docx::{DOCX_MIME, DocxExtractor};
use crate::pdf::{PDF_MIME, PdfExtractor};
use crate::plain::{PlainTextExtractor, TEXT_MIME};

/// MIME type for a lower- or upper-case file extension.
pub fn mime_for_extension(ext: &str) -> Option<&'static str> {
    match ext.to_ascii_lowercase().as_str() {
        "txt" | "text" => Some(TEXT_MIME),
        "md" | "markdown" => Some("text/markdown"),
        "docx" => Some(DOCX_MIME),
        "pdf" => Some(PDF_MIME),
        _ => None,
    }
}

pub fn mime_for_path(path: &Path) -> Option<&'static str> {
    path.extension()
        .and_then(|e| e.to_str())
        .and_then(mime_for_extension)
}

/// `text/plain; charset=utf-8` -> `text/plain`
fn essence(mime: &str) -> String {
    mime.split(';').next().unwrap_or("").trim().to_ascii_lowercase()
}

/// Extractors keyed by the MIME types they declare.
///
/// Text coming out of [`extract`](Self::extract) is always passed through
/// [`normalize_text`], whatever backend produced it.
pub struct ExtractorRegistry {
    extractors: Vec<Box<dyn TextExtractor>>,
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::with_builtin()
    }
}

impl ExtractorRegistry {
    pub fn new() -> Self {
        Self {
            extractors: Vec::new(),
        }
    }

    /// Plain text, DOCX and PDF.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(PlainTextExtractor));
        registry.register(Box::new(DocxExtractor));
        registry.register(Box::new(PdfExtractor));
        registry
    }

    /// Later registrations win for MIME types claimed twice.
    pub fn register(&mut self, extractor: Box<dyn TextExtractor>) {
        self.extractors.insert(0, extractor);
    }

    pub fn supports(&self, mime: &str) -> bool {
        self.find(&essence(mime)).is_some()
    }

    fn find(&self, mime: &str) -> Option<&dyn TextExtractor> {
        self.extractors
            .iter()
            .find(|x| x.mime_types().iter().any(|m| *m == mime))
            .map(|x| &**x)
    }

    pub fn extract(&self, bytes: &[u8], mime: &str) -> Result<String, ExtractError> {
        let mime = essence(mime);
        let extractor = self
            .find(&mime)
            .ok_or_else(|| ExtractError::UnsupportedType(mime.clone()))?;
        let text = extractor.extract(bytes, &mime)?;
        tracing::debug!(mime = %mime, bytes = bytes.len(), chars = text.len(), "extracted text");
        Ok(normalize_text(&text))
    }

    /// Read `path` and extract it, choosing the backend by extension.
    pub fn extract_path(&self, path: &Path) -> Result<String, ExtractError> {
        let mime = mime_for_path(path).ok_or_else(|| {
            ExtractError::UnsupportedType(
                path.extension()
                    .map(|e| e.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string()),
            )
        })?;
        if !self.supports(mime) {
            return Err(ExtractError::UnsupportedType(mime.to_string()));
        }
        let bytes = std::fs::read(path)?;
        self.extract(&bytes, mime)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_lookup() {
        assert_eq!(mime_for_extension("TXT"), Some(TEXT_MIME));
        assert_eq!(mime_for_extension("docx"), Some(DOCX_MIME));
        assert_eq!(mime_for_extension("odt"), None);
        assert_eq!(mime_for_path(Path::new("paper.PDF")), Some(PDF_MIME));
    }

    #[test]
    fn test_builtin_types() {
        let registry = ExtractorRegistry::default();
        assert!(registry.supports(PDF_MIME));
        assert!(registry.supports(DOCX_MIME));
        assert!(registry.supports("text/markdown"));
    }

    #[test]
    fn test_unknown_type_is_unsupported() {
        let err = ExtractorRegistry::default()
            .extract(b"PK", "application/vnd.oasis.opendocument.text")
            .unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedType(ref m) if m == "application/vnd.oasis.opendocument.text"));
        assert!(err.to_string().contains("Please upload a PDF, DOCX, or TXT file"));
    }

    #[test]
    fn test_mime_parameters_ignored_and_text_normalised() {
        let text = ExtractorRegistry::default()
            .extract("a\r\nﬁne\r\n".as_bytes(), "Text/Plain; charset=utf-8")
            .unwrap();
        assert_eq!(text, "a\nfine\n");
    }

    #[test]
    fn test_empty_registry() {
        assert!(!ExtractorRegistry::new().supports(TEXT_MIME));
    }
}
