use thiserror::Error;

pub mod config_file;
pub mod history;
pub mod model;

// Re-export for convenience
pub use history::{
    DEFAULT_HISTORY_CAPACITY, HistoryError, HistoryRecord, HistoryStore, JsonHistoryFile,
    RecentHistory,
};
pub use model::{
    FormatRequest, FormatStyle, PaperBody, PaperType, PaperTypeProfile, ParsedSections, Section,
    SectionKind, StructuredSections, UnknownName,
};

/// Errors from text extraction backends.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("unsupported file type '{0}'. Please upload a PDF, DOCX, or TXT file")]
    UnsupportedType(String),
    #[error("failed to decode {kind} document: {detail}")]
    Decode { kind: &'static str, detail: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Trait for file-to-text extraction backends.
///
/// Implementors turn the raw bytes of an uploaded document into plain text;
/// segmentation of that text lives in `paperstyle-parsing`.
pub trait TextExtractor: Send + Sync {
    /// MIME types this backend understands.
    fn mime_types(&self) -> &[&'static str];

    /// Extract the full plain-text content of a document.
    fn extract(&self, bytes: &[u8], mime: &str) -> Result<String, ExtractError>;
}
