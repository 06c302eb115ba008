//! Turn uploaded documents into plain text ready for segmentation.
//!
//! [`ExtractorRegistry`] picks a [`TextExtractor`] by MIME type (or by file
//! extension for paths) and normalises the result. Types without a backend
//! fail with [`ExtractError::UnsupportedType`].

pub mod docx;
pub mod pdf;
pub mod plain;
pub mod registry;

pub use docx::{DOCX_MIME, DocxExtractor, document_text};
pub use pdf::{PDF_MIME, PdfExtractor};
pub use plain::{PlainTextExtractor, TEXT_MIME};
pub use registry::{ExtractorRegistry, mime_for_extension, mime_for_path};

// Re-export the collaborator interface
pub use paperstyle_core::{ExtractError, TextExtractor};
