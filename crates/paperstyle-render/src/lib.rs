//! HTML rendering of a [`FormatRequest`](paperstyle_core::FormatRequest) in
//! one of the supported citation styles.
//!
//! [`Renderer`] looks up a [`StyleRenderer`] in its [`StyleRegistry`] and
//! runs it. Output is a self-contained fragment with inline styles, the same
//! markup for preview and export.

pub mod context;
pub mod dispatch;
pub mod html;
pub mod numbering;
pub mod paragraphs;
pub mod references;
pub mod styles;
pub mod toc;

pub use context::RenderContext;
pub use dispatch::{DEFAULT_INSTITUTION_LINES, RenderOptions, Renderer, StyleRegistry, UNSUPPORTED_MARKER};
pub use numbering::{NumberingScheme, to_roman};
pub use paragraphs::text_to_markup;
pub use references::{ReferenceOrder, ordered_references, split_references};
pub use styles::{
    ABSTRACT_PLACEHOLDER, HeadingCase, KEYWORDS_PLACEHOLDER, REFERENCES_PLACEHOLDER, StyleRenderer,
    StyleSheet,
};
pub use toc::{TocEntry, render_toc};
