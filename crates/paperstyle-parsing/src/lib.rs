//! Heuristic segmentation of academic paper text.
//!
//! [`segment`] splits raw text into abstract, keywords, references and main
//! body. [`Classifier`] decides which lines of a body are subsection
//! headings, and [`structure_body`] uses it to fill the canonical sections
//! of structured paper types.

pub mod classify;
pub mod config;
pub mod section;
pub mod structure;
pub mod text_processing;

pub use classify::{Classifier, ParagraphKind, TextBlock, classify_paragraph};
pub use config::{ConfigError, ListOverride, ParsingConfig, ParsingConfigBuilder};
pub use section::{LabelMatch, LabelRule, segment, segment_with_config, try_match};
pub use structure::{canonical_section, structure_body, structure_body_with};
pub use text_processing::{expand_ligatures, normalize_text};
