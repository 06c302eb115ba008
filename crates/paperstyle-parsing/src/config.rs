use regex::Regex;
use thiserror::Error;

/// A user-supplied pattern failed to compile.
#[derive(Error, Debug)]
#[error("invalid {field} pattern: {source}")]
pub struct ConfigError {
    pub field: &'static str,
    #[source]
    pub source: regex::Error,
}

/// Controls how a list of patterns/values is overridden from its defaults.
#[derive(Debug, Clone, Default)]
pub enum ListOverride<T> {
    /// Use the built-in defaults.
    #[default]
    Default,
    /// Completely replace the defaults with these values.
    Replace(Vec<T>),
    /// Append these values to the defaults.
    Extend(Vec<T>),
}

impl<T: Clone> ListOverride<T> {
    /// Resolve this override against the given defaults.
    pub fn resolve(&self, defaults: &[T]) -> Vec<T> {
        match self {
            ListOverride::Default => defaults.to_vec(),
            ListOverride::Replace(v) => v.clone(),
            ListOverride::Extend(v) => {
                let mut result = defaults.to_vec();
                result.extend(v.iter().cloned());
                result
            }
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, ListOverride::Default)
    }
}

/// Labels that end an abstract block (the keywords block uses the same list
/// minus "Keywords").
pub const DEFAULT_STOP_LABELS: &[&str] = &[
    "Introduction",
    "Methods",
    "Results",
    "Discussion",
    "Conclusion",
    "Keywords",
    "References",
    "Bibliography",
];

/// Configuration for segmentation and subsection classification.
///
/// All regex fields are `Option<Regex>`; `None` means "use the built-in default".
/// Use [`ParsingConfigBuilder`] to construct with string patterns.
#[derive(Debug, Clone)]
pub struct ParsingConfig {
    // ── section.rs ──
    /// Regex for the abstract label, anchored at the start of the text.
    pub(crate) abstract_label_re: Option<Regex>,
    /// Regex for the keywords label, anchored at the start of the remaining text.
    pub(crate) keywords_label_re: Option<Regex>,
    /// Regex for the references/bibliography label, searched anywhere.
    pub(crate) references_label_re: Option<Regex>,
    /// Compiled stop pattern for the abstract block (set when stop labels are overridden).
    pub(crate) abstract_stop_re: Option<Regex>,
    /// Compiled stop pattern for the keywords block.
    pub(crate) keywords_stop_re: Option<Regex>,

    // ── classify.rs ──
    /// Labels recognised as headings in addition to (or instead of) the
    /// per-paper-type vocabulary.
    pub(crate) heading_vocabulary: ListOverride<String>,
    /// Paragraphs at or above this many characters are never headings (default: 100).
    pub(crate) max_heading_chars: usize,
    /// Title-case headings must be shorter than this (default: 50).
    pub(crate) max_title_case_chars: usize,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            abstract_label_re: None,
            keywords_label_re: None,
            references_label_re: None,
            abstract_stop_re: None,
            keywords_stop_re: None,
            heading_vocabulary: ListOverride::Default,
            max_heading_chars: 100,
            max_title_case_chars: 50,
        }
    }
}

/// Build the stop pattern that ends an abstract or keywords block: a blank
/// line, or a newline followed by one of `labels` or a numbered heading.
pub(crate) fn stop_pattern<S: AsRef<str>>(labels: &[S]) -> String {
    let alternatives: Vec<String> = labels
        .iter()
        .map(|l| regex::escape(l.as_ref().trim()))
        .filter(|l| !l.is_empty())
        .chain(std::iter::once(r"\d+\.\s*\w".to_string()))
        .collect();
    format!(r"(?i)\n[ \t]*\n|\n\s*(?:{})", alternatives.join("|"))
}

/// Builder for [`ParsingConfig`].
///
/// Accepts string patterns that are compiled to `Regex` in [`build()`](Self::build).
/// Fails fast with [`ConfigError`] naming the first invalid pattern.
#[derive(Debug, Clone, Default)]
pub struct ParsingConfigBuilder {
    abstract_label_re: Option<String>,
    keywords_label_re: Option<String>,
    references_label_re: Option<String>,
    stop_labels: ListOverride<String>,
    heading_vocabulary: ListOverride<String>,
    max_heading_chars: Option<usize>,
    max_title_case_chars: Option<usize>,
}

impl ParsingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Labels ──

    pub fn abstract_label_regex(mut self, pattern: &str) -> Self {
        self.abstract_label_re = Some(pattern.to_string());
        self
    }

    pub fn keywords_label_regex(mut self, pattern: &str) -> Self {
        self.keywords_label_re = Some(pattern.to_string());
        self
    }

    pub fn references_label_regex(mut self, pattern: &str) -> Self {
        self.references_label_re = Some(pattern.to_string());
        self
    }

    // ── Stop labels ──

    pub fn set_stop_labels(mut self, labels: Vec<String>) -> Self {
        self.stop_labels = ListOverride::Replace(labels);
        self
    }

    pub fn add_stop_label(mut self, label: String) -> Self {
        match &mut self.stop_labels {
            ListOverride::Extend(v) => v.push(label),
            _ => self.stop_labels = ListOverride::Extend(vec![label]),
        }
        self
    }

    // ── Heading vocabulary ──

    pub fn set_heading_vocabulary(mut self, labels: Vec<String>) -> Self {
        self.heading_vocabulary = ListOverride::Replace(labels);
        self
    }

    pub fn add_heading(mut self, label: String) -> Self {
        match &mut self.heading_vocabulary {
            ListOverride::Extend(v) => v.push(label),
            _ => self.heading_vocabulary = ListOverride::Extend(vec![label]),
        }
        self
    }

    // ── Scalars ──

    pub fn max_heading_chars(mut self, n: usize) -> Self {
        self.max_heading_chars = Some(n);
        self
    }

    pub fn max_title_case_chars(mut self, n: usize) -> Self {
        self.max_title_case_chars = Some(n);
        self
    }

    /// Compile all string patterns into regexes and produce a [`ParsingConfig`].
    pub fn build(self) -> Result<ParsingConfig, ConfigError> {
        let compile = |field: &'static str, opt: Option<String>| {
            opt.map(|p| Regex::new(&p))
                .transpose()
                .map_err(|source| ConfigError { field, source })
        };

        let (abstract_stop_re, keywords_stop_re) = if self.stop_labels.is_default() {
            (None, None)
        } else {
            let defaults: Vec<String> = DEFAULT_STOP_LABELS.iter().map(|s| s.to_string()).collect();
            let labels = self.stop_labels.resolve(&defaults);
            let keyword_labels: Vec<&String> = labels
                .iter()
                .filter(|l| !l.trim().eq_ignore_ascii_case("keywords"))
                .collect();
            let stop_err = |source| ConfigError {
                field: "stop label",
                source,
            };
            (
                Some(Regex::new(&stop_pattern(&labels)).map_err(stop_err)?),
                Some(Regex::new(&stop_pattern(&keyword_labels)).map_err(stop_err)?),
            )
        };

        Ok(ParsingConfig {
            abstract_label_re: compile("abstract label", self.abstract_label_re)?,
            keywords_label_re: compile("keywords label", self.keywords_label_re)?,
            references_label_re: compile("references label", self.references_label_re)?,
            abstract_stop_re,
            keywords_stop_re,
            heading_vocabulary: self.heading_vocabulary,
            max_heading_chars: self.max_heading_chars.unwrap_or(100),
            max_title_case_chars: self.max_title_case_chars.unwrap_or(50),
        })
    }
}
