use once_cell::sync::Lazy;
use regex::Regex;

use paperstyle_core::ParsedSections;

use crate::config::{DEFAULT_STOP_LABELS, ParsingConfig, stop_pattern};

static ABSTRACT_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^abstract\s*:?\s*").unwrap());

static KEYWORDS_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^keywords\s*:?\s*").unwrap());

static REFERENCES_LABEL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:references|bibliography)\s*:?\s*").unwrap());

static ABSTRACT_STOP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&stop_pattern(DEFAULT_STOP_LABELS)).unwrap());

static KEYWORDS_STOP_RE: Lazy<Regex> = Lazy::new(|| {
    let labels: Vec<&str> = DEFAULT_STOP_LABELS
        .iter()
        .copied()
        .filter(|l| *l != "Keywords")
        .collect();
    Regex::new(&stop_pattern(&labels)).unwrap()
});

/// One extraction step: a label, and optionally what ends the block it
/// introduces.
#[derive(Debug, Clone, Copy)]
pub struct LabelRule<'r> {
    pub label: &'r Regex,
    /// Block ends at the first match of this pattern; `None` runs to end of input.
    pub stop: Option<&'r Regex>,
    /// The label must sit at the very start of the cursor.
    pub anchored: bool,
}

/// A successful [`try_match`]: the trimmed block content and the byte span
/// of `cursor` that label plus content occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelMatch<'t> {
    pub content: &'t str,
    pub start: usize,
    pub consumed: usize,
}

/// Try to extract one labelled block from `cursor`.
///
/// Returns `None` when the label is absent (or not at the start, for
/// anchored rules) or when nothing but whitespace follows it. In either
/// case the caller leaves the cursor untouched.
pub fn try_match<'t>(rule: &LabelRule<'_>, cursor: &'t str) -> Option<LabelMatch<'t>> {
    let m = rule.label.find(cursor)?;
    if rule.anchored && m.start() != 0 {
        return None;
    }

    let rest = &cursor[m.end()..];
    let len = rule
        .stop
        .and_then(|stop| stop.find(rest))
        .map_or(rest.len(), |s| s.start());

    let content = rest[..len].trim();
    if content.is_empty() {
        return None;
    }

    Some(LabelMatch {
        content,
        start: m.start(),
        consumed: m.end() + len,
    })
}

/// Split raw paper text into abstract, keywords, references and main body.
///
/// Steps run strictly in that order over a shrinking cursor: an abstract
/// is only recognised at the very start of the text, keywords only at the
/// start of what the abstract left, and the first "References" or
/// "Bibliography" label splits the rest into body and references.
/// Never fails; empty input gives all-empty fields.
pub fn segment(raw: &str) -> ParsedSections {
    segment_with_config(raw, &ParsingConfig::default())
}

/// Config-aware version of [`segment`].
pub fn segment_with_config(raw: &str, config: &ParsingConfig) -> ParsedSections {
    let mut sections = ParsedSections::default();
    let mut cursor = raw.trim();

    let abstract_rule = LabelRule {
        label: config.abstract_label_re.as_ref().unwrap_or(&ABSTRACT_LABEL_RE),
        stop: Some(config.abstract_stop_re.as_ref().unwrap_or(&ABSTRACT_STOP_RE)),
        anchored: true,
    };
    if let Some(m) = try_match(&abstract_rule, cursor) {
        tracing::debug!(len = m.content.len(), "abstract found");
        sections.r#abstract = m.content.to_string();
        cursor = cursor[m.consumed..].trim();
    }

    let keywords_rule = LabelRule {
        label: config.keywords_label_re.as_ref().unwrap_or(&KEYWORDS_LABEL_RE),
        stop: Some(config.keywords_stop_re.as_ref().unwrap_or(&KEYWORDS_STOP_RE)),
        anchored: true,
    };
    if let Some(m) = try_match(&keywords_rule, cursor) {
        tracing::debug!(keywords = %m.content, "keywords found");
        sections.keywords = m.content.to_string();
        cursor = cursor[m.consumed..].trim();
    }

    let references_rule = LabelRule {
        label: config
            .references_label_re
            .as_ref()
            .unwrap_or(&REFERENCES_LABEL_RE),
        stop: None,
        anchored: false,
    };
    match try_match(&references_rule, cursor) {
        Some(m) => {
            tracing::debug!(offset = m.start, "references label found");
            sections.main_body = cursor[..m.start].trim().to_string();
            sections.references = m.content.to_string();
        }
        None => {
            tracing::debug!("no references label; whole remainder is body");
            sections.main_body = cursor.to_string();
        }
    }

    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParsingConfigBuilder;

    const SAMPLE: &str = "Abstract: This paper studies X.\n\nIntroduction\nWe begin by...\n\nReferences\nSmith, J. (2020). Title. Journal.";

    #[test]
    fn test_segment_sample_paper() {
        let s = segment(SAMPLE);
        assert_eq!(s.r#abstract, "This paper studies X.");
        assert_eq!(s.keywords, "");
        assert_eq!(s.main_body, "Introduction\nWe begin by...");
        assert_eq!(s.references, "Smith, J. (2020). Title. Journal.");
    }

    #[test]
    fn test_segment_empty_input() {
        assert_eq!(segment(""), ParsedSections::default());
        assert_eq!(segment("   \n\n  "), ParsedSections::default());
    }

    #[test]
    fn test_abstract_label_without_colon() {
        let s = segment("ABSTRACT\nWe study things.\n\nBody text.");
        assert_eq!(s.r#abstract, "We study things.");
        assert_eq!(s.main_body, "Body text.");
    }

    #[test]
    fn test_abstract_stops_at_keywords_line() {
        let s = segment("Abstract: Short summary.\nKeywords: rust, parsing\n\nThe body.");
        assert_eq!(s.r#abstract, "Short summary.");
        assert_eq!(s.keywords, "rust, parsing");
        assert_eq!(s.main_body, "The body.");
    }

    #[test]
    fn test_keywords_stop_at_blank_line() {
        let s = segment("Abstract: A.\n\nKeywords: one; two\n\nBody here.");
        assert_eq!(s.r#abstract, "A.");
        assert_eq!(s.keywords, "one; two");
        assert_eq!(s.main_body, "Body here.");
    }

    #[test]
    fn test_abstract_stops_at_numbered_heading() {
        let s = segment("Abstract: Summary line\n1. Introduction\nText.");
        assert_eq!(s.r#abstract, "Summary line");
        assert_eq!(s.main_body, "1. Introduction\nText.");
    }

    #[test]
    fn test_abstract_must_lead() {
        let s = segment("My Title\n\nAbstract: not first.");
        assert_eq!(s.r#abstract, "");
        assert_eq!(s.main_body, "My Title\n\nAbstract: not first.");
    }

    #[test]
    fn test_empty_abstract_label_is_left_in_body() {
        let s = segment("Abstract:\n\n");
        assert_eq!(s.r#abstract, "");
        assert_eq!(s.main_body, "Abstract:");
    }

    #[test]
    fn test_bibliography_label() {
        let s = segment("Body.\nBibliography: Doe, A. (2001). Book.");
        assert_eq!(s.main_body, "Body.");
        assert_eq!(s.references, "Doe, A. (2001). Book.");
    }

    #[test]
    fn test_references_label_with_nothing_after_stays_in_body() {
        let s = segment("Some body text.\nReferences");
        assert_eq!(s.references, "");
        assert_eq!(s.main_body, "Some body text.\nReferences");
    }

    // Labels are plain substrings, so they also match inside longer words.

    #[test]
    fn test_references_inside_word_splits() {
        let s = segment("Our preferences differ here.");
        assert_eq!(s.main_body, "Our p");
        assert_eq!(s.references, "differ here.");
    }

    #[test]
    fn test_abstract_label_prefix_of_word() {
        let s = segment("Abstracts: many.\n\nBody.");
        assert_eq!(s.r#abstract, "s: many.");
        assert_eq!(s.main_body, "Body.");
    }

    // Sequential matching: labels out of the expected order are misfiled
    // deterministically rather than reordered.

    #[test]
    fn test_keywords_before_abstract() {
        let s = segment("Keywords: a, b\n\nAbstract: text\n\nbody");
        assert_eq!(s.r#abstract, "");
        assert_eq!(s.keywords, "a, b");
        assert_eq!(s.main_body, "Abstract: text\n\nbody");
    }

    #[test]
    fn test_references_before_abstract_absorbs_rest() {
        let s = segment("References\nDoe (2000).\n\nAbstract: late.");
        assert_eq!(s.r#abstract, "");
        assert_eq!(s.main_body, "");
        assert_eq!(s.references, "Doe (2000).\n\nAbstract: late.");
    }

    #[test]
    fn test_first_references_label_wins() {
        let s = segment("Intro mentions references in passing.\nReferences\nA (2001).");
        assert_eq!(s.main_body, "Intro mentions");
        assert_eq!(s.references, "in passing.\nReferences\nA (2001).");
    }

    #[test]
    fn test_segmentation_is_complete() {
        let inputs = [
            SAMPLE,
            "Abstract: a b c\nKeywords: k1, k2\n\nBody one.\n\nBody two.\nReferences: r1\nr2",
            "No labels at all, just prose.",
            "Keywords: x\n\nAbstract: y",
        ];
        let labels = ["abstract", "keywords", "references", "bibliography", ":"];
        for input in inputs {
            let s = segment(input);
            let mut expected: Vec<String> = input
                .split_whitespace()
                .map(str::to_lowercase)
                .collect();
            let mut got: Vec<String> = [&s.r#abstract, &s.keywords, &s.main_body, &s.references]
                .iter()
                .flat_map(|f| f.split_whitespace())
                .map(str::to_lowercase)
                .collect();
            for l in labels {
                expected.iter_mut().for_each(|w| *w = w.replace(l, ""));
                got.iter_mut().for_each(|w| *w = w.replace(l, ""));
            }
            expected.retain(|w| !w.is_empty());
            got.retain(|w| !w.is_empty());
            expected.sort();
            got.sort();
            assert_eq!(expected, got, "input: {input:?}");
        }
    }

    #[test]
    fn test_custom_stop_label() {
        let config = ParsingConfigBuilder::new()
            .add_stop_label("Background".to_string())
            .build()
            .unwrap();
        let s = segment_with_config("Abstract: Summary.\nBackground\nEarlier work.", &config);
        assert_eq!(s.r#abstract, "Summary.");
        assert_eq!(s.main_body, "Background\nEarlier work.");

        let default = segment("Abstract: Summary.\nBackground\nEarlier work.");
        assert_eq!(default.r#abstract, "Summary.\nBackground\nEarlier work.");
    }

    #[test]
    fn test_custom_references_label() {
        let config = ParsingConfigBuilder::new()
            .references_label_regex(r"(?i)works\s+cited\s*:?\s*")
            .build()
            .unwrap();
        let s = segment_with_config("Essay text.\nWorks Cited\nPoe, E. (1845).", &config);
        assert_eq!(s.main_body, "Essay text.");
        assert_eq!(s.references, "Poe, E. (1845).");
    }

    #[test]
    fn test_custom_keywords_label() {
        let config = ParsingConfigBuilder::new()
            .keywords_label_regex(r"(?i)^index\s+terms\s*[:\-]?\s*")
            .build()
            .unwrap();
        let s = segment_with_config(
            "Abstract: Tides.\nIndex Terms - moon, sea\n\nBody.",
            &config,
        );
        assert_eq!(s.r#abstract, "Tides.\nIndex Terms - moon, sea");
        assert_eq!(s.keywords, "");

        let s = segment_with_config("Index Terms: moon, sea\n\nBody.", &config);
        assert_eq!(s.keywords, "moon, sea");
        assert_eq!(s.main_body, "Body.");
    }

    #[test]
    fn test_try_match_reports_span() {
        let rule = LabelRule {
            label: &KEYWORDS_LABEL_RE,
            stop: Some(&KEYWORDS_STOP_RE),
            anchored: true,
        };
        let m = try_match(&rule, "Keywords: a, b\n\nrest").unwrap();
        assert_eq!(m.content, "a, b");
        assert_eq!(m.start, 0);
        assert_eq!(&"Keywords: a, b\n\nrest"[m.consumed..], "\n\nrest");
        assert!(try_match(&rule, "x Keywords: a").is_none());
    }
}
