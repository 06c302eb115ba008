use once_cell::sync::Lazy;
use regex::Regex;

use paperstyle_core::PaperType;

use crate::config::ParsingConfig;

/// Whether a paragraph reads as a subsection heading or as running text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParagraphKind {
    Heading,
    Prose,
}

/// One output unit of [`Classifier::blocks`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextBlock {
    Heading(String),
    Paragraph(String),
}

/// Section labels of structured academic papers.
pub const ACADEMIC_HEADINGS: &[&str] = &[
    "Introduction",
    "Background",
    "Literature Review",
    "Related Work",
    "Review of Related Literature",
    "Methodology",
    "Research Methodology",
    "Methods",
    "Materials and Methods",
    "Results",
    "Results and Analysis",
    "Results and Discussion",
    "Findings",
    "Discussion",
    "Conclusion",
    "Conclusions",
    "Recommendation",
    "Recommendations",
];

/// Extra labels common in lab reports.
pub const LAB_REPORT_HEADINGS: &[&str] = &[
    "Aim",
    "Aims",
    "Objective",
    "Objectives",
    "Materials",
    "Apparatus",
    "Procedure",
    "Observations",
    "Analysis",
];

static NUMBERED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.").unwrap());

/// Heading detector with a per-paper-type vocabulary.
///
/// A paragraph is a heading when it equals a vocabulary label (ignoring
/// case and a trailing colon), or when it is short and looks like one:
/// all capitals, a leading "1." style number, or a brief title-case line
/// without sentence punctuation. False positives are expected.
#[derive(Debug, Clone)]
pub struct Classifier {
    vocabulary: Vec<String>,
    max_heading_chars: usize,
    max_title_case_chars: usize,
}

impl Default for Classifier {
    fn default() -> Self {
        Self::for_paper_type(PaperType::ResearchPaper)
    }
}

fn default_vocabulary(paper_type: PaperType) -> Vec<String> {
    let mut labels: Vec<String> = ACADEMIC_HEADINGS.iter().map(|s| s.to_string()).collect();
    if paper_type == PaperType::LabReport {
        labels.extend(LAB_REPORT_HEADINGS.iter().map(|s| s.to_string()));
    }
    labels
}

fn fold_label(s: &str) -> String {
    let s = s.trim();
    s.strip_suffix(':').unwrap_or(s).trim_end().to_lowercase()
}

impl Classifier {
    pub fn for_paper_type(paper_type: PaperType) -> Self {
        Self::for_paper_type_with_config(paper_type, &ParsingConfig::default())
    }

    /// Config-aware version of [`for_paper_type`](Self::for_paper_type).
    pub fn for_paper_type_with_config(paper_type: PaperType, config: &ParsingConfig) -> Self {
        let vocabulary = config
            .heading_vocabulary
            .resolve(&default_vocabulary(paper_type))
            .iter()
            .map(|l| fold_label(l))
            .filter(|l| !l.is_empty())
            .collect();
        Self {
            vocabulary,
            max_heading_chars: config.max_heading_chars,
            max_title_case_chars: config.max_title_case_chars,
        }
    }

    /// True when `label` is in the vocabulary, ignoring case and a trailing colon.
    pub fn is_known_label(&self, label: &str) -> bool {
        let folded = fold_label(label);
        self.vocabulary.iter().any(|v| *v == folded)
    }

    pub fn classify(&self, paragraph: &str) -> ParagraphKind {
        let p = paragraph.trim();
        if p.is_empty() {
            return ParagraphKind::Prose;
        }
        if self.is_known_label(p) {
            tracing::trace!(paragraph = p, "heading: vocabulary label");
            return ParagraphKind::Heading;
        }

        let len = p.chars().count();
        if len >= self.max_heading_chars {
            return ParagraphKind::Prose;
        }

        let heading = is_all_caps(p)
            || NUMBERED_RE.is_match(p)
            || (len < self.max_title_case_chars && is_title_case(p));
        if heading {
            tracing::trace!(paragraph = p, "heading: short-heading heuristic");
            ParagraphKind::Heading
        } else {
            ParagraphKind::Prose
        }
    }

    /// Split text into heading and paragraph blocks.
    ///
    /// Blank lines end a paragraph and consecutive prose lines are joined
    /// with a single space. A heading line always stands alone.
    pub fn blocks(&self, text: &str) -> Vec<TextBlock> {
        let mut blocks = Vec::new();
        let mut current: Vec<&str> = Vec::new();

        let flush = |current: &mut Vec<&str>, blocks: &mut Vec<TextBlock>| {
            if !current.is_empty() {
                blocks.push(TextBlock::Paragraph(current.join(" ")));
                current.clear();
            }
        };

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                flush(&mut current, &mut blocks);
            } else if self.classify(line) == ParagraphKind::Heading {
                flush(&mut current, &mut blocks);
                blocks.push(TextBlock::Heading(line.to_string()));
            } else {
                current.push(line);
            }
        }
        flush(&mut current, &mut blocks);

        blocks
    }

    /// Heading lines of `text`, in order.
    pub fn subheadings(&self, text: &str) -> Vec<String> {
        self.blocks(text)
            .into_iter()
            .filter_map(|b| match b {
                TextBlock::Heading(h) => Some(h),
                TextBlock::Paragraph(_) => None,
            })
            .collect()
    }
}

/// Classify with the default academic vocabulary.
pub fn classify_paragraph(paragraph: &str) -> ParagraphKind {
    static DEFAULT: Lazy<Classifier> = Lazy::new(Classifier::default);
    DEFAULT.classify(paragraph)
}

/// No lower-case letters and at least one upper-case one.
/// Unchanged by upper-casing, so digits and punctuation alone qualify.
fn is_all_caps(s: &str) -> bool {
    !s.chars().any(char::is_lowercase)
}

fn is_title_case(s: &str) -> bool {
    s.chars().next().is_some_and(|c| c.is_ascii_uppercase())
        && !s.contains(['.', '!', '?'])
}
