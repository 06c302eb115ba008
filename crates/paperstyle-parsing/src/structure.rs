use once_cell::sync::Lazy;
use regex::Regex;

use paperstyle_core::{PaperType, SectionKind, StructuredSections};

use crate::classify::Classifier;

static NUMBER_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\d+(?:\.\d+)*|[IVXLC]+)\.?\s+").unwrap());

/// Map a heading line to the canonical section it opens.
///
/// Leading "2." / "IV." numbering and a trailing colon are ignored.
pub fn canonical_section(heading: &str) -> Option<SectionKind> {
    let label = heading_label(heading).to_lowercase();
    let kind = match label.as_str() {
        "introduction" => SectionKind::Introduction,
        "background" | "literature review" | "related work" | "review of related literature" => {
            SectionKind::LiteratureReview
        }
        "methodology" | "methods" | "materials and methods" | "research methodology" => {
            SectionKind::Methodology
        }
        "results" | "findings" | "results and analysis" | "results and discussion" => {
            SectionKind::Results
        }
        "discussion" => SectionKind::Discussion,
        "conclusion" | "conclusions" => SectionKind::Conclusion,
        "recommendation" | "recommendations" => SectionKind::Recommendation,
        _ => return None,
    };
    Some(kind)
}

/// The heading text without numbering or a trailing colon.
fn heading_label(heading: &str) -> &str {
    let h = heading.trim();
    let h = NUMBER_PREFIX_RE
        .find(h)
        .map_or(h, |m| &h[m.end()..]);
    h.strip_suffix(':').unwrap_or(h).trim_end()
}

/// Split a free-form body into the canonical structured sections.
///
/// Text under a recognised heading goes to that section, titled as the
/// heading was written. Text before the first recognised heading goes to
/// the introduction. A section heading that repeats appends to it.
pub fn structure_body(main_body: &str, paper_type: PaperType) -> StructuredSections {
    structure_body_with(main_body, &Classifier::for_paper_type(paper_type))
}

/// Version of [`structure_body`] with an explicit classifier; a heading
/// only opens a section if the classifier knows its label.
pub fn structure_body_with(main_body: &str, classifier: &Classifier) -> StructuredSections {
    let mut sections = StructuredSections::default();
    let mut current = SectionKind::Introduction;
    let mut lines: Vec<Vec<&str>> = vec![Vec::new(); SectionKind::CANONICAL_ORDER.len()];
    let slot = |kind: SectionKind| {
        SectionKind::CANONICAL_ORDER
            .iter()
            .position(|k| *k == kind)
            .unwrap_or(0)
    };

    for line in main_body.lines() {
        let label = heading_label(line);
        let kind = canonical_section(line).filter(|_| classifier.is_known_label(label));
        match kind {
            Some(kind) => {
                tracing::debug!(heading = label, section = ?kind, "section heading");
                current = kind;
                if lines[slot(kind)].is_empty() {
                    sections.get_mut(kind).title = label.to_string();
                }
            }
            None => lines[slot(current)].push(line),
        }
    }

    for (kind, body) in SectionKind::CANONICAL_ORDER.into_iter().zip(lines) {
        sections.get_mut(kind).content = body.join("\n").trim().to_string();
    }
    sections
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_section_variants() {
        assert_eq!(canonical_section("Introduction"), Some(SectionKind::Introduction));
        assert_eq!(canonical_section("2. Methods:"), Some(SectionKind::Methodology));
        assert_eq!(canonical_section("IV. RESULTS"), Some(SectionKind::Results));
        assert_eq!(canonical_section("Related Work"), Some(SectionKind::LiteratureReview));
        assert_eq!(canonical_section("Acknowledgements"), None);
    }

    #[test]
    fn test_structure_body_assigns_sections() {
        let body = "Opening remarks.\n\nMethods\nWe sampled.\n\nResults\nIt worked.\n\nConclusion\nDone.";
        let s = structure_body(body, PaperType::ResearchPaper);
        assert_eq!(s.introduction.content, "Opening remarks.");
        assert_eq!(s.methodology.title, "Methods");
        assert_eq!(s.methodology.content, "We sampled.");
        assert_eq!(s.results.content, "It worked.");
        assert_eq!(s.conclusion.content, "Done.");
        assert!(!s.discussion.has_content());
        assert_eq!(s.discussion.title, "Discussion");
    }

    #[test]
    fn test_structure_body_keeps_unknown_headings_inline() {
        let body = "1. Introduction\nFirst.\nData Sources\nSecond.";
        let s = structure_body(body, PaperType::Thesis);
        assert_eq!(s.introduction.title, "Introduction");
        assert_eq!(s.introduction.content, "First.\nData Sources\nSecond.");
    }

    #[test]
    fn test_structure_body_empty() {
        let s = structure_body("", PaperType::Thesis);
        assert!(s.is_empty());
    }
}
