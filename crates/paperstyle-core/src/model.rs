use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The kind of document being formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaperType {
    Essay,
    ResearchPaper,
    Thesis,
    Dissertation,
    LabReport,
    JournalArticle,
    SeminarPaper,
    ConferenceReport,
    GeneralArticle,
    Report,
    ProjectWriteup,
}

/// Which optional parts a [`PaperType`] declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaperTypeProfile {
    pub has_abstract: bool,
    pub has_keywords: bool,
    pub has_structured_body: bool,
}

impl PaperTypeProfile {
    const fn new(has_abstract: bool, has_keywords: bool, has_structured_body: bool) -> Self {
        Self {
            has_abstract,
            has_keywords,
            has_structured_body,
        }
    }
}

impl PaperType {
    pub const ALL: [PaperType; 11] = [
        PaperType::Essay,
        PaperType::ResearchPaper,
        PaperType::Thesis,
        PaperType::Dissertation,
        PaperType::LabReport,
        PaperType::JournalArticle,
        PaperType::SeminarPaper,
        PaperType::ConferenceReport,
        PaperType::GeneralArticle,
        PaperType::Report,
        PaperType::ProjectWriteup,
    ];

    /// The fixed profile for this paper type.
    pub const fn profile(self) -> PaperTypeProfile {
        match self {
            PaperType::Essay | PaperType::GeneralArticle => PaperTypeProfile::new(false, false, false),
            PaperType::ResearchPaper
            | PaperType::JournalArticle
            | PaperType::Thesis
            | PaperType::Dissertation
            | PaperType::ProjectWriteup => PaperTypeProfile::new(true, true, true),
            PaperType::LabReport | PaperType::Report => PaperTypeProfile::new(true, false, false),
            PaperType::SeminarPaper | PaperType::ConferenceReport => {
                PaperTypeProfile::new(true, true, false)
            }
        }
    }

    /// Human-readable label, as shown in pickers.
    pub fn label(self) -> &'static str {
        match self {
            PaperType::Essay => "Essay",
            PaperType::ResearchPaper => "Research Paper",
            PaperType::Thesis => "Thesis",
            PaperType::Dissertation => "Dissertation",
            PaperType::LabReport => "Lab Report",
            PaperType::JournalArticle => "Journal Article",
            PaperType::SeminarPaper => "Seminar Paper",
            PaperType::ConferenceReport => "Conference Report",
            PaperType::GeneralArticle => "General Article",
            PaperType::Report => "Report",
            PaperType::ProjectWriteup => "Project Write-up",
        }
    }

    /// Kebab-case identifier used on the command line and in config files.
    pub fn as_str(self) -> &'static str {
        match self {
            PaperType::Essay => "essay",
            PaperType::ResearchPaper => "research-paper",
            PaperType::Thesis => "thesis",
            PaperType::Dissertation => "dissertation",
            PaperType::LabReport => "lab-report",
            PaperType::JournalArticle => "journal-article",
            PaperType::SeminarPaper => "seminar-paper",
            PaperType::ConferenceReport => "conference-report",
            PaperType::GeneralArticle => "general-article",
            PaperType::Report => "report",
            PaperType::ProjectWriteup => "project-writeup",
        }
    }
}

impl fmt::Display for PaperType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lowercase and drop everything but letters and digits, so that
/// "Research Paper", "research-paper" and "research_paper" compare equal.
fn fold_name(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_alphanumeric())
        .flat_map(char::to_lowercase)
        .collect()
}

impl FromStr for PaperType {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded = fold_name(s);
        PaperType::ALL
            .into_iter()
            .find(|t| fold_name(t.as_str()) == folded || fold_name(t.label()) == folded)
            .ok_or_else(|| UnknownName {
                kind: "paper type",
                name: s.to_string(),
            })
    }
}

/// Target citation/layout style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormatStyle {
    Basic,
    BasicApa,
    BasicMla,
    Apa7,
    Mla9,
    Ieee,
    Springer,
    Chicago,
    Fpi,
}

impl FormatStyle {
    pub const ALL: [FormatStyle; 9] = [
        FormatStyle::Basic,
        FormatStyle::BasicApa,
        FormatStyle::BasicMla,
        FormatStyle::Apa7,
        FormatStyle::Mla9,
        FormatStyle::Ieee,
        FormatStyle::Springer,
        FormatStyle::Chicago,
        FormatStyle::Fpi,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormatStyle::Basic => "Basic",
            FormatStyle::BasicApa => "Basic APA",
            FormatStyle::BasicMla => "Basic MLA",
            FormatStyle::Apa7 => "APA 7th Edition",
            FormatStyle::Mla9 => "MLA 9th Edition",
            FormatStyle::Ieee => "IEEE",
            FormatStyle::Springer => "Springer",
            FormatStyle::Chicago => "Chicago",
            FormatStyle::Fpi => "FPI Style (Project/Journal)",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FormatStyle::Basic => "basic",
            FormatStyle::BasicApa => "basic-apa",
            FormatStyle::BasicMla => "basic-mla",
            FormatStyle::Apa7 => "apa7",
            FormatStyle::Mla9 => "mla9",
            FormatStyle::Ieee => "ieee",
            FormatStyle::Springer => "springer",
            FormatStyle::Chicago => "chicago",
            FormatStyle::Fpi => "fpi",
        }
    }

    /// Extra spellings accepted by [`FromStr`] besides the identifier and label.
    fn aliases(self) -> &'static [&'static str] {
        match self {
            FormatStyle::Apa7 => &["APA 7", "APA"],
            FormatStyle::Mla9 => &["MLA 9", "MLA"],
            FormatStyle::Fpi => &["FPI Style"],
            _ => &[],
        }
    }
}

impl fmt::Display for FormatStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FormatStyle {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let folded = fold_name(s);
        FormatStyle::ALL
            .into_iter()
            .find(|st| {
                fold_name(st.as_str()) == folded
                    || fold_name(st.label()) == folded
                    || st.aliases().iter().any(|a| fold_name(a) == folded)
            })
            .ok_or_else(|| UnknownName {
                kind: "format style",
                name: s.to_string(),
            })
    }
}

/// Returned when a style or paper-type name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind}: '{name}'")]
pub struct UnknownName {
    pub kind: &'static str,
    pub name: String,
}

/// Sections recovered from one raw-text input. Absent sections are empty
/// strings, never missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedSections {
    pub r#abstract: String,
    pub keywords: String,
    pub references: String,
    pub main_body: String,
}

/// The seven canonical body sections, in rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Introduction,
    LiteratureReview,
    Methodology,
    Results,
    Discussion,
    Conclusion,
    Recommendation,
}

impl SectionKind {
    pub const CANONICAL_ORDER: [SectionKind; 7] = [
        SectionKind::Introduction,
        SectionKind::LiteratureReview,
        SectionKind::Methodology,
        SectionKind::Results,
        SectionKind::Discussion,
        SectionKind::Conclusion,
        SectionKind::Recommendation,
    ];

    pub fn default_title(self) -> &'static str {
        match self {
            SectionKind::Introduction => "Introduction",
            SectionKind::LiteratureReview => "Literature Review",
            SectionKind::Methodology => "Methodology",
            SectionKind::Results => "Results",
            SectionKind::Discussion => "Discussion",
            SectionKind::Conclusion => "Conclusion",
            SectionKind::Recommendation => "Recommendation",
        }
    }
}

/// A titled body section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub title: String,
    pub content: String,
}

impl Section {
    pub fn titled(kind: SectionKind) -> Self {
        Self {
            title: kind.default_title().to_string(),
            content: String::new(),
        }
    }

    /// The title to render. A blank override falls back to the canonical name.
    pub fn display_title(&self, kind: SectionKind) -> &str {
        let t = self.title.trim();
        if t.is_empty() { kind.default_title() } else { t }
    }

    pub fn has_content(&self) -> bool {
        !self.content.trim().is_empty()
    }
}

/// Named body sections for paper types with a structured body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructuredSections {
    pub introduction: Section,
    pub literature_review: Section,
    pub methodology: Section,
    pub results: Section,
    pub discussion: Section,
    pub conclusion: Section,
    pub recommendation: Section,
}

impl Default for StructuredSections {
    fn default() -> Self {
        Self {
            introduction: Section::titled(SectionKind::Introduction),
            literature_review: Section::titled(SectionKind::LiteratureReview),
            methodology: Section::titled(SectionKind::Methodology),
            results: Section::titled(SectionKind::Results),
            discussion: Section::titled(SectionKind::Discussion),
            conclusion: Section::titled(SectionKind::Conclusion),
            recommendation: Section::titled(SectionKind::Recommendation),
        }
    }
}

impl StructuredSections {
    pub fn get(&self, kind: SectionKind) -> &Section {
        match kind {
            SectionKind::Introduction => &self.introduction,
            SectionKind::LiteratureReview => &self.literature_review,
            SectionKind::Methodology => &self.methodology,
            SectionKind::Results => &self.results,
            SectionKind::Discussion => &self.discussion,
            SectionKind::Conclusion => &self.conclusion,
            SectionKind::Recommendation => &self.recommendation,
        }
    }

    pub fn get_mut(&mut self, kind: SectionKind) -> &mut Section {
        match kind {
            SectionKind::Introduction => &mut self.introduction,
            SectionKind::LiteratureReview => &mut self.literature_review,
            SectionKind::Methodology => &mut self.methodology,
            SectionKind::Results => &mut self.results,
            SectionKind::Discussion => &mut self.discussion,
            SectionKind::Conclusion => &mut self.conclusion,
            SectionKind::Recommendation => &mut self.recommendation,
        }
    }

    /// Iterate all sections in canonical order, including empty ones.
    pub fn iter(&self) -> impl Iterator<Item = (SectionKind, &Section)> {
        SectionKind::CANONICAL_ORDER
            .into_iter()
            .map(move |k| (k, self.get(k)))
    }

    /// Iterate only sections with content, in canonical order.
    pub fn present(&self) -> impl Iterator<Item = (SectionKind, &Section)> {
        self.iter().filter(|(_, s)| s.has_content())
    }

    pub fn is_empty(&self) -> bool {
        self.present().next().is_none()
    }
}

/// The body of a paper: free-form or split into named sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaperBody {
    Main(String),
    Structured(StructuredSections),
}

impl Default for PaperBody {
    fn default() -> Self {
        PaperBody::Main(String::new())
    }
}

/// Everything a style renderer needs for one render call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatRequest {
    #[serde(default)]
    pub paper_heading: String,
    #[serde(default)]
    pub author_name: String,
    pub paper_type: PaperType,
    pub format_style: FormatStyle,
    #[serde(default)]
    pub r#abstract: String,
    #[serde(default)]
    pub keywords: String,
    #[serde(default)]
    pub references: String,
    #[serde(default)]
    pub body: PaperBody,
    /// Date printed on title pages. Left to the caller so rendering never
    /// depends on the clock.
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl FormatRequest {
    /// Build a request from editable fields plus the last segmentation.
    ///
    /// The body variant follows the paper type's profile: structured types
    /// take `structured` (defaulting to empty sections), all others take
    /// `parsed.main_body`.
    pub fn assemble(
        paper_heading: impl Into<String>,
        author_name: impl Into<String>,
        paper_type: PaperType,
        format_style: FormatStyle,
        parsed: ParsedSections,
        structured: Option<StructuredSections>,
    ) -> Self {
        let body = if paper_type.profile().has_structured_body {
            PaperBody::Structured(structured.unwrap_or_default())
        } else {
            PaperBody::Main(parsed.main_body)
        };
        Self {
            paper_heading: paper_heading.into(),
            author_name: author_name.into(),
            paper_type,
            format_style,
            r#abstract: parsed.r#abstract,
            keywords: parsed.keywords,
            references: parsed.references,
            body,
            date: None,
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn profile(&self) -> PaperTypeProfile {
        self.paper_type.profile()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_paper_type_has_a_profile() {
        for t in PaperType::ALL {
            // Exhaustive match in profile(); this just pins a few values.
            let _ = t.profile();
        }
        assert!(!PaperType::Essay.profile().has_abstract);
        assert!(PaperType::ResearchPaper.profile().has_structured_body);
        assert!(PaperType::Report.profile().has_abstract);
        assert!(!PaperType::Report.profile().has_keywords);
        assert!(!PaperType::LabReport.profile().has_structured_body);
    }

    #[test]
    fn test_paper_type_from_str() {
        assert_eq!("Research Paper".parse::<PaperType>(), Ok(PaperType::ResearchPaper));
        assert_eq!("research-paper".parse::<PaperType>(), Ok(PaperType::ResearchPaper));
        assert_eq!("Project Write-up".parse::<PaperType>(), Ok(PaperType::ProjectWriteup));
        assert!("novel".parse::<PaperType>().is_err());
    }

    #[test]
    fn test_format_style_from_str() {
        assert_eq!("APA 7th Edition".parse::<FormatStyle>(), Ok(FormatStyle::Apa7));
        assert_eq!("apa7".parse::<FormatStyle>(), Ok(FormatStyle::Apa7));
        assert_eq!("APA 7".parse::<FormatStyle>(), Ok(FormatStyle::Apa7));
        assert_eq!("Basic MLA".parse::<FormatStyle>(), Ok(FormatStyle::BasicMla));
        assert_eq!("ieee".parse::<FormatStyle>(), Ok(FormatStyle::Ieee));
        let err = "Harvard".parse::<FormatStyle>().unwrap_err();
        assert_eq!(err.to_string(), "unknown format style: 'Harvard'");
    }

    #[test]
    fn test_assemble_picks_body_by_profile() {
        let parsed = ParsedSections {
            main_body: "Body text".into(),
            ..Default::default()
        };
        let essay = FormatRequest::assemble(
            "T",
            "A",
            PaperType::Essay,
            FormatStyle::Apa7,
            parsed.clone(),
            None,
        );
        assert_eq!(essay.body, PaperBody::Main("Body text".into()));

        let thesis = FormatRequest::assemble(
            "T",
            "A",
            PaperType::Thesis,
            FormatStyle::Apa7,
            parsed,
            None,
        );
        match thesis.body {
            PaperBody::Structured(s) => assert!(s.is_empty()),
            PaperBody::Main(_) => panic!("structured type got a main body"),
        }
    }

    #[test]
    fn test_structured_iteration_order() {
        let mut s = StructuredSections::default();
        s.conclusion.content = "c".into();
        s.introduction.content = "i".into();
        let kinds: Vec<_> = s.present().map(|(k, _)| k).collect();
        assert_eq!(kinds, vec![SectionKind::Introduction, SectionKind::Conclusion]);
    }

    #[test]
    fn test_display_title_falls_back() {
        let sec = Section {
            title: "  ".into(),
            content: "x".into(),
        };
        assert_eq!(sec.display_title(SectionKind::Results), "Results");
        let sec = Section {
            title: "Findings".into(),
            content: "x".into(),
        };
        assert_eq!(sec.display_title(SectionKind::Results), "Findings");
    }

    #[test]
    fn test_request_json_roundtrip_defaults() {
        let json = r#"{"paper_type":"essay","format_style":"mla9","body":{"main":"Hello"}}"#;
        let req: FormatRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.paper_type, PaperType::Essay);
        assert_eq!(req.body, PaperBody::Main("Hello".into()));
        assert!(req.r#abstract.is_empty());
        assert!(req.date.is_none());
    }
}
