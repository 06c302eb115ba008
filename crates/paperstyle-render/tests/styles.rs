use chrono::NaiveDate;
use paperstyle_core::{
    FormatRequest, FormatStyle, PaperBody, PaperType, ParsedSections, StructuredSections,
};
use paperstyle_render::{
    ABSTRACT_PLACEHOLDER, KEYWORDS_PLACEHOLDER, REFERENCES_PLACEHOLDER, Renderer,
    UNSUPPORTED_MARKER,
};
use regex::Regex;

fn blank_request(style: FormatStyle, paper_type: PaperType) -> FormatRequest {
    let structured = paper_type.profile().has_structured_body;
    FormatRequest::assemble(
        "Test",
        "",
        paper_type,
        style,
        ParsedSections::default(),
        structured.then(StructuredSections::default),
    )
}

#[test]
fn placeholders_follow_the_paper_type_profile() {
    let renderer = Renderer::default();
    for style in FormatStyle::ALL {
        for paper_type in PaperType::ALL {
            let req = blank_request(style, paper_type);
            let html = renderer.render(&req);
            let profile = paper_type.profile();
            assert_eq!(
                html.contains(ABSTRACT_PLACEHOLDER),
                profile.has_abstract,
                "{style:?}/{paper_type:?} abstract"
            );
            assert_eq!(
                html.contains(KEYWORDS_PLACEHOLDER),
                profile.has_keywords,
                "{style:?}/{paper_type:?} keywords"
            );
            assert!(html.contains(REFERENCES_PLACEHOLDER), "{style:?}/{paper_type:?}");
            assert_ne!(html, UNSUPPORTED_MARKER);
        }
    }
}

#[test]
fn rendering_is_deterministic() {
    let renderer = Renderer::default();
    let req = blank_request(FormatStyle::Apa7, PaperType::Thesis)
        .with_date(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
    for style in FormatStyle::ALL {
        assert_eq!(
            renderer.format_preview(&req, style),
            renderer.format_preview(&req, style)
        );
        assert_eq!(
            renderer.format_preview(&req, style),
            renderer.format_for_export(&req, style)
        );
    }
}

#[test]
fn ieee_journal_article_with_empty_abstract() {
    let req = blank_request(FormatStyle::Ieee, PaperType::JournalArticle);
    let html = Renderer::default().render(&req);
    assert!(html.contains(">Test</h1>"));
    assert!(html.contains("[Abstract goes here]"));
    assert!(html.contains("[Keywords go here]"));
}

#[test]
fn reference_order_depends_on_style() {
    let renderer = Renderer::default();
    let mut req = blank_request(FormatStyle::Apa7, PaperType::Essay);
    req.references = "Zeta, A. (2020). Last.\nApple, B. (2019). First.".into();

    let apa = renderer.format_preview(&req, FormatStyle::Apa7);
    assert!(apa.find("Apple").unwrap() < apa.find("Zeta").unwrap());

    let ieee = renderer.format_preview(&req, FormatStyle::Ieee);
    assert!(ieee.contains("[1] Zeta, A. (2020). Last."));
    assert!(ieee.contains("[2] Apple, B. (2019). First."));
}

#[test]
fn unstructured_types_never_number_sections() {
    let numbered = Regex::new(r"<h2[^>]*>\s*(?:\d+|[IVXLC]+)\. ").unwrap();
    let renderer = Renderer::default();
    for style in FormatStyle::ALL {
        let mut req = blank_request(style, PaperType::Essay);
        req.body = PaperBody::Main("Introduction\nSome prose.\n\nConclusion\nMore.".into());
        let html = renderer.render(&req);
        assert!(!numbered.is_match(&html), "{style:?}");
        assert!(html.contains("Some prose."));
    }
}

#[test]
fn structured_type_ignores_free_form_body() {
    let numbered = Regex::new(r"<h2[^>]*>\s*(?:\d+|[IVXLC]+)\. ").unwrap();
    let renderer = Renderer::default();
    for style in FormatStyle::ALL {
        let mut req = blank_request(style, PaperType::Thesis);
        req.body = PaperBody::Main("Introduction\nStray prose.\n\nConclusion\nMore.".into());
        let html = renderer.render(&req);
        assert!(!numbered.is_match(&html), "{style:?}");
        assert!(!html.contains("Stray prose."), "{style:?}");
    }
}

#[test]
fn structured_sections_are_numbered_consecutively() {
    let mut sections = StructuredSections::default();
    sections.introduction.content = "Opening.".into();
    sections.discussion.content = "Talk.".into();
    let mut req = blank_request(FormatStyle::Apa7, PaperType::ResearchPaper);
    req.body = PaperBody::Structured(sections);
    let html = Renderer::default().render(&req);
    assert!(html.contains(">1. Introduction</h2>"));
    assert!(html.contains(">2. Discussion</h2>"));
}

#[test]
fn fpi_project_writeup_uses_its_own_layout() {
    let mut sections = StructuredSections::default();
    sections.introduction.content = "Start here.".into();
    let mut req = blank_request(FormatStyle::Fpi, PaperType::ProjectWriteup);
    req.body = PaperBody::Structured(sections.clone());
    let renderer = Renderer::default();
    let html = renderer.render(&req);
    assert!(html.contains("Table of Contents"));

    let mut thesis = blank_request(FormatStyle::Fpi, PaperType::Thesis);
    thesis.body = PaperBody::Structured(sections);
    assert!(!renderer.render(&thesis).contains("Table of Contents"));
}

#[test]
fn user_text_is_escaped() {
    let mut req = blank_request(FormatStyle::Basic, PaperType::Essay);
    req.paper_heading = "<script>alert(1)</script>".into();
    let html = Renderer::default().render(&req);
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
}

#[test]
fn unknown_style_name_yields_marker() {
    let req = blank_request(FormatStyle::Basic, PaperType::Essay);
    assert_eq!(Renderer::default().render_named(&req, "Vancouver"), UNSUPPORTED_MARKER);
}
