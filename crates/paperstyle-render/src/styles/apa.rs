use paperstyle_core::FormatStyle;

use super::{
    HANGING_HALF_INCH, HeadingCase, StyleRenderer, StyleSheet, TIMES, TitlePage, body_toc_entries,
    render_title_page,
};
use crate::context::RenderContext;
use crate::html::escape;
use crate::numbering::NumberingScheme;
use crate::references::ReferenceOrder;
use crate::toc::{TocEntry, render_toc};

const APA7_SHEET: StyleSheet = StyleSheet {
    font_family: TIMES,
    font_size: "12pt",
    line_height: "2",
    abstract_heading_style: "text-align: center; font-weight: bold; font-size: 12pt; margin-top: 1em; margin-bottom: 0.5em;",
    abstract_body_style: "text-align: justify; text-indent: 0.5in; margin-bottom: 1em;",
    section_heading_style: "font-weight: bold; font-size: 12pt; margin-top: 1.5em; margin-bottom: 0.5em; text-align: left;",
    section_body_style: "text-align: justify; text-indent: 0.5in;",
    heading_case: HeadingCase::AsWritten,
    numbering: NumberingScheme::Arabic,
    body_wrapper_style: None,
    references_heading: "References",
    references_heading_style: "font-weight: bold; font-size: 12pt; margin-top: 2em; margin-bottom: 1em;",
    reference_order: ReferenceOrder::Alphabetical,
    numbered_references: false,
    reference_style: "margin-bottom: 0.5em; text-indent: -0.5in; padding-left: 0.5in; line-height: 2;",
    references_wrapper_style: None,
};

const BASIC_APA_SHEET: StyleSheet = StyleSheet {
    references_heading_style: "text-align: center; font-weight: bold; margin-top: 3rem;",
    reference_style: HANGING_HALF_INCH,
    ..APA7_SHEET
};

/// APA 7th edition: title page, centered abstract heading, a table of
/// contents for structured papers and an alphabetical reference list.
#[derive(Debug, Clone, Copy, Default)]
pub struct Apa7;

impl StyleRenderer for Apa7 {
    fn style(&self) -> FormatStyle {
        FormatStyle::Apa7
    }

    fn sheet(&self) -> &StyleSheet {
        &APA7_SHEET
    }

    fn render_header(&self, ctx: &RenderContext<'_>, out: &mut String) {
        let affiliation = [ctx
            .options()
            .affiliation
            .clone()
            .unwrap_or_else(|| "Institutional Affiliation".to_string())];
        render_title_page(
            ctx,
            &TitlePage {
                heading_style: "font-size: 18pt; font-weight: bold; margin-bottom: 0.5in; text-transform: capitalize;",
                author_style: "font-size: 14pt; margin-bottom: 0.25in;",
                affiliation: &affiliation,
            },
            out,
        );
    }

    fn render_contents(&self, ctx: &RenderContext<'_>, out: &mut String) {
        let profile = ctx.profile();
        if !profile.has_structured_body {
            return;
        }
        let mut entries = Vec::new();
        if profile.has_abstract {
            entries.push(TocEntry::new("Abstract", "ii"));
        }
        if profile.has_keywords {
            entries.push(TocEntry::new("Keywords", "iii"));
        }
        entries.extend(body_toc_entries(self, ctx, false));
        out.push_str(&render_toc(
            "text-align: center; font-weight: bold; margin-top: 2em; margin-bottom: 1em;",
            &entries,
        ));
    }
}

/// Plain APA layout: bordered title block, no table of contents.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicApa;

impl StyleRenderer for BasicApa {
    fn style(&self) -> FormatStyle {
        FormatStyle::BasicApa
    }

    fn sheet(&self) -> &StyleSheet {
        &BASIC_APA_SHEET
    }

    /// Title block set off by a dashed border instead of a separate page.
    fn render_header(&self, ctx: &RenderContext<'_>, out: &mut String) {
        let request = ctx.request();
        let heading = request.paper_heading.trim();
        let author = request.author_name.trim();
        if heading.is_empty() && author.is_empty() {
            return;
        }
        out.push_str(
            "<div style=\"text-align: center; border: 2px dashed #ccc; padding: 2rem; margin-bottom: 3rem;\">",
        );
        if !heading.is_empty() {
            out.push_str(&format!(
                "<p style=\"font-weight: bold; font-size: 16pt;\">{}</p>",
                escape(heading)
            ));
        }
        if !author.is_empty() {
            out.push_str(&format!("<p>{}</p>", escape(author)));
            if let Some(affiliation) = ctx.options().affiliation.as_deref() {
                out.push_str(&format!("<p>{}</p>", escape(affiliation)));
            }
        }
        if let Some(date) = ctx.long_date() {
            out.push_str(&format!("<p>{}</p>", date));
        }
        out.push_str("</div>");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::RenderOptions;
    use chrono::NaiveDate;
    use paperstyle_core::{FormatRequest, PaperBody, PaperType, StructuredSections};

    fn thesis() -> FormatRequest {
        let mut sections = StructuredSections::default();
        sections.introduction.content = "Why.".into();
        sections.results.content = "What.".into();
        FormatRequest {
            paper_heading: "Soil & Water".into(),
            author_name: "Ada Lovelace".into(),
            paper_type: PaperType::Thesis,
            format_style: FormatStyle::Apa7,
            r#abstract: "Summary.".into(),
            keywords: "soil".into(),
            references: "Zeta, A. (2020)\nApple, B. (2019)".into(),
            body: PaperBody::Structured(sections),
            date: Some(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()),
        }
    }

    #[test]
    fn test_apa7_title_page_and_toc() {
        let options = RenderOptions::default();
        let req = thesis();
        let html = Apa7.render(&RenderContext::new(&req, &options));
        assert!(html.contains(">Soil &amp; Water</h1>"));
        assert!(html.contains(">Institutional Affiliation</p>"));
        assert!(html.contains(">January 2, 2024</p>"));
        assert!(html.contains(">Table of Contents</h2>"));
        assert!(html.contains("<p>1. Introduction."));
        assert!(html.contains("<p>2. Results."));
        assert!(html.contains("<i>Keywords:</i> <span>soil</span>"));
        let apple = html.find("Apple, B.").unwrap();
        let zeta = html.find("Zeta, A.").unwrap();
        assert!(apple < zeta);
    }

    #[test]
    fn test_apa7_custom_affiliation() {
        let options = RenderOptions {
            affiliation: Some("Dept. of Soil".into()),
            ..RenderOptions::default()
        };
        let req = thesis();
        let html = Apa7.render(&RenderContext::new(&req, &options));
        assert!(html.contains(">Dept. of Soil</p>"));
    }

    #[test]
    fn test_basic_apa_title_block_without_toc() {
        let options = RenderOptions::default();
        let req = thesis();
        let html = BasicApa.render(&RenderContext::new(&req, &options));
        assert!(html.contains("border: 2px dashed #ccc;"));
        assert!(!html.contains("page-break-before"));
        assert!(!html.contains("Table of Contents"));
        assert!(html.contains("<p>Ada Lovelace</p>"));
        assert!(html.contains("<p>January 2, 2024</p>"));
    }
}
