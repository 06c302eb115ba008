use paperstyle_core::{FormatStyle, Section, SectionKind};

use super::{
    HeadingCase, StyleRenderer, StyleSheet, TIMES, TitlePage, body_toc_entries, render_title_page,
};
use crate::context::RenderContext;
use crate::html::escape;
use crate::numbering::NumberingScheme;
use crate::references::ReferenceOrder;
use crate::toc::{TocEntry, render_toc};

const FPI_SHEET: StyleSheet = StyleSheet {
    font_family: TIMES,
    font_size: "12pt",
    line_height: "1.5",
    abstract_heading_style: "text-align: center; font-weight: bold; font-size: 14pt; margin-top: 1em; margin-bottom: 0.5em; text-transform: uppercase;",
    abstract_body_style: "text-align: justify; text-indent: 0.5in; margin-bottom: 1em;",
    section_heading_style: "font-weight: bold; font-size: 14pt; text-align: left; margin-top: 2em; margin-bottom: 0.5em;",
    section_body_style: "text-align: justify; text-indent: 0.5in;",
    heading_case: HeadingCase::Upper,
    numbering: NumberingScheme::Arabic,
    body_wrapper_style: None,
    references_heading: "References",
    references_heading_style: "text-align: center; font-weight: bold; font-size: 14pt; margin-top: 2.5em; margin-bottom: 1em; text-transform: uppercase;",
    reference_order: ReferenceOrder::Alphabetical,
    numbered_references: false,
    reference_style: "margin-bottom: 0.5em; text-indent: -0.5in; padding-left: 0.5in; line-height: 1.5; text-align: justify;",
    references_wrapper_style: None,
};

const PROJECT_SHEET: StyleSheet = StyleSheet {
    section_heading_style: "font-weight: bold; font-size: 14pt; margin-top: 1.5em; margin-bottom: 0.5em;",
    heading_case: HeadingCase::AsWritten,
    references_heading_style: "font-weight: bold; font-size: 14pt; margin-top: 2em; margin-bottom: 1em;",
    numbered_references: true,
    reference_style: "margin-bottom: 0.5em; text-indent: -0.5in; padding-left: 0.5in;",
    ..FPI_SHEET
};

fn fpi_title_page(ctx: &RenderContext<'_>, out: &mut String) {
    render_title_page(
        ctx,
        &TitlePage {
            heading_style: "font-size: 18pt; font-weight: bold; margin-bottom: 1in; text-transform: uppercase;",
            author_style: "font-size: 14pt; margin-bottom: 0.5in;",
            affiliation: &ctx.options().institution_lines,
        },
        out,
    );
}

fn fpi_keywords(text: &str, out: &mut String) {
    out.push_str(&format!(
        "<p style=\"text-indent: 0.5in; margin-bottom: 1em;\"><b><i>Keywords:</i></b> <span>{}</span></p>",
        escape(text.trim())
    ));
}

/// Federal Polytechnic house style: institutional title page, upper-case
/// numbered sections and a centered alphabetical reference list.
#[derive(Debug, Clone, Copy, Default)]
pub struct Fpi;

impl StyleRenderer for Fpi {
    fn style(&self) -> FormatStyle {
        FormatStyle::Fpi
    }

    fn sheet(&self) -> &StyleSheet {
        &FPI_SHEET
    }

    fn render_header(&self, ctx: &RenderContext<'_>, out: &mut String) {
        fpi_title_page(ctx, out);
    }

    fn render_keywords(&self, _ctx: &RenderContext<'_>, text: &str, out: &mut String) {
        fpi_keywords(text, out);
    }
}

/// FPI layout for project write-ups. Adds a table of contents with
/// subheadings and numbers the (alphabetised) references.
#[derive(Debug, Clone, Copy, Default)]
pub struct FpiProjectWriteup;

impl StyleRenderer for FpiProjectWriteup {
    fn style(&self) -> FormatStyle {
        FormatStyle::Fpi
    }

    fn sheet(&self) -> &StyleSheet {
        &PROJECT_SHEET
    }

    fn render_header(&self, ctx: &RenderContext<'_>, out: &mut String) {
        fpi_title_page(ctx, out);
    }

    fn render_keywords(&self, _ctx: &RenderContext<'_>, text: &str, out: &mut String) {
        fpi_keywords(text, out);
    }

    fn section_title<'s>(&self, kind: SectionKind, section: &'s Section) -> &'s str {
        let title = section.display_title(kind);
        if title != kind.default_title() {
            return title;
        }
        match kind {
            SectionKind::Results => "Results and Analysis",
            SectionKind::Recommendation => "Recommendations",
            _ => title,
        }
    }

    fn render_contents(&self, ctx: &RenderContext<'_>, out: &mut String) {
        let mut entries = Vec::new();
        if ctx.abstract_text().is_some() {
            entries.push(TocEntry::new("Abstract", "ii"));
        }
        if ctx.keywords_text().is_some() {
            entries.push(TocEntry::new("Keywords", "iii"));
        }
        entries.extend(body_toc_entries(self, ctx, true));
        out.push_str(&render_toc(
            "text-align: center; font-weight: bold; font-size: 14pt; margin-top: 2em; margin-bottom: 1em; text-transform: uppercase;",
            &entries,
        ));
    }
}
