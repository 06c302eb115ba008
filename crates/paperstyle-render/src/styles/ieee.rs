use paperstyle_core::FormatStyle;

use super::{HeadingCase, StyleRenderer, StyleSheet, TIMES};
use crate::context::RenderContext;
use crate::html::{escape, escape_inline};
use crate::numbering::NumberingScheme;
use crate::references::ReferenceOrder;

const IEEE_SHEET: StyleSheet = StyleSheet {
    font_family: TIMES,
    font_size: "10pt",
    line_height: "1.5",
    abstract_heading_style: "",
    abstract_body_style: "",
    section_heading_style: "font-weight: bold; text-transform: uppercase; font-size: 10pt; margin-top: 1rem; margin-bottom: 0.5rem;",
    section_body_style: "font-size: 10pt; text-align: justify;",
    heading_case: HeadingCase::Upper,
    numbering: NumberingScheme::Roman,
    body_wrapper_style: Some("column-count: 2; column-gap: 0.25in;"),
    references_heading: "References",
    references_heading_style: "font-weight: bold; text-transform: uppercase; font-size: 10pt; margin-top: 1rem; column-span: all;",
    reference_order: ReferenceOrder::AsGiven,
    numbered_references: true,
    reference_style: "margin-bottom: 0.25rem; text-indent: -0.25in; padding-left: 0.25in; font-size: 9pt;",
    references_wrapper_style: Some("column-count: 2; column-gap: 0.25in; font-size: 9pt; line-height: 1.4;"),
};

/// IEEE: compact centered header, run-in "Abstract" and "Index Terms",
/// two-column body with Roman-numbered sections, references numbered in
/// citation order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ieee;

impl StyleRenderer for Ieee {
    fn style(&self) -> FormatStyle {
        FormatStyle::Ieee
    }

    fn sheet(&self) -> &StyleSheet {
        &IEEE_SHEET
    }

    fn render_header(&self, ctx: &RenderContext<'_>, out: &mut String) {
        let request = ctx.request();
        let heading = request.paper_heading.trim();
        let author = request.author_name.trim();
        if !heading.is_empty() {
            out.push_str(&format!(
                "<h1 style=\"text-align: center; font-weight: bold; font-size: 24pt; margin-bottom: 0.5rem;\">{}</h1>",
                escape(heading)
            ));
        }
        if !author.is_empty() {
            out.push_str(&format!(
                "<p style=\"text-align: center; font-size: 11pt; margin-bottom: 1rem;\">{}</p>",
                escape(author)
            ));
        }
    }

    fn render_abstract_block(&self, _ctx: &RenderContext<'_>, text: &str, out: &mut String) {
        out.push_str(&format!(
            "<p style=\"margin-bottom: 0.5rem;\"><b><em>Abstract</em></b>—{}</p>",
            escape_inline(text)
        ));
    }

    fn render_keywords(&self, _ctx: &RenderContext<'_>, text: &str, out: &mut String) {
        out.push_str(&format!(
            "<p style=\"margin-bottom: 1rem;\"><b><em>Index Terms</em></b>—{}</p>",
            escape_inline(text)
        ));
    }
}
