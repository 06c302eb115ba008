use paperstyle_core::FormatStyle;

use super::{HeadingCase, StyleRenderer, StyleSheet, TIMES};
use crate::context::RenderContext;
use crate::html::escape;
use crate::numbering::NumberingScheme;
use crate::paragraphs::text_to_markup;
use crate::references::ReferenceOrder;

const SPRINGER_SHEET: StyleSheet = StyleSheet {
    font_family: TIMES,
    font_size: "11pt",
    line_height: "1.5",
    abstract_heading_style: "font-weight: bold; margin-bottom: 0.5em; text-transform: uppercase;",
    abstract_body_style: "text-align: justify;",
    section_heading_style: "font-size: 14pt; font-weight: bold; margin-top: 2em; margin-bottom: 0.5em;",
    section_body_style: "text-align: justify;",
    heading_case: HeadingCase::AsWritten,
    numbering: NumberingScheme::Arabic,
    body_wrapper_style: None,
    references_heading: "References",
    references_heading_style: "font-size: 14pt; font-weight: bold; margin-top: 2.5em; margin-bottom: 1em;",
    reference_order: ReferenceOrder::AsGiven,
    numbered_references: true,
    reference_style: "margin-bottom: 0.5em; text-indent: -0.25in; padding-left: 0.25in;",
    references_wrapper_style: Some("font-size: 10pt;"),
};

const DEFAULT_AFFILIATION: &str = "Institutional Affiliation, City, Country";

/// Springer: centered title, author with a superscript affiliation mark,
/// boxed abstract and numbered references in citation order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Springer;

impl StyleRenderer for Springer {
    fn style(&self) -> FormatStyle {
        FormatStyle::Springer
    }

    fn sheet(&self) -> &StyleSheet {
        &SPRINGER_SHEET
    }

    fn render_header(&self, ctx: &RenderContext<'_>, out: &mut String) {
        let request = ctx.request();
        let heading = request.paper_heading.trim();
        let author = request.author_name.trim();
        if !heading.is_empty() {
            out.push_str(&format!(
                "<h1 style=\"text-align: center; font-size: 18pt; font-weight: bold; margin-bottom: 0.5em;\">{}</h1>",
                escape(heading)
            ));
        }
        if !author.is_empty() {
            let affiliation = ctx
                .options()
                .affiliation
                .as_deref()
                .unwrap_or(DEFAULT_AFFILIATION);
            out.push_str(&format!(
                "<p style=\"text-align: center; font-size: 12pt; margin-bottom: 1em;\">{}<sup>1</sup></p>",
                escape(author)
            ));
            out.push_str(&format!(
                "<p style=\"text-align: center; font-size: 10pt; margin-bottom: 1.5em;\"><sup>1</sup>{}</p>",
                escape(affiliation)
            ));
        }
    }

    fn render_abstract_block(&self, ctx: &RenderContext<'_>, text: &str, out: &mut String) {
        let sheet = self.sheet();
        out.push_str(&format!(
            "<div style=\"font-size: 10pt; border: 1px solid #ccc; padding: 15px; margin-bottom: 1.5em; background-color: #f9f9f9;\">\
             <p style=\"{}\">Abstract</p><div style=\"{}\">{}</div></div>",
            sheet.abstract_heading_style,
            sheet.abstract_body_style,
            text_to_markup(text, ctx.classifier())
        ));
    }

    fn render_keywords(&self, _ctx: &RenderContext<'_>, text: &str, out: &mut String) {
        out.push_str(&format!(
            "<p style=\"font-size: 10pt; margin-bottom: 1.5em;\"><b>Keywords:</b> <span style=\"font-style: italic;\">{}</span></p>",
            escape(text.trim())
        ));
    }
}
