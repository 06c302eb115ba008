use paperstyle_core::FormatStyle;

use super::{HANGING_HALF_INCH, HeadingCase, StyleRenderer, StyleSheet, TIMES};
use crate::context::RenderContext;
use crate::html::escape;
use crate::numbering::NumberingScheme;
use crate::references::ReferenceOrder;

const BASIC_SHEET: StyleSheet = StyleSheet {
    font_family: TIMES,
    font_size: "12pt",
    line_height: "1.5",
    abstract_heading_style: "font-weight: bold; font-size: 13pt; margin-top: 1em; margin-bottom: 0.5em;",
    abstract_body_style: "text-align: justify; margin-bottom: 1em;",
    section_heading_style: "font-weight: bold; font-size: 13pt; margin-top: 1.5em; margin-bottom: 0.5em;",
    section_body_style: "text-align: justify;",
    heading_case: HeadingCase::AsWritten,
    numbering: NumberingScheme::Arabic,
    body_wrapper_style: None,
    references_heading: "References",
    references_heading_style: "font-weight: bold; font-size: 13pt; margin-top: 2em; margin-bottom: 1em;",
    reference_order: ReferenceOrder::Alphabetical,
    numbered_references: false,
    reference_style: HANGING_HALF_INCH,
    references_wrapper_style: None,
};

/// Minimal layout: centered title with a "By" line.
#[derive(Debug, Clone, Copy, Default)]
pub struct Basic;

impl StyleRenderer for Basic {
    fn style(&self) -> FormatStyle {
        FormatStyle::Basic
    }

    fn sheet(&self) -> &StyleSheet {
        &BASIC_SHEET
    }

    fn render_header(&self, ctx: &RenderContext<'_>, out: &mut String) {
        let request = ctx.request();
        let heading = request.paper_heading.trim();
        let author = request.author_name.trim();
        if !heading.is_empty() {
            out.push_str(&format!(
                "<h2 style=\"text-align: center; font-weight: bold; font-size: 16pt; margin-bottom: 0.25em;\">{}</h2>",
                escape(heading)
            ));
        }
        if !author.is_empty() {
            out.push_str(&format!(
                "<p style=\"text-align: center; margin-bottom: 2em;\">By {}</p>",
                escape(author)
            ));
        }
    }
}
