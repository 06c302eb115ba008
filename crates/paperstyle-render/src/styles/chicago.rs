use paperstyle_core::FormatStyle;

use super::{
    HANGING_HALF_INCH, HeadingCase, StyleRenderer, StyleSheet, TIMES, TitlePage,
    render_title_page,
};
use crate::context::RenderContext;
use crate::numbering::NumberingScheme;
use crate::references::ReferenceOrder;

const CHICAGO_SHEET: StyleSheet = StyleSheet {
    font_family: TIMES,
    font_size: "12pt",
    line_height: "2",
    abstract_heading_style: "text-align: center; font-weight: bold; font-size: 12pt; margin-bottom: 0.5em;",
    abstract_body_style: "text-indent: 0.5in; margin-bottom: 1em;",
    section_heading_style: "font-weight: bold; font-size: 12pt; margin-top: 1.5em; margin-bottom: 0.5em;",
    section_body_style: "text-indent: 0.5in;",
    heading_case: HeadingCase::AsWritten,
    numbering: NumberingScheme::Arabic,
    body_wrapper_style: None,
    references_heading: "Bibliography",
    references_heading_style: "text-align: center; font-weight: bold; font-size: 12pt; margin-top: 2em; margin-bottom: 1em;",
    reference_order: ReferenceOrder::Alphabetical,
    numbered_references: false,
    reference_style: HANGING_HALF_INCH,
    references_wrapper_style: None,
};

/// Chicago: title page without affiliation and an alphabetical bibliography.
#[derive(Debug, Clone, Copy, Default)]
pub struct Chicago;

impl StyleRenderer for Chicago {
    fn style(&self) -> FormatStyle {
        FormatStyle::Chicago
    }

    fn sheet(&self) -> &StyleSheet {
        &CHICAGO_SHEET
    }

    fn render_header(&self, ctx: &RenderContext<'_>, out: &mut String) {
        render_title_page(
            ctx,
            &TitlePage {
                heading_style: "font-size: 16pt; font-weight: bold; margin-bottom: 0.5in;",
                author_style: "font-size: 12pt;",
                affiliation: &[],
            },
            out,
        );
    }
}
