use paperstyle_core::FormatStyle;

use super::{HeadingCase, StyleRenderer, StyleSheet, TIMES};
use crate::context::RenderContext;
use crate::html::{escape, escape_inline};
use crate::numbering::NumberingScheme;
use crate::references::ReferenceOrder;

const MLA_SHEET: StyleSheet = StyleSheet {
    font_family: TIMES,
    font_size: "12pt",
    line_height: "2",
    abstract_heading_style: "text-align: center; font-weight: bold; font-size: 12pt;",
    abstract_body_style: "text-indent: 0.5in;",
    section_heading_style: "text-align: left; font-weight: bold; font-size: 1.17em; margin-top: 1em; margin-bottom: 0.5em;",
    section_body_style: "text-indent: 0.5in;",
    heading_case: HeadingCase::AsWritten,
    numbering: NumberingScheme::Arabic,
    body_wrapper_style: None,
    references_heading: "Works Cited",
    references_heading_style: "text-align: center; font-weight: normal; font-size: 1.5rem; margin-top: 2em; margin-bottom: 1em;",
    reference_order: ReferenceOrder::Alphabetical,
    numbered_references: false,
    reference_style: "margin-bottom: 0.5em; text-indent: -0.5in; padding-left: 0.5in; line-height: 2;",
    references_wrapper_style: None,
};

const TITLE_STYLE: &str = "text-align: center; font-weight: normal; font-size: 1.5rem; margin-top: 0; margin-bottom: 1em; text-decoration: underline;";

fn header_line(out: &mut String, text: &str, last: bool) {
    let margin = if last { "1em" } else { "0" };
    out.push_str(&format!(
        "<p style=\"margin-bottom: {};\">{}</p>",
        margin,
        escape(text)
    ));
}

fn title(ctx: &RenderContext<'_>, out: &mut String) {
    let heading = ctx.request().paper_heading.trim();
    if !heading.is_empty() {
        out.push_str(&format!("<h1 style=\"{}\">{}</h1>", TITLE_STYLE, escape(heading)));
    }
}

/// MLA runs the abstract in as a paragraph instead of a heading block.
fn run_in_abstract(text: &str, out: &mut String) {
    out.push_str(&format!(
        "<p style=\"text-indent: 0.5in; margin-bottom: 1em;\"><b>Abstract:</b> {}</p>",
        escape_inline(text)
    ));
}

/// MLA 9th edition: left-aligned author/instructor/course/date block,
/// underlined centered title and a "Works Cited" list.
#[derive(Debug, Clone, Copy, Default)]
pub struct Mla9;

impl StyleRenderer for Mla9 {
    fn style(&self) -> FormatStyle {
        FormatStyle::Mla9
    }

    fn sheet(&self) -> &StyleSheet {
        &MLA_SHEET
    }

    fn render_header(&self, ctx: &RenderContext<'_>, out: &mut String) {
        let author = ctx.request().author_name.trim();
        if !author.is_empty() {
            header_line(out, author, false);
        }
        header_line(out, "Professor Name", false);
        match ctx.day_first_date() {
            Some(date) => {
                header_line(out, "Course Name", false);
                header_line(out, &date, true);
            }
            None => header_line(out, "Course Name", true),
        }
        title(ctx, out);
    }

    fn render_abstract_block(&self, _ctx: &RenderContext<'_>, text: &str, out: &mut String) {
        run_in_abstract(text, out);
    }
}

/// Plain MLA layout: author line and underlined title only.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicMla;

impl StyleRenderer for BasicMla {
    fn style(&self) -> FormatStyle {
        FormatStyle::BasicMla
    }

    fn sheet(&self) -> &StyleSheet {
        &MLA_SHEET
    }

    fn render_header(&self, ctx: &RenderContext<'_>, out: &mut String) {
        let author = ctx.request().author_name.trim();
        if !author.is_empty() {
            header_line(out, author, true);
        }
        title(ctx, out);
    }

    fn render_abstract_block(&self, _ctx: &RenderContext<'_>, text: &str, out: &mut String) {
        run_in_abstract(text, out);
    }
}
