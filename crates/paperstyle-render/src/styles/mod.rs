//! One [`StyleRenderer`] per citation style.
//!
//! The provided [`StyleRenderer::render`] drives a shared template (header,
//! abstract, keywords, contents, body, references). Styles supply a
//! [`StyleSheet`] and override only the parts their layout changes.

mod apa;
mod basic;
mod chicago;
mod fpi;
mod ieee;
mod mla;
mod springer;

pub use apa::{Apa7, BasicApa};
pub use basic::Basic;
pub use chicago::Chicago;
pub use fpi::{Fpi, FpiProjectWriteup};
pub use ieee::Ieee;
pub use mla::{BasicMla, Mla9};
pub use springer::Springer;

use paperstyle_core::{FormatStyle, PaperBody, Section, SectionKind};

use crate::context::RenderContext;
use crate::html::escape;
use crate::numbering::NumberingScheme;
use crate::paragraphs::{PARAGRAPH_STYLE, text_to_markup};
use crate::references::{ReferenceOrder, ordered_references};
use crate::toc::{TocEntry, estimate_page};

pub const ABSTRACT_PLACEHOLDER: &str = "[Abstract goes here]";
pub const KEYWORDS_PLACEHOLDER: &str = "[Keywords go here]";
pub const REFERENCES_PLACEHOLDER: &str = "[References list goes here]";

/// Whether section titles are printed as written or upper-cased.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadingCase {
    AsWritten,
    Upper,
}

impl HeadingCase {
    pub fn apply(self, title: &str) -> String {
        match self {
            HeadingCase::AsWritten => title.to_string(),
            HeadingCase::Upper => title.to_uppercase(),
        }
    }
}

/// Visual parameters of a style. Values are inline CSS fragments.
#[derive(Debug, Clone, Copy)]
pub struct StyleSheet {
    pub font_family: &'static str,
    pub font_size: &'static str,
    pub line_height: &'static str,

    pub abstract_heading_style: &'static str,
    pub abstract_body_style: &'static str,

    pub section_heading_style: &'static str,
    pub section_body_style: &'static str,
    pub heading_case: HeadingCase,
    pub numbering: NumberingScheme,
    /// Wraps the whole body, e.g. for two-column layouts.
    pub body_wrapper_style: Option<&'static str>,

    pub references_heading: &'static str,
    pub references_heading_style: &'static str,
    pub reference_order: ReferenceOrder,
    /// Prefix each reference with `[n]`.
    pub numbered_references: bool,
    pub reference_style: &'static str,
    pub references_wrapper_style: Option<&'static str>,
}

impl StyleSheet {
    /// Opening tag of the page container.
    pub fn page_open(&self) -> String {
        format!(
            "<div style=\"padding: 1in; font-family: {}; font-size: {}; line-height: {};\">",
            self.font_family, self.font_size, self.line_height
        )
    }
}

pub(crate) const TIMES: &str = "'Times New Roman', serif";

/// Common hanging-indent reference paragraph.
pub(crate) const HANGING_HALF_INCH: &str =
    "margin-bottom: 0.5em; text-indent: -0.5in; padding-left: 0.5in;";

/// Layout of a full title page: centered heading, author, affiliation
/// lines and date, followed by a page break.
pub(crate) struct TitlePage<'l> {
    pub heading_style: &'static str,
    pub author_style: &'static str,
    pub affiliation: &'l [String],
}

/// Nothing is printed when both heading and author are blank.
pub(crate) fn render_title_page(ctx: &RenderContext<'_>, page: &TitlePage<'_>, out: &mut String) {
    let request = ctx.request();
    let heading = request.paper_heading.trim();
    let author = request.author_name.trim();
    if heading.is_empty() && author.is_empty() {
        return;
    }

    out.push_str("<div style=\"text-align: center; margin-bottom: 2in;\">");
    if !heading.is_empty() {
        out.push_str(&format!(
            "<h1 style=\"{}\">{}</h1>",
            page.heading_style,
            escape(heading)
        ));
    }
    if !author.is_empty() {
        out.push_str(&format!(
            "<p style=\"{}\">{}</p>",
            page.author_style,
            escape(author)
        ));
        if !page.affiliation.is_empty() {
            let lines: Vec<String> = page.affiliation.iter().map(|l| escape(l)).collect();
            out.push_str(&format!(
                "<p style=\"font-size: 12pt;\">{}</p>",
                lines.join("<br/>")
            ));
        }
    }
    if let Some(date) = ctx.long_date() {
        out.push_str(&format!(
            "<p style=\"margin-top: 1in; font-size: 12pt;\">{}</p>",
            date
        ));
    }
    out.push_str("</div><div style=\"page-break-before: always;\"></div>");
}

/// Table-of-contents entries for the present structured sections, plus a
/// closing "References" entry. Pages are estimated from content length.
pub(crate) fn body_toc_entries<R: StyleRenderer + ?Sized>(
    renderer: &R,
    ctx: &RenderContext<'_>,
    with_subheadings: bool,
) -> Vec<TocEntry> {
    let sheet = renderer.sheet();
    let mut entries = Vec::new();
    let mut offset = 0;

    if let PaperBody::Structured(sections) = ctx.body() {
        for (n, (kind, section)) in sections.present().enumerate() {
            let title = sheet.heading_case.apply(renderer.section_title(kind, section));
            let mut entry = TocEntry::new(
                format!("{}. {}", sheet.numbering.label(n + 1), title),
                estimate_page(offset).to_string(),
            );
            if with_subheadings {
                for sub in ctx.classifier().subheadings(&section.content) {
                    let at = section
                        .content
                        .find(sub.as_str())
                        .map_or(0, |i| section.content[..i].chars().count());
                    let page = estimate_page(offset + at).to_string();
                    entry.subentries.push(TocEntry::new(sub, page));
                }
            }
            offset += section.content.chars().count();
            entries.push(entry);
        }
    }

    entries.push(TocEntry::new("References", estimate_page(offset).to_string()));
    entries
}

/// A citation style: a [`StyleSheet`] plus the template steps that differ.
///
/// Every step appends to `out`. Steps receive already-resolved text:
/// the abstract and keyword steps are only called when the paper type
/// declares that part, with the placeholder substituted for empty content.
pub trait StyleRenderer: Send + Sync {
    fn style(&self) -> FormatStyle;

    fn sheet(&self) -> &StyleSheet;

    /// Title page or compact title/author header.
    fn render_header(&self, ctx: &RenderContext<'_>, out: &mut String);

    fn render_abstract_block(&self, ctx: &RenderContext<'_>, text: &str, out: &mut String) {
        let sheet = self.sheet();
        out.push_str(&format!(
            "<h2 style=\"{}\">Abstract</h2><div style=\"{}\">{}</div>",
            sheet.abstract_heading_style,
            sheet.abstract_body_style,
            text_to_markup(text, ctx.classifier())
        ));
    }

    fn render_keywords(&self, _ctx: &RenderContext<'_>, text: &str, out: &mut String) {
        out.push_str(&format!(
            "<p style=\"text-indent: 0.5in; margin-bottom: 1em;\"><i>Keywords:</i> <span>{}</span></p>",
            escape(text.trim())
        ));
    }

    /// Hook between front matter and body, used for tables of contents.
    fn render_contents(&self, _ctx: &RenderContext<'_>, _out: &mut String) {}

    /// Title printed for a structured section, before numbering and casing.
    fn section_title<'s>(&self, kind: SectionKind, section: &'s Section) -> &'s str {
        section.display_title(kind)
    }

    fn render_body(&self, ctx: &RenderContext<'_>, out: &mut String) {
        let sheet = self.sheet();
        let mut body = String::new();
        match ctx.body() {
            PaperBody::Structured(sections) => {
                for (n, (kind, section)) in sections.present().enumerate() {
                    let title = sheet.heading_case.apply(self.section_title(kind, section));
                    body.push_str(&format!(
                        "<h2 style=\"{}\">{}. {}</h2><div style=\"{}\">{}</div>",
                        sheet.section_heading_style,
                        sheet.numbering.label(n + 1),
                        escape(&title),
                        sheet.section_body_style,
                        text_to_markup(&section.content, ctx.classifier())
                    ));
                }
            }
            PaperBody::Main(text) => {
                if !text.trim().is_empty() {
                    body.push_str(&format!(
                        "<div style=\"{}\">{}</div>",
                        sheet.section_body_style,
                        text_to_markup(text, ctx.classifier())
                    ));
                }
            }
        }

        match sheet.body_wrapper_style {
            Some(style) if !body.is_empty() => {
                out.push_str(&format!("<div style=\"{}\">{}</div>", style, body));
            }
            _ => out.push_str(&body),
        }
    }

    fn render_references(&self, ctx: &RenderContext<'_>, out: &mut String) {
        let sheet = self.sheet();
        out.push_str(&format!(
            "<h2 style=\"{}\">{}</h2>",
            sheet.references_heading_style, sheet.references_heading
        ));

        let refs = ordered_references(&ctx.request().references, sheet.reference_order);
        let mut list = String::new();
        if refs.is_empty() {
            list.push_str(&format!(
                "<p style=\"{}\">{}</p>",
                PARAGRAPH_STYLE, REFERENCES_PLACEHOLDER
            ));
        } else {
            for (i, reference) in refs.iter().enumerate() {
                let number = if sheet.numbered_references {
                    format!("[{}] ", i + 1)
                } else {
                    String::new()
                };
                list.push_str(&format!(
                    "<p style=\"{}\">{}{}</p>",
                    sheet.reference_style,
                    number,
                    escape(reference)
                ));
            }
        }

        match sheet.references_wrapper_style {
            Some(style) => out.push_str(&format!("<div style=\"{}\">{}</div>", style, list)),
            None => out.push_str(&format!("<div>{}</div>", list)),
        }
    }

    /// Run the full template.
    fn render(&self, ctx: &RenderContext<'_>) -> String {
        let sheet = self.sheet();
        let mut out = String::with_capacity(4096);
        out.push_str(&sheet.page_open());

        self.render_header(ctx, &mut out);
        if let Some(text) = ctx.abstract_text() {
            self.render_abstract_block(ctx, text, &mut out);
        }
        if let Some(text) = ctx.keywords_text() {
            self.render_keywords(ctx, text, &mut out);
        }
        self.render_contents(ctx, &mut out);
        self.render_body(ctx, &mut out);
        self.render_references(ctx, &mut out);

        out.push_str("</div>");
        out
    }
}
