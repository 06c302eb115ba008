//! Tables of contents with estimated page numbers.

use crate::html::escape;

/// Characters assumed to fit on one printed page.
pub const CHARS_PER_PAGE: usize = 3000;

/// One line of a table of contents, optionally with nested subheadings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    pub label: String,
    pub page: String,
    pub subentries: Vec<TocEntry>,
}

impl TocEntry {
    pub fn new(label: impl Into<String>, page: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            page: page.into(),
            subentries: Vec::new(),
        }
    }
}

/// Page on which text starting `offset` characters into the body falls.
pub fn estimate_page(offset: usize) -> usize {
    1 + offset / CHARS_PER_PAGE
}

fn leader(label: &str, width: usize) -> String {
    ".".repeat(width.saturating_sub(label.chars().count()).max(1))
}

/// Render a titled table of contents followed by a page break.
pub fn render_toc(heading_style: &str, entries: &[TocEntry]) -> String {
    let mut out = String::with_capacity(256 + entries.len() * 160);
    out.push_str(&format!(
        "<h2 style=\"{}\">Table of Contents</h2><div style=\"margin-bottom: 2em;\">",
        heading_style
    ));
    for entry in entries {
        out.push_str(&format!(
            "<p>{}{}{}</p>",
            escape(&entry.label),
            leader(&entry.label, 100),
            escape(&entry.page)
        ));
        for sub in &entry.subentries {
            out.push_str(&format!(
                "<p style=\"margin-left: 1em; font-style: italic;\">{}{}{}</p>",
                escape(&sub.label),
                leader(&sub.label, 95),
                escape(&sub.page)
            ));
        }
    }
    out.push_str("</div><div style=\"page-break-before: always;\"></div>");
    out
}
