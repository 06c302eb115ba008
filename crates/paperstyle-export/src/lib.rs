//! Package rendered markup as downloadable documents.
//!
//! Markup is treated as opaque: exporters wrap it, they never parse or
//! restyle it.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Longest file stem produced by [`suggested_filename`], in characters.
pub const MAX_FILENAME_CHARS: usize = 50;

pub const FALLBACK_FILENAME: &str = "formatted-paper";

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>?").unwrap());
static FIRST_H1_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<h1[^>]*>(.*?)</h1>").unwrap());
static UNSAFE_FILENAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[/\\:*?"<>|\x00-\x1f]"#).unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportTarget {
    /// HTML served as a Word document (`.doc`), which Word opens directly.
    Word,
    /// Standalone HTML page.
    Html,
    /// Needs a rasterizer; always [`ExportError::Unsupported`].
    Pdf,
}

impl ExportTarget {
    pub const ALL: [ExportTarget; 3] = [ExportTarget::Word, ExportTarget::Html, ExportTarget::Pdf];

    pub fn as_str(self) -> &'static str {
        match self {
            ExportTarget::Word => "word",
            ExportTarget::Html => "html",
            ExportTarget::Pdf => "pdf",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            ExportTarget::Word => "doc",
            ExportTarget::Html => "html",
            ExportTarget::Pdf => "pdf",
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            ExportTarget::Word => "application/msword",
            ExportTarget::Html => "text/html; charset=utf-8",
            ExportTarget::Pdf => "application/pdf",
        }
    }
}

impl fmt::Display for ExportTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportTarget {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "word" | "doc" | "docx" => Ok(ExportTarget::Word),
            "html" | "htm" => Ok(ExportTarget::Html),
            "pdf" => Ok(ExportTarget::Pdf),
            other => Err(ExportError::UnknownTarget(other.to_string())),
        }
    }
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("{0} export is not supported")]
    Unsupported(ExportTarget),
    #[error("unknown export target '{0}' (expected word, html or pdf)")]
    UnknownTarget(String),
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// An exported document, ready to be saved or served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exported {
    pub bytes: Vec<u8>,
    pub mime: &'static str,
    pub extension: &'static str,
}

pub fn strip_tags(s: &str) -> String {
    TAG_RE.replace_all(s, "").into_owned()
}

/// Text of the first `<h1>` in `markup`, used as the page title.
fn document_title(markup: &str) -> Option<String> {
    let caps = FIRST_H1_RE.captures(markup)?;
    let text = strip_tags(&caps[1]);
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

fn word_document(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len() + 96);
    out.push_str("<!DOCTYPE html><html><head><meta charset=\"UTF-8\"></head><body>");
    out.push_str(markup);
    out.push_str("</body></html>");
    out
}

fn html_document(markup: &str) -> String {
    // Heading text in rendered markup is already escaped.
    let title = document_title(markup).unwrap_or_else(|| "Formatted Paper".to_string());
    let mut out = String::with_capacity(markup.len() + 512);
    out.push_str(&format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{}</title>
<style>
body {{ margin: 0; background: #f0f0f0; }}
.paper {{ max-width: 8.5in; margin: 2rem auto; background: #fff; box-shadow: 0 0 8px rgba(0,0,0,0.15); }}
@media print {{ body {{ background: #fff; }} .paper {{ margin: 0; box-shadow: none; }} }}
</style>
</head>
<body>
<div class="paper">"#,
        title
    ));
    out.push_str(markup);
    out.push_str("</div>\n</body>\n</html>\n");
    out
}

/// Wrap `markup` for `target`.
pub fn export(markup: &str, target: ExportTarget) -> Result<Exported, ExportError> {
    let document = match target {
        ExportTarget::Word => word_document(markup),
        ExportTarget::Html => html_document(markup),
        ExportTarget::Pdf => return Err(ExportError::Unsupported(target)),
    };
    tracing::debug!(target = %target, bytes = document.len(), "exported document");
    Ok(Exported {
        bytes: document.into_bytes(),
        mime: target.mime(),
        extension: target.extension(),
    })
}

/// Export and write to `path`.
pub fn export_to_path(markup: &str, target: ExportTarget, path: &Path) -> Result<Exported, ExportError> {
    let exported = export(markup, target)?;
    std::fs::write(path, &exported.bytes).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(path = %path.display(), "wrote {}", target);
    Ok(exported)
}

/// File name for a paper: the heading without markup, characters that are
/// unsafe in file names replaced by `-`, cut to [`MAX_FILENAME_CHARS`].
pub fn suggested_filename(heading: &str, target: ExportTarget) -> String {
    let plain = strip_tags(heading);
    let safe = UNSAFE_FILENAME_RE.replace_all(plain.trim(), "-");
    let stem: String = safe.chars().take(MAX_FILENAME_CHARS).collect();
    let stem = stem.trim();
    let stem = if stem.is_empty() { FALLBACK_FILENAME } else { stem };
    format!("{}.{}", stem, target.extension())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_wrapper() {
        let out = export("<p>x</p>", ExportTarget::Word).unwrap();
        assert_eq!(out.mime, "application/msword");
        assert_eq!(out.extension, "doc");
        assert_eq!(
            String::from_utf8(out.bytes).unwrap(),
            "<!DOCTYPE html><html><head><meta charset=\"UTF-8\"></head><body><p>x</p></body></html>"
        );
    }

    #[test]
    fn test_html_page_title_from_heading() {
        let out = export(
            "<div><h1 style=\"x\">Soil &amp; <i>Water</i></h1></div>",
            ExportTarget::Html,
        )
        .unwrap();
        let page = String::from_utf8(out.bytes).unwrap();
        assert!(page.contains("<title>Soil &amp; Water</title>"));
        assert!(page.contains("<div class=\"paper\"><div><h1"));
    }

    #[test]
    fn test_html_page_default_title() {
        let page = String::from_utf8(export("<p>x</p>", ExportTarget::Html).unwrap().bytes).unwrap();
        assert!(page.contains("<title>Formatted Paper</title>"));
    }

    #[test]
    fn test_pdf_unsupported() {
        let err = export("<p>x</p>", ExportTarget::Pdf).unwrap_err();
        assert!(matches!(err, ExportError::Unsupported(ExportTarget::Pdf)));
        assert_eq!(err.to_string(), "pdf export is not supported");
    }

    #[test]
    fn test_suggested_filename() {
        assert_eq!(suggested_filename("<b>My</b> Paper", ExportTarget::Word), "My Paper.doc");
        assert_eq!(suggested_filename("  ", ExportTarget::Word), "formatted-paper.doc");
        assert_eq!(suggested_filename("<br>", ExportTarget::Html), "formatted-paper.html");
        assert_eq!(suggested_filename("A/B: C?", ExportTarget::Pdf), "A-B- C-.pdf");
        let long = "x".repeat(80);
        assert_eq!(suggested_filename(&long, ExportTarget::Word), format!("{}.doc", "x".repeat(50)));
    }

    #[test]
    fn test_target_parsing() {
        assert_eq!("Word".parse::<ExportTarget>().unwrap(), ExportTarget::Word);
        assert_eq!("htm".parse::<ExportTarget>().unwrap(), ExportTarget::Html);
        assert!(matches!(
            "odt".parse::<ExportTarget>(),
            Err(ExportError::UnknownTarget(t)) if t == "odt"
        ));
    }
}
