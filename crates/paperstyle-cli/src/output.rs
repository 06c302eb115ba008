use std::io::Write;

use owo_colors::OwoColorize;
use paperstyle_core::{
    FormatStyle, HistoryRecord, PaperType, ParsedSections, RecentHistory, StructuredSections,
};
use paperstyle_export::ExportTarget;

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

fn write_label(w: &mut dyn Write, label: &str, color: ColorMode) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{}", label.bold().cyan())
    } else {
        writeln!(w, "{}", label)
    }
}

fn write_block(w: &mut dyn Write, text: &str, color: ColorMode) -> std::io::Result<()> {
    if text.is_empty() {
        if color.enabled() {
            writeln!(w, "  {}", "(none)".dimmed())?;
        } else {
            writeln!(w, "  (none)")?;
        }
    } else {
        for line in text.lines() {
            writeln!(w, "  {}", line)?;
        }
    }
    writeln!(w)
}

/// Human-readable view of a segmentation.
pub fn print_sections(
    w: &mut dyn Write,
    parsed: &ParsedSections,
    structured: Option<&StructuredSections>,
    color: ColorMode,
) -> std::io::Result<()> {
    write_label(w, "ABSTRACT", color)?;
    write_block(w, &parsed.r#abstract, color)?;
    write_label(w, "KEYWORDS", color)?;
    write_block(w, &parsed.keywords, color)?;

    match structured {
        Some(sections) => {
            for (kind, section) in sections.present() {
                let label = format!("{} ({})", section.display_title(kind).to_uppercase(), kind.default_title());
                write_label(w, &label, color)?;
                write_block(w, section.content.trim(), color)?;
            }
        }
        None => {
            write_label(w, "BODY", color)?;
            write_block(w, &parsed.main_body, color)?;
        }
    }

    write_label(w, "REFERENCES", color)?;
    write_block(w, &parsed.references, color)
}

/// Numbered list of recent renders, newest first.
pub fn print_history(
    w: &mut dyn Write,
    history: &RecentHistory,
    color: ColorMode,
) -> std::io::Result<()> {
    if history.is_empty() {
        return writeln!(w, "No recent papers.");
    }
    for (i, record) in history.iter().enumerate() {
        print_history_line(w, i + 1, record, color)?;
    }
    Ok(())
}

fn print_history_line(
    w: &mut dyn Write,
    n: usize,
    record: &HistoryRecord,
    color: ColorMode,
) -> std::io::Result<()> {
    let id = record.id.simple().to_string();
    let short_id = &id[..8];
    let when = record.timestamp.format("%Y-%m-%d %H:%M UTC");
    if color.enabled() {
        writeln!(
            w,
            "{:>2}. {} {} {} {}",
            n,
            short_id.dimmed(),
            when,
            format!("[{}]", record.style.label()).yellow(),
            record.title.bold()
        )
    } else {
        writeln!(
            w,
            "{:>2}. {} {} [{}] {}",
            n,
            short_id,
            when,
            record.style.label(),
            record.title
        )
    }
}

/// Supported styles and paper types with their section profile.
pub fn print_catalog(w: &mut dyn Write, color: ColorMode) -> std::io::Result<()> {
    write_label(w, "Styles", color)?;
    for style in FormatStyle::ALL {
        writeln!(w, "  {:<10} {}", style.as_str(), style.label())?;
    }
    writeln!(w)?;

    write_label(w, "Paper types", color)?;
    for paper_type in PaperType::ALL {
        let profile = paper_type.profile();
        let mut parts = Vec::new();
        if profile.has_abstract {
            parts.push("abstract");
        }
        if profile.has_keywords {
            parts.push("keywords");
        }
        parts.push(if profile.has_structured_body {
            "structured body"
        } else {
            "free-form body"
        });
        let detail = parts.join(", ");
        if color.enabled() {
            writeln!(
                w,
                "  {:<18} {:<18} {}",
                paper_type.as_str(),
                paper_type.label(),
                detail.dimmed()
            )?;
        } else {
            writeln!(
                w,
                "  {:<18} {:<18} {}",
                paper_type.as_str(),
                paper_type.label(),
                detail
            )?;
        }
    }
    writeln!(w)?;

    write_label(w, "Export targets", color)?;
    for target in ExportTarget::ALL {
        writeln!(w, "  {:<10} .{:<5} {}", target.as_str(), target.extension(), target.mime())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use paperstyle_core::HistoryStore;

    fn plain(f: impl FnOnce(&mut dyn Write) -> std::io::Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_print_sections_unstructured() {
        let parsed = ParsedSections {
            r#abstract: "Short.".into(),
            keywords: String::new(),
            references: "A (2000)".into(),
            main_body: "Line one\nLine two".into(),
        };
        let out = plain(|w| print_sections(w, &parsed, None, ColorMode(false)));
        assert!(out.starts_with("ABSTRACT\n  Short.\n\nKEYWORDS\n  (none)\n\nBODY\n"));
        assert!(out.contains("  Line one\n  Line two\n"));
        assert!(out.ends_with("REFERENCES\n  A (2000)\n\n"));
    }

    #[test]
    fn test_print_sections_structured() {
        let mut sections = StructuredSections::default();
        sections.methodology.title = "Approach".into();
        sections.methodology.content = "Steps.".into();
        let out = plain(|w| {
            print_sections(w, &ParsedSections::default(), Some(&sections), ColorMode(false))
        });
        assert!(out.contains("APPROACH (Methodology)\n  Steps.\n"));
        assert!(!out.contains("BODY"));
    }

    #[test]
    fn test_print_history() {
        let mut history = RecentHistory::default();
        assert_eq!(
            plain(|w| print_history(w, &history, ColorMode(false))),
            "No recent papers.\n"
        );
        history.append(HistoryRecord::new("", FormatStyle::Ieee, "<p/>".into()));
        let out = plain(|w| print_history(w, &history, ColorMode(false)));
        assert!(out.starts_with(" 1. "));
        assert!(out.trim_end().ends_with("[IEEE] Untitled Paper"));
    }

    #[test]
    fn test_catalog_lists_everything() {
        let out = plain(|w| print_catalog(w, ColorMode(false)));
        for style in FormatStyle::ALL {
            assert!(out.contains(style.label()));
        }
        assert!(out.contains("project-writeup"));
        assert!(out.contains("abstract, keywords, structured body"));
        assert!(out.contains(".doc   application/msword"));
        assert!(out.contains("pdf"));
    }
}
