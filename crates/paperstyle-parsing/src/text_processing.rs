/// Expand common typographic ligatures left behind by PDF and DOCX exports.
pub fn expand_ligatures(text: &str) -> String {
    text.replace('\u{FB00}', "ff")
        .replace('\u{FB01}', "fi")
        .replace('\u{FB02}', "fl")
        .replace('\u{FB03}', "ffi")
        .replace('\u{FB04}', "ffl")
        .replace(['\u{FB05}', '\u{FB06}'], "st")
}

/// Normalise extracted text before segmentation.
///
/// - CRLF and lone CR become LF
/// - form feeds (page breaks) become a blank line
/// - non-breaking spaces become plain spaces
/// - ligatures are expanded
pub fn normalize_text(text: &str) -> String {
    let text = text
        .replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\u{000C}', "\n\n")
        .replace('\u{00A0}', " ");
    expand_ligatures(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_ligatures() {
        assert_eq!(expand_ligatures("ﬁnding ﬂow"), "finding flow");
        assert_eq!(expand_ligatures("eﬃcient oﬄine"), "efficient offline");
        assert_eq!(expand_ligatures("plain"), "plain");
    }

    #[test]
    fn test_normalize_line_endings() {
        assert_eq!(normalize_text("a\r\nb\rc\n"), "a\nb\nc\n");
    }

    #[test]
    fn test_normalize_page_break_and_nbsp() {
        assert_eq!(normalize_text("end\u{000C}Next\u{00A0}page"), "end\n\nNext page");
    }
}
