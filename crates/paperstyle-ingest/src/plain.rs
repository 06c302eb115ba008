use paperstyle_core::{ExtractError, TextExtractor};

pub const TEXT_MIME: &str = "text/plain";

/// UTF-8 text files. A leading byte-order mark is dropped; invalid bytes
/// are replaced rather than rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn mime_types(&self) -> &[&'static str] {
        &[TEXT_MIME, "text/markdown"]
    }

    fn extract(&self, bytes: &[u8], _mime: &str) -> Result<String, ExtractError> {
        let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
        match std::str::from_utf8(bytes) {
            Ok(text) => Ok(text.to_string()),
            Err(e) => {
                tracing::warn!(error = %e, "text upload is not valid UTF-8; replacing bad bytes");
                Ok(String::from_utf8_lossy(bytes).into_owned())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_bom() {
        let text = PlainTextExtractor
            .extract(b"\xEF\xBB\xBFAbstract: hi", TEXT_MIME)
            .unwrap();
        assert_eq!(text, "Abstract: hi");
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let text = PlainTextExtractor.extract(b"caf\xE9 au lait", TEXT_MIME).unwrap();
        assert_eq!(text, "caf\u{FFFD} au lait");
    }
}
