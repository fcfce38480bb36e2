//! Raw text normalisation: line endings, emptiness check, bounded excerpts.

use crate::error::InputError;

/// Normalise extracted text and reject input with no content.
///
/// Converts CRLF/CR line endings and PDF form feeds to `\n` and trims the
/// whole text. Fails with [`InputError::NoContent`] when nothing remains.
pub fn normalize(raw: &str) -> Result<String, InputError> {
    let text = raw
        .replace("\r\n", "\n")
        .replace(['\r', '\u{c}'], "\n");
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(InputError::NoContent);
    }
    Ok(trimmed.to_string())
}

/// Segment text into trimmed lines, preserving count and order.
pub fn lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(str::trim)
}

/// Prefix of at most `max_chars` characters, cut on a char boundary.
pub fn excerpt(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_blank_input_rejected() {
        assert_eq!(normalize(""), Err(InputError::NoContent));
        assert_eq!(normalize("  \n\t\r\n "), Err(InputError::NoContent));
    }

    #[test]
    fn line_endings_unified() {
        let text = normalize("a\r\nb\rc\u{c}d").unwrap();
        assert_eq!(text, "a\nb\nc\nd");
    }

    #[test]
    fn outer_whitespace_trimmed() {
        assert_eq!(normalize("\n\n  Memo body  \n").unwrap(), "Memo body");
    }

    #[test]
    fn lines_are_trimmed_and_counted() {
        let got: Vec<&str> = lines("  a \n\n b").collect();
        assert_eq!(got, vec!["a", "", "b"]);
    }

    #[test]
    fn excerpt_respects_char_boundaries() {
        assert_eq!(excerpt("नमस्ते world", 3), "नमस");
        assert_eq!(excerpt("short", 100), "short");
        assert_eq!(excerpt("abcdef", 0), "");
    }
}
