//! Whitespace normalization of recognized text.

/// Collapse every whitespace run, newlines included, into a single space and
/// trim both ends.
pub fn normalize(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collapses_lines_and_tabs() {
        assert_eq!(
            normalize("  NOM:\tDUPONT\n\nPrénom :  Jean \r\n"),
            "NOM: DUPONT Prénom : Jean"
        );
    }

    #[test]
    fn test_idempotent() {
        let once = normalize("a \n b\u{00a0}\u{00a0}c");
        assert_eq!(normalize(&once), once);
        assert_eq!(once, "a b c");
    }

    #[test]
    fn test_blank_input() {
        assert_eq!(normalize(" \n\t "), "");
    }
}
