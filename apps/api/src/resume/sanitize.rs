//! LaTeX escape cleanup for display text.

/// Replaces the escapes `\$`, `\&`, `\%` and `\\` with their literal characters
/// and trims surrounding whitespace.
///
/// The input is scanned once, left to right, so an escaped backslash never
/// pairs with the character after it: `\\&` becomes `\&`, not `\` + `&`.
/// Any other backslash sequence is left untouched.
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(&next) = chars.peek() {
                if matches!(next, '$' | '&' | '%' | '\\') {
                    out.push(next);
                    chars.next();
                    continue;
                }
            }
        }
        out.push(c);
    }

    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replaces_each_escape() {
        assert_eq!(sanitize(r"Saved \$2M"), "Saved $2M");
        assert_eq!(sanitize(r"R\&D"), "R&D");
        assert_eq!(sanitize(r"up 40\%"), "up 40%");
        assert_eq!(sanitize(r"a\\b"), r"a\b");
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(sanitize("  Data Analysis \\& BI \n"), "Data Analysis & BI");
    }

    #[test]
    fn test_clean_text_unchanged() {
        let clean = "Led a team of 5 engineers across 3 regions.";
        assert_eq!(sanitize(clean), clean);
    }

    #[test]
    fn test_idempotent_on_typical_markup() {
        for raw in [
            r"Cut costs by 30\% (\$1.2M) for R\&D",
            r"Built \textbf{pipelines} in Python",
            "plain",
            "",
        ] {
            let once = sanitize(raw);
            assert_eq!(sanitize(&once), once, "input: {raw}");
        }
    }

    #[test]
    fn test_escaped_backslash_does_not_consume_next_escape() {
        assert_eq!(sanitize(r"\\\&"), r"\&");
        assert_eq!(sanitize(r"\\&"), r"\&");
    }

    #[test]
    fn test_unknown_sequences_left_alone() {
        assert_eq!(sanitize(r"\emph{x} \_"), r"\emph{x} \_");
        assert_eq!(sanitize("trailing \\"), "trailing \\");
    }
}
