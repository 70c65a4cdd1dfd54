//! Block splitting and field extraction for the resume template's markup.
//!
//! The template uses two conventions, kept as two separate strategies:
//!
//! - label-anchored: `{value} % Label` where the trailing comment names the field
//!   (`FieldLabel`), used by experience, education and skills entries;
//! - positional: the first `{value}` on each line, in order (`positional_values`),
//!   used by `\cvhonor` entries whose comments are not reliable.

use once_cell::sync::Lazy;
use regex::Regex;

static LEADING_BRACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\{([^}]*)\}").expect("leading brace pattern"));

static ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\item\s*\{([^}]+)\}").expect("item pattern"));

/// Text between two occurrences of a command delimiter.
#[derive(Debug, Clone, Copy)]
pub struct RawBlock<'a> {
    text: &'a str,
}

impl<'a> RawBlock<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn is_multiline(&self) -> bool {
        self.text.trim().contains('\n')
    }

    /// Trimmed lines of the block.
    pub fn lines(&self) -> impl Iterator<Item = &'a str> {
        self.text.lines().map(str::trim)
    }
}

/// Splits `text` on `delimiter`, dropping everything before the first occurrence.
pub fn split_blocks<'a>(text: &'a str, delimiter: &'a str) -> impl Iterator<Item = RawBlock<'a>> {
    text.split(delimiter).skip(1).map(RawBlock::new)
}

/// A `{value} % Label` field.
#[derive(Debug, Clone)]
pub struct FieldLabel {
    pattern: Regex,
}

impl FieldLabel {
    /// Matches the bracketed value anywhere on a line, followed by `% label`.
    pub fn new(label: &'static str) -> Self {
        Self::build(label, "")
    }

    /// Only matches when the bracketed value opens the (trimmed) line.
    pub fn line_start(label: &'static str) -> Self {
        Self::build(label, "^")
    }

    fn build(label: &'static str, anchor: &str) -> Self {
        let pattern = format!(r"{anchor}\{{([^}}]*)\}}\s*%\s*{}", regex::escape(label));
        let pattern = Regex::new(&pattern)
            .unwrap_or_else(|e| panic!("invalid pattern for label '{label}': {e}"));
        Self { pattern }
    }

    /// Returns the first value carrying this label, whitespace-trimmed but with
    /// markup left in place. `Some("")` means the field is present but blank.
    pub fn extract(&self, block: &RawBlock<'_>) -> Option<String> {
        if block.is_multiline() {
            block
                .lines()
                .find_map(|line| self.capture(line))
        } else {
            self.capture(block.text())
        }
    }

    /// Like `extract`, but a blank value counts as absent.
    pub fn extract_non_empty(&self, block: &RawBlock<'_>) -> Option<String> {
        self.extract(block).filter(|value| !value.is_empty())
    }

    fn capture(&self, haystack: &str) -> Option<String> {
        self.pattern
            .captures(haystack)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
    }
}

/// The first bracketed value of every line that opens with one, in order.
pub fn positional_values(block: &RawBlock<'_>) -> Vec<String> {
    block
        .lines()
        .filter_map(|line| LEADING_BRACE.captures(line))
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .collect()
}

/// Contents of every `\item {...}` in the block, raw.
pub fn bullet_items(block: &RawBlock<'_>) -> Vec<String> {
    ITEM.captures_iter(block.text())
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_ENTRIES: &str = r"
\begin{cventries}
\cventry
  {Engineer} % Job title
  {Acme Co} % Organization
  {Denver, CO} % Location
  {Jan 2020 - Jan 2021} % Date(s)
  {
    \begin{cvitems}
      \item {Shipped things}
      \item {Fixed 12 bugs}
    \end{cvitems}
  }
\cventry
  {Senior Engineer} % Job title
  {} % Organization
  {} % Location
  {Jan 2021 - Present} % Date(s)
  {}
\end{cventries}
";

    #[test]
    fn test_split_discards_preamble() {
        let blocks: Vec<_> = split_blocks(TWO_ENTRIES, r"\cventry").collect();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].text().contains("{Engineer}"));
        assert!(!blocks[0].text().contains("begin{cventries}"));
    }

    #[test]
    fn test_split_without_delimiter_yields_nothing() {
        assert_eq!(split_blocks("no entries here", r"\cventry").count(), 0);
        assert_eq!(split_blocks("", r"\cventry").count(), 0);
    }

    #[test]
    fn test_labeled_extraction_multiline() {
        let blocks: Vec<_> = split_blocks(TWO_ENTRIES, r"\cventry").collect();
        let title = FieldLabel::new("Job title");
        let org = FieldLabel::new("Organization");
        let date = FieldLabel::new("Date");

        assert_eq!(title.extract(&blocks[0]).as_deref(), Some("Engineer"));
        assert_eq!(org.extract(&blocks[0]).as_deref(), Some("Acme Co"));
        assert_eq!(date.extract(&blocks[0]).as_deref(), Some("Jan 2020 - Jan 2021"));

        assert_eq!(org.extract(&blocks[1]).as_deref(), Some(""));
        assert_eq!(org.extract_non_empty(&blocks[1]), None);
    }

    #[test]
    fn test_labeled_extraction_single_line() {
        let block = RawBlock::new("{Analyst} % Job title {Globex} % Organization {2019} % Date");
        assert!(!block.is_multiline());
        assert_eq!(
            FieldLabel::new("Organization").extract(&block).as_deref(),
            Some("Globex")
        );
        assert_eq!(FieldLabel::new("Date").extract(&block).as_deref(), Some("2019"));
    }

    #[test]
    fn test_missing_label_is_absent() {
        let block = RawBlock::new("{Engineer} % Job title\n{2020} % Date\n");
        assert_eq!(FieldLabel::new("Location").extract(&block), None);
    }

    #[test]
    fn test_label_is_case_sensitive() {
        let block = RawBlock::new("{Engineer} % job title\n{2020} % Date\n");
        assert_eq!(FieldLabel::new("Job title").extract(&block), None);
    }

    #[test]
    fn test_line_start_label_requires_leading_brace() {
        let block = RawBlock::new("\n  x {Data} % Category\n  {Cloud} % Category\n");
        let anchored = FieldLabel::line_start("Category");
        assert_eq!(anchored.extract(&block).as_deref(), Some("Cloud"));
    }

    #[test]
    fn test_positional_values_in_order() {
        let block = RawBlock::new(
            "\n  {PMP} % Name\n  {PMI} % Issuer\n\n  {} % Credential ID\n  {2023} % Date(s)\n",
        );
        assert_eq!(positional_values(&block), vec!["PMP", "PMI", "", "2023"]);
    }

    #[test]
    fn test_bullet_items() {
        let blocks: Vec<_> = split_blocks(TWO_ENTRIES, r"\cventry").collect();
        assert_eq!(
            bullet_items(&blocks[0]),
            vec!["Shipped things", "Fixed 12 bugs"]
        );
        assert!(bullet_items(&blocks[1]).is_empty());
    }
}
