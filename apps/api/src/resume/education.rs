use once_cell::sync::Lazy;
use tracing::debug;

use crate::resume::experience::ENTRY_DELIMITER;
use crate::resume::extract::{bullet_items, split_blocks, FieldLabel, RawBlock};
use crate::resume::models::EducationEntry;
use crate::resume::sanitize::sanitize;

static DEGREE: Lazy<FieldLabel> = Lazy::new(|| FieldLabel::new("Degree"));
static INSTITUTION: Lazy<FieldLabel> = Lazy::new(|| FieldLabel::new("Institution"));
static LOCATION: Lazy<FieldLabel> = Lazy::new(|| FieldLabel::new("Location"));
static DATE: Lazy<FieldLabel> = Lazy::new(|| FieldLabel::new("Date"));

/// Parses the education section. Degree, institution and date are required;
/// a missing location is kept as an empty string.
pub fn parse_education(text: &str) -> Vec<EducationEntry> {
    split_blocks(text, ENTRY_DELIMITER)
        .filter_map(|block| parse_block(&block))
        .collect()
}

fn parse_block(block: &RawBlock<'_>) -> Option<EducationEntry> {
    let degree = DEGREE.extract_non_empty(block);
    let institution = INSTITUTION.extract_non_empty(block);
    let period = DATE.extract_non_empty(block);

    let (Some(degree), Some(institution), Some(period)) = (degree, institution, period) else {
        debug!("Skipping education block without degree, institution or date");
        return None;
    };

    Some(EducationEntry {
        degree: sanitize(&degree),
        institution: sanitize(&institution),
        location: LOCATION
            .extract(block)
            .map(|location| sanitize(&location))
            .unwrap_or_default(),
        period: sanitize(&period),
        achievements: bullet_items(block).iter().map(|item| sanitize(item)).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EDUCATION: &str = r"
\cvsection{Education}
\begin{cventries}
\cventry
  {M.S. Applied Technology \& Training} % Degree
  {Metro State University} % Institution
  {Denver, CO} % Location
  {Aug. 2015 - May 2017} % Date(s)
  {
    \begin{cvitems}
      \item {GPA 3.9}
    \end{cvitems}
  }
\cventry
  {B.A. Education} % Degree
  {University of Northern Colorado} % Institution
  {Greeley, CO} % Location
  {2010 - 2014} % Date(s)
  {}
\cventry
  {Certificate} % Degree
  {} % Institution
  {2009} % Date(s)
  {}
\end{cventries}
";

    #[test]
    fn test_parses_qualifying_blocks() {
        let entries = parse_education(EDUCATION);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].degree, "M.S. Applied Technology & Training");
        assert_eq!(entries[0].institution, "Metro State University");
        assert_eq!(entries[0].location, "Denver, CO");
        assert_eq!(entries[0].period, "Aug. 2015 - May 2017");
        assert_eq!(entries[0].achievements, vec!["GPA 3.9"]);
        assert!(entries[1].achievements.is_empty());
    }

    #[test]
    fn test_missing_location_is_empty() {
        let text = "\\cventry\n{PhD} % Degree\n{MIT} % Institution\n{2024} % Date\n";
        let entries = parse_education(text);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].location, "");
    }

    #[test]
    fn test_empty_text_yields_nothing() {
        assert!(parse_education("   ").is_empty());
    }
}
