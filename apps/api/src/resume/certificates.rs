use tracing::debug;

use crate::resume::extract::{positional_values, split_blocks};
use crate::resume::models::Certificate;
use crate::resume::sanitize::sanitize;

pub const HONOR_DELIMITER: &str = r"\cvhonor";

/// Parses `\cvhonor` entries positionally.
///
/// Four or more values map to title, issuer, credential id and date. Three
/// values mean the credential line was left out entirely, so the third value is
/// the date. Anything shorter is skipped.
pub fn parse_certificates(text: &str) -> Vec<Certificate> {
    split_blocks(text, HONOR_DELIMITER)
        .filter_map(|block| {
            let values: Vec<String> = positional_values(&block)
                .iter()
                .map(|value| sanitize(value))
                .collect();

            match values.as_slice() {
                [title, issuer, credential_id, period, ..] => {
                    Some(certificate(title, issuer, credential_id, period))
                }
                [title, issuer, period] => Some(certificate(title, issuer, "", period)),
                _ => {
                    debug!(
                        "Skipping certificate block with {} positional values",
                        values.len()
                    );
                    None
                }
            }
        })
        .collect()
}

fn certificate(title: &str, issuer: &str, credential_id: &str, period: &str) -> Certificate {
    Certificate {
        title: title.to_string(),
        issuer: issuer.to_string(),
        credential_id: credential_id.to_string(),
        period: period.to_string(),
        date: period.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HONORS: &str = r"
\cvsection{Certificates}
\begin{cvhonors}
\cvhonor
  {Project Management Professional (PMP)} % Name
  {Project Management Institute} % Issuer
  {3456789} % Credential ID
  {Mar 2023} % Date(s)
\cvhonor
  {Google Data Analytics} % Name
  {Google \& Coursera} % Issuer
  {2022} % Date(s)
\cvhonor
  {Incomplete} % Name
  {Nobody} % Issuer
\end{cvhonors}
";

    #[test]
    fn test_four_values_map_positionally() {
        let certs = parse_certificates(HONORS);
        assert_eq!(certs[0].title, "Project Management Professional (PMP)");
        assert_eq!(certs[0].issuer, "Project Management Institute");
        assert_eq!(certs[0].credential_id, "3456789");
        assert_eq!(certs[0].period, "Mar 2023");
        assert_eq!(certs[0].date, "Mar 2023");
    }

    #[test]
    fn test_three_values_default_credential_id() {
        let certs = parse_certificates(HONORS);
        assert_eq!(certs[1].issuer, "Google & Coursera");
        assert_eq!(certs[1].credential_id, "");
        assert_eq!(certs[1].period, "2022");
        assert_eq!(certs[1].date, "2022");
    }

    #[test]
    fn test_fewer_than_three_values_skipped() {
        let certs = parse_certificates(HONORS);
        assert_eq!(certs.len(), 2);
    }

    #[test]
    fn test_blank_credential_line_keeps_four_shape() {
        let text = "\\cvhonor\n{AWS SAA} % Name\n{Amazon} % Issuer\n{} % Credential ID\n{2021} % Date\n";
        let certs = parse_certificates(text);
        assert_eq!(certs[0].credential_id, "");
        assert_eq!(certs[0].period, "2021");
    }

    #[test]
    fn test_extra_values_ignored() {
        let text = "\\cvhonor\n{A}\n{B}\n{C}\n{2020}\n{extra}\n";
        let certs = parse_certificates(text);
        assert_eq!(certs.len(), 1);
        assert_eq!(certs[0].period, "2020");
    }
}
