use once_cell::sync::Lazy;
use tracing::debug;

use crate::resume::extract::{bullet_items, split_blocks, FieldLabel, RawBlock};
use crate::resume::models::ExperienceEntry;
use crate::resume::sanitize::sanitize;

pub const ENTRY_DELIMITER: &str = r"\cventry";

static TITLE: Lazy<FieldLabel> = Lazy::new(|| FieldLabel::new("Job title"));
static ORGANIZATION: Lazy<FieldLabel> = Lazy::new(|| FieldLabel::new("Organization"));
static LOCATION: Lazy<FieldLabel> = Lazy::new(|| FieldLabel::new("Location"));
static DATE: Lazy<FieldLabel> = Lazy::new(|| FieldLabel::new("Date"));

/// Employer named by the most recent entry that had a non-blank organization.
#[derive(Debug, Clone, Default)]
struct Employer {
    company: Option<String>,
    location: Option<String>,
}

/// Parses the experience section into entries, in source order.
///
/// Blocks without a title or date are skipped. A block with a blank
/// organization inherits the employer of the block before it.
pub fn parse_experience(text: &str) -> Vec<ExperienceEntry> {
    let (_, entries) = split_blocks(text, ENTRY_DELIMITER).fold(
        (Employer::default(), Vec::new()),
        |(employer, mut entries), block| {
            let (employer, entry) = parse_block(&block, employer);
            entries.extend(entry);
            (employer, entries)
        },
    );
    entries
}

fn parse_block(block: &RawBlock<'_>, carried: Employer) -> (Employer, Option<ExperienceEntry>) {
    let (Some(title), Some(period)) = (TITLE.extract_non_empty(block), DATE.extract_non_empty(block))
    else {
        debug!("Skipping experience block without title or date");
        return (carried, None);
    };

    let employer = match ORGANIZATION.extract_non_empty(block) {
        Some(organization) => Employer {
            company: Some(sanitize(&organization)),
            location: LOCATION
                .extract_non_empty(block)
                .map(|location| sanitize(&location)),
        },
        None => carried,
    };

    let entry = ExperienceEntry {
        title: sanitize(&title),
        company: employer.company.clone(),
        location: employer.location.clone(),
        period: sanitize(&period),
        responsibilities: bullet_items(block).iter().map(|item| sanitize(item)).collect(),
    };

    (employer, Some(entry))
}
