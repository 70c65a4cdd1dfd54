//! Year extraction from free-text resume periods ("Feb. 2019 - Feb. 2021",
//! "Jan 2024 - Present", "May 2021").

use once_cell::sync::Lazy;
use regex::Regex;

/// Year used whenever a period carries no recognizable date.
pub const FALLBACK_YEAR: i32 = 2020;

const RANGE_SEPARATOR: &str = r"(?:-{1,2}|–|—)";

static MONTH_RANGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"([A-Za-z]+\.?)\s+(\d{{4}})\s*{RANGE_SEPARATOR}\s*(?:([A-Za-z]+\.?)\s+(\d{{4}})|(Present))"
    ))
    .expect("month range pattern")
});

static MONTH_YEAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([A-Za-z]+\.?)\s+(\d{4})").expect("month year pattern"));

// "Present" only counts as the open end of a range, never as a word elsewhere.
static OPEN_END: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"{RANGE_SEPARATOR}\s*Present\s*$")).expect("open end pattern")
});

static YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4}").expect("year pattern"));

/// Start and end year of one period. `end` is `None` while the period is ongoing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearSpan {
    pub start: i32,
    pub end: Option<i32>,
}

impl YearSpan {
    pub fn is_ongoing(&self) -> bool {
        self.end.is_none()
    }

    /// End year for aggregation; an ongoing span ends where it starts.
    pub fn last_year(&self) -> i32 {
        self.end.unwrap_or(self.start)
    }
}

/// Extracts a year span: a month range first, then a single month and year,
/// then `FALLBACK_YEAR` for both ends.
pub fn parse_period(period: &str) -> YearSpan {
    let period = period.trim();

    if let Some(caps) = MONTH_RANGE.captures(period) {
        let start = caps.get(2).and_then(|m| m.as_str().parse().ok());
        let end = caps.get(4).and_then(|m| m.as_str().parse().ok());
        if let Some(start) = start {
            let ongoing = caps.get(5).is_some() || OPEN_END.is_match(period);
            return YearSpan {
                start,
                end: if ongoing { None } else { end.or(Some(start)) },
            };
        }
    }

    let start = MONTH_YEAR
        .captures(period)
        .and_then(|caps| caps.get(2))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(FALLBACK_YEAR);

    YearSpan {
        start,
        end: if OPEN_END.is_match(period) {
            None
        } else {
            Some(start)
        },
    }
}

/// True when the text ends an explicit range with "Present".
pub fn is_ongoing(period: &str) -> bool {
    parse_period(period).is_ongoing()
}

/// The first four-digit number in the text.
pub fn first_year(text: &str) -> Option<i32> {
    YEAR.find(text).and_then(|m| m.as_str().parse().ok())
}

/// Renders `2019 - 2021`, `2021 - Present`, or `2021` when both ends match.
pub fn format_year_range(start: i32, end: Option<i32>) -> String {
    match end {
        None => format!("{start} - Present"),
        Some(end) if end == start => start.to_string(),
        Some(end) => format!("{start} - {end}"),
    }
}
