//! Timeline assembly: merges grouped work history, certificates and education
//! into one list ordered for display.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::resume::grouping::group_by_company;
use crate::resume::models::{
    Certificate, CompanyGroup, EducationEntry, ExperienceEntry, Role, TimelineItem, TimelineKind,
};
use crate::resume::period::{first_year, format_year_range, is_ongoing, parse_period, FALLBACK_YEAR};

/// Fixed sentences used for timeline descriptions. Missing fields in a loaded
/// override fall back to the defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineCopy {
    /// Completes "Progressive advancement across N roles focusing on ...".
    pub career_focus: String,
    pub certifications_heading: String,
    pub certifications_description: String,
    /// Shown instead of a credential id when the certificate has none.
    pub credential_fallback: String,
    pub featured_institution: String,
    pub featured_institution_description: String,
    pub education_description: String,
}

impl Default for TimelineCopy {
    fn default() -> Self {
        Self {
            career_focus: "data analysis, project management, and operational excellence"
                .to_string(),
            certifications_heading: "Professional Certifications".to_string(),
            certifications_description:
                "Achieved key professional certifications in project management and data analytics."
                    .to_string(),
            credential_fallback: "Professional certification demonstrating expertise and knowledge"
                .to_string(),
            featured_institution: "University of Northern Colorado".to_string(),
            featured_institution_description: "Foundational education in teaching and pedagogy, developing leadership skills through competitive athletics at the Division 1 level.".to_string(),
            education_description:
                "Advanced studies in applied technology and training development.".to_string(),
        }
    }
}

impl TimelineCopy {
    fn work_description(&self, roles: &[Role]) -> String {
        match roles {
            [only] => format!("Professional experience in {}.", only.title.to_lowercase()),
            _ => format!(
                "Progressive advancement across {} roles focusing on {}.",
                roles.len(),
                self.career_focus
            ),
        }
    }

    fn education_description(&self, institution: &str) -> String {
        if institution == self.featured_institution {
            self.featured_institution_description.clone()
        } else {
            self.education_description.clone()
        }
    }
}

/// Groups raw experience entries and assembles the full timeline.
pub fn timeline_from_resume(
    experience: &[ExperienceEntry],
    certificates: &[Certificate],
    education: &[EducationEntry],
    copy: &TimelineCopy,
) -> Vec<TimelineItem> {
    assemble_timeline(group_by_company(experience), certificates, education, copy)
}

/// Builds timeline items for every company group, one item for all
/// certificates, and one per education entry, then orders them: ongoing items
/// first, then by start year, newest first.
pub fn assemble_timeline(
    groups: Vec<CompanyGroup>,
    certificates: &[Certificate],
    education: &[EducationEntry],
    copy: &TimelineCopy,
) -> Vec<TimelineItem> {
    let mut timeline: Vec<TimelineItem> = groups
        .into_iter()
        .filter_map(|group| work_item(group, copy))
        .collect();

    timeline.extend(certification_item(certificates, copy));
    timeline.extend(education.iter().map(|edu| education_item(edu, copy)));

    sort_timeline(&mut timeline);
    timeline
}

fn work_item(group: CompanyGroup, copy: &TimelineCopy) -> Option<TimelineItem> {
    let spans: Vec<_> = group.roles.iter().map(|r| parse_period(&r.period)).collect();

    let start = spans.iter().map(|s| s.start).min()?;
    let end = if spans.iter().any(|s| s.is_ongoing()) {
        None
    } else {
        spans.iter().map(|s| s.last_year()).max()
    };

    Some(TimelineItem {
        year: format_year_range(start, end),
        description: copy.work_description(&group.roles),
        company: group.company,
        kind: TimelineKind::Work,
        roles: group.roles,
    })
}

fn certification_item(certificates: &[Certificate], copy: &TimelineCopy) -> Option<TimelineItem> {
    let years: Vec<i32> = certificates
        .iter()
        .map(|cert| first_year(&cert.period).unwrap_or(FALLBACK_YEAR))
        .collect();
    let start = *years.iter().min()?;
    let end = years.iter().max().copied();

    let roles = certificates
        .iter()
        .map(|cert| Role {
            title: cert.title.clone(),
            period: cert.period.clone(),
            achievements: vec![
                cert.issuer.clone(),
                if cert.credential_id.is_empty() {
                    copy.credential_fallback.clone()
                } else {
                    format!("Credential ID: {}", cert.credential_id)
                },
            ],
        })
        .collect();

    Some(TimelineItem {
        year: format_year_range(start, end),
        company: copy.certifications_heading.clone(),
        description: copy.certifications_description.clone(),
        kind: TimelineKind::Certification,
        roles,
    })
}

fn education_item(edu: &EducationEntry, copy: &TimelineCopy) -> TimelineItem {
    let mut achievements = edu.achievements.clone();
    if !edu.location.is_empty() {
        achievements.push(edu.location.clone());
    }

    // A period with no recognizable year still needs a sortable year.
    let year = match first_year(&edu.period) {
        Some(_) => edu.period.clone(),
        None => FALLBACK_YEAR.to_string(),
    };

    TimelineItem {
        year,
        company: edu.institution.clone(),
        description: copy.education_description(&edu.institution),
        kind: TimelineKind::Education,
        roles: vec![Role {
            title: edu.degree.clone(),
            period: edu.period.clone(),
            achievements,
        }],
    }
}

/// Ongoing items first, then descending start year (0 when the year string has
/// none). Ties keep their assembly order.
pub fn sort_timeline(timeline: &mut [TimelineItem]) {
    timeline.sort_by_cached_key(|item| {
        (
            Reverse(is_ongoing(&item.year)),
            Reverse(first_year(&item.year).unwrap_or(0)),
        )
    });
}
