use crate::resume::models::{CompanyGroup, ExperienceEntry, Role, TimelineKind};

/// Achievements longer than this are cut to their first sentence for display.
pub const ACHIEVEMENT_DISPLAY_LIMIT: usize = 100;

/// Folds experience entries into one group per employer.
///
/// Groups appear in the order their employer was first seen; roles keep source
/// order within their group.
pub fn group_by_company(entries: &[ExperienceEntry]) -> Vec<CompanyGroup> {
    entries
        .iter()
        .fold(Vec::<CompanyGroup>::new(), |mut groups, entry| {
            let company = entry.company.clone().unwrap_or_default();
            let role = Role {
                title: entry.title.clone(),
                period: entry.period.clone(),
                achievements: entry
                    .responsibilities
                    .iter()
                    .map(|r| shorten_achievement(r))
                    .collect(),
            };

            match groups.iter_mut().find(|g| g.company == company) {
                Some(group) => group.roles.push(role),
                None => groups.push(CompanyGroup {
                    company,
                    location: entry.location.clone().unwrap_or_default(),
                    kind: TimelineKind::Work,
                    roles: vec![role],
                }),
            }
            groups
        })
}

/// Cuts text longer than `ACHIEVEMENT_DISPLAY_LIMIT` characters after its first
/// period. Text without a period is returned whole.
pub fn shorten_achievement(text: &str) -> String {
    if text.chars().count() <= ACHIEVEMENT_DISPLAY_LIMIT {
        return text.to_string();
    }
    match text.find('.') {
        Some(idx) => text[..=idx].to_string(),
        None => text.to_string(),
    }
}
