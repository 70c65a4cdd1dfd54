use serde::{Deserialize, Serialize};

/// One `\cventry` from the experience section.
///
/// `company` and `location` are carried forward from the most recent entry that
/// named an organization, so continuation entries share their employer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: Option<String>,
    pub location: Option<String>,
    pub period: String,
    pub responsibilities: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub category: String,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub title: String,
    pub issuer: String,
    /// Empty when the source entry has no credential line.
    pub credential_id: String,
    pub period: String,
    /// Same value as `period`; the front end reads either.
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub location: String,
    pub period: String,
    pub achievements: Vec<String>,
}

/// Which part of the resume a timeline item came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimelineKind {
    Work,
    Certification,
    Education,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub title: String,
    pub period: String,
    pub achievements: Vec<String>,
}

/// All roles held at one employer, in source order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyGroup {
    pub company: String,
    pub location: String,
    #[serde(rename = "type")]
    pub kind: TimelineKind,
    pub roles: Vec<Role>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineItem {
    /// Display range such as `2021 - Present`, `2019 - 2021` or `2023`.
    pub year: String,
    pub company: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: TimelineKind,
    pub roles: Vec<Role>,
}
