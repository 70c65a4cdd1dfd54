// Resume parsing: LaTeX section text -> structured entries -> display timeline.
// Everything below `source` is pure and synchronous; only `source` and
// `handlers` touch I/O.

pub mod certificates;
pub mod education;
pub mod experience;
pub mod extract;
pub mod grouping;
pub mod handlers;
pub mod models;
pub mod period;
pub mod sanitize;
pub mod skills;
pub mod source;
pub mod timeline;

use serde::Serialize;

use crate::resume::models::{Certificate, EducationEntry, ExperienceEntry, SkillCategory};
use crate::resume::source::{load_or_empty, ResumeSection, SourceProvider};

/// Every section of the resume, parsed.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParsedResume {
    pub experience: Vec<ExperienceEntry>,
    pub skills: Vec<SkillCategory>,
    pub certificates: Vec<Certificate>,
    pub education: Vec<EducationEntry>,
}

impl ParsedResume {
    pub fn parse(experience: &str, skills: &str, certificates: &str, education: &str) -> Self {
        Self {
            experience: experience::parse_experience(experience),
            skills: skills::parse_skills(skills),
            certificates: certificates::parse_certificates(certificates),
            education: education::parse_education(education),
        }
    }
}

/// Fetches all four sections concurrently and parses them. A section that
/// cannot be fetched parses as empty.
pub async fn load_resume(provider: &dyn SourceProvider) -> ParsedResume {
    let (experience, skills, certificates, education) = tokio::join!(
        load_or_empty(provider, ResumeSection::Experience),
        load_or_empty(provider, ResumeSection::Skills),
        load_or_empty(provider, ResumeSection::Certificates),
        load_or_empty(provider, ResumeSection::Education),
    );

    ParsedResume::parse(&experience, &skills, &certificates, &education)
}
