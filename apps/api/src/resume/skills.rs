use once_cell::sync::Lazy;
use tracing::debug;

use crate::resume::extract::{split_blocks, FieldLabel};
use crate::resume::models::SkillCategory;
use crate::resume::sanitize::sanitize;

pub const SKILL_DELIMITER: &str = r"\cvskill";

static CATEGORY: Lazy<FieldLabel> = Lazy::new(|| FieldLabel::line_start("Category"));
static SKILLS: Lazy<FieldLabel> = Lazy::new(|| FieldLabel::line_start("Skills"));

/// Parses `\cvskill` entries. The category and the comma-separated skill list
/// may sit on different lines of the entry.
pub fn parse_skills(text: &str) -> Vec<SkillCategory> {
    split_blocks(text, SKILL_DELIMITER)
        .filter_map(|block| {
            let category = CATEGORY.extract_non_empty(&block).map(|c| sanitize(&c));
            let skills = SKILLS.extract_non_empty(&block);

            match (category, skills) {
                (Some(category), Some(skills)) if !category.is_empty() => Some(SkillCategory {
                    category,
                    technologies: split_technologies(&skills),
                }),
                _ => {
                    debug!("Skipping skill block without category or skills");
                    None
                }
            }
        })
        .collect()
}

fn split_technologies(skills: &str) -> Vec<String> {
    skills
        .split(',')
        .map(sanitize)
        .filter(|skill| !skill.is_empty())
        .collect()
}
