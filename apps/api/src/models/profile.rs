use serde::{Deserialize, Serialize};

use crate::errors::AppError;

const MAX_SKILLS: usize = 50;
const MAX_INTERESTS: usize = 20;
const MAX_ITEM_LEN: usize = 100;

/// Raw `/api/analyze` body. Every field is optional; absent fields become
/// empty collections or empty strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileInput {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub education: String,
    #[serde(default, alias = "experience_level")]
    pub experience: String,
    #[serde(default)]
    pub goals: String,
}

/// A validated student profile. Skill and interest lists are trimmed,
/// non-empty and free of case-insensitive duplicates, in first-seen order.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct StudentProfile {
    pub declared_skills: Vec<String>,
    pub interests: Vec<String>,
    pub education: String,
    pub experience: String,
    pub goals: String,
}

impl StudentProfile {
    #[cfg(test)]
    pub fn new<S: Into<String>>(skills: Vec<S>, interests: Vec<S>) -> Self {
        Self {
            declared_skills: normalize_list(skills.into_iter().map(Into::into).collect()),
            interests: normalize_list(interests.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    pub fn declares(&self, skill_name: &str) -> bool {
        self.declared_skills
            .iter()
            .any(|s| s.eq_ignore_ascii_case(skill_name))
    }
}

impl TryFrom<ProfileInput> for StudentProfile {
    type Error = AppError;

    fn try_from(input: ProfileInput) -> Result<Self, Self::Error> {
        check_list("skills", &input.skills, MAX_SKILLS)?;
        check_list("interests", &input.interests, MAX_INTERESTS)?;

        Ok(StudentProfile {
            declared_skills: normalize_list(input.skills),
            interests: normalize_list(input.interests),
            education: input.education.trim().to_string(),
            experience: input.experience.trim().to_string(),
            goals: input.goals.trim().to_string(),
        })
    }
}

fn check_list(field: &str, items: &[String], max: usize) -> Result<(), AppError> {
    if items.len() > max {
        return Err(AppError::Validation(format!(
            "{field} accepts at most {max} entries, got {}",
            items.len()
        )));
    }
    if let Some(long) = items.iter().find(|s| s.trim().chars().count() > MAX_ITEM_LEN) {
        return Err(AppError::Validation(format!(
            "{field} entry '{}…' exceeds {MAX_ITEM_LEN} characters",
            long.chars().take(20).collect::<String>()
        )));
    }
    Ok(())
}

fn normalize_list(items: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(items.len());
    for item in items {
        let trimmed = item.trim();
        if trimmed.is_empty() || out.iter().any(|s| s.eq_ignore_ascii_case(trimmed)) {
            continue;
        }
        out.push(trimmed.to_string());
    }
    out
}
