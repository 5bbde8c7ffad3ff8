use serde::{Deserialize, Serialize};

use crate::errors::AppError;

const MAX_ENTRIES: usize = 20;
const MAX_FIELD_LEN: usize = 200;
const MAX_TEXT_LEN: usize = 3000;
const MAX_LIST_ITEMS: usize = 50;

/// Body of `POST /api/generate-resume`. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ResumeRequest {
    pub personal_info: PersonalInfo,
    pub summary: String,
    pub experience: Vec<ExperienceInput>,
    pub education: Vec<EducationInput>,
    pub skills: SkillsInput,
    pub projects: Vec<ProjectInput>,
    /// Accepted for compatibility; a single layout is rendered.
    pub template: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalInfo {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub github: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperienceInput {
    pub job_title: String,
    pub company: String,
    pub location: String,
    pub start_date: String,
    pub end_date: String,
    pub current: bool,
    /// Newline-separated bullets.
    pub achievements: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationInput {
    pub degree: String,
    pub major: String,
    pub university: String,
    pub graduation_year: String,
    pub gpa: String,
    pub achievements: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillsInput {
    pub technical_skills: Vec<String>,
    pub soft_skills: Vec<String>,
    pub tools: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectInput {
    pub project_name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub github_url: String,
    pub live_url: String,
    pub achievements: String,
}

impl ResumeRequest {
    /// Rejects oversized payloads before any rendering work is done.
    pub fn validate(&self) -> Result<(), AppError> {
        let p = &self.personal_info;
        for (name, value) in [
            ("full_name", &p.full_name),
            ("email", &p.email),
            ("phone", &p.phone),
            ("location", &p.location),
            ("linkedin", &p.linkedin),
            ("github", &p.github),
        ] {
            check_len(name, value, MAX_FIELD_LEN)?;
        }
        check_len("summary", &self.summary, MAX_TEXT_LEN)?;

        check_count("experience", self.experience.len())?;
        check_count("education", self.education.len())?;
        check_count("projects", self.projects.len())?;
        for list in [
            &self.skills.technical_skills,
            &self.skills.soft_skills,
            &self.skills.tools,
        ] {
            if list.len() > MAX_LIST_ITEMS {
                return Err(AppError::Validation(format!(
                    "skill lists accept at most {MAX_LIST_ITEMS} items"
                )));
            }
        }

        for job in &self.experience {
            check_len("experience.job_title", &job.job_title, MAX_FIELD_LEN)?;
            check_len("experience.company", &job.company, MAX_FIELD_LEN)?;
            check_len("experience.achievements", &job.achievements, MAX_TEXT_LEN)?;
        }
        for school in &self.education {
            check_len("education.degree", &school.degree, MAX_FIELD_LEN)?;
            check_len("education.university", &school.university, MAX_FIELD_LEN)?;
            check_len("education.achievements", &school.achievements, MAX_TEXT_LEN)?;
        }
        for project in &self.projects {
            check_len("projects.project_name", &project.project_name, MAX_FIELD_LEN)?;
            check_len("projects.description", &project.description, MAX_TEXT_LEN)?;
            check_len("projects.achievements", &project.achievements, MAX_TEXT_LEN)?;
        }
        Ok(())
    }
}

fn check_len(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

fn check_count(field: &str, count: usize) -> Result<(), AppError> {
    if count > MAX_ENTRIES {
        return Err(AppError::Validation(format!(
            "{field} accepts at most {MAX_ENTRIES} entries"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_body_deserializes() {
        let req: ResumeRequest = serde_json::from_value(serde_json::json!({
            "personal_info": {"full_name": "Test User", "email": "test@example.com"},
            "summary": "Test summary",
            "skills": {},
            "template": "modern"
        }))
        .unwrap();
        assert_eq!(req.personal_info.full_name, "Test User");
        assert!(req.experience.is_empty());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_empty_object_is_valid() {
        let req: ResumeRequest = serde_json::from_str("{}").unwrap();
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_too_many_entries_rejected() {
        let req = ResumeRequest {
            experience: vec![ExperienceInput::default(); 21],
            ..Default::default()
        };
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_overlong_name_rejected() {
        let mut req = ResumeRequest::default();
        req.personal_info.full_name = "a".repeat(201);
        assert!(req.validate().is_err());
    }
}
