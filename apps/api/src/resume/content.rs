//! Turns a resume request into the structured content that gets rendered.

use serde::{Deserialize, Serialize};

use crate::models::resume::{EducationInput, ExperienceInput, ProjectInput, ResumeRequest};
use crate::resume::validation::{review_bullets, ImpactGap};

const DEFAULT_NAME: &str = "Resume";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResumeContent {
    pub name: String,
    pub contact: Vec<String>,
    pub summary: Option<String>,
    pub experience: Vec<ExperienceEntry>,
    pub education: Vec<EducationEntry>,
    pub skills: Vec<SkillGroup>,
    pub projects: Vec<ProjectEntry>,
    pub impact_gaps: Vec<ImpactGap>,
    pub suggestions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub location: String,
    pub dates: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EducationEntry {
    pub degree: String,
    pub institution: String,
    pub graduation_year: String,
    pub gpa: Option<String>,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkillGroup {
    pub label: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub links: Vec<String>,
    pub bullets: Vec<String>,
}

pub fn compose_resume(req: &ResumeRequest) -> ResumeContent {
    let info = &req.personal_info;
    let name = non_empty(&info.full_name).unwrap_or_else(|| DEFAULT_NAME.to_string());
    let contact: Vec<String> = [
        &info.email,
        &info.phone,
        &info.location,
        &info.linkedin,
        &info.github,
    ]
    .into_iter()
    .filter_map(|v| non_empty(v))
    .collect();

    let experience: Vec<ExperienceEntry> = req.experience.iter().map(experience_entry).collect();
    let education: Vec<EducationEntry> = req.education.iter().map(education_entry).collect();
    let projects: Vec<ProjectEntry> = req.projects.iter().map(project_entry).collect();

    let skills: Vec<SkillGroup> = [
        ("Technical Skills", &req.skills.technical_skills),
        ("Soft Skills", &req.skills.soft_skills),
        ("Tools", &req.skills.tools),
    ]
    .into_iter()
    .filter_map(|(label, items)| {
        let items: Vec<String> = items.iter().filter_map(|i| non_empty(i)).collect();
        (!items.is_empty()).then(|| SkillGroup {
            label: label.to_string(),
            items,
        })
    })
    .collect();

    let impact_gaps = review_bullets(
        experience
            .iter()
            .flat_map(|e| e.bullets.iter())
            .chain(projects.iter().flat_map(|p| p.bullets.iter())),
    );

    let summary = non_empty(&req.summary);
    let mut suggestions = Vec::new();
    if summary.is_none() {
        suggestions.push("Add a two or three sentence professional summary.".to_string());
    }
    if info.email.trim().is_empty() {
        suggestions.push("Include an email address so recruiters can reach you.".to_string());
    }
    if experience.is_empty() && projects.is_empty() {
        suggestions.push(
            "Add internships, part-time work or projects to show practical experience.".to_string(),
        );
    }
    if skills.is_empty() {
        suggestions.push("List the technical and soft skills relevant to your target role.".to_string());
    }
    suggestions.extend(impact_gaps.iter().map(|g| g.suggestion.clone()));

    ResumeContent {
        name,
        contact,
        summary,
        experience,
        education,
        skills,
        projects,
        impact_gaps,
        suggestions,
    }
}

fn experience_entry(job: &ExperienceInput) -> ExperienceEntry {
    ExperienceEntry {
        title: job.job_title.trim().to_string(),
        company: job.company.trim().to_string(),
        location: job.location.trim().to_string(),
        dates: date_range(&job.start_date, &job.end_date, job.current),
        bullets: split_lines(&job.achievements),
    }
}

fn education_entry(school: &EducationInput) -> EducationEntry {
    let degree = match (non_empty(&school.degree), non_empty(&school.major)) {
        (Some(degree), Some(major)) => format!("{degree} in {major}"),
        (Some(degree), None) => degree,
        (None, Some(major)) => major,
        (None, None) => String::new(),
    };
    EducationEntry {
        degree,
        institution: school.university.trim().to_string(),
        graduation_year: school.graduation_year.trim().to_string(),
        gpa: non_empty(&school.gpa),
        highlights: split_lines(&school.achievements),
    }
}

fn project_entry(project: &ProjectInput) -> ProjectEntry {
    ProjectEntry {
        name: project.project_name.trim().to_string(),
        description: project.description.trim().to_string(),
        technologies: project
            .technologies
            .iter()
            .filter_map(|t| non_empty(t))
            .collect(),
        links: [&project.github_url, &project.live_url]
            .into_iter()
            .filter_map(|l| non_empty(l))
            .collect(),
        bullets: split_lines(&project.achievements),
    }
}

/// "start - end", with "Present" for a current role.
pub fn date_range(start: &str, end: &str, current: bool) -> String {
    let start = start.trim();
    let end = if current { "Present" } else { end.trim() };
    match (start.is_empty(), end.is_empty()) {
        (false, false) => format!("{start} - {end}"),
        (false, true) => start.to_string(),
        (true, false) => end.to_string(),
        (true, true) => String::new(),
    }
}

/// One bullet per non-blank line; leading list markers are stripped.
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|l| l.trim().trim_start_matches(['-', '*', '•']).trim())
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
