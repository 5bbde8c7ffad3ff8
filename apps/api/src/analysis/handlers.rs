use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::analysis::{run_analysis, AnalysisReport};
use crate::catalog::SkillCategory;
use crate::errors::AppError;
use crate::models::profile::{ProfileInput, StudentProfile};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    #[serde(flatten)]
    pub report: AnalysisReport,
}

#[derive(Debug, Serialize)]
pub struct SkillEntry {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct SkillsResponse {
    pub technical: Vec<SkillEntry>,
    pub soft_skills: Vec<SkillEntry>,
}

/// POST /api/analyze
pub async fn handle_analyze(
    State(state): State<AppState>,
    payload: Result<Json<ProfileInput>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let Json(input) = payload?;
    let profile = StudentProfile::try_from(input)?;

    let report = run_analysis(&profile, &state.catalog, &state.config.analysis);
    info!(
        "Analyzed profile: {} skills, {} interests, top career {:?}",
        profile.declared_skills.len(),
        profile.interests.len(),
        report
            .career_recommendations
            .top_careers
            .first()
            .map(|c| c.title.as_str())
    );

    Ok(Json(AnalyzeResponse {
        success: true,
        report,
    }))
}

/// GET /api/skills
pub async fn handle_list_skills(State(state): State<AppState>) -> Json<SkillsResponse> {
    let entries = |category: SkillCategory| -> Vec<SkillEntry> {
        state
            .catalog
            .skills_in(category)
            .map(|s| SkillEntry {
                name: s.name.clone(),
                description: s.description.clone(),
            })
            .collect()
    };
    Json(SkillsResponse {
        technical: entries(SkillCategory::Technical),
        soft_skills: entries(SkillCategory::SoftSkill),
    })
}

/// GET /api/industries
pub async fn handle_list_industries(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.catalog.industries())
}
