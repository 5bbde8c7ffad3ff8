//! Career Ranker: weighted compatibility of every catalog career.
//!
//! compatibility = 100 × (skill × overlap + market × growth / max_growth + interest × hit)
//!
//! - overlap: fraction of the career's required skills the student matched
//! - growth / max_growth: career growth normalised by the catalog maximum
//! - hit: 1.0 when an interest names the industry or appears in the title
//!
//! Weights come from `RankingWeights` (configurable, defaults below). The sort is
//! stable so equal scores keep catalog order.

use serde::{Deserialize, Serialize};

use crate::analysis::market::MarketAnalysis;
use crate::analysis::skill_matcher::{round1, SkillAnalysis};
use crate::catalog::{Career, Catalog};
use crate::models::profile::StudentProfile;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RankingWeights {
    pub skill: f64,
    pub market: f64,
    pub interest: f64,
}

impl Default for RankingWeights {
    fn default() -> Self {
        Self {
            skill: 0.6,
            market: 0.2,
            interest: 0.2,
        }
    }
}

/// Per-component contributions, each in [0, 1] before weighting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreBreakdown {
    pub skill_overlap: f64,
    pub market_growth: f64,
    pub interest_match: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CareerRecommendation {
    pub title: String,
    pub industry: String,
    pub compatibility_score: f64,
    pub salary_range: String,
    pub growth_rate: f64,
    pub description: String,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub breakdown: ScoreBreakdown,
    pub rationale: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CareerRecommendations {
    pub top_careers: Vec<CareerRecommendation>,
    pub total_careers_considered: usize,
}

/// Scores and ranks every career in the catalog. Returns the full ranking.
pub fn rank_careers(
    skills: &SkillAnalysis,
    market: &MarketAnalysis,
    profile: &StudentProfile,
    catalog: &Catalog,
    weights: &RankingWeights,
) -> Vec<CareerRecommendation> {
    let mut ranked: Vec<CareerRecommendation> = catalog
        .careers()
        .iter()
        .map(|career| score_career(career, skills, market, profile, weights))
        .collect();

    ranked.sort_by(|a, b| b.compatibility_score.total_cmp(&a.compatibility_score));
    ranked
}

/// Truncates a full ranking to the first `limit` entries.
pub fn top_recommendations(ranked: Vec<CareerRecommendation>, limit: usize) -> CareerRecommendations {
    let total_careers_considered = ranked.len();
    CareerRecommendations {
        top_careers: ranked.into_iter().take(limit).collect(),
        total_careers_considered,
    }
}

fn score_career(
    career: &Career,
    skills: &SkillAnalysis,
    market: &MarketAnalysis,
    profile: &StudentProfile,
    weights: &RankingWeights,
) -> CareerRecommendation {
    let (matched_skills, missing_skills): (Vec<String>, Vec<String>) = career
        .required_skills
        .iter()
        .cloned()
        .partition(|req| skills.has_matched(req));

    let skill_overlap = if career.required_skills.is_empty() {
        0.0
    } else {
        matched_skills.len() as f64 / career.required_skills.len() as f64
    };

    let market_growth = if market.max_growth_rate > 0.0 {
        (career.growth_rate / market.max_growth_rate).clamp(0.0, 1.0)
    } else {
        0.0
    };

    let matched_interest = profile
        .interests
        .iter()
        .find(|interest| interest_matches(interest, career));
    let interest_match = if matched_interest.is_some() { 1.0 } else { 0.0 };

    let raw = weights.skill * skill_overlap
        + weights.market * market_growth
        + weights.interest * interest_match;
    let compatibility_score = round1((raw * 100.0).clamp(0.0, 100.0));

    let rationale = build_rationale(
        career,
        matched_skills.len(),
        matched_interest.map(String::as_str),
    );

    CareerRecommendation {
        title: career.title.clone(),
        industry: career.industry.clone(),
        compatibility_score,
        salary_range: career.salary_range.clone(),
        growth_rate: career.growth_rate,
        description: career.description.clone(),
        matched_skills,
        missing_skills,
        breakdown: ScoreBreakdown {
            skill_overlap: round2(skill_overlap),
            market_growth: round2(market_growth),
            interest_match,
        },
        rationale,
    }
}

/// Case-insensitive: the interest names the industry, or interest and title
/// contain one another ("Data" ~ "Data Analyst").
fn interest_matches(interest: &str, career: &Career) -> bool {
    let interest = interest.to_lowercase();
    let industry = career.industry.to_lowercase();
    let title = career.title.to_lowercase();
    interest == industry || title.contains(&interest) || interest.contains(&title)
}

fn build_rationale(career: &Career, matched: usize, interest: Option<&str>) -> String {
    let required = career.required_skills.len();
    let mut parts = vec![format!(
        "You already have {matched} of {required} core skills for this role"
    )];
    parts.push(format!(
        "{} is growing at {:.0}% per year",
        career.industry, career.growth_rate
    ));
    if let Some(interest) = interest {
        parts.push(format!("it aligns with your interest in {interest}"));
    }
    format!("{}.", parts.join("; "))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
