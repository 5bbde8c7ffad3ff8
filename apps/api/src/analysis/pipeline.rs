//! Runs the five scoring stages in order for one profile.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::guidance::{compose_guidance, ResumeGuidance};
use crate::analysis::market::{analyze_market, MarketAnalysis};
use crate::analysis::planner::{synthesize_plan, LearningPlan};
use crate::analysis::ranker::{rank_careers, top_recommendations, CareerRecommendations, RankingWeights};
use crate::analysis::skill_matcher::{analyze_skills, SkillAnalysis};
use crate::catalog::Catalog;
use crate::models::profile::StudentProfile;

/// Tunables for one analysis run. Loaded from the environment in `Config`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisSettings {
    pub weights: RankingWeights,
    /// How many ranked careers the response lists.
    pub top_careers: usize,
    /// How many of the best careers the learning plan covers.
    pub plan_top_careers: usize,
    /// Skills per learning phase. Never 0.
    pub phase_size: usize,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            weights: RankingWeights::default(),
            top_careers: 5,
            plan_top_careers: 3,
            phase_size: 3,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisReport {
    pub skill_analysis: SkillAnalysis,
    pub market_analysis: MarketAnalysis,
    pub career_recommendations: CareerRecommendations,
    pub learning_plan: LearningPlan,
    pub resume_guidance: ResumeGuidance,
}

pub fn run_analysis(
    profile: &StudentProfile,
    catalog: &Catalog,
    settings: &AnalysisSettings,
) -> AnalysisReport {
    let skill_analysis = analyze_skills(profile, catalog);
    debug!(
        matched = skill_analysis.matched_skills.len(),
        strength = skill_analysis.skill_strength_score,
        "Skill analysis complete"
    );

    let market_analysis = analyze_market(&skill_analysis, catalog);
    debug!(
        industries = market_analysis.industry_opportunities.len(),
        "Market analysis complete"
    );

    let ranked = rank_careers(
        &skill_analysis,
        &market_analysis,
        profile,
        catalog,
        &settings.weights,
    );

    let learning_plan = synthesize_plan(
        &ranked,
        &skill_analysis,
        catalog,
        settings.plan_top_careers,
        settings.phase_size,
    );
    let resume_guidance = compose_guidance(profile, ranked.first(), &skill_analysis);
    debug!(
        courses = learning_plan.course_recommendations.len(),
        phases = learning_plan.learning_timeline.len(),
        "Plan and guidance composed"
    );

    AnalysisReport {
        skill_analysis,
        market_analysis,
        career_recommendations: top_recommendations(ranked, settings.top_careers),
        learning_plan,
        resume_guidance,
    }
}
