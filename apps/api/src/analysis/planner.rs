//! Plan Synthesizer: missing skills of the top careers → courses → phases.
//!
//! One course per missing skill, deduplicated, in rank order then required-skill
//! order. Courses are cut into consecutive phases of `phase_size` skills.

use serde::{Deserialize, Serialize};

use crate::analysis::ranker::CareerRecommendation;
use crate::analysis::skill_matcher::SkillAnalysis;
use crate::catalog::{Catalog, SkillCategory};

/// (skill, course title, provider, weeks)
const COURSE_TABLE: &[(&str, &str, &str, u32)] = &[
    ("Python Programming", "Python for Everybody", "Coursera", 6),
    ("Machine Learning", "Machine Learning Specialization", "Coursera", 10),
    ("Data Analysis", "Data Analysis with Python", "freeCodeCamp", 5),
    ("Project Management", "Google Project Management Certificate", "Coursera", 8),
    ("Communication", "Effective Communication in the Workplace", "LinkedIn Learning", 3),
    ("Problem Solving", "Creative Problem Solving", "Coursera", 4),
    ("JavaScript", "JavaScript Algorithms and Data Structures", "freeCodeCamp", 6),
    ("SQL", "SQL for Data Science", "Coursera", 4),
    ("Leadership", "Leading People and Teams", "Coursera", 5),
    ("Critical Thinking", "Critical Thinking Skills for the Professional", "Coursera", 3),
    ("Statistics", "Introduction to Statistics", "Stanford Online", 8),
    ("Cloud Computing", "Cloud Computing Foundations", "AWS Skill Builder", 6),
    ("Agile", "Agile with Atlassian Jira", "Coursera", 3),
    ("Time Management", "Work Smarter, Not Harder: Time Management", "Coursera", 2),
    ("Teamwork", "Teamwork Skills: Communicating Effectively in Groups", "Coursera", 3),
];

const DEFAULT_TECHNICAL_WEEKS: u32 = 6;
const DEFAULT_SOFT_WEEKS: u32 = 3;

const PHASE_NAMES: &[&str] = &["Foundations", "Core Skills", "Specialization", "Mastery"];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourseRecommendation {
    pub skill: String,
    pub course_title: String,
    pub provider: String,
    pub duration_weeks: u32,
    /// Planned careers that list this skill as missing.
    pub target_careers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LearningPhase {
    pub phase: usize,
    pub title: String,
    pub skills: Vec<String>,
    pub start_week: u32,
    pub end_week: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LearningPlan {
    pub target_careers: Vec<String>,
    pub course_recommendations: Vec<CourseRecommendation>,
    pub learning_timeline: Vec<LearningPhase>,
    pub total_weeks: u32,
}

/// Builds the plan for the first `top_n` recommendations. `phase_size` must be
/// non-zero; config rejects 0 at startup.
pub fn synthesize_plan(
    recommendations: &[CareerRecommendation],
    skills: &SkillAnalysis,
    catalog: &Catalog,
    top_n: usize,
    phase_size: usize,
) -> LearningPlan {
    let planned: Vec<&CareerRecommendation> = recommendations.iter().take(top_n).collect();

    let mut courses: Vec<CourseRecommendation> = Vec::new();
    for rec in &planned {
        for skill in skills.missing_for(&rec.title) {
            match courses.iter_mut().find(|c| c.skill.eq_ignore_ascii_case(skill)) {
                Some(existing) => existing.target_careers.push(rec.title.clone()),
                None => {
                    let mut course = course_for(skill, catalog);
                    course.target_careers.push(rec.title.clone());
                    courses.push(course);
                }
            }
        }
    }

    let learning_timeline = build_timeline(&courses, phase_size.max(1));
    let total_weeks = learning_timeline.last().map(|p| p.end_week).unwrap_or(0);

    LearningPlan {
        target_careers: planned.iter().map(|r| r.title.clone()).collect(),
        course_recommendations: courses,
        learning_timeline,
        total_weeks,
    }
}

fn course_for(skill: &str, catalog: &Catalog) -> CourseRecommendation {
    if let Some((name, title, provider, weeks)) = COURSE_TABLE
        .iter()
        .find(|(name, ..)| name.eq_ignore_ascii_case(skill))
    {
        return CourseRecommendation {
            skill: name.to_string(),
            course_title: title.to_string(),
            provider: provider.to_string(),
            duration_weeks: *weeks,
            target_careers: Vec::new(),
        };
    }

    // Catalog skill without a curated course
    let weeks = match catalog.skill(skill).map(|s| s.category) {
        Some(SkillCategory::SoftSkill) => DEFAULT_SOFT_WEEKS,
        _ => DEFAULT_TECHNICAL_WEEKS,
    };
    CourseRecommendation {
        skill: skill.to_string(),
        course_title: format!("{skill} Fundamentals"),
        provider: "Self-paced".to_string(),
        duration_weeks: weeks,
        target_careers: Vec::new(),
    }
}

/// Phases run back to back; a phase lasts as long as its longest course.
fn build_timeline(courses: &[CourseRecommendation], phase_size: usize) -> Vec<LearningPhase> {
    let mut week = 0u32;
    courses
        .chunks(phase_size)
        .enumerate()
        .map(|(i, chunk)| {
            let length = chunk.iter().map(|c| c.duration_weeks).max().unwrap_or(0);
            let start_week = week + 1;
            week += length;
            let name = PHASE_NAMES.get(i).copied().unwrap_or("Advanced Practice");
            LearningPhase {
                phase: i + 1,
                title: format!("Phase {}: {name}", i + 1),
                skills: chunk.iter().map(|c| c.skill.clone()).collect(),
                start_week,
                end_week: week,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::market::analyze_market;
    use crate::analysis::ranker::{rank_careers, RankingWeights};
    use crate::analysis::skill_matcher::analyze_skills;
    use crate::catalog::seed::builtin_catalog;
    use crate::models::profile::StudentProfile;

    fn plan_for(skills: Vec<&str>, interests: Vec<&str>, top_n: usize) -> (LearningPlan, SkillAnalysis) {
        let catalog = builtin_catalog();
        let profile = StudentProfile::new(skills, interests);
        let analysis = analyze_skills(&profile, &catalog);
        let market = analyze_market(&analysis, &catalog);
        let ranked = rank_careers(&analysis, &market, &profile, &catalog, &RankingWeights::default());
        (synthesize_plan(&ranked, &analysis, &catalog, top_n, 3), analysis)
    }

    #[test]
    fn test_courses_cover_missing_skills_exactly_once() {
        let (plan, analysis) = plan_for(vec!["Python Programming"], vec!["Technology"], 3);

        let mut expected: Vec<String> = Vec::new();
        for career in &plan.target_careers {
            for skill in analysis.missing_for(career) {
                if !expected.contains(skill) {
                    expected.push(skill.clone());
                }
            }
        }

        let covered: Vec<String> = plan
            .course_recommendations
            .iter()
            .map(|c| c.skill.clone())
            .collect();
        assert_eq!(covered, expected);

        for skill in &expected {
            let phases_with_skill = plan
                .learning_timeline
                .iter()
                .filter(|p| p.skills.contains(skill))
                .count();
            assert_eq!(phases_with_skill, 1, "{skill} must be in exactly one phase");
        }
    }

    #[test]
    fn test_phases_hold_at_most_three_skills() {
        let (plan, _) = plan_for(vec![], vec![], 5);
        assert!(!plan.learning_timeline.is_empty());
        for phase in &plan.learning_timeline {
            assert!(!phase.skills.is_empty() && phase.skills.len() <= 3);
        }
        assert_eq!(plan.learning_timeline[0].title, "Phase 1: Foundations");
    }

    #[test]
    fn test_timeline_is_sequential() {
        let (plan, _) = plan_for(vec!["SQL"], vec![], 3);
        let mut previous_end = 0;
        for phase in &plan.learning_timeline {
            assert_eq!(phase.start_week, previous_end + 1);
            assert!(phase.end_week >= phase.start_week);
            previous_end = phase.end_week;
        }
        assert_eq!(plan.total_weeks, previous_end);
    }

    #[test]
    fn test_shared_skill_lists_every_target_career() {
        let (plan, _) = plan_for(vec![], vec![], 10);
        let python = plan
            .course_recommendations
            .iter()
            .find(|c| c.skill == "Python Programming")
            .unwrap();
        assert_eq!(python.target_careers.len(), 6);
        assert_eq!(python.course_title, "Python for Everybody");
    }

    #[test]
    fn test_no_gaps_gives_empty_plan() {
        let (plan, _) = plan_for(
            vec!["Machine Learning", "Python Programming", "Data Analysis", "Problem Solving"],
            vec!["Technology"],
            1,
        );
        assert_eq!(plan.target_careers, vec!["Machine Learning Engineer"]);
        assert!(plan.course_recommendations.is_empty());
        assert!(plan.learning_timeline.is_empty());
        assert_eq!(plan.total_weeks, 0);
    }

    #[test]
    fn test_uncurated_skill_gets_fallback_course() {
        let course = course_for("Rust", &builtin_catalog());
        assert_eq!(course.course_title, "Rust Fundamentals");
        assert_eq!(course.duration_weeks, DEFAULT_TECHNICAL_WEEKS);
    }
}
