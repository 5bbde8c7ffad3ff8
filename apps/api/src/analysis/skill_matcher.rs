//! Skill Matcher: declared skills vs. the catalog.
//!
//! Algorithm:
//! 1. matched = catalog skills whose name equals a declared skill (case-insensitive),
//!    kept in catalog order
//! 2. strength = Σ category_weight(matched) / |declared| × 100, clamped to [0, 100]
//! 3. recommended = catalog skills not declared, by demand across careers (desc),
//!    ties in catalog order
//! 4. missing_skills = per career, required skills not matched

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, SkillCategory};
use crate::models::profile::StudentProfile;

const TECHNICAL_WEIGHT: f64 = 1.0;
const SOFT_SKILL_WEIGHT: f64 = 0.8;

fn category_weight(category: SkillCategory) -> f64 {
    match category {
        SkillCategory::Technical => TECHNICAL_WEIGHT,
        SkillCategory::SoftSkill => SOFT_SKILL_WEIGHT,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendedSkill {
    pub name: String,
    pub category: SkillCategory,
    pub description: String,
    /// Number of catalog careers requiring this skill.
    pub demand: usize,
}

/// Required skills a career needs that the student has not declared.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoleSkillGap {
    pub career: String,
    pub missing: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct CategoryBreakdown {
    pub technical: usize,
    pub soft_skills: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkillAnalysis {
    /// Catalog spelling of every matched skill.
    pub matched_skills: Vec<String>,
    /// Declared skills that are not in the catalog.
    pub unrecognized_skills: Vec<String>,
    pub missing_skills: Vec<RoleSkillGap>,
    pub skill_strength_score: f64,
    pub recommended_skills: Vec<RecommendedSkill>,
    pub category_breakdown: CategoryBreakdown,
}

impl SkillAnalysis {
    pub fn has_matched(&self, skill_name: &str) -> bool {
        self.matched_skills
            .iter()
            .any(|s| s.eq_ignore_ascii_case(skill_name))
    }

    pub fn missing_for(&self, career: &str) -> &[String] {
        self.missing_skills
            .iter()
            .find(|g| g.career == career)
            .map(|g| g.missing.as_slice())
            .unwrap_or(&[])
    }
}

pub fn analyze_skills(profile: &StudentProfile, catalog: &Catalog) -> SkillAnalysis {
    let declared = &profile.declared_skills;

    let matched: Vec<_> = catalog
        .skills()
        .iter()
        .filter(|skill| profile.declares(&skill.name))
        .collect();

    let unrecognized_skills: Vec<String> = declared
        .iter()
        .filter(|d| catalog.skill(d).is_none())
        .cloned()
        .collect();

    let skill_strength_score = if declared.is_empty() {
        0.0
    } else {
        let weighted: f64 = matched.iter().map(|s| category_weight(s.category)).sum();
        round1((weighted / declared.len() as f64 * 100.0).clamp(0.0, 100.0))
    };

    let category_breakdown = CategoryBreakdown {
        technical: matched
            .iter()
            .filter(|s| s.category == SkillCategory::Technical)
            .count(),
        soft_skills: matched
            .iter()
            .filter(|s| s.category == SkillCategory::SoftSkill)
            .count(),
    };

    let mut recommended_skills: Vec<RecommendedSkill> = catalog
        .skills()
        .iter()
        .filter(|skill| !profile.declares(&skill.name))
        .map(|skill| RecommendedSkill {
            name: skill.name.clone(),
            category: skill.category,
            description: skill.description.clone(),
            demand: catalog.demand_count(&skill.name),
        })
        .collect();
    // Stable sort keeps catalog order among equal demand
    recommended_skills.sort_by(|a, b| b.demand.cmp(&a.demand));

    let matched_skills: Vec<String> = matched.iter().map(|s| s.name.clone()).collect();

    let missing_skills = catalog
        .careers()
        .iter()
        .map(|career| RoleSkillGap {
            career: career.title.clone(),
            missing: career
                .required_skills
                .iter()
                .filter(|req| !matched_skills.iter().any(|m| m.eq_ignore_ascii_case(req)))
                .cloned()
                .collect(),
        })
        .collect();

    SkillAnalysis {
        matched_skills,
        unrecognized_skills,
        missing_skills,
        skill_strength_score,
        recommended_skills,
        category_breakdown,
    }
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::seed::builtin_catalog;

    #[test]
    fn test_empty_profile_scores_zero_and_recommends_whole_catalog() {
        let catalog = builtin_catalog();
        let analysis = analyze_skills(&StudentProfile::default(), &catalog);

        assert_eq!(analysis.skill_strength_score, 0.0);
        assert!(analysis.matched_skills.is_empty());
        assert_eq!(analysis.recommended_skills.len(), catalog.skills().len());

        let names: Vec<&str> = analysis
            .recommended_skills
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(
            &names[..6],
            &[
                "Python Programming",
                "Data Analysis",
                "Communication",
                "Problem Solving",
                "SQL",
                "Critical Thinking"
            ]
        );
        assert_eq!(names.last(), Some(&"Agile"));
    }

    #[test]
    fn test_recommended_sorted_by_demand_descending() {
        let analysis = analyze_skills(&StudentProfile::default(), &builtin_catalog());
        for pair in analysis.recommended_skills.windows(2) {
            assert!(pair[0].demand >= pair[1].demand);
        }
    }

    #[test]
    fn test_match_is_case_insensitive_and_uses_catalog_spelling() {
        let profile = StudentProfile::new(vec!["python programming", "sql"], vec![]);
        let analysis = analyze_skills(&profile, &builtin_catalog());
        assert_eq!(analysis.matched_skills, vec!["Python Programming", "SQL"]);
        assert_eq!(analysis.skill_strength_score, 100.0);
    }

    #[test]
    fn test_soft_skills_weigh_less_than_technical() {
        let catalog = builtin_catalog();
        let soft = analyze_skills(&StudentProfile::new(vec!["Communication"], vec![]), &catalog);
        let tech = analyze_skills(&StudentProfile::new(vec!["SQL"], vec![]), &catalog);
        assert_eq!(soft.skill_strength_score, 80.0);
        assert_eq!(tech.skill_strength_score, 100.0);
    }

    #[test]
    fn test_unrecognized_skills_dilute_score() {
        let profile = StudentProfile::new(vec!["SQL", "Basket Weaving"], vec![]);
        let analysis = analyze_skills(&profile, &builtin_catalog());
        assert_eq!(analysis.unrecognized_skills, vec!["Basket Weaving"]);
        assert_eq!(analysis.skill_strength_score, 50.0);
    }

    #[test]
    fn test_score_bounded_for_every_catalog_subset_prefix() {
        let catalog = builtin_catalog();
        let names: Vec<String> = catalog.skills().iter().map(|s| s.name.clone()).collect();
        for n in 0..=names.len() {
            let profile = StudentProfile::new(names[..n].to_vec(), vec![]);
            let score = analyze_skills(&profile, &catalog).skill_strength_score;
            assert!((0.0..=100.0).contains(&score), "score {score} out of range");
        }
    }

    #[test]
    fn test_declared_skills_not_recommended() {
        let profile = StudentProfile::new(vec!["Python Programming"], vec![]);
        let analysis = analyze_skills(&profile, &builtin_catalog());
        assert!(analysis
            .recommended_skills
            .iter()
            .all(|s| s.name != "Python Programming"));
    }

    #[test]
    fn test_missing_skills_per_role() {
        let profile = StudentProfile::new(vec!["Python Programming", "SQL"], vec![]);
        let analysis = analyze_skills(&profile, &builtin_catalog());
        assert_eq!(
            analysis.missing_for("Software Engineer"),
            &["JavaScript".to_string(), "Problem Solving".to_string()]
        );
        assert_eq!(analysis.missing_for("Unknown Role"), &[] as &[String]);
        assert_eq!(analysis.category_breakdown.technical, 2);
    }
}
