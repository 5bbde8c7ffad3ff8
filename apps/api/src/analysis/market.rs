//! Market Scorer: industry opportunity from careers the student can already touch.

use serde::{Deserialize, Serialize};

use crate::analysis::skill_matcher::{round1, SkillAnalysis};
use crate::catalog::Catalog;

const IN_DEMAND_LIMIT: usize = 5;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndustryOpportunity {
    pub industry: String,
    /// Mean growth rate (percent) of the matching careers.
    pub opportunity_score: f64,
    pub matching_careers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InDemandSkill {
    pub name: String,
    /// Sum of growth rates of careers requiring the skill.
    pub growth_weight: f64,
    pub career_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MarketAnalysis {
    pub industry_opportunities: Vec<IndustryOpportunity>,
    pub in_demand_skills: Vec<InDemandSkill>,
    /// Highest growth rate in the catalog, used to normalise career growth.
    pub max_growth_rate: f64,
}

/// Groups careers whose required skills intersect the matched skills by
/// industry and averages their growth. Sorted descending; equal scores keep
/// the industry's first appearance in the catalog.
pub fn analyze_market(skills: &SkillAnalysis, catalog: &Catalog) -> MarketAnalysis {
    // (industry, growth sum, careers) in first-appearance order
    let mut groups: Vec<(String, f64, Vec<String>)> = Vec::new();

    for career in catalog.careers() {
        let touches = career
            .required_skills
            .iter()
            .any(|req| skills.has_matched(req));
        if !touches {
            continue;
        }
        match groups.iter_mut().find(|(industry, _, _)| *industry == career.industry) {
            Some((_, sum, titles)) => {
                *sum += career.growth_rate;
                titles.push(career.title.clone());
            }
            None => groups.push((
                career.industry.clone(),
                career.growth_rate,
                vec![career.title.clone()],
            )),
        }
    }

    let mut industry_opportunities: Vec<IndustryOpportunity> = groups
        .into_iter()
        .map(|(industry, sum, titles)| IndustryOpportunity {
            opportunity_score: round1(sum / titles.len() as f64),
            industry,
            matching_careers: titles,
        })
        .collect();
    industry_opportunities.sort_by(|a, b| b.opportunity_score.total_cmp(&a.opportunity_score));

    MarketAnalysis {
        industry_opportunities,
        in_demand_skills: in_demand_skills(catalog),
        max_growth_rate: catalog.max_growth_rate(),
    }
}

fn in_demand_skills(catalog: &Catalog) -> Vec<InDemandSkill> {
    let mut ranked: Vec<InDemandSkill> = catalog
        .skills()
        .iter()
        .map(|skill| {
            let requiring = catalog.careers().iter().filter(|c| c.requires(&skill.name));
            let (growth_weight, career_count) =
                requiring.fold((0.0, 0), |(sum, n), c| (sum + c.growth_rate, n + 1));
            InDemandSkill {
                name: skill.name.clone(),
                growth_weight,
                career_count,
            }
        })
        .filter(|s| s.career_count > 0)
        .collect();
    ranked.sort_by(|a, b| b.growth_weight.total_cmp(&a.growth_weight));
    ranked.truncate(IN_DEMAND_LIMIT);
    ranked
}
