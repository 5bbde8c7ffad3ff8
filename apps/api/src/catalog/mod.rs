//! Catalog: the read-only skill and career tables every scoring stage reads.
//!
//! Loaded once at startup (from Postgres or the built-in seed) and shared as
//! `Arc<Catalog>`. Nothing downstream mutates it.

pub mod seed;
pub mod store;

use serde::{Deserialize, Serialize};

pub use store::{CatalogSource, PgCatalogSource, SeedCatalogSource};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum SkillCategory {
    #[serde(rename = "Technical")]
    Technical,
    #[serde(rename = "Soft Skills")]
    SoftSkill,
}

impl SkillCategory {
    /// Label used in the catalog tables.
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillCategory::Technical => "Technical",
            SkillCategory::SoftSkill => "Soft Skills",
        }
    }

    pub fn parse(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "technical" => Some(SkillCategory::Technical),
            "soft skills" | "soft skill" | "soft_skill" | "softskill" => {
                Some(SkillCategory::SoftSkill)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub category: SkillCategory,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Career {
    pub title: String,
    pub industry: String,
    /// Catalog skill names, in the order the catalog lists them.
    pub required_skills: Vec<String>,
    pub salary_range: String,
    /// Annual growth in percent.
    pub growth_rate: f64,
    pub description: String,
}

impl Career {
    pub fn requires(&self, skill_name: &str) -> bool {
        self.required_skills
            .iter()
            .any(|s| s.eq_ignore_ascii_case(skill_name))
    }
}

/// Immutable skill + career tables. Order is catalog insertion order and is
/// the tie-breaker for every ranking built on top of it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Catalog {
    skills: Vec<Skill>,
    careers: Vec<Career>,
}

impl Catalog {
    pub fn new(skills: Vec<Skill>, careers: Vec<Career>) -> Self {
        Self { skills, careers }
    }

    pub fn skills(&self) -> &[Skill] {
        &self.skills
    }

    pub fn careers(&self) -> &[Career] {
        &self.careers
    }

    /// Case-insensitive lookup by skill name.
    pub fn skill(&self, name: &str) -> Option<&Skill> {
        let name = name.trim();
        self.skills.iter().find(|s| s.name.eq_ignore_ascii_case(name))
    }

    /// Number of careers listing `skill_name` as a requirement.
    pub fn demand_count(&self, skill_name: &str) -> usize {
        self.careers.iter().filter(|c| c.requires(skill_name)).count()
    }

    /// Highest growth rate in the catalog, 0.0 when there are no careers.
    pub fn max_growth_rate(&self) -> f64 {
        self.careers
            .iter()
            .map(|c| c.growth_rate)
            .fold(0.0_f64, f64::max)
    }

    /// Distinct industries in first-appearance order.
    pub fn industries(&self) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        for career in &self.careers {
            if !out.iter().any(|i| i == &career.industry) {
                out.push(career.industry.clone());
            }
        }
        out
    }

    pub fn skills_in(&self, category: SkillCategory) -> impl Iterator<Item = &Skill> {
        self.skills.iter().filter(move |s| s.category == category)
    }
}
