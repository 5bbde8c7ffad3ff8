use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Table rows in insertion order; the serial key only drives `ORDER BY`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SkillRow {
    pub name: String,
    pub category: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CareerRow {
    pub title: String,
    pub industry: String,
    /// Comma-separated skill names.
    pub required_skills: String,
    pub salary_range: String,
    pub growth_rate: f64,
    pub description: String,
}
