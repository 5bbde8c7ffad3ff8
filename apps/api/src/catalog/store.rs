//! Catalog sources: where the read-only tables come from.
//!
//! `AppState` never holds a source, only the `Arc<Catalog>` it produced at
//! startup. Pick the source in `main` based on whether DATABASE_URL is set.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, warn};

use super::seed::{builtin_catalog, SEED_CAREERS, SEED_SKILLS};
use super::{Career, Catalog, Skill, SkillCategory};
use crate::models::catalog::{CareerRow, SkillRow};

#[async_trait]
pub trait CatalogSource: Send + Sync {
    async fn load(&self) -> Result<Catalog>;

    /// Short label for startup logs.
    fn name(&self) -> &'static str;
}

/// In-process tables, no I/O.
pub struct SeedCatalogSource;

#[async_trait]
impl CatalogSource for SeedCatalogSource {
    async fn load(&self) -> Result<Catalog> {
        Ok(builtin_catalog())
    }

    fn name(&self) -> &'static str {
        "builtin"
    }
}

/// Postgres-backed catalog. Creates and seeds the tables when missing, then
/// reads them once ordered by id (insertion order).
pub struct PgCatalogSource {
    pool: PgPool,
}

impl PgCatalogSource {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogSource for PgCatalogSource {
    async fn load(&self) -> Result<Catalog> {
        ensure_schema(&self.pool).await?;
        seed_if_missing(&self.pool).await?;

        let skill_rows: Vec<SkillRow> =
            sqlx::query_as("SELECT name, category, description FROM skills ORDER BY id")
                .fetch_all(&self.pool)
                .await
                .context("Failed to load skills table")?;

        let career_rows: Vec<CareerRow> = sqlx::query_as(
            "SELECT title, industry, required_skills, salary_range, growth_rate, description \
             FROM careers ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to load careers table")?;

        let catalog = catalog_from_rows(skill_rows, career_rows)?;
        info!(
            skills = catalog.skills().len(),
            careers = catalog.careers().len(),
            "Catalog loaded from PostgreSQL"
        );
        Ok(catalog)
    }

    fn name(&self) -> &'static str {
        "postgres"
    }
}

async fn ensure_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS skills (
            id          SERIAL PRIMARY KEY,
            name        TEXT NOT NULL UNIQUE,
            category    TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT ''
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create skills table")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS careers (
            id              SERIAL PRIMARY KEY,
            title           TEXT NOT NULL UNIQUE,
            industry        TEXT NOT NULL,
            required_skills TEXT NOT NULL,
            salary_range    TEXT NOT NULL,
            growth_rate     DOUBLE PRECISION NOT NULL,
            description     TEXT NOT NULL DEFAULT ''
        )
        "#,
    )
    .execute(pool)
    .await
    .context("Failed to create careers table")?;

    Ok(())
}

/// Inserts the built-in rows, skipping any that already exist.
async fn seed_if_missing(pool: &PgPool) -> Result<()> {
    let mut tx = pool.begin().await?;

    for (name, category, description) in SEED_SKILLS {
        sqlx::query(
            "INSERT INTO skills (name, category, description) VALUES ($1, $2, $3) \
             ON CONFLICT (name) DO NOTHING",
        )
        .bind(*name)
        .bind(category.as_str())
        .bind(*description)
        .execute(&mut *tx)
        .await?;
    }

    for career in SEED_CAREERS {
        sqlx::query(
            "INSERT INTO careers (title, industry, required_skills, salary_range, growth_rate, description) \
             VALUES ($1, $2, $3, $4, $5, $6) ON CONFLICT (title) DO NOTHING",
        )
        .bind(career.title)
        .bind(career.industry)
        .bind(career.required_skills.join(","))
        .bind(career.salary_range)
        .bind(career.growth_rate)
        .bind(career.description)
        .execute(&mut *tx)
        .await?;
    }

    tx.commit().await.context("Failed to commit catalog seed")?;
    Ok(())
}

/// Converts raw table rows into the in-memory catalog.
///
/// Unknown categories are a hard error. Required skills that are not in the
/// skills table are kept but logged, since they can never be matched.
pub fn catalog_from_rows(skill_rows: Vec<SkillRow>, career_rows: Vec<CareerRow>) -> Result<Catalog> {
    let skills = skill_rows
        .into_iter()
        .map(|row| -> Result<Skill> {
            let category = SkillCategory::parse(&row.category).ok_or_else(|| {
                anyhow!("Skill '{}' has unknown category '{}'", row.name, row.category)
            })?;
            Ok(Skill {
                name: row.name,
                category,
                description: row.description,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let careers: Vec<Career> = career_rows
        .into_iter()
        .map(|row| Career {
            required_skills: split_skill_list(&row.required_skills),
            title: row.title,
            industry: row.industry,
            salary_range: row.salary_range,
            growth_rate: row.growth_rate,
            description: row.description,
        })
        .collect();

    for career in &careers {
        for required in &career.required_skills {
            if !skills.iter().any(|s| s.name.eq_ignore_ascii_case(required)) {
                warn!(career = %career.title, skill = %required, "Required skill missing from skills table");
            }
        }
    }

    Ok(Catalog::new(skills, careers))
}

fn split_skill_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skill_row(name: &str, category: &str) -> SkillRow {
        SkillRow {
            name: name.to_string(),
            category: category.to_string(),
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn test_seed_source_loads_builtin_tables() {
        let catalog = SeedCatalogSource.load().await.unwrap();
        assert_eq!(catalog.skills().len(), 15);
        assert_eq!(catalog.careers().len(), 10);
    }

    #[test]
    fn test_rows_convert_and_split_required_skills() {
        let catalog = catalog_from_rows(
            vec![skill_row("SQL", "Technical"), skill_row("Teamwork", "Soft Skills")],
            vec![CareerRow {
                title: "Analyst".to_string(),
                industry: "Business".to_string(),
                required_skills: "SQL, Teamwork,,".to_string(),
                salary_range: "$1 - $2".to_string(),
                growth_rate: 5.0,
                description: String::new(),
            }],
        )
        .unwrap();

        assert_eq!(catalog.careers()[0].required_skills, vec!["SQL", "Teamwork"]);
        assert_eq!(catalog.skills()[1].category, SkillCategory::SoftSkill);
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let err = catalog_from_rows(vec![skill_row("Welding", "Manual")], vec![]).unwrap_err();
        assert!(err.to_string().contains("Welding"));
    }
}
