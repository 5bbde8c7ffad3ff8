use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::analysis::ranker::RankingWeights;
use crate::analysis::AnalysisSettings;
use crate::sessions::store::RetentionPolicy;

/// Application configuration loaded from environment variables.
/// Startup fails if a set variable cannot be parsed.
#[derive(Debug, Clone)]
pub struct Config {
    /// When absent the built-in catalog is used.
    pub database_url: Option<String>,
    pub downloads_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
    pub analysis: AnalysisSettings,
    /// Applies to both the assessment and the interview store.
    pub sessions: RetentionPolicy,
    /// Generated PDFs older than this are deleted.
    pub download_max_age: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = AnalysisSettings::default();
        let default_weights = RankingWeights::default();

        let analysis = AnalysisSettings {
            weights: RankingWeights {
                skill: env_or("RANK_WEIGHT_SKILL", default_weights.skill)?,
                market: env_or("RANK_WEIGHT_MARKET", default_weights.market)?,
                interest: env_or("RANK_WEIGHT_INTEREST", default_weights.interest)?,
            },
            top_careers: env_or("TOP_CAREERS", defaults.top_careers)?,
            plan_top_careers: env_or("PLAN_TOP_CAREERS", defaults.plan_top_careers)?,
            phase_size: env_or("PLAN_PHASE_SIZE", defaults.phase_size)?,
        };
        validate_analysis(&analysis)?;

        let default_retention = RetentionPolicy::default();
        let sessions = RetentionPolicy {
            max_in_progress_age: chrono::Duration::minutes(i64::from(env_or::<u32>(
                "SESSION_MAX_AGE_MINUTES",
                120,
            )?)),
            max_per_user: env_or("SESSION_MAX_PER_USER", default_retention.max_per_user)?,
            max_total: env_or("SESSION_MAX_TOTAL", default_retention.max_total)?,
        };
        validate_retention(&sessions)?;

        let download_hours: u32 = env_or("DOWNLOAD_MAX_AGE_HOURS", 24)?;

        Ok(Config {
            database_url: std::env::var("DATABASE_URL").ok().filter(|v| !v.is_empty()),
            downloads_dir: std::env::var("DOWNLOADS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("downloads")),
            port: env_or("PORT", 8080u16).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            analysis,
            sessions,
            download_max_age: Duration::from_secs(u64::from(download_hours) * 3600),
        })
    }
}

fn validate_analysis(settings: &AnalysisSettings) -> Result<()> {
    if settings.phase_size == 0 {
        bail!("PLAN_PHASE_SIZE must be at least 1");
    }
    let w = &settings.weights;
    if [w.skill, w.market, w.interest].iter().any(|v| !v.is_finite() || *v < 0.0) {
        bail!("Ranking weights must be finite and non-negative");
    }
    Ok(())
}

fn validate_retention(policy: &RetentionPolicy) -> Result<()> {
    if policy.max_in_progress_age <= chrono::Duration::zero() {
        bail!("SESSION_MAX_AGE_MINUTES must be positive");
    }
    if policy.max_per_user == 0 || policy.max_total == 0 {
        bail!("SESSION_MAX_PER_USER and SESSION_MAX_TOTAL must be at least 1");
    }
    Ok(())
}

/// Parses `key` when set, otherwise returns `default`.
fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}
