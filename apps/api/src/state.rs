use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::Config;
use crate::sessions::assessment::AssessmentQuestion;
use crate::sessions::interview::InterviewQuestion;
use crate::sessions::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Loaded once at startup and read-only afterwards.
    pub catalog: Arc<Catalog>,
    pub config: Config,
    pub assessments: Arc<SessionStore<AssessmentQuestion>>,
    pub interviews: Arc<SessionStore<InterviewQuestion>>,
}

impl AppState {
    pub fn new(catalog: Catalog, config: Config) -> Self {
        Self {
            catalog: Arc::new(catalog),
            assessments: Arc::new(SessionStore::with_policy(config.sessions)),
            interviews: Arc::new(SessionStore::with_policy(config.sessions)),
            config,
        }
    }
}
