use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::state::AppState;

/// GET /health
/// Returns service version, catalog size and live session counts.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "careerpath-api",
        "catalog": {
            "skills": state.catalog.skills().len(),
            "careers": state.catalog.careers().len()
        },
        "sessions": {
            "assessment": state.assessments.len().await,
            "interview": state.interviews.len().await
        }
    }))
}
