use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::sessions::assessment::assessment_questions;
use crate::sessions::interview::{interview_questions, Difficulty, InterviewType};
use crate::sessions::store::UserInsights;
use crate::sessions::{
    Question, QuestionView, Session, SessionStatus, SessionStore, SessionSummary, SubmitOutcome,
};
use crate::state::AppState;

const ANONYMOUS: &str = "anonymous";
const MAX_USER_ID_LEN: usize = 100;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct StartAssessmentRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    /// Restrict the assessment to these skills. Empty means all.
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct StartInterviewRequest {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default = "default_interview_type")]
    pub interview_type: String,
    #[serde(default = "default_difficulty")]
    pub difficulty: String,
}

fn default_interview_type() -> String {
    "technical".to_string()
}

fn default_difficulty() -> String {
    "intermediate".to_string()
}

#[derive(Debug, Deserialize)]
pub struct SubmitRequest<A> {
    /// Older clients send the session id under `user_id`.
    #[serde(alias = "user_id")]
    pub session_id: Uuid,
    pub answer: A,
}

#[derive(Debug, Serialize)]
pub struct StartResponse {
    pub success: bool,
    pub session_id: Uuid,
    pub user_id: String,
    pub label: String,
    pub total_questions: usize,
    pub question: Option<QuestionView>,
}

#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub success: bool,
    #[serde(flatten)]
    pub outcome: SubmitOutcome,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub success: bool,
    pub user_id: String,
    pub sessions: Vec<SessionSummary>,
}

#[derive(Debug, Serialize)]
pub struct InsightsResponse {
    pub success: bool,
    #[serde(flatten)]
    pub insights: UserInsights,
}

// ────────────────────────────────────────────────────────────────────────────
// Assessment
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/assessment/start
pub async fn handle_start_assessment(
    State(state): State<AppState>,
    payload: Result<Json<StartAssessmentRequest>, JsonRejection>,
) -> Result<Json<StartResponse>, AppError> {
    let Json(req) = payload?;
    let user_id = resolve_user_id(req.user_id)?;

    let questions = assessment_questions(&req.skills);
    if questions.is_empty() {
        return Err(AppError::Validation(format!(
            "No assessment questions for skills: {}",
            req.skills.join(", ")
        )));
    }

    let session = Session::new(user_id, "skill assessment", questions);
    Ok(Json(start(&state.assessments, session).await))
}

/// POST /api/assessment/submit
pub async fn handle_submit_assessment(
    State(state): State<AppState>,
    payload: Result<Json<SubmitRequest<usize>>, JsonRejection>,
) -> Result<Json<SubmitResponse>, AppError> {
    let Json(req) = payload?;
    let outcome = state.assessments.submit(req.session_id, req.answer).await?;
    log_completion("Assessment", &outcome);
    Ok(Json(SubmitResponse {
        success: true,
        outcome,
    }))
}

/// GET /api/assessment/history/:user_id
pub async fn handle_assessment_history(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<HistoryResponse> {
    let sessions = state.assessments.history(&user_id).await;
    Json(HistoryResponse {
        success: true,
        user_id,
        sessions,
    })
}

/// GET /api/assessment/insights/:user_id
pub async fn handle_assessment_insights(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<InsightsResponse> {
    Json(InsightsResponse {
        success: true,
        insights: state.assessments.insights(&user_id).await,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Interview
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/interview/start
pub async fn handle_start_interview(
    State(state): State<AppState>,
    payload: Result<Json<StartInterviewRequest>, JsonRejection>,
) -> Result<Json<StartResponse>, AppError> {
    let Json(req) = payload?;
    let user_id = resolve_user_id(req.user_id)?;

    let kind = InterviewType::parse(&req.interview_type).ok_or_else(|| {
        AppError::Validation(format!(
            "interview_type must be technical, behavioral or mixed (got '{}')",
            req.interview_type
        ))
    })?;
    let difficulty = Difficulty::parse(&req.difficulty).ok_or_else(|| {
        AppError::Validation(format!(
            "difficulty must be beginner, intermediate or advanced (got '{}')",
            req.difficulty
        ))
    })?;

    let label = format!("{} / {}", kind.as_str(), difficulty.as_str());
    let session = Session::new(user_id, label, interview_questions(kind, difficulty));
    Ok(Json(start(&state.interviews, session).await))
}

/// POST /api/interview/submit
pub async fn handle_submit_interview(
    State(state): State<AppState>,
    payload: Result<Json<SubmitRequest<String>>, JsonRejection>,
) -> Result<Json<SubmitResponse>, AppError> {
    let Json(req) = payload?;
    let outcome = state.interviews.submit(req.session_id, req.answer).await?;
    log_completion("Interview", &outcome);
    Ok(Json(SubmitResponse {
        success: true,
        outcome,
    }))
}

/// GET /api/interview/history/:user_id
pub async fn handle_interview_history(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<HistoryResponse> {
    let sessions = state.interviews.history(&user_id).await;
    Json(HistoryResponse {
        success: true,
        user_id,
        sessions,
    })
}

/// GET /api/interview/insights/:user_id
pub async fn handle_interview_insights(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<InsightsResponse> {
    Json(InsightsResponse {
        success: true,
        insights: state.interviews.insights(&user_id).await,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Shared
// ────────────────────────────────────────────────────────────────────────────

async fn start<Q: Question>(store: &SessionStore<Q>, session: Session<Q>) -> StartResponse {
    let response = StartResponse {
        success: true,
        session_id: session.id,
        user_id: session.user_id.clone(),
        label: session.label.clone(),
        total_questions: session.total_questions(),
        question: session.current_question().map(Q::view),
    };
    store.insert(session).await;
    info!(
        "Started {} session {} for {}",
        response.label, response.session_id, response.user_id
    );
    response
}

fn log_completion(kind: &str, outcome: &SubmitOutcome) {
    if let Some(message) = completion_message(kind, outcome) {
        info!("{message}");
    }
}

/// `None` while the session is still in progress.
fn completion_message(kind: &str, outcome: &SubmitOutcome) -> Option<String> {
    if outcome.status != SessionStatus::Completed {
        return None;
    }
    let score = outcome.overall_score.unwrap_or(0.0);
    Some(format!(
        "{kind} session {} completed with overall score {score:.1}",
        outcome.session_id
    ))
}

fn resolve_user_id(raw: Option<String>) -> Result<String, AppError> {
    let user_id = raw
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| ANONYMOUS.to_string());
    if user_id.chars().count() > MAX_USER_ID_LEN {
        return Err(AppError::Validation(format!(
            "user_id must be at most {MAX_USER_ID_LEN} characters"
        )));
    }
    Ok(user_id)
}
