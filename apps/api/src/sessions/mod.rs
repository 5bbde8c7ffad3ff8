// Assessment and mock-interview sessions.
// A session walks a fixed question list once; the last answer makes it terminal.

pub mod assessment;
pub mod handlers;
pub mod interview;
pub mod session;
pub mod store;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

pub use session::{Session, SessionStatus, SessionSummary, SubmitOutcome};
pub use store::SessionStore;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Unknown session {0}")]
    Unknown(Uuid),

    #[error("Session {0} is already completed")]
    Completed(Uuid),

    #[error("Invalid answer: {0}")]
    InvalidAnswer(String),
}

/// Outcome of checking one answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Evaluation {
    /// 0 – 100
    pub score: f64,
    pub passed: bool,
    pub feedback: String,
}

/// What the client sees of a question. Never carries the answer key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuestionView {
    pub id: u32,
    pub topic: String,
    pub prompt: String,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub options: Vec<String>,
}

/// A question in a fixed session list.
pub trait Question: Send + Sync + 'static {
    type Answer: Clone + Send + Sync + Serialize + 'static;

    /// Skill or theme the question exercises; used for per-topic breakdowns.
    fn topic(&self) -> &str;

    fn view(&self) -> QuestionView;

    /// Rejects malformed answers with `SessionError::InvalidAnswer`.
    fn evaluate(&self, answer: &Self::Answer) -> Result<Evaluation, SessionError>;
}
