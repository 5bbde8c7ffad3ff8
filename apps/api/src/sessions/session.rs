//! A single session: fixed question list, answers so far, terminal status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Evaluation, Question, QuestionView, SessionError};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnsweredQuestion<A> {
    pub question_id: u32,
    pub topic: String,
    pub answer: A,
    pub evaluation: Evaluation,
    pub answered_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopicScore {
    pub topic: String,
    pub average_score: f64,
    pub answered: usize,
}

/// Returned for every accepted answer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubmitOutcome {
    pub session_id: Uuid,
    pub status: SessionStatus,
    pub evaluation: Evaluation,
    pub answered: usize,
    pub total_questions: usize,
    /// Present while the session is in progress.
    pub next_question: Option<QuestionView>,
    /// Present once the session is completed.
    pub overall_score: Option<f64>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub topic_scores: Vec<TopicScore>,
}

/// History row for a completed (or running) session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSummary {
    pub session_id: Uuid,
    pub user_id: String,
    pub label: String,
    pub status: SessionStatus,
    pub total_questions: usize,
    pub answered: usize,
    pub overall_score: Option<f64>,
    pub topic_scores: Vec<TopicScore>,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

pub struct Session<Q: Question> {
    pub id: Uuid,
    pub user_id: String,
    /// e.g. "skill assessment" or "technical / intermediate"
    pub label: String,
    questions: Vec<Q>,
    answers: Vec<AnsweredQuestion<Q::Answer>>,
    status: SessionStatus,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl<Q: Question> Session<Q> {
    /// An empty question list yields a session that is completed from the start.
    pub fn new(user_id: impl Into<String>, label: impl Into<String>, questions: Vec<Q>) -> Self {
        let now = Utc::now();
        let empty = questions.is_empty();
        Self {
            id: Uuid::new_v4(),
            user_id: user_id.into(),
            label: label.into(),
            questions,
            answers: Vec::new(),
            status: if empty {
                SessionStatus::Completed
            } else {
                SessionStatus::InProgress
            },
            started_at: now,
            completed_at: if empty { Some(now) } else { None },
        }
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Index of the next question to answer; equals the question count once completed.
    pub fn question_index(&self) -> usize {
        self.answers.len()
    }

    pub fn total_questions(&self) -> usize {
        self.questions.len()
    }

    pub fn current_question(&self) -> Option<&Q> {
        match self.status {
            SessionStatus::InProgress => self.questions.get(self.question_index()),
            SessionStatus::Completed => None,
        }
    }

    /// Records an answer to the current question. The index only advances
    /// when the answer is accepted; the last accepted answer completes the session.
    pub fn submit(&mut self, answer: Q::Answer) -> Result<SubmitOutcome, SessionError> {
        let question = self.current_question().ok_or(SessionError::Completed(self.id))?;
        let evaluation = question.evaluate(&answer)?;
        let record = AnsweredQuestion {
            question_id: question.view().id,
            topic: question.topic().to_string(),
            answer,
            evaluation: evaluation.clone(),
            answered_at: Utc::now(),
        };
        self.answers.push(record);

        if self.answers.len() == self.questions.len() {
            self.status = SessionStatus::Completed;
            self.completed_at = Some(Utc::now());
        }

        let completed = self.status == SessionStatus::Completed;
        Ok(SubmitOutcome {
            session_id: self.id,
            status: self.status,
            evaluation,
            answered: self.answers.len(),
            total_questions: self.questions.len(),
            next_question: self.current_question().map(Q::view),
            overall_score: self.overall_score(),
            topic_scores: if completed { self.topic_scores() } else { Vec::new() },
        })
    }

    /// Mean of per-answer scores, only once completed.
    pub fn overall_score(&self) -> Option<f64> {
        if self.status != SessionStatus::Completed {
            return None;
        }
        if self.answers.is_empty() {
            return Some(0.0);
        }
        let sum: f64 = self.answers.iter().map(|a| a.evaluation.score).sum();
        Some(round1(sum / self.answers.len() as f64))
    }

    /// Average score per topic, in first-asked order.
    pub fn topic_scores(&self) -> Vec<TopicScore> {
        let mut acc: Vec<(String, f64, usize)> = Vec::new();
        for answer in &self.answers {
            match acc.iter_mut().find(|(topic, _, _)| *topic == answer.topic) {
                Some((_, sum, n)) => {
                    *sum += answer.evaluation.score;
                    *n += 1;
                }
                None => acc.push((answer.topic.clone(), answer.evaluation.score, 1)),
            }
        }
        acc.into_iter()
            .map(|(topic, sum, answered)| TopicScore {
                topic,
                average_score: round1(sum / answered as f64),
                answered,
            })
            .collect()
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            session_id: self.id,
            user_id: self.user_id.clone(),
            label: self.label.clone(),
            status: self.status,
            total_questions: self.questions.len(),
            answered: self.answers.len(),
            overall_score: self.overall_score(),
            topic_scores: self.topic_scores(),
            started_at: self.started_at,
            completed_at: self.completed_at,
        }
    }
}

pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
