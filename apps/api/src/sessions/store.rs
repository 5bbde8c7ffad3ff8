//! In-memory session store.
//!
//! The map lock is only held to look a session up; answers are serialized
//! per session by that session's own mutex, so unrelated sessions never
//! contend. Every insert first prunes according to the store's
//! [`RetentionPolicy`], which keeps memory bounded without a sweeper task.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tracing::debug;
use uuid::Uuid;

use super::session::{round1, TopicScore};
use super::{Question, Session, SessionError, SessionStatus, SessionSummary, SubmitOutcome};

/// A topic at or above this average counts as a strength.
const STRENGTH_THRESHOLD: f64 = 75.0;
/// A topic below this average is a focus area.
const FOCUS_THRESHOLD: f64 = 50.0;

/// Aggregate over a user's completed sessions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInsights {
    pub user_id: String,
    pub sessions_completed: usize,
    pub average_score: f64,
    pub best_score: f64,
    pub latest_score: Option<f64>,
    pub topic_scores: Vec<TopicScore>,
    pub strengths: Vec<String>,
    pub focus_areas: Vec<String>,
}

/// How many sessions the store keeps, and for how long.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetentionPolicy {
    /// In-progress sessions started longer ago than this are abandoned.
    pub max_in_progress_age: Duration,
    /// Oldest sessions of a user are evicted beyond this count.
    pub max_per_user: usize,
    /// Oldest sessions overall are evicted beyond this count.
    pub max_total: usize,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            max_in_progress_age: Duration::hours(2),
            max_per_user: 50,
            max_total: 10_000,
        }
    }
}

struct Entry<Q: Question> {
    user_id: String,
    started_at: DateTime<Utc>,
    session: Arc<Mutex<Session<Q>>>,
}

pub struct SessionStore<Q: Question> {
    sessions: RwLock<HashMap<Uuid, Entry<Q>>>,
    policy: RetentionPolicy,
}

impl<Q: Question> Default for SessionStore<Q> {
    fn default() -> Self {
        Self::with_policy(RetentionPolicy::default())
    }
}

impl<Q: Question> SessionStore<Q> {
    pub fn with_policy(policy: RetentionPolicy) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            policy,
        }
    }

    /// Prunes, then registers a session and returns its id.
    pub async fn insert(&self, session: Session<Q>) -> Uuid {
        let id = session.id;
        let entry = Entry {
            user_id: session.user_id.clone(),
            started_at: session.started_at(),
            session: Arc::new(Mutex::new(session)),
        };

        let mut sessions = self.sessions.write().await;
        let expired = expire(&mut sessions, self.policy.max_in_progress_age, Utc::now());
        // Room for the incoming session
        let evicted = evict_oldest(&mut sessions, self.policy.max_per_user.saturating_sub(1), |e| {
            e.user_id == entry.user_id
        }) + evict_oldest(&mut sessions, self.policy.max_total.saturating_sub(1), |_| true);
        sessions.insert(id, entry);

        if expired + evicted > 0 {
            debug!(expired, evicted, remaining = sessions.len(), "Pruned sessions");
        }
        id
    }

    async fn get(&self, id: Uuid) -> Result<Arc<Mutex<Session<Q>>>, SessionError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .map(|entry| entry.session.clone())
            .ok_or(SessionError::Unknown(id))
    }

    pub async fn submit(&self, id: Uuid, answer: Q::Answer) -> Result<SubmitOutcome, SessionError> {
        let session = self.get(id).await?;
        let mut session = session.lock().await;
        session.submit(answer)
    }

    #[cfg(test)]
    pub async fn summary(&self, id: Uuid) -> Result<SessionSummary, SessionError> {
        let session = self.get(id).await?;
        let summary = session.lock().await.summary();
        Ok(summary)
    }

    /// Completed sessions for `user_id`, oldest first.
    pub async fn history(&self, user_id: &str) -> Vec<SessionSummary> {
        let handles: Vec<_> = self
            .sessions
            .read()
            .await
            .values()
            .filter(|entry| entry.user_id == user_id)
            .map(|entry| entry.session.clone())
            .collect();

        let mut history = Vec::new();
        for handle in handles {
            let session = handle.lock().await;
            if session.status() == SessionStatus::Completed {
                history.push(session.summary());
            }
        }
        history.sort_by_key(|s| (s.completed_at, s.started_at));
        history
    }

    pub async fn insights(&self, user_id: &str) -> UserInsights {
        summarize(user_id, &self.history(user_id).await)
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Drops in-progress sessions older than `max_age`. Completed sessions stay
/// for history, and a session whose lock is held is mid-answer and stays too.
fn expire<Q: Question>(
    sessions: &mut HashMap<Uuid, Entry<Q>>,
    max_age: Duration,
    now: DateTime<Utc>,
) -> usize {
    let before = sessions.len();
    sessions.retain(|_, entry| {
        if now - entry.started_at <= max_age {
            return true;
        }
        match entry.session.try_lock() {
            Ok(session) => session.status() == SessionStatus::Completed,
            Err(_) => true,
        }
    });
    before - sessions.len()
}

/// Removes the oldest selected sessions until at most `keep` remain selected.
fn evict_oldest<Q: Question>(
    sessions: &mut HashMap<Uuid, Entry<Q>>,
    keep: usize,
    selected: impl Fn(&Entry<Q>) -> bool,
) -> usize {
    let mut candidates: Vec<(DateTime<Utc>, Uuid)> = sessions
        .iter()
        .filter(|(_, entry)| selected(entry))
        .map(|(id, entry)| (entry.started_at, *id))
        .collect();
    if candidates.len() <= keep {
        return 0;
    }
    candidates.sort_unstable();
    let excess = candidates.len() - keep;
    for (_, id) in &candidates[..excess] {
        sessions.remove(id);
    }
    excess
}

/// Folds completed session summaries into per-user insights.
pub fn summarize(user_id: &str, history: &[SessionSummary]) -> UserInsights {
    let scores: Vec<f64> = history.iter().filter_map(|s| s.overall_score).collect();
    let average_score = if scores.is_empty() {
        0.0
    } else {
        round1(scores.iter().sum::<f64>() / scores.len() as f64)
    };
    let best_score = scores.iter().copied().fold(0.0, f64::max);

    // Weighted by the number of answers behind each session's topic average
    let mut acc: Vec<(String, f64, usize)> = Vec::new();
    for topic in history.iter().flat_map(|s| s.topic_scores.iter()) {
        let weighted = topic.average_score * topic.answered as f64;
        match acc.iter_mut().find(|(name, _, _)| *name == topic.topic) {
            Some((_, sum, n)) => {
                *sum += weighted;
                *n += topic.answered;
            }
            None => acc.push((topic.topic.clone(), weighted, topic.answered)),
        }
    }
    let mut topic_scores: Vec<TopicScore> = acc
        .into_iter()
        .filter(|(_, _, n)| *n > 0)
        .map(|(topic, sum, answered)| TopicScore {
            topic,
            average_score: round1(sum / answered as f64),
            answered,
        })
        .collect();
    topic_scores.sort_by(|a, b| b.average_score.total_cmp(&a.average_score));

    let strengths = topic_scores
        .iter()
        .filter(|t| t.average_score >= STRENGTH_THRESHOLD)
        .map(|t| t.topic.clone())
        .collect();
    let focus_areas = topic_scores
        .iter()
        .rev()
        .filter(|t| t.average_score < FOCUS_THRESHOLD)
        .map(|t| t.topic.clone())
        .collect();

    UserInsights {
        user_id: user_id.to_string(),
        sessions_completed: history.len(),
        average_score,
        best_score,
        latest_score: history.last().and_then(|s| s.overall_score),
        topic_scores,
        strengths,
        focus_areas,
    }
}
