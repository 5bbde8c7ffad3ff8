//! Mock interviews: free-text answers scored by expected-keyword coverage.

use serde::{Deserialize, Serialize};

use super::session::round1;
use super::{Evaluation, Question, QuestionView, SessionError};

/// Coverage (percent) needed for an answer to count as passed.
const PASS_COVERAGE: f64 = 50.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InterviewType {
    Technical,
    Behavioral,
    Mixed,
}

impl InterviewType {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "technical" => Some(Self::Technical),
            "behavioral" | "behavioural" => Some(Self::Behavioral),
            "mixed" => Some(Self::Mixed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Technical => "technical",
            Self::Behavioral => "behavioral",
            Self::Mixed => "mixed",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "beginner" => Some(Self::Beginner),
            "intermediate" => Some(Self::Intermediate),
            "advanced" => Some(Self::Advanced),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Technical,
    Behavioral,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InterviewQuestion {
    pub id: u32,
    pub topic: String,
    pub prompt: String,
    expected_keywords: Vec<String>,
}

impl Question for InterviewQuestion {
    type Answer = String;

    fn topic(&self) -> &str {
        &self.topic
    }

    fn view(&self) -> QuestionView {
        QuestionView {
            id: self.id,
            topic: self.topic.clone(),
            prompt: self.prompt.clone(),
            options: Vec::new(),
        }
    }

    fn evaluate(&self, answer: &String) -> Result<Evaluation, SessionError> {
        if answer.trim().is_empty() {
            return Err(SessionError::InvalidAnswer(
                "answer cannot be empty".to_string(),
            ));
        }
        let lowered = answer.to_lowercase();
        let (covered, missed): (Vec<&String>, Vec<&String>) = self
            .expected_keywords
            .iter()
            .partition(|k| lowered.contains(&k.to_lowercase()));

        let score = if self.expected_keywords.is_empty() {
            100.0
        } else {
            round1(covered.len() as f64 / self.expected_keywords.len() as f64 * 100.0)
        };
        Ok(Evaluation {
            score,
            passed: score >= PASS_COVERAGE,
            feedback: keyword_feedback(&covered, &missed),
        })
    }
}

fn keyword_feedback(covered: &[&String], missed: &[&String]) -> String {
    let join = |words: &[&String]| {
        words
            .iter()
            .map(|w| w.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    };
    match (covered.is_empty(), missed.is_empty()) {
        (_, true) => "Strong answer: you covered every key point.".to_string(),
        (true, false) => format!("Try to address: {}.", join(missed)),
        (false, false) => format!(
            "You covered {}. Consider also discussing {}.",
            join(covered),
            join(missed)
        ),
    }
}

struct Prompt {
    kind: Kind,
    difficulty: Difficulty,
    topic: &'static str,
    text: &'static str,
    keywords: &'static [&'static str],
}

const PROMPTS: &[Prompt] = &[
    // ── Technical ────────────────────────────────────────────────────────────
    Prompt {
        kind: Kind::Technical,
        difficulty: Difficulty::Beginner,
        topic: "Python Programming",
        text: "What is the difference between a list and a tuple in Python?",
        keywords: &["mutable", "immutable", "tuple", "list"],
    },
    Prompt {
        kind: Kind::Technical,
        difficulty: Difficulty::Beginner,
        topic: "SQL",
        text: "What does a primary key do in a relational table?",
        keywords: &["unique", "identify", "row", "null"],
    },
    Prompt {
        kind: Kind::Technical,
        difficulty: Difficulty::Beginner,
        topic: "JavaScript",
        text: "How do let, const and var differ in JavaScript?",
        keywords: &["scope", "block", "reassign", "hoist"],
    },
    Prompt {
        kind: Kind::Technical,
        difficulty: Difficulty::Intermediate,
        topic: "SQL",
        text: "How would you find and fix a slow database query?",
        keywords: &["index", "explain", "join", "query plan"],
    },
    Prompt {
        kind: Kind::Technical,
        difficulty: Difficulty::Intermediate,
        topic: "Data Analysis",
        text: "Describe your process for cleaning a messy dataset.",
        keywords: &["missing", "duplicate", "outlier", "validate"],
    },
    Prompt {
        kind: Kind::Technical,
        difficulty: Difficulty::Intermediate,
        topic: "Machine Learning",
        text: "How do you detect and prevent overfitting?",
        keywords: &["validation", "regularization", "cross", "training"],
    },
    Prompt {
        kind: Kind::Technical,
        difficulty: Difficulty::Advanced,
        topic: "Cloud Computing",
        text: "Design a highly available web service in the cloud.",
        keywords: &["load balancer", "region", "replica", "autoscal", "failover"],
    },
    Prompt {
        kind: Kind::Technical,
        difficulty: Difficulty::Advanced,
        topic: "Machine Learning",
        text: "How would you evaluate a classifier on a heavily imbalanced dataset?",
        keywords: &["precision", "recall", "f1", "resampl", "auc"],
    },
    Prompt {
        kind: Kind::Technical,
        difficulty: Difficulty::Advanced,
        topic: "Statistics",
        text: "Explain how you would design and analyze an A/B test.",
        keywords: &["hypothesis", "sample size", "significance", "random", "power"],
    },
    // ── Behavioral ───────────────────────────────────────────────────────────
    Prompt {
        kind: Kind::Behavioral,
        difficulty: Difficulty::Beginner,
        topic: "Communication",
        text: "Tell me about yourself.",
        keywords: &["experience", "skills", "goal"],
    },
    Prompt {
        kind: Kind::Behavioral,
        difficulty: Difficulty::Beginner,
        topic: "Teamwork",
        text: "Describe a group project you contributed to.",
        keywords: &["team", "role", "result"],
    },
    Prompt {
        kind: Kind::Behavioral,
        difficulty: Difficulty::Beginner,
        topic: "Time Management",
        text: "How do you organize your week when several deadlines overlap?",
        keywords: &["priorit", "schedule", "deadline"],
    },
    Prompt {
        kind: Kind::Behavioral,
        difficulty: Difficulty::Intermediate,
        topic: "Problem Solving",
        text: "Walk me through a difficult problem you solved.",
        keywords: &["situation", "task", "action", "result"],
    },
    Prompt {
        kind: Kind::Behavioral,
        difficulty: Difficulty::Intermediate,
        topic: "Teamwork",
        text: "Describe a conflict within a team and how it was resolved.",
        keywords: &["listen", "compromise", "outcome", "team"],
    },
    Prompt {
        kind: Kind::Behavioral,
        difficulty: Difficulty::Intermediate,
        topic: "Communication",
        text: "How do you explain a technical topic to a non-technical audience?",
        keywords: &["audience", "example", "simple", "feedback"],
    },
    Prompt {
        kind: Kind::Behavioral,
        difficulty: Difficulty::Advanced,
        topic: "Leadership",
        text: "Tell me about a time you led a team through a setback.",
        keywords: &["vision", "motivat", "delegat", "result"],
    },
    Prompt {
        kind: Kind::Behavioral,
        difficulty: Difficulty::Advanced,
        topic: "Critical Thinking",
        text: "Describe a decision where you had to weigh conflicting evidence.",
        keywords: &["data", "trade-off", "risk", "decision"],
    },
    Prompt {
        kind: Kind::Behavioral,
        difficulty: Difficulty::Advanced,
        topic: "Project Management",
        text: "How did you recover a project that was falling behind schedule?",
        keywords: &["scope", "stakeholder", "timeline", "risk"],
    },
];

/// Questions for one interview. Mixed interviews alternate technical and
/// behavioral prompts, two of each.
pub fn interview_questions(kind: InterviewType, difficulty: Difficulty) -> Vec<InterviewQuestion> {
    let pick = |wanted: Kind| {
        PROMPTS
            .iter()
            .enumerate()
            .filter(move |(_, p)| p.kind == wanted && p.difficulty == difficulty)
    };

    let selected: Vec<(usize, &Prompt)> = match kind {
        InterviewType::Technical => pick(Kind::Technical).collect(),
        InterviewType::Behavioral => pick(Kind::Behavioral).collect(),
        InterviewType::Mixed => pick(Kind::Technical)
            .zip(pick(Kind::Behavioral))
            .take(2)
            .flat_map(|(t, b)| [t, b])
            .collect(),
    };

    selected
        .into_iter()
        .map(|(i, p)| InterviewQuestion {
            id: i as u32 + 1,
            topic: p.topic.to_string(),
            prompt: p.text.to_string(),
            expected_keywords: p.keywords.iter().map(|k| k.to_string()).collect(),
        })
        .collect()
}
