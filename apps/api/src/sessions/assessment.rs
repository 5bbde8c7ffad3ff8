//! Skill assessment: a fixed bank of multiple-choice questions.

use serde::{Deserialize, Serialize};

use super::{Evaluation, Question, QuestionView, SessionError};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssessmentQuestion {
    pub id: u32,
    pub skill: String,
    pub prompt: String,
    pub options: Vec<String>,
    correct: usize,
}

impl Question for AssessmentQuestion {
    /// Zero-based option index.
    type Answer = usize;

    fn topic(&self) -> &str {
        &self.skill
    }

    fn view(&self) -> QuestionView {
        QuestionView {
            id: self.id,
            topic: self.skill.clone(),
            prompt: self.prompt.clone(),
            options: self.options.clone(),
        }
    }

    fn evaluate(&self, answer: &usize) -> Result<Evaluation, SessionError> {
        if *answer >= self.options.len() {
            return Err(SessionError::InvalidAnswer(format!(
                "answer must be an option index between 0 and {}",
                self.options.len().saturating_sub(1)
            )));
        }
        let passed = *answer == self.correct;
        let feedback = if passed {
            "Correct.".to_string()
        } else {
            format!(
                "Not quite. The correct answer is: {}",
                self.options[self.correct]
            )
        };
        Ok(Evaluation {
            score: if passed { 100.0 } else { 0.0 },
            passed,
            feedback,
        })
    }
}

struct Mcq {
    skill: &'static str,
    prompt: &'static str,
    options: [&'static str; 4],
    correct: usize,
}

const BANK: &[Mcq] = &[
    Mcq {
        skill: "Python Programming",
        prompt: "Which Python type is immutable?",
        options: ["list", "dict", "tuple", "set"],
        correct: 2,
    },
    Mcq {
        skill: "Python Programming",
        prompt: "What does a list comprehension return?",
        options: ["A generator", "A new list", "A tuple", "None"],
        correct: 1,
    },
    Mcq {
        skill: "SQL",
        prompt: "Which clause filters rows after aggregation?",
        options: ["WHERE", "GROUP BY", "HAVING", "ORDER BY"],
        correct: 2,
    },
    Mcq {
        skill: "SQL",
        prompt: "A LEFT JOIN returns:",
        options: [
            "Only matching rows",
            "All rows from the left table plus matches from the right",
            "All rows from both tables",
            "Only rows without matches",
        ],
        correct: 1,
    },
    Mcq {
        skill: "Data Analysis",
        prompt: "Which measure of central tendency is most robust to outliers?",
        options: ["Mean", "Median", "Range", "Variance"],
        correct: 1,
    },
    Mcq {
        skill: "Machine Learning",
        prompt: "A model that performs well on training data but poorly on new data is:",
        options: ["Underfitting", "Overfitting", "Regularized", "Converged"],
        correct: 1,
    },
    Mcq {
        skill: "Statistics",
        prompt: "A p-value below the significance level means:",
        options: [
            "The null hypothesis is proven true",
            "The result is evidence against the null hypothesis",
            "The effect size is large",
            "The sample is biased",
        ],
        correct: 1,
    },
    Mcq {
        skill: "JavaScript",
        prompt: "Which keyword declares a block-scoped variable that cannot be reassigned?",
        options: ["var", "let", "const", "static"],
        correct: 2,
    },
    Mcq {
        skill: "Communication",
        prompt: "When presenting results to non-technical stakeholders you should first:",
        options: [
            "Explain the algorithm in detail",
            "Lead with the key finding and its impact",
            "Show all raw data",
            "List every assumption",
        ],
        correct: 1,
    },
    Mcq {
        skill: "Problem Solving",
        prompt: "The first step when a production issue is reported is to:",
        options: [
            "Rewrite the affected module",
            "Reproduce and isolate the problem",
            "Roll out a new release",
            "Close the ticket",
        ],
        correct: 1,
    },
];

/// Questions for the given skills, in bank order. An empty filter selects the whole bank.
pub fn assessment_questions(skills: &[String]) -> Vec<AssessmentQuestion> {
    BANK.iter()
        .enumerate()
        .filter(|(_, q)| skills.is_empty() || skills.iter().any(|s| s.eq_ignore_ascii_case(q.skill)))
        .map(|(i, q)| AssessmentQuestion {
            id: i as u32 + 1,
            skill: q.skill.to_string(),
            prompt: q.prompt.to_string(),
            options: q.options.iter().map(|o| o.to_string()).collect(),
            correct: q.correct,
        })
        .collect()
}
