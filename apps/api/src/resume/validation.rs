//! Achievement bullet review: flags bullets that state no measurable outcome.

use serde::{Deserialize, Serialize};

/// A bullet that could not be shown to carry a quantified outcome.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImpactGap {
    pub bullet: String,
    pub reason: String,
    pub suggestion: String,
}

const VAGUE_VERBS: &[&str] = &[
    "improved",
    "enhanced",
    "helped",
    "worked on",
    "assisted",
    "supported",
    "participated",
    "involved",
    "responsible for",
];

const VAGUE_SCALE_WORDS: &[&str] = &[
    "significant",
    "major",
    "large",
    "huge",
    "substantial",
    "considerable",
    "many",
    "numerous",
    "various",
    "several",
];

/// Number, percentage, currency or `~N` estimate.
pub fn is_quantified(text: &str) -> bool {
    text.chars().any(|c| c.is_ascii_digit())
        || text.contains('%')
        || text.contains('$')
        || text.contains('€')
        || text.contains('£')
        || text.contains('₹')
}

/// Returns `None` when the bullet is quantified.
pub fn review_bullet(text: &str) -> Option<ImpactGap> {
    if is_quantified(text) {
        return None;
    }
    let lower = text.to_lowercase();

    if let Some(verb) = VAGUE_VERBS.iter().find(|v| lower.contains(*v)) {
        return Some(ImpactGap {
            bullet: text.to_string(),
            reason: format!("Uses '{verb}' without a measurable result"),
            suggestion: format!("Say how much: '{verb}' by what percentage, amount or time saved?"),
        });
    }
    if let Some(word) = VAGUE_SCALE_WORDS.iter().find(|w| lower.contains(*w)) {
        return Some(ImpactGap {
            bullet: text.to_string(),
            reason: format!("Uses the vague scale word '{word}'"),
            suggestion: format!("Replace '{word}' with a specific number, e.g. '5 teams' or '40%'"),
        });
    }
    Some(ImpactGap {
        bullet: text.to_string(),
        reason: "No quantified outcome found".to_string(),
        suggestion: "Add a number, percentage, or time metric to show the impact".to_string(),
    })
}

/// Reviews every bullet, keeping the gaps in input order.
pub fn review_bullets<'a>(bullets: impl IntoIterator<Item = &'a String>) -> Vec<ImpactGap> {
    bullets
        .into_iter()
        .filter_map(|b| review_bullet(b))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_with_percentage() {
        assert!(review_bullet("Improved system performance by 40%").is_none());
    }

    #[test]
    fn test_pass_with_count() {
        assert!(review_bullet("Mentored 3 junior developers").is_none());
    }

    #[test]
    fn test_pass_with_currency() {
        assert!(review_bullet("Cut cloud spend by $12k a year").is_none());
        assert!(review_bullet("Generated €200k in new revenue").is_none());
    }

    #[test]
    fn test_fail_vague_verb() {
        let gap = review_bullet("Helped the team with deployments").unwrap();
        assert!(gap.reason.contains("helped"));
    }

    #[test]
    fn test_fail_vague_scale_word() {
        let gap = review_bullet("Delivered a huge migration").unwrap();
        assert!(gap.reason.contains("huge"));
    }

    #[test]
    fn test_fail_plain_statement() {
        let gap = review_bullet("Led development of ML pipeline").unwrap();
        assert_eq!(gap.reason, "No quantified outcome found");
    }

    #[test]
    fn test_review_keeps_order_of_failures() {
        let bullets = vec![
            "Led development of ML pipeline".to_string(),
            "Improved system performance by 40%".to_string(),
            "Assisted with onboarding".to_string(),
        ];
        let gaps = review_bullets(&bullets);
        assert_eq!(gaps.len(), 2);
        assert_eq!(gaps[0].bullet, "Led development of ML pipeline");
        assert_eq!(gaps[1].bullet, "Assisted with onboarding");
    }
}
