//! Guidance Composer: resume bullets and interview topics by keyword lookup.
//!
//! Pure template substitution. Placeholders: `{role}`, `{industry}`.

use serde::{Deserialize, Serialize};

use crate::analysis::ranker::CareerRecommendation;
use crate::analysis::skill_matcher::SkillAnalysis;
use crate::models::profile::StudentProfile;

struct SkillTemplate {
    skill: &'static str,
    bullet: &'static str,
    questions: &'static [&'static str],
}

const SKILL_TEMPLATES: &[SkillTemplate] = &[
    SkillTemplate {
        skill: "python programming",
        bullet: "Developed Python tooling that automated recurring {industry} workflows, cutting manual effort by [X]%",
        questions: &[
            "Explain the difference between a list and a tuple in Python.",
            "How do you manage dependencies and virtual environments?",
        ],
    },
    SkillTemplate {
        skill: "machine learning",
        bullet: "Trained and evaluated machine learning models, improving prediction accuracy by [X]% over the baseline",
        questions: &[
            "How do you detect and handle overfitting?",
            "Walk through how you would choose an evaluation metric for an imbalanced dataset.",
        ],
    },
    SkillTemplate {
        skill: "data analysis",
        bullet: "Analyzed [N] records to surface trends that informed {industry} decisions",
        questions: &[
            "Describe your process for cleaning a messy dataset.",
            "Tell us about an analysis that changed a decision.",
        ],
    },
    SkillTemplate {
        skill: "project management",
        bullet: "Planned and delivered [N] projects on schedule by coordinating scope, timeline and stakeholders",
        questions: &[
            "How do you handle scope creep?",
            "Describe how you track progress and risk on a project.",
        ],
    },
    SkillTemplate {
        skill: "communication",
        bullet: "Presented findings to [N] stakeholders, translating technical results into clear recommendations",
        questions: &["How do you explain a technical topic to a non-technical audience?"],
    },
    SkillTemplate {
        skill: "problem solving",
        bullet: "Diagnosed and resolved [N] critical issues, reducing recurring incidents by [X]%",
        questions: &["Walk us through a difficult problem you solved and how you approached it."],
    },
    SkillTemplate {
        skill: "javascript",
        bullet: "Built interactive web features in JavaScript used by [N] users",
        questions: &[
            "Explain closures and the event loop in JavaScript.",
            "How do promises differ from async/await?",
        ],
    },
    SkillTemplate {
        skill: "sql",
        bullet: "Wrote optimized SQL queries that reduced report generation time by [X]%",
        questions: &[
            "What is the difference between an INNER JOIN and a LEFT JOIN?",
            "How would you find and fix a slow query?",
        ],
    },
    SkillTemplate {
        skill: "leadership",
        bullet: "Led a team of [N] to deliver a {role}-level initiative ahead of schedule",
        questions: &["Describe a time you motivated a team through a setback."],
    },
    SkillTemplate {
        skill: "critical thinking",
        bullet: "Evaluated [N] alternative approaches and recommended the option that saved [X] hours",
        questions: &["Tell us about a decision where you had to weigh conflicting evidence."],
    },
    SkillTemplate {
        skill: "statistics",
        bullet: "Applied statistical testing to validate [N] hypotheses with measurable confidence",
        questions: &["Explain p-values and their limitations."],
    },
    SkillTemplate {
        skill: "cloud computing",
        bullet: "Deployed services to the cloud, improving availability to [X]% uptime",
        questions: &["How would you design a highly available service in the cloud?"],
    },
    SkillTemplate {
        skill: "agile",
        bullet: "Delivered features across [N] agile sprints while keeping a predictable velocity",
        questions: &["How do you run an effective sprint retrospective?"],
    },
    SkillTemplate {
        skill: "time management",
        bullet: "Balanced [N] concurrent deliverables without missing a deadline",
        questions: &["How do you prioritize when everything is urgent?"],
    },
    SkillTemplate {
        skill: "teamwork",
        bullet: "Collaborated with a cross-functional team of [N] to ship {industry} projects",
        questions: &["Describe a conflict within a team and how it was resolved."],
    },
];

const BEHAVIORAL_QUESTIONS: &[&str] = &[
    "Tell me about yourself.",
    "Why are you interested in the {role} role?",
    "Where do you see yourself in five years?",
];

const GENERAL_TIPS: &[&str] = &[
    "Quantify achievements with numbers, percentages or time saved.",
    "Mirror the keywords used in the job description.",
    "Keep the resume to one page while you are a student or new graduate.",
    "Prepare STAR (Situation, Task, Action, Result) stories for behavioral questions.",
    "Research the company and the {industry} industry before each interview.",
];

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InterviewTopic {
    pub skill: String,
    pub questions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResumeGuidance {
    pub target_role: Option<String>,
    pub professional_summary: String,
    pub resume_bullets: Vec<String>,
    pub skills_to_highlight: Vec<String>,
    pub skills_to_build: Vec<String>,
    pub interview_topics: Vec<InterviewTopic>,
    pub behavioral_questions: Vec<String>,
    pub general_tips: Vec<String>,
}

pub fn compose_guidance(
    profile: &StudentProfile,
    top: Option<&CareerRecommendation>,
    skills: &SkillAnalysis,
) -> ResumeGuidance {
    let (role, industry) = match top {
        Some(rec) => (rec.title.as_str(), rec.industry.as_str()),
        None => ("entry-level", "target"),
    };
    let fill = |template: &str| template.replace("{role}", role).replace("{industry}", industry);

    // Without a target career, fall back to the student's own matched skills
    let focus_skills: Vec<String> = match top {
        Some(rec) => rec
            .matched_skills
            .iter()
            .chain(rec.missing_skills.iter())
            .cloned()
            .collect(),
        None => skills.matched_skills.clone(),
    };

    let skills_to_highlight: Vec<String> = focus_skills
        .iter()
        .filter(|s| skills.has_matched(s))
        .cloned()
        .collect();
    let skills_to_build: Vec<String> = focus_skills
        .iter()
        .filter(|s| !skills.has_matched(s))
        .cloned()
        .collect();

    let resume_bullets: Vec<String> = skills_to_highlight
        .iter()
        .filter_map(|s| template_for(s))
        .map(|t| fill(t.bullet))
        .collect();

    let interview_topics = focus_skills
        .iter()
        .filter_map(|s| {
            template_for(s).map(|t| InterviewTopic {
                skill: s.clone(),
                questions: t.questions.iter().map(|q| fill(*q)).collect(),
            })
        })
        .collect();

    ResumeGuidance {
        target_role: top.map(|r| r.title.clone()),
        professional_summary: build_summary(profile, role, &skills_to_highlight),
        resume_bullets,
        skills_to_highlight,
        skills_to_build,
        interview_topics,
        behavioral_questions: BEHAVIORAL_QUESTIONS.iter().map(|q| fill(*q)).collect(),
        general_tips: GENERAL_TIPS.iter().map(|t| fill(*t)).collect(),
    }
}

fn template_for(skill: &str) -> Option<&'static SkillTemplate> {
    SKILL_TEMPLATES
        .iter()
        .find(|t| t.skill.eq_ignore_ascii_case(skill))
}

fn build_summary(profile: &StudentProfile, role: &str, strengths: &[String]) -> String {
    let education = if profile.education.is_empty() {
        "Motivated student".to_string()
    } else {
        format!("{} student", profile.education)
    };
    let mut summary = format!("{education} seeking {role} opportunities");
    if !strengths.is_empty() {
        summary.push_str(&format!(" with hands-on skills in {}", strengths.join(", ")));
    }
    if !profile.experience.is_empty() {
        summary.push_str(&format!(" and {} of experience", profile.experience));
    }
    summary.push('.');
    if !profile.goals.is_empty() {
        summary.push_str(&format!(" Goal: {}.", profile.goals.trim_end_matches('.')));
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::market::analyze_market;
    use crate::analysis::ranker::{rank_careers, RankingWeights};
    use crate::analysis::skill_matcher::analyze_skills;
    use crate::catalog::seed::builtin_catalog;

    fn guidance_for(profile: &StudentProfile) -> ResumeGuidance {
        let catalog = builtin_catalog();
        let analysis = analyze_skills(profile, &catalog);
        let market = analyze_market(&analysis, &catalog);
        let ranked = rank_careers(&analysis, &market, profile, &catalog, &RankingWeights::default());
        compose_guidance(profile, ranked.first(), &analysis)
    }

    #[test]
    fn test_every_catalog_skill_has_a_template() {
        for skill in builtin_catalog().skills() {
            assert!(template_for(&skill.name).is_some(), "no template for {}", skill.name);
        }
    }

    #[test]
    fn test_bullets_only_for_matched_required_skills() {
        let profile = StudentProfile::new(
            vec!["Machine Learning", "Python Programming"],
            vec!["Technology"],
        );
        let guidance = guidance_for(&profile);
        assert_eq!(guidance.target_role.as_deref(), Some("Machine Learning Engineer"));
        assert_eq!(guidance.resume_bullets.len(), 2);
        assert_eq!(
            guidance.skills_to_build,
            vec!["Data Analysis", "Problem Solving"]
        );
        assert_eq!(guidance.interview_topics.len(), 4);
    }

    #[test]
    fn test_placeholders_are_substituted() {
        let profile = StudentProfile::new(vec!["Teamwork", "Leadership"], vec!["Business"]);
        let guidance = guidance_for(&profile);
        let all_text = guidance
            .resume_bullets
            .iter()
            .chain(guidance.behavioral_questions.iter())
            .chain(guidance.general_tips.iter())
            .cloned()
            .collect::<Vec<_>>()
            .join(" ");
        assert!(!all_text.contains("{role}"));
        assert!(!all_text.contains("{industry}"));
    }

    #[test]
    fn test_no_top_career_still_produces_generic_guidance() {
        let profile = StudentProfile::new(vec!["SQL"], vec![]);
        let analysis = analyze_skills(&profile, &builtin_catalog());
        let guidance = compose_guidance(&profile, None, &analysis);
        assert!(guidance.target_role.is_none());
        assert_eq!(guidance.skills_to_highlight, vec!["SQL"]);
        assert!(guidance.professional_summary.contains("entry-level"));
        assert!(guidance.behavioral_questions[1].contains("entry-level"));
    }

    #[test]
    fn test_summary_uses_profile_fields() {
        let mut profile = StudentProfile::new(vec!["SQL"], vec!["Technology"]);
        profile.education = "Bachelor's Degree".to_string();
        profile.experience = "1-2 years".to_string();
        profile.goals = "Become a data engineer.".to_string();
        let guidance = guidance_for(&profile);
        assert!(guidance.professional_summary.starts_with("Bachelor's Degree student"));
        assert!(guidance.professional_summary.contains("1-2 years of experience"));
        assert!(guidance.professional_summary.ends_with("Goal: Become a data engineer."));
    }
}
