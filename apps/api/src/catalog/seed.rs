//! Built-in catalog rows. Used directly when no database is configured and
//! to seed empty Postgres tables on first start.

use super::{Career, Catalog, Skill, SkillCategory};

/// (name, category, description)
pub const SEED_SKILLS: &[(&str, SkillCategory, &str)] = &[
    ("Python Programming", SkillCategory::Technical, "Programming language for data science and web development"),
    ("Machine Learning", SkillCategory::Technical, "AI/ML algorithms and model development"),
    ("Data Analysis", SkillCategory::Technical, "Statistical analysis and data visualization"),
    ("Project Management", SkillCategory::SoftSkill, "Leading teams and managing projects"),
    ("Communication", SkillCategory::SoftSkill, "Verbal and written communication skills"),
    ("Problem Solving", SkillCategory::SoftSkill, "Analytical thinking and creative solutions"),
    ("JavaScript", SkillCategory::Technical, "Web development and frontend programming"),
    ("SQL", SkillCategory::Technical, "Database management and querying"),
    ("Leadership", SkillCategory::SoftSkill, "Team leadership and management"),
    ("Critical Thinking", SkillCategory::SoftSkill, "Logical analysis and evaluation"),
    ("Statistics", SkillCategory::Technical, "Statistical methods and data interpretation"),
    ("Cloud Computing", SkillCategory::Technical, "Cloud platforms and services"),
    ("Agile", SkillCategory::SoftSkill, "Agile development methodologies"),
    ("Time Management", SkillCategory::SoftSkill, "Efficient task and time organization"),
    ("Teamwork", SkillCategory::SoftSkill, "Collaborative work and team dynamics"),
];

pub struct SeedCareer {
    pub title: &'static str,
    pub industry: &'static str,
    pub required_skills: &'static [&'static str],
    pub salary_range: &'static str,
    pub growth_rate: f64,
    pub description: &'static str,
}

pub const SEED_CAREERS: &[SeedCareer] = &[
    SeedCareer {
        title: "Data Scientist",
        industry: "Technology",
        required_skills: &["Python Programming", "Machine Learning", "Data Analysis", "Statistics"],
        salary_range: "$80,000 - $150,000",
        growth_rate: 15.0,
        description: "Analyze complex data to help organizations make decisions",
    },
    SeedCareer {
        title: "Software Engineer",
        industry: "Technology",
        required_skills: &["Python Programming", "JavaScript", "SQL", "Problem Solving"],
        salary_range: "$70,000 - $130,000",
        growth_rate: 12.0,
        description: "Design and develop software applications",
    },
    SeedCareer {
        title: "Product Manager",
        industry: "Technology",
        required_skills: &["Project Management", "Communication", "Leadership", "Critical Thinking"],
        salary_range: "$90,000 - $160,000",
        growth_rate: 8.0,
        description: "Lead product development and strategy",
    },
    SeedCareer {
        title: "Data Analyst",
        industry: "Technology",
        required_skills: &["Data Analysis", "SQL", "Python Programming", "Communication"],
        salary_range: "$60,000 - $100,000",
        growth_rate: 10.0,
        description: "Interpret data and turn it into information",
    },
    SeedCareer {
        title: "Machine Learning Engineer",
        industry: "Technology",
        required_skills: &["Machine Learning", "Python Programming", "Data Analysis", "Problem Solving"],
        salary_range: "$85,000 - $140,000",
        growth_rate: 20.0,
        description: "Build and deploy ML models in production",
    },
    SeedCareer {
        title: "Business Analyst",
        industry: "Business",
        required_skills: &["Data Analysis", "Communication", "Critical Thinking", "Problem Solving"],
        salary_range: "$65,000 - $110,000",
        growth_rate: 7.0,
        description: "Analyze business processes and recommend improvements",
    },
    SeedCareer {
        title: "Project Manager",
        industry: "Business",
        required_skills: &["Project Management", "Leadership", "Communication", "Time Management"],
        salary_range: "$75,000 - $125,000",
        growth_rate: 6.0,
        description: "Plan and execute projects to achieve business goals",
    },
    SeedCareer {
        title: "Data Engineer",
        industry: "Technology",
        required_skills: &["Python Programming", "SQL", "Cloud Computing", "Data Analysis"],
        salary_range: "$80,000 - $135,000",
        growth_rate: 18.0,
        description: "Build and maintain data infrastructure",
    },
    SeedCareer {
        title: "DevOps Engineer",
        industry: "Technology",
        required_skills: &["Cloud Computing", "Python Programming", "Problem Solving", "Teamwork"],
        salary_range: "$85,000 - $145,000",
        growth_rate: 16.0,
        description: "Manage deployment and infrastructure",
    },
    SeedCareer {
        title: "UX Designer",
        industry: "Technology",
        required_skills: &["Communication", "Critical Thinking", "Problem Solving", "Teamwork"],
        salary_range: "$70,000 - $120,000",
        growth_rate: 14.0,
        description: "Design user experiences for digital products",
    },
];

pub fn seed_skills() -> Vec<Skill> {
    SEED_SKILLS
        .iter()
        .map(|(name, category, description)| Skill {
            name: name.to_string(),
            category: *category,
            description: description.to_string(),
        })
        .collect()
}

pub fn seed_careers() -> Vec<Career> {
    SEED_CAREERS
        .iter()
        .map(|c| Career {
            title: c.title.to_string(),
            industry: c.industry.to_string(),
            required_skills: c.required_skills.iter().map(|s| s.to_string()).collect(),
            salary_range: c.salary_range.to_string(),
            growth_rate: c.growth_rate,
            description: c.description.to_string(),
        })
        .collect()
}

pub fn builtin_catalog() -> Catalog {
    Catalog::new(seed_skills(), seed_careers())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_required_skill_exists_in_skill_table() {
        let catalog = builtin_catalog();
        for career in catalog.careers() {
            for skill in &career.required_skills {
                assert!(
                    catalog.skill(skill).is_some(),
                    "{} requires unknown skill {skill}",
                    career.title
                );
            }
        }
    }

    #[test]
    fn test_skill_names_unique() {
        let skills = seed_skills();
        for (i, a) in skills.iter().enumerate() {
            for b in &skills[i + 1..] {
                assert!(!a.name.eq_ignore_ascii_case(&b.name), "duplicate {}", a.name);
            }
        }
    }
}
