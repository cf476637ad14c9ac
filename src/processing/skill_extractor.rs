//! Skill extraction from free resume text against a controlled vocabulary

use crate::error::{Result, ScreenerError};
use crate::model::ParsedResume;
use aho_corasick::{AhoCorasick, MatchKind};
use std::collections::HashSet;

pub struct SkillExtractor {
    matcher: AhoCorasick,
    vocabulary: Vec<String>,
}

impl SkillExtractor {
    pub fn new() -> Result<Self> {
        Self::with_custom_skills(&[])
    }

    /// Built-in vocabulary plus caller-supplied skills, matched case-insensitively
    pub fn with_custom_skills(custom_skills: &[String]) -> Result<Self> {
        let mut seen = HashSet::new();
        let vocabulary: Vec<String> = default_vocabulary()
            .into_iter()
            .map(|s| s.to_string())
            .chain(custom_skills.iter().map(|s| s.trim().to_string()))
            .filter(|s| !s.is_empty())
            .filter(|s| seen.insert(s.to_lowercase()))
            .collect();

        let matcher = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::LeftmostLongest)
            .build(&vocabulary)
            .map_err(|e| ScreenerError::Processing(format!("Failed to build skill matcher: {}", e)))?;

        log::debug!("Skill extractor built with {} vocabulary entries", vocabulary.len());

        Ok(Self { matcher, vocabulary })
    }

    /// Skills found in the text, unique and in order of first appearance
    pub fn extract(&self, text: &str) -> Vec<String> {
        let mut found = HashSet::new();
        let mut skills = Vec::new();

        for mat in self.matcher.find_iter(text) {
            if !on_word_boundary(text, mat.start(), mat.end()) {
                continue;
            }
            let pattern = mat.pattern().as_usize();
            if found.insert(pattern) {
                skills.push(self.vocabulary[pattern].clone());
            }
        }

        skills
    }

    /// A resume carrying the raw text and its extracted skills. Experience and
    /// education stay empty; nothing is invented for them.
    pub fn parse_resume(&self, text: &str) -> ParsedResume {
        ParsedResume {
            skills: self.extract(text),
            text: text.to_string(),
            experience: Vec::new(),
            education: Vec::new(),
        }
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}

fn on_word_boundary(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.map_or(false, is_word_char) && !after.map_or(false, is_word_char)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn default_vocabulary() -> Vec<&'static str> {
    vec![
        // Languages
        "JavaScript", "TypeScript", "Python", "Java", "C++", "C#", "Go", "Golang", "Ruby",
        "Rust", "PHP", "Swift", "Kotlin", "Scala", "Haskell", "Clojure", "MATLAB", "SQL",
        "NoSQL", "Bash", "PowerShell",
        // Web and frameworks
        "React", "Angular", "Vue", "Svelte", "Node.js", "Node", "Express", "Django", "Flask",
        "Spring", "Next.js", "HTML", "CSS", "Sass", "Tailwind", "GraphQL", "REST", "gRPC",
        // Cloud and infrastructure
        "AWS", "Azure", "GCP", "Docker", "Kubernetes", "Terraform", "Ansible", "Jenkins",
        "CI/CD", "DevOps", "Microservices", "Linux", "Nginx", "Git",
        // Databases
        "PostgreSQL", "MySQL", "MongoDB", "Oracle", "Redis", "Cassandra", "DynamoDB",
        "SQLite", "Elasticsearch",
        // Data and machine learning
        "Machine Learning", "Deep Learning", "Data Science", "Artificial Intelligence", "NLP",
        "TensorFlow", "PyTorch", "Pandas", "NumPy", "Spark", "Hadoop", "Kafka", "Airflow",
        "Tableau", "Power BI", "Excel",
        // Testing
        "Jest", "Pytest", "JUnit", "Selenium", "Cypress", "TDD",
        // Methodologies
        "Project Management", "Agile", "Scrum", "Kanban", "Waterfall", "Jira",
        // Soft skills
        "Leadership", "Communication", "Teamwork", "Problem Solving", "Critical Thinking",
        "Mentoring", "Collaboration", "Time Management",
    ]
}
