//! Degree level and field relevance

use crate::config::EducationScoringConfig;
use crate::model::{DegreeLevel, EducationEntry};
use regex::Regex;

const DOCTORATE_MARKERS: [&str; 4] = ["phd", "ph.d", "doctorate", "doctor of"];
const MASTER_MARKERS: [&str; 7] = ["master", "m.s.", "m.a.", "msc", "m.sc", "mba", "m.b.a"];
const BACHELOR_MARKERS: [&str; 5] = ["bachelor", "b.s.", "b.a.", "bsc", "b.sc"];

pub struct EducationMatcher {
    config: EducationScoringConfig,
    field_regex: Regex,
}

#[derive(Debug, Clone, PartialEq)]
pub struct EducationMatch {
    pub score: f64,
    pub highest_degree: DegreeLevel,
    pub relevant_field: bool,
}

impl EducationMatcher {
    pub fn new(config: EducationScoringConfig) -> Self {
        // "degree in Chemistry or related field", "background in statistics, ..."
        let field_regex = Regex::new(
            r"(?i)\b(?:degree|background|major)\s+in\s+([a-z][a-z &]*?)(?:\s+or\s+|\s+and\s+|[,.;()\n]|$)",
        )
        .expect("Invalid field regex");

        Self { config, field_regex }
    }

    pub fn match_education(&self, entries: &[EducationEntry], job_description: &str) -> EducationMatch {
        let highest_degree = entries
            .iter()
            .map(|entry| degree_level(&entry.degree))
            .max()
            .unwrap_or(DegreeLevel::None);

        let level_bonus = match highest_degree {
            DegreeLevel::Doctorate => self.config.doctorate_bonus,
            DegreeLevel::Master => self.config.master_bonus,
            DegreeLevel::Bachelor => self.config.bachelor_bonus,
            DegreeLevel::None => 0.0,
        };

        let fields = self.relevant_fields(job_description);
        let relevant_field = entries.iter().any(|entry| {
            let degree = entry.degree.to_lowercase();
            let institution = entry.institution.to_lowercase();
            fields
                .iter()
                .any(|field| degree.contains(field.as_str()) || institution.contains(field.as_str()))
        });

        let field_bonus = if relevant_field { self.config.field_bonus } else { 0.0 };
        let score = (self.config.base_score + level_bonus + field_bonus).clamp(0.0, 100.0);

        EducationMatch {
            score,
            highest_degree,
            relevant_field,
        }
    }

    /// Configured fields plus any field the job description asks for by name.
    pub fn relevant_fields(&self, job_description: &str) -> Vec<String> {
        let mut fields: Vec<String> = self
            .config
            .relevant_fields
            .iter()
            .map(|f| f.trim().to_lowercase())
            .filter(|f| !f.is_empty())
            .collect();

        for cap in self.field_regex.captures_iter(job_description) {
            if let Some(field) = cap.get(1) {
                let field = field.as_str().trim().to_lowercase();
                if field.len() > 2 && !fields.contains(&field) {
                    fields.push(field);
                }
            }
        }

        fields
    }
}

/// Highest level a single degree string names
pub fn degree_level(degree: &str) -> DegreeLevel {
    let degree = degree.to_lowercase();

    if contains_any(&degree, &DOCTORATE_MARKERS) {
        DegreeLevel::Doctorate
    } else if contains_any(&degree, &MASTER_MARKERS) {
        DegreeLevel::Master
    } else if contains_any(&degree, &BACHELOR_MARKERS) {
        DegreeLevel::Bachelor
    } else {
        DegreeLevel::None
    }
}

fn contains_any(text: &str, markers: &[&str]) -> bool {
    markers.iter().any(|m| text.contains(m))
}
