//! ATS-compatibility providers
//!
//! There is no layout analysis behind this metric, so it is pluggable: a
//! structural heuristic over the resume text, a fixed value, or nothing at all.

use crate::config::AtsConfig;
use crate::model::ParsedResume;
use crate::processing::text_processor::TextProcessor;

const SECTION_HEADINGS: [(&str, &[&str]); 6] = [
    ("summary", &["summary", "profile", "objective", "about me"]),
    ("experience", &["experience", "employment", "work history", "career"]),
    ("education", &["education", "academic", "qualifications"]),
    ("skills", &["skills", "technologies", "competencies"]),
    ("projects", &["projects", "portfolio"]),
    ("certifications", &["certifications", "certificates", "licenses"]),
];

const MAX_HEADING_WORDS: usize = 4;

pub trait AtsScorer: Send + Sync {
    /// Score in 0-100, or `None` when this provider does not compute the metric
    fn score(&self, resume: &ParsedResume, text: &TextProcessor) -> Option<f64>;

    fn name(&self) -> &'static str;
}

pub fn from_config(config: &AtsConfig) -> Box<dyn AtsScorer> {
    match config {
        AtsConfig::Structural => Box::new(StructuralAts::default()),
        AtsConfig::Fixed { score } => Box::new(FixedAts(*score)),
        AtsConfig::Unavailable => Box::new(UnavailableAts),
    }
}

/// Rewards resumes an applicant tracking system can navigate: contact details,
/// conventional section headings and a sensible length.
#[derive(Debug, Clone)]
pub struct StructuralAts {
    pub base: f64,
    pub contact_points: f64,
    pub heading_points: f64,
    pub max_heading_points: f64,
    pub length_points: f64,
    pub word_range: (usize, usize),
}

impl Default for StructuralAts {
    fn default() -> Self {
        Self {
            base: 30.0,
            contact_points: 20.0,
            heading_points: 8.0,
            max_heading_points: 40.0,
            length_points: 10.0,
            word_range: (150, 1500),
        }
    }
}

impl StructuralAts {
    /// Names of the conventional sections found as heading lines
    pub fn detect_sections(&self, text: &str) -> Vec<&'static str> {
        let mut found = Vec::new();

        for line in text.lines() {
            let heading = line
                .trim()
                .trim_start_matches('#')
                .trim_end_matches(':')
                .trim()
                .to_lowercase();
            if heading.is_empty() || heading.split_whitespace().count() > MAX_HEADING_WORDS {
                continue;
            }

            for (section, keywords) in SECTION_HEADINGS.iter() {
                if !found.contains(section) && keywords.iter().any(|k| heading.contains(k)) {
                    found.push(*section);
                    break;
                }
            }
        }

        found
    }
}

impl AtsScorer for StructuralAts {
    fn score(&self, resume: &ParsedResume, text: &TextProcessor) -> Option<f64> {
        if resume.text.trim().is_empty() {
            return Some(0.0);
        }

        let mut score = self.base;

        if text.has_contact_details(&resume.text) {
            score += self.contact_points;
        }

        let sections = self.detect_sections(&resume.text);
        score += f64::min(sections.len() as f64 * self.heading_points, self.max_heading_points);

        let words = text.word_count(&resume.text);
        if words >= self.word_range.0 && words <= self.word_range.1 {
            score += self.length_points;
        }

        Some(score.clamp(0.0, 100.0))
    }

    fn name(&self) -> &'static str {
        "structural"
    }
}

/// Reports the same configured value for every resume
#[derive(Debug, Clone, Copy)]
pub struct FixedAts(pub u8);

impl AtsScorer for FixedAts {
    fn score(&self, _resume: &ParsedResume, _text: &TextProcessor) -> Option<f64> {
        Some(f64::from(self.0.min(100)))
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

#[derive(Debug, Clone, Copy)]
pub struct UnavailableAts;

impl AtsScorer for UnavailableAts {
    fn score(&self, _resume: &ParsedResume, _text: &TextProcessor) -> Option<f64> {
        None
    }

    fn name(&self) -> &'static str {
        "unavailable"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resume(text: &str) -> ParsedResume {
        ParsedResume {
            text: text.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_detects_heading_lines_only() {
        let ats = StructuralAts::default();
        let text = "Jane Doe\n\n## Summary\nBuilt things.\n\nWork Experience:\nI have experience with many things in many places\n\nEDUCATION\nBSc\n\nTechnical Skills\nRust";
        let sections = ats.detect_sections(text);
        assert_eq!(sections, vec!["summary", "experience", "education", "skills"]);
    }

    #[test]
    fn test_structural_score_components() {
        let ats = StructuralAts::default();
        let text = TextProcessor::new();
        let resume = resume("jane@example.com\nExperience\nEngineer\nEducation\nBSc");

        // base 30 + contact 20 + two headings 16, too short for the length bonus
        assert_eq!(ats.score(&resume, &text), Some(66.0));
    }

    #[test]
    fn test_empty_text_scores_zero() {
        let text = TextProcessor::new();
        assert_eq!(StructuralAts::default().score(&resume("  "), &text), Some(0.0));
    }

    #[test]
    fn test_fixed_and_unavailable() {
        let text = TextProcessor::new();
        assert_eq!(FixedAts(75).score(&resume(""), &text), Some(75.0));
        assert_eq!(UnavailableAts.score(&resume("text"), &text), None);
        assert_eq!(from_config(&AtsConfig::Unavailable).name(), "unavailable");
        assert_eq!(from_config(&AtsConfig::Fixed { score: 80 }).name(), "fixed");
    }
}
