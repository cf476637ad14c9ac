//! Work history: total tenure against the job minimum, plus role relevance

use crate::config::{Breakpoint, ExperienceScoringConfig};
use crate::model::{ExperienceEntry, JobDescription};
use crate::processing::text_processor::TextProcessor;
use regex::Regex;
use std::collections::HashSet;

const CURRENT_MARKERS: [&str; 4] = ["present", "current", "now", "ongoing"];

pub struct ExperienceMatcher {
    config: ExperienceScoringConfig,
    year_regex: Regex,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExperienceMatch {
    pub score: f64,
    pub total_years: i32,
    pub years_score: f64,
    /// `None` when neither side offers anything to compare
    pub relevance_score: Option<f64>,
}

impl ExperienceMatcher {
    pub fn new(config: ExperienceScoringConfig) -> Self {
        let year_regex = Regex::new(r"\b(\d{4})\b").expect("Invalid year regex");
        Self { config, year_regex }
    }

    pub fn match_experience(
        &self,
        entries: &[ExperienceEntry],
        job: &JobDescription,
        current_year: i32,
        text: &TextProcessor,
    ) -> ExperienceMatch {
        let total_years = entries
            .iter()
            .map(|entry| self.entry_years(entry, current_year))
            .fold(0i32, i32::saturating_add);

        let years_score = self.years_score(total_years, job.minimum_experience);
        let relevance_score = self.relevance_score(entries, job, text);

        let score = match relevance_score {
            Some(relevance) => {
                years_score * self.config.years_weight + relevance * self.config.relevance_weight
            }
            None => years_score,
        }
        .clamp(0.0, 100.0);

        log::debug!(
            "Experience: {} years (minimum {}), years score {:.1}, relevance {:?}",
            total_years,
            job.minimum_experience,
            years_score,
            relevance_score
        );

        ExperienceMatch {
            score,
            total_years,
            years_score,
            relevance_score,
        }
    }

    /// Whole years spent in one role. Unreadable or inverted dates count as zero.
    pub fn entry_years(&self, entry: &ExperienceEntry, current_year: i32) -> i32 {
        let start = self.parse_year(&entry.start_date);
        let end = entry.end_date.as_deref().and_then(|end| {
            if is_current_marker(end) {
                Some(current_year)
            } else {
                self.parse_year(end)
            }
        });

        match (start, end) {
            (Some(start), Some(end)) => end.saturating_sub(start).max(0),
            _ => 0,
        }
    }

    fn parse_year(&self, value: &str) -> Option<i32> {
        self.year_regex
            .captures(value)
            .and_then(|cap| cap.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }

    fn years_score(&self, total_years: i32, minimum: i32) -> f64 {
        let ratio = if minimum <= 0 {
            f64::INFINITY
        } else {
            total_years as f64 / minimum as f64
        };

        Breakpoint::lookup(&self.config.years_breakpoints, ratio).unwrap_or(self.config.years_floor)
    }

    fn relevance_score(
        &self,
        entries: &[ExperienceEntry],
        job: &JobDescription,
        text: &TextProcessor,
    ) -> Option<f64> {
        let title_tokens = text.content_tokens(&job.title);
        let description_tokens: HashSet<String> = text
            .content_tokens(&job.description)
            .into_iter()
            .filter(|t| t.chars().count() >= self.config.min_description_token_len)
            .collect();

        if entries.is_empty() || (title_tokens.is_empty() && description_tokens.is_empty()) {
            return None;
        }

        let mut points = 0.0;
        for entry in entries {
            let entry_title = text.content_tokens(&entry.title);
            if !title_tokens.is_disjoint(&entry_title) {
                points += self.config.title_match_points;
            }

            let entry_description: HashSet<String> =
                text.word_tokens(&entry.description).into_iter().collect();
            if !description_tokens.is_disjoint(&entry_description) {
                points += self.config.description_match_points;
            }
        }

        Some(f64::min(points, 100.0))
    }
}

fn is_current_marker(value: &str) -> bool {
    let value = value.trim().to_lowercase();
    CURRENT_MARKERS.contains(&value.as_str())
}
