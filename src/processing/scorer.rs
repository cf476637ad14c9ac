//! Candidate-job scoring engine
//!
//! Runs every matcher over one resume and combines their sub-scores with the
//! configured weight vector. The engine keeps no state between calls, so one
//! instance can be shared across threads behind an `Arc`.

use crate::config::{ScoreWeights, ScoringConfig};
use crate::error::{Result, ScreenerError};
use crate::model::{JobDescription, MatchInsights, ParsedResume, ScoreBreakdown, ScoreResult};
use crate::processing::ats::{self, AtsScorer};
use crate::processing::education_matcher::EducationMatcher;
use crate::processing::experience_matcher::ExperienceMatcher;
use crate::processing::keyword_matcher::KeywordMatcher;
use crate::processing::skill_matcher::SkillMatcher;
use crate::processing::text_processor::TextProcessor;
use std::ops::RangeInclusive;

/// Years the engine accepts as "now"; resume dates are four-digit years
const CURRENT_YEAR_RANGE: RangeInclusive<i32> = 1000..=9999;

pub struct ScoringEngine {
    config: ScoringConfig,
    current_year: i32,
    text: TextProcessor,
    skills: SkillMatcher,
    experience: ExperienceMatcher,
    education: EducationMatcher,
    keywords: KeywordMatcher,
    ats: Box<dyn AtsScorer>,
}

/// Rounded sub-scores before aggregation
struct SubScores {
    skills: u8,
    experience: u8,
    education: u8,
    keyword: u8,
    ats: Option<u8>,
}

impl ScoringEngine {
    /// Build an engine; `current_year` resolves "present" end dates.
    pub fn new(config: ScoringConfig, current_year: i32) -> Result<Self> {
        config.validate()?;
        if !CURRENT_YEAR_RANGE.contains(&current_year) {
            return Err(ScreenerError::InvalidInput(format!(
                "Current year must be within {}-{} (got {})",
                CURRENT_YEAR_RANGE.start(),
                CURRENT_YEAR_RANGE.end(),
                current_year
            )));
        }

        let text = TextProcessor::new().with_extra_stop_words(&config.keywords.extra_stop_words);
        let ats = ats::from_config(&config.ats);

        log::debug!(
            "Scoring engine ready (ATS provider: {}, current year: {})",
            ats.name(),
            current_year
        );

        Ok(Self {
            skills: SkillMatcher::new(config.skills.clone()),
            experience: ExperienceMatcher::new(config.experience.clone()),
            education: EducationMatcher::new(config.education.clone()),
            keywords: KeywordMatcher::new(config.keywords.clone()),
            text,
            ats,
            current_year,
            config,
        })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    pub fn ats_provider(&self) -> &'static str {
        self.ats.name()
    }

    pub fn score(&self, resume: &ParsedResume, job: &JobDescription) -> Result<ScoreResult> {
        job.validate()?;

        let skill_match = self.skills.match_skills(&resume.skills, job);
        let experience_match =
            self.experience
                .match_experience(&resume.experience, job, self.current_year, &self.text);
        let education_match = self
            .education
            .match_education(&resume.education, &job.description);
        let keyword_match = self
            .keywords
            .match_keywords(&resume.text, &job.description, &self.text);
        let ats_score = self.ats.score(resume, &self.text);

        let sub_scores = SubScores {
            skills: to_score(skill_match.score),
            experience: to_score(experience_match.score),
            education: to_score(education_match.score),
            keyword: to_score(keyword_match.score),
            ats: ats_score.map(to_score),
        };

        let overall = to_score(combine(&self.config.weights, &sub_scores));

        log::debug!(
            "Sub-scores for '{}': skills {}, experience {}, education {}, keyword {}, ats {:?}",
            job.title,
            sub_scores.skills,
            sub_scores.experience,
            sub_scores.education,
            sub_scores.keyword,
            sub_scores.ats
        );

        let breakdown = ScoreBreakdown {
            overall,
            skills: sub_scores.skills,
            experience: sub_scores.experience,
            education: sub_scores.education,
            keyword: sub_scores.keyword,
            ats_compatibility: sub_scores.ats,
        };

        let insights = MatchInsights {
            matched_keywords: keyword_match.matched(),
            missing_keywords: keyword_match.missing(),
            missing_required: skill_match.missing_required,
            missing_preferred: skill_match.missing_preferred,
            near_misses: skill_match.near_misses,
            total_years: experience_match.total_years,
            highest_degree: education_match.highest_degree,
        };

        Ok(ScoreResult {
            overall,
            breakdown,
            skills: skill_match.skills,
            insights,
        })
    }
}

/// Weighted sum of the sub-scores. Without an ATS score its weight is dropped
/// and the remaining weights are scaled back up to 1.0.
fn combine(weights: &ScoreWeights, scores: &SubScores) -> f64 {
    let core = f64::from(scores.skills) * weights.skills
        + f64::from(scores.experience) * weights.experience
        + f64::from(scores.education) * weights.education
        + f64::from(scores.keyword) * weights.keyword;

    match scores.ats {
        Some(ats) => core + f64::from(ats) * weights.ats,
        None => {
            let total_weight = weights.skills + weights.experience + weights.education + weights.keyword;
            if total_weight > 0.0 {
                core / total_weight
            } else {
                0.0
            }
        }
    }
}

fn to_score(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}
