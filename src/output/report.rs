//! Report structures wrapping scoring results for presentation

use crate::config::ScoreWeights;
use crate::model::{JobDescription, MatchTier, ScoreResult};
use crate::processing::ranking::{CandidateFailure, RankedCandidate, RankingQuery, SortOption, TierFilter};
use crate::processing::scorer::ScoringEngine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Report metadata and generation info
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub processing_time_ms: u64,
    pub job_file: String,
    pub ats_provider: String,
    pub current_year: i32,
    /// Weights the overall score was computed with
    pub weights: ScoreWeights,
}

impl ReportMetadata {
    pub fn new(engine: &ScoringEngine, job_file: &str, processing_time_ms: u64) -> Self {
        Self {
            generated_at: Utc::now(),
            processing_time_ms,
            job_file: job_file.to_string(),
            ats_provider: engine.ats_provider().to_string(),
            current_year: engine.current_year(),
            weights: engine.config().weights,
        }
    }
}

/// One candidate scored against one job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScreeningReport {
    pub candidate: String,
    pub job_title: String,
    pub company: String,
    pub tier: MatchTier,
    pub verdict: String,
    pub strengths: Vec<String>,
    pub improvement_areas: Vec<String>,
    pub result: ScoreResult,
    pub metadata: ReportMetadata,
}

impl ScreeningReport {
    pub fn new(candidate: &str, job: &JobDescription, result: ScoreResult, metadata: ReportMetadata) -> Self {
        let tier = result.tier();
        Self {
            candidate: candidate.to_string(),
            job_title: job.title.clone(),
            company: job.company.clone(),
            tier,
            verdict: verdict(tier).to_string(),
            strengths: strengths(&result),
            improvement_areas: improvement_areas(&result, job),
            result,
            metadata,
        }
    }
}

/// A batch of candidates ranked against one job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingReport {
    pub job_title: String,
    pub company: String,
    pub sort: String,
    pub filter: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    pub total_screened: usize,
    pub candidates: Vec<RankedCandidate>,
    pub failures: Vec<CandidateFailure>,
    pub metadata: ReportMetadata,
}

impl RankingReport {
    pub fn new(
        job: &JobDescription,
        query: &RankingQuery,
        total_screened: usize,
        candidates: Vec<RankedCandidate>,
        failures: Vec<CandidateFailure>,
        metadata: ReportMetadata,
    ) -> Self {
        Self {
            job_title: job.title.clone(),
            company: job.company.clone(),
            sort: match query.sort {
                SortOption::Score => "score",
                SortOption::Name => "name",
            }
            .to_string(),
            filter: match query.filter {
                TierFilter::All => "all",
                TierFilter::High => "high",
                TierFilter::Medium => "medium",
                TierFilter::Low => "low",
            }
            .to_string(),
            search: query.search.clone(),
            total_screened,
            candidates,
            failures,
            metadata,
        }
    }
}

fn verdict(tier: MatchTier) -> &'static str {
    match tier {
        MatchTier::High => "Strong match, worth an interview",
        MatchTier::Medium => "Partial match, review the gaps",
        MatchTier::Low => "Weak match for this role",
    }
}

fn strengths(result: &ScoreResult) -> Vec<String> {
    let b = &result.breakdown;
    let mut strengths = Vec::new();

    if b.skills >= 80 {
        let matched: Vec<&str> = result
            .skills
            .iter()
            .filter(|s| s.is_match)
            .map(|s| s.name.as_str())
            .collect();
        strengths.push(format!("Covers the key skills: {}", matched.join(", ")));
    }
    if b.experience >= 85 {
        strengths.push(format!(
            "{} years of experience meets the requirement",
            result.insights.total_years
        ));
    }
    if b.education >= 70 {
        strengths.push(format!("{} degree", result.insights.highest_degree));
    }
    if b.keyword >= 50 {
        strengths.push("Resume echoes the job description's vocabulary".to_string());
    }

    strengths
}

fn improvement_areas(result: &ScoreResult, job: &JobDescription) -> Vec<String> {
    let insights = &result.insights;
    let mut areas = Vec::new();

    if !insights.missing_required.is_empty() {
        areas.push(format!("Missing required skills: {}", insights.missing_required.join(", ")));
    }
    if !insights.missing_preferred.is_empty() {
        areas.push(format!("Missing preferred skills: {}", insights.missing_preferred.join(", ")));
    }
    if insights.total_years < job.minimum_experience {
        areas.push(format!(
            "{} years of experience against a minimum of {}",
            insights.total_years, job.minimum_experience
        ));
    }
    for near_miss in &insights.near_misses {
        areas.push(format!(
            "Lists '{}' where the job asks for '{}'",
            near_miss.resume_skill, near_miss.job_skill
        ));
    }
    if result.breakdown.keyword < 30 && !insights.missing_keywords.is_empty() {
        let sample: Vec<&str> = insights.missing_keywords.iter().take(5).map(String::as_str).collect();
        areas.push(format!("Job terms absent from the resume: {}", sample.join(", ")));
    }

    areas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringConfig;
    use crate::model::ParsedResume;

    #[test]
    fn test_screening_report_lists_gaps() {
        let engine = ScoringEngine::new(ScoringConfig::default(), 2026).unwrap();
        let job = JobDescription {
            title: "Platform Engineer".to_string(),
            company: "Acme".to_string(),
            description: "Operate Kubernetes clusters".to_string(),
            required_skills: vec!["Kubernetes".to_string(), "PostgreSQL".to_string()],
            preferred_skills: vec!["Go".to_string()],
            minimum_experience: 4,
        };
        let resume = ParsedResume {
            text: "Kubernetes operator".to_string(),
            skills: vec!["Kubernetes".to_string(), "Postgres".to_string()],
            ..Default::default()
        };

        let result = engine.score(&resume, &job).unwrap();
        let metadata = ReportMetadata::new(&engine, "job.json", 3);
        let report = ScreeningReport::new("jane.json", &job, result, metadata);

        assert_eq!(report.tier, MatchTier::Low);
        assert_eq!(report.metadata.ats_provider, "structural");
        assert!(report.improvement_areas[0].contains("PostgreSQL"));
        assert!(report
            .improvement_areas
            .iter()
            .any(|a| a.contains("'Postgres'")));
        assert!(report.improvement_areas.iter().any(|a| a.contains("minimum of 4")));
    }
}
