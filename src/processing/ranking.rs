//! Batch screening of many candidates against one job

use crate::error::Result;
use crate::model::{JobDescription, MatchTier, ParsedResume, ScoreResult};
use crate::processing::scorer::ScoringEngine;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::Arc;
use tokio::task::JoinSet;

/// One candidate handed to the screener
#[derive(Debug, Clone)]
pub enum CandidateSource {
    Parsed { name: String, resume: ParsedResume },
    /// The candidate's resume could not be loaded; carried through so the
    /// failure is reported alongside the ranked results.
    Unreadable { name: String, reason: String },
}

impl CandidateSource {
    pub fn parsed(name: impl Into<String>, resume: ParsedResume) -> Self {
        CandidateSource::Parsed {
            name: name.into(),
            resume,
        }
    }

    pub fn unreadable(name: impl Into<String>, reason: impl Into<String>) -> Self {
        CandidateSource::Unreadable {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            CandidateSource::Parsed { name, .. } | CandidateSource::Unreadable { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub name: String,
    pub tier: MatchTier,
    pub result: ScoreResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateFailure {
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreeningOutcome {
    pub ranked: Vec<RankedCandidate>,
    pub failures: Vec<CandidateFailure>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOption {
    /// Highest score first, ties by name
    Score,
    Name,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierFilter {
    All,
    High,
    Medium,
    Low,
}

impl TierFilter {
    pub fn accepts(&self, tier: MatchTier) -> bool {
        match self {
            TierFilter::All => true,
            TierFilter::High => tier == MatchTier::High,
            TierFilter::Medium => tier == MatchTier::Medium,
            TierFilter::Low => tier == MatchTier::Low,
        }
    }
}

/// Sort, tier filter and free-text search applied to a screening outcome
#[derive(Debug, Clone)]
pub struct RankingQuery {
    pub sort: SortOption,
    pub filter: TierFilter,
    pub search: Option<String>,
}

impl Default for RankingQuery {
    fn default() -> Self {
        Self {
            sort: SortOption::Score,
            filter: TierFilter::All,
            search: None,
        }
    }
}

/// Score every candidate on the blocking pool.
///
/// Candidates are independent: a failure is recorded in `failures` and the
/// rest are still scored. Results keep the input order.
pub async fn screen_candidates(
    engine: Arc<ScoringEngine>,
    job: Arc<JobDescription>,
    candidates: Vec<CandidateSource>,
) -> Result<ScreeningOutcome> {
    job.validate()?;

    log::info!("Screening {} candidates for '{}'", candidates.len(), job.title);

    let mut slots: Vec<Option<std::result::Result<RankedCandidate, CandidateFailure>>> =
        vec![None; candidates.len()];
    let mut tasks = JoinSet::new();

    for (index, candidate) in candidates.into_iter().enumerate() {
        match candidate {
            CandidateSource::Parsed { name, resume } => {
                let engine = Arc::clone(&engine);
                let job = Arc::clone(&job);
                tasks.spawn_blocking(move || {
                    let outcome = match engine.score(&resume, &job) {
                        Ok(result) => Ok(RankedCandidate {
                            tier: result.tier(),
                            name,
                            result,
                        }),
                        Err(e) => Err(CandidateFailure {
                            name,
                            reason: e.to_string(),
                        }),
                    };
                    (index, outcome)
                });
            }
            CandidateSource::Unreadable { name, reason } => {
                slots[index] = Some(Err(CandidateFailure { name, reason }));
            }
        }
    }

    while let Some(joined) = tasks.join_next().await {
        let (index, outcome) = joined?;
        slots[index] = Some(outcome);
    }

    let mut outcome = ScreeningOutcome::default();
    for slot in slots.into_iter().flatten() {
        match slot {
            Ok(ranked) => outcome.ranked.push(ranked),
            Err(failure) => {
                log::warn!("Skipping candidate '{}': {}", failure.name, failure.reason);
                outcome.failures.push(failure);
            }
        }
    }

    log::info!(
        "Screened {} candidates ({} failed)",
        outcome.ranked.len(),
        outcome.failures.len()
    );

    Ok(outcome)
}

impl ScreeningOutcome {
    /// Candidates matching the query, in the requested order
    pub fn apply(&self, query: &RankingQuery) -> Vec<&RankedCandidate> {
        let search = query
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        let mut selected: Vec<&RankedCandidate> = self
            .ranked
            .iter()
            .filter(|c| query.filter.accepts(c.tier))
            .filter(|c| search.as_deref().map_or(true, |term| matches_search(c, term)))
            .collect();

        match query.sort {
            SortOption::Score => selected.sort_by(|a, b| {
                b.result
                    .overall
                    .cmp(&a.result.overall)
                    .then_with(|| compare_names(&a.name, &b.name))
            }),
            SortOption::Name => selected.sort_by(|a, b| compare_names(&a.name, &b.name)),
        }

        selected
    }
}

fn matches_search(candidate: &RankedCandidate, term: &str) -> bool {
    candidate.name.to_lowercase().contains(term)
        || candidate
            .result
            .skills
            .iter()
            .any(|skill| skill.name.to_lowercase().contains(term))
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringConfig;
    use crate::model::ExperienceEntry;

    fn engine() -> Arc<ScoringEngine> {
        Arc::new(ScoringEngine::new(ScoringConfig::default(), 2026).unwrap())
    }

    fn job() -> Arc<JobDescription> {
        Arc::new(JobDescription {
            title: "Data Engineer".to_string(),
            company: "Acme".to_string(),
            description: "Build streaming pipelines with Kafka and Spark".to_string(),
            required_skills: vec!["Python".to_string(), "Kafka".to_string()],
            preferred_skills: vec!["Spark".to_string()],
            minimum_experience: 3,
        })
    }

    fn resume(skills: &[&str], start: &str) -> ParsedResume {
        ParsedResume {
            text: format!("Data engineer. {}", skills.join(", ")),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            experience: vec![ExperienceEntry {
                title: "Data Engineer".to_string(),
                company: "Prev".to_string(),
                start_date: start.to_string(),
                end_date: Some("present".to_string()),
                description: "Streaming pipelines".to_string(),
            }],
            education: Vec::new(),
        }
    }

    fn candidates() -> Vec<CandidateSource> {
        vec![
            CandidateSource::parsed("bob", resume(&["Excel"], "2025")),
            CandidateSource::unreadable("broken.json", "expected value at line 1"),
            CandidateSource::parsed("Alice", resume(&["Python", "Kafka", "Spark"], "2015")),
            CandidateSource::parsed("carol", resume(&["Python"], "2022")),
        ]
    }

    #[tokio::test]
    async fn test_failures_are_isolated() {
        let outcome = screen_candidates(engine(), job(), candidates()).await.unwrap();

        assert_eq!(outcome.ranked.len(), 3);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].name, "broken.json");

        // input order is kept before any sorting
        let names: Vec<&str> = outcome.ranked.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["bob", "Alice", "carol"]);
    }

    #[tokio::test]
    async fn test_sort_by_score_and_name() {
        let outcome = screen_candidates(engine(), job(), candidates()).await.unwrap();

        let by_score = outcome.apply(&RankingQuery::default());
        assert_eq!(by_score[0].name, "Alice");
        assert!(by_score
            .windows(2)
            .all(|pair| pair[0].result.overall >= pair[1].result.overall));

        let by_name = outcome.apply(&RankingQuery {
            sort: SortOption::Name,
            ..Default::default()
        });
        let names: Vec<&str> = by_name.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Alice", "bob", "carol"]);
    }

    #[tokio::test]
    async fn test_search_matches_names_and_skills() {
        let outcome = screen_candidates(engine(), job(), candidates()).await.unwrap();

        let query = RankingQuery {
            search: Some("SPARK".to_string()),
            ..Default::default()
        };
        let found = outcome.apply(&query);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].name, "Alice");

        let query = RankingQuery {
            search: Some("car".to_string()),
            ..Default::default()
        };
        assert_eq!(outcome.apply(&query)[0].name, "carol");
    }

    #[tokio::test]
    async fn test_tier_filter() {
        let outcome = screen_candidates(engine(), job(), candidates()).await.unwrap();

        for filter in [TierFilter::High, TierFilter::Medium, TierFilter::Low] {
            let query = RankingQuery {
                filter,
                ..Default::default()
            };
            assert!(outcome.apply(&query).iter().all(|c| filter.accepts(c.tier)));
        }

        let all = outcome.apply(&RankingQuery::default());
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_invalid_job_fails_the_batch() {
        let mut bad = (*job()).clone();
        bad.required_skills.push("python".to_string());
        let result = screen_candidates(engine(), Arc::new(bad), candidates()).await;
        assert!(result.is_err());
    }
}
