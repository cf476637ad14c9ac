//! Integration tests for the resume screener

use resume_screener::config::{AtsConfig, Config, OutputFormat, ScoringConfig};
use resume_screener::error::ScreenerError;
use resume_screener::input::InputManager;
use resume_screener::model::MatchTier;
use resume_screener::output::{RankingReport, ReportGenerator, ReportMetadata};
use resume_screener::processing::{
    screen_candidates, RankingQuery, ScoringEngine, ScreeningOutcome, SkillExtractor,
};
use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;

const YEAR: i32 = 2026;

fn manager() -> InputManager {
    InputManager::new(SkillExtractor::new().unwrap())
}

fn engine() -> ScoringEngine {
    ScoringEngine::new(ScoringConfig::default(), YEAR).unwrap()
}

async fn rank_all_fixtures() -> ScreeningOutcome {
    let mut manager = manager();
    let job = manager.load_job(Path::new("tests/fixtures/job.json")).await.unwrap();

    let mut candidates = Vec::new();
    for name in [
        "resume_strong.json",
        "resume_weak.json",
        "resume_mid.toml",
        "resume.txt",
        "resume.md",
        "broken.json",
        "unsupported.xyz",
    ] {
        let path = Path::new("tests/fixtures").join(name);
        candidates.push(manager.load_candidate(&path).await);
    }

    screen_candidates(Arc::new(engine()), Arc::new(job), candidates)
        .await
        .unwrap()
}

#[tokio::test]
async fn test_load_job_from_json_and_toml() {
    let mut manager = manager();

    let json_job = manager.load_job(Path::new("tests/fixtures/job.json")).await.unwrap();
    assert_eq!(json_job.title, "Senior Backend Engineer");
    assert_eq!(json_job.required_skills.len(), 4);
    assert_eq!(json_job.minimum_experience, 5);

    let toml_job = manager.load_job(Path::new("tests/fixtures/job.toml")).await.unwrap();
    assert_eq!(toml_job.company, "Harbor Retail");
    assert_eq!(toml_job.preferred_skills, vec!["Tableau", "Communication"]);
}

#[tokio::test]
async fn test_text_and_markdown_resumes_extract_skills() {
    let mut manager = manager();

    let txt = manager.load_resume(Path::new("tests/fixtures/resume.txt")).await.unwrap();
    assert_eq!(txt.skills, vec!["SQL", "Python", "Tableau", "Communication"]);
    assert!(txt.experience.is_empty());

    let md = manager.load_resume(Path::new("tests/fixtures/resume.md")).await.unwrap();
    assert_eq!(md.skills, vec!["Kubernetes", "Terraform", "Go", "Rust"]);
    assert!(!md.text.contains("**"));
    assert!(!md.text.contains("##"));
}

#[tokio::test]
async fn test_strong_candidate_outscores_weak_candidate() {
    let mut manager = manager();
    let job = manager.load_job(Path::new("tests/fixtures/job.json")).await.unwrap();
    let strong = manager.load_resume(Path::new("tests/fixtures/resume_strong.json")).await.unwrap();
    let weak = manager.load_resume(Path::new("tests/fixtures/resume_weak.json")).await.unwrap();

    let engine = engine();
    let strong_result = engine.score(&strong, &job).unwrap();
    let weak_result = engine.score(&weak, &job).unwrap();

    assert!(strong_result.overall > weak_result.overall);
    assert!(strong_result.overall >= 60);
    assert_eq!(weak_result.tier(), MatchTier::Low);

    assert_eq!(strong_result.insights.total_years, 11);
    assert_eq!(strong_result.insights.missing_preferred, vec!["Terraform".to_string()]);
    assert!(strong_result.breakdown.education > weak_result.breakdown.education);

    // "Postgres" is close to "PostgreSQL" but earns no credit
    assert_eq!(weak_result.breakdown.skills, 0);
    assert_eq!(weak_result.insights.near_misses[0].resume_skill, "Postgres");
}

#[tokio::test]
async fn test_text_resume_against_toml_job() {
    let mut manager = manager();
    let job = manager.load_job(Path::new("tests/fixtures/job.toml")).await.unwrap();
    let resume = manager.load_resume(Path::new("tests/fixtures/resume.txt")).await.unwrap();

    let result = engine().score(&resume, &job).unwrap();

    assert_eq!(result.breakdown.skills, 100);
    assert!(result.insights.missing_required.is_empty());
    // no structured history: tenure floor and education base
    assert_eq!(result.breakdown.experience, 30);
    assert_eq!(result.breakdown.education, 50);
}

#[tokio::test]
async fn test_batch_ranking_isolates_failures() {
    let outcome = rank_all_fixtures().await;

    assert_eq!(outcome.ranked.len(), 5);
    let failed: Vec<&str> = outcome.failures.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(failed, vec!["broken.json", "unsupported.xyz"]);

    let ranked = outcome.apply(&RankingQuery::default());
    assert_eq!(ranked[0].name, "resume_strong.json");
    assert!(ranked
        .windows(2)
        .all(|pair| pair[0].result.overall >= pair[1].result.overall));
}

#[tokio::test]
async fn test_batch_ranking_is_deterministic() {
    let first = rank_all_fixtures().await;
    let second = rank_all_fixtures().await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_ranking_report_renders_in_every_format() {
    let outcome = rank_all_fixtures().await;
    let engine = engine();
    let job = manager().load_job(Path::new("tests/fixtures/job.json")).await.unwrap();
    let query = RankingQuery::default();

    let report = RankingReport::new(
        &job,
        &query,
        outcome.ranked.len() + outcome.failures.len(),
        outcome.apply(&query).into_iter().cloned().collect(),
        outcome.failures.clone(),
        ReportMetadata::new(&engine, "tests/fixtures/job.json", 0),
    );

    let generator = ReportGenerator::with_options(false, true, true, true);

    let console = generator.generate_ranking(&report, &OutputFormat::Console).unwrap();
    assert!(console.contains("resume_strong.json"));
    assert!(console.contains("broken.json"));

    let json = generator.generate_ranking(&report, &OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["total_screened"], 7);
    assert_eq!(value["candidates"].as_array().unwrap().len(), 5);

    let markdown = generator.generate_ranking(&report, &OutputFormat::Markdown).unwrap();
    assert!(markdown.contains("| 1 | resume_strong.json |"));
}

#[tokio::test]
async fn test_unsupported_and_missing_files() {
    let mut manager = manager();

    let unsupported = manager.load_resume(Path::new("tests/fixtures/unsupported.xyz")).await;
    assert!(matches!(unsupported, Err(ScreenerError::UnsupportedFormat(_))));

    let missing = manager.load_resume(Path::new("tests/fixtures/nope.json")).await;
    assert!(matches!(missing, Err(ScreenerError::InvalidInput(_))));

    let broken = manager.load_resume(Path::new("tests/fixtures/broken.json")).await;
    assert!(matches!(broken, Err(ScreenerError::Serialization(_))));
}

#[tokio::test]
async fn test_config_file_selects_unavailable_ats() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    let mut config = Config::default();
    config.scoring.ats = AtsConfig::Unavailable;
    config.save_to(&path).unwrap();

    let loaded = Config::load_from(&path).unwrap();
    let engine = ScoringEngine::new(loaded.scoring, YEAR).unwrap();

    let mut manager = manager();
    let job = manager.load_job(Path::new("tests/fixtures/job.json")).await.unwrap();
    let resume = manager.load_resume(Path::new("tests/fixtures/resume_mid.toml")).await.unwrap();

    let result = engine.score(&resume, &job).unwrap();
    assert_eq!(result.breakdown.ats_compatibility, None);
    assert_eq!(engine.ats_provider(), "unavailable");
}
