//! Scoring engine, matchers and batch screening

pub mod ats;
pub mod education_matcher;
pub mod experience_matcher;
pub mod keyword_matcher;
pub mod ranking;
pub mod scorer;
pub mod skill_extractor;
pub mod skill_matcher;
pub mod text_processor;

pub use ranking::{screen_candidates, CandidateSource, RankingQuery, ScreeningOutcome};
pub use scorer::ScoringEngine;
pub use skill_extractor::SkillExtractor;
