//! Configuration management for the resume screener

use crate::error::{Result, ScreenerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const WEIGHT_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub extraction: ExtractionConfig,
    pub output: OutputConfig,
}

/// Everything the scoring engine needs: published weights, breakpoints and vocabularies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub weights: ScoreWeights,
    pub skills: SkillScoringConfig,
    pub experience: ExperienceScoringConfig,
    pub education: EducationScoringConfig,
    pub keywords: KeywordScoringConfig,
    pub ats: AtsConfig,
}

/// Weight of each sub-score in the overall score. Must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
    pub keyword: f64,
    pub ats: f64,
}

impl ScoreWeights {
    pub fn sum(&self) -> f64 {
        self.skills + self.experience + self.education + self.keyword + self.ats
    }
}

/// A step in a non-linear scoring curve: ratios at or above `min_ratio` earn `score`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub min_ratio: f64,
    pub score: f64,
}

impl Breakpoint {
    /// Score of the first breakpoint the ratio reaches, if any.
    pub fn lookup(breakpoints: &[Breakpoint], ratio: f64) -> Option<f64> {
        breakpoints
            .iter()
            .find(|bp| ratio >= bp.min_ratio)
            .map(|bp| bp.score)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillScoringConfig {
    pub required_weight: f64,
    pub preferred_weight: f64,
    /// Highest threshold first. Ratios below the last one score linearly.
    pub required_breakpoints: Vec<Breakpoint>,
    /// Jaro-Winkler similarity at which a missing skill is reported as a near miss
    pub near_miss_threshold: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceScoringConfig {
    pub years_weight: f64,
    pub relevance_weight: f64,
    /// Ratios of total years to the job minimum, highest first
    pub years_breakpoints: Vec<Breakpoint>,
    pub years_floor: f64,
    pub title_match_points: f64,
    pub description_match_points: f64,
    pub min_description_token_len: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationScoringConfig {
    pub base_score: f64,
    pub bachelor_bonus: f64,
    pub master_bonus: f64,
    pub doctorate_bonus: f64,
    pub field_bonus: f64,
    pub relevant_fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordScoringConfig {
    pub max_keywords: usize,
    pub per_keyword_cap: usize,
    /// Tokens shorter than this are never keywords
    pub min_token_len: usize,
    #[serde(default)]
    pub extra_stop_words: Vec<String>,
}

/// Which ATS-compatibility provider the engine uses
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum AtsConfig {
    Structural,
    Fixed { score: u8 },
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    #[serde(default)]
    pub custom_skills: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights {
                skills: 0.35,
                experience: 0.30,
                education: 0.15,
                keyword: 0.15,
                ats: 0.05,
            },
            skills: SkillScoringConfig {
                required_weight: 0.8,
                preferred_weight: 0.2,
                required_breakpoints: vec![
                    Breakpoint { min_ratio: 1.0, score: 100.0 },
                    Breakpoint { min_ratio: 0.8, score: 90.0 },
                    Breakpoint { min_ratio: 0.6, score: 70.0 },
                    Breakpoint { min_ratio: 0.4, score: 50.0 },
                ],
                near_miss_threshold: 0.85,
            },
            experience: ExperienceScoringConfig {
                years_weight: 0.6,
                relevance_weight: 0.4,
                years_breakpoints: vec![
                    Breakpoint { min_ratio: 1.5, score: 100.0 },
                    Breakpoint { min_ratio: 1.0, score: 85.0 },
                    Breakpoint { min_ratio: 0.75, score: 70.0 },
                    Breakpoint { min_ratio: 0.5, score: 50.0 },
                ],
                years_floor: 30.0,
                title_match_points: 10.0,
                description_match_points: 10.0,
                min_description_token_len: 5,
            },
            education: EducationScoringConfig {
                base_score: 50.0,
                bachelor_bonus: 10.0,
                master_bonus: 20.0,
                doctorate_bonus: 30.0,
                field_bonus: 20.0,
                relevant_fields: [
                    "computer science",
                    "software engineering",
                    "information technology",
                    "data science",
                    "mathematics",
                    "engineering",
                    "statistics",
                    "physics",
                ]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            },
            keywords: KeywordScoringConfig {
                max_keywords: 25,
                per_keyword_cap: 10,
                min_token_len: 4,
                extra_stop_words: Vec::new(),
            },
            ats: AtsConfig::Structural,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig::default(),
            extraction: ExtractionConfig {
                custom_skills: Vec::new(),
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults there on first use.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    /// Load an explicit config file. A missing file is an error here.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config = Self::read_from(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a config file without checking its values, so an invalid file
    /// can still be shown and validated.
    pub fn read_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(ScreenerError::Configuration(format!(
                "Config file does not exist: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| ScreenerError::Configuration(format!("Failed to parse config: {}", e)))?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ScreenerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-screener")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        self.scoring.validate()
    }
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<()> {
        let weights = &self.weights;
        for (name, value) in [
            ("skills", weights.skills),
            ("experience", weights.experience),
            ("education", weights.education),
            ("keyword", weights.keyword),
            ("ats", weights.ats),
        ] {
            check_unit_interval(&format!("weights.{}", name), value)?;
        }
        check_sums_to_one("scoring.weights", weights.sum())?;

        check_unit_interval("skills.required_weight", self.skills.required_weight)?;
        check_unit_interval("skills.preferred_weight", self.skills.preferred_weight)?;
        check_sums_to_one(
            "skills weights",
            self.skills.required_weight + self.skills.preferred_weight,
        )?;
        check_breakpoints("skills.required_breakpoints", &self.skills.required_breakpoints)?;
        check_unit_interval("skills.near_miss_threshold", self.skills.near_miss_threshold)?;

        let experience = &self.experience;
        check_unit_interval("experience.years_weight", experience.years_weight)?;
        check_unit_interval("experience.relevance_weight", experience.relevance_weight)?;
        check_sums_to_one(
            "experience weights",
            experience.years_weight + experience.relevance_weight,
        )?;
        check_breakpoints("experience.years_breakpoints", &experience.years_breakpoints)?;
        check_score("experience.years_floor", experience.years_floor)?;
        check_score("experience.title_match_points", experience.title_match_points)?;
        check_score(
            "experience.description_match_points",
            experience.description_match_points,
        )?;

        let education = &self.education;
        for (name, value) in [
            ("base_score", education.base_score),
            ("bachelor_bonus", education.bachelor_bonus),
            ("master_bonus", education.master_bonus),
            ("doctorate_bonus", education.doctorate_bonus),
            ("field_bonus", education.field_bonus),
        ] {
            check_score(&format!("education.{}", name), value)?;
        }

        if self.keywords.max_keywords == 0 || self.keywords.per_keyword_cap == 0 {
            return Err(ScreenerError::Configuration(
                "keywords.max_keywords and keywords.per_keyword_cap must be positive".to_string(),
            ));
        }

        if let AtsConfig::Fixed { score } = self.ats {
            if score > 100 {
                return Err(ScreenerError::Configuration(format!(
                    "ats.score must be within 0-100 (got {})",
                    score
                )));
            }
        }

        Ok(())
    }
}

fn check_unit_interval(name: &str, value: f64) -> Result<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(ScreenerError::Configuration(format!(
            "{} must be within 0.0-1.0 (got {})",
            name, value
        )));
    }
    Ok(())
}

fn check_score(name: &str, value: f64) -> Result<()> {
    if !(0.0..=100.0).contains(&value) {
        return Err(ScreenerError::Configuration(format!(
            "{} must be within 0-100 (got {})",
            name, value
        )));
    }
    Ok(())
}

fn check_sums_to_one(name: &str, sum: f64) -> Result<()> {
    if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
        return Err(ScreenerError::Configuration(format!(
            "{} must sum to 1.0 (got {:.4})",
            name, sum
        )));
    }
    Ok(())
}

fn check_breakpoints(name: &str, breakpoints: &[Breakpoint]) -> Result<()> {
    for pair in breakpoints.windows(2) {
        if pair[0].min_ratio <= pair[1].min_ratio {
            return Err(ScreenerError::Configuration(format!(
                "{} must be ordered from highest to lowest ratio",
                name
            )));
        }
    }
    for breakpoint in breakpoints {
        if breakpoint.min_ratio < 0.0 {
            return Err(ScreenerError::Configuration(format!(
                "{} contains a negative ratio",
                name
            )));
        }
        check_score(name, breakpoint.score)?;
    }
    Ok(())
}
