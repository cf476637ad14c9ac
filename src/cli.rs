//! CLI interface for the resume screener

use crate::config::OutputFormat;
use crate::processing::ranking::{SortOption, TierFilter};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

pub const JOB_EXTENSIONS: [&str; 2] = ["json", "toml"];
pub const RESUME_EXTENSIONS: [&str; 5] = ["json", "toml", "txt", "md", "markdown"];

#[derive(Parser)]
#[command(name = "resume-screener")]
#[command(about = "Score and rank resumes against a job description")]
#[command(long_about = "Deterministic candidate screening: skill, experience, education and keyword matching combined into one weighted score")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score one resume against a job description
    Score {
        /// Path to resume file (JSON, TOML, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to job description file (JSON, TOML)
        #[arg(short, long)]
        job: PathBuf,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Include keyword and experience details
        #[arg(short, long)]
        detailed: bool,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Year used for ongoing roles (defaults to the current year)
        #[arg(long)]
        current_year: Option<i32>,
    },

    /// Rank several resumes against one job description
    Rank {
        /// Path to job description file (JSON, TOML)
        #[arg(short, long)]
        job: PathBuf,

        /// Resume files to screen
        #[arg(required = true)]
        resumes: Vec<PathBuf>,

        /// Sort order: score, name
        #[arg(long, default_value = "score")]
        sort: String,

        /// Tier filter: all, high, medium, low
        #[arg(short, long, default_value = "all")]
        filter: String,

        /// Only show candidates whose name or skills contain this term
        #[arg(long)]
        search: Option<String>,

        /// Output format: console, json, markdown
        #[arg(short, long)]
        output: Option<String>,

        /// Show per-candidate sub-scores
        #[arg(short, long)]
        detailed: bool,

        /// Save output to file
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Year used for ongoing roles (defaults to the current year)
        #[arg(long)]
        current_year: Option<i32>,
    },

    /// List the skills found in a resume
    Skills {
        /// Path to resume file (JSON, TOML, TXT, MD)
        #[arg(short, long)]
        resume: PathBuf,
    },

    /// Show or manage configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,

    /// Check weights and ranges
    Validate,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!("Invalid output format: {}. Supported: console, json, markdown", format)),
    }
}

pub fn parse_sort_option(sort: &str) -> Result<SortOption, String> {
    match sort.to_lowercase().as_str() {
        "score" => Ok(SortOption::Score),
        "name" => Ok(SortOption::Name),
        _ => Err(format!("Invalid sort option: {}. Supported: score, name", sort)),
    }
}

pub fn parse_tier_filter(filter: &str) -> Result<TierFilter, String> {
    match filter.to_lowercase().as_str() {
        "all" => Ok(TierFilter::All),
        "high" => Ok(TierFilter::High),
        "medium" => Ok(TierFilter::Medium),
        "low" => Ok(TierFilter::Low),
        _ => Err(format!("Invalid filter: {}. Supported: all, high, medium, low", filter)),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &Path, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
