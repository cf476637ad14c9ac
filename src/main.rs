//! Resume screener: score and rank candidates against a job description

use chrono::Datelike;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info};
use resume_screener::cli::{self, Cli, Commands, ConfigAction};
use resume_screener::config::{Config, OutputFormat};
use resume_screener::error::{Result, ScreenerError};
use resume_screener::input::manager::candidate_name;
use resume_screener::input::InputManager;
use resume_screener::output::{
    save_report_to_file, RankingReport, ReportGenerator, ReportMetadata, ScreeningReport,
};
use resume_screener::processing::{
    screen_candidates, CandidateSource, RankingQuery, ScoringEngine, SkillExtractor,
};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::time::Instant;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    // config subcommands must work on a file that fails validation
    let command = match cli.command {
        Commands::Config { action } => {
            if let Err(e) = run_config_command(action, cli.config) {
                error!("Command failed: {}", e);
                process::exit(1);
            }
            return;
        }
        command => command,
    };

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Score {
            resume,
            job,
            output,
            detailed,
            save,
            current_year,
        } => {
            cli::validate_file_extension(&resume, &cli::RESUME_EXTENSIONS)
                .map_err(|e| ScreenerError::InvalidInput(format!("Resume file: {}", e)))?;
            cli::validate_file_extension(&job, &cli::JOB_EXTENSIONS)
                .map_err(|e| ScreenerError::InvalidInput(format!("Job description file: {}", e)))?;

            let format = resolve_format(output.as_deref(), &config)?;
            let started = Instant::now();

            let mut input_manager = new_input_manager(&config)?;
            let job_description = input_manager.load_job(&job).await?;
            let parsed_resume = input_manager.load_resume(&resume).await?;

            let engine = ScoringEngine::new(config.scoring.clone(), resolve_year(current_year))?;
            let result = engine.score(&parsed_resume, &job_description)?;
            info!("Scored {}: {}%", resume.display(), result.overall);

            let metadata = ReportMetadata::new(&engine, &job.to_string_lossy(), elapsed_ms(started));
            let candidate = resume.to_string_lossy();
            let report = ScreeningReport::new(&candidate, &job_description, result, metadata);

            let detailed = detailed || config.output.detailed;
            let generator = ReportGenerator::with_options(config.output.color_output, detailed, true, true);
            println!("{}", generator.generate_screening(&report, &format)?);

            if let Some(path) = save {
                let plain = ReportGenerator::with_options(false, detailed, true, true);
                save_report_to_file(&plain.generate_screening(&report, &format)?, &path)?;
                println!("Report saved to {}", path.display());
            }
        }

        Commands::Rank {
            job,
            resumes,
            sort,
            filter,
            search,
            output,
            detailed,
            save,
            current_year,
        } => {
            cli::validate_file_extension(&job, &cli::JOB_EXTENSIONS)
                .map_err(|e| ScreenerError::InvalidInput(format!("Job description file: {}", e)))?;

            let format = resolve_format(output.as_deref(), &config)?;
            let query = RankingQuery {
                sort: cli::parse_sort_option(&sort).map_err(ScreenerError::InvalidInput)?,
                filter: cli::parse_tier_filter(&filter).map_err(ScreenerError::InvalidInput)?,
                search,
            };
            let started = Instant::now();

            let mut input_manager = new_input_manager(&config)?;
            let job_description = input_manager.load_job(&job).await?;

            let progress = ProgressBar::new(resumes.len() as u64);
            progress.set_style(
                ProgressStyle::with_template("{spinner} Loading resumes [{bar:30}] {pos}/{len} {msg}")
                    .map_err(|e| ScreenerError::OutputFormatting(e.to_string()))?
                    .progress_chars("=> "),
            );

            let mut candidates = Vec::with_capacity(resumes.len());
            for path in &resumes {
                progress.set_message(path.display().to_string());
                let candidate = match cli::validate_file_extension(path, &cli::RESUME_EXTENSIONS) {
                    Ok(()) => input_manager.load_candidate(path).await,
                    Err(e) => CandidateSource::unreadable(candidate_name(path), e),
                };
                candidates.push(candidate);
                progress.inc(1);
            }
            progress.finish_and_clear();

            let engine = Arc::new(ScoringEngine::new(config.scoring.clone(), resolve_year(current_year))?);
            let job_description = Arc::new(job_description);
            let outcome =
                screen_candidates(Arc::clone(&engine), Arc::clone(&job_description), candidates).await?;

            let shown = outcome.apply(&query).into_iter().cloned().collect();
            let metadata = ReportMetadata::new(&engine, &job.to_string_lossy(), elapsed_ms(started));
            let report = RankingReport::new(
                &job_description,
                &query,
                outcome.ranked.len() + outcome.failures.len(),
                shown,
                outcome.failures.clone(),
                metadata,
            );

            let detailed = detailed || config.output.detailed;
            let generator = ReportGenerator::with_options(config.output.color_output, detailed, true, true);
            println!("{}", generator.generate_ranking(&report, &format)?);

            if let Some(path) = save {
                let plain = ReportGenerator::with_options(false, detailed, true, true);
                save_report_to_file(&plain.generate_ranking(&report, &format)?, &path)?;
                println!("Report saved to {}", path.display());
            }
        }

        Commands::Skills { resume } => {
            cli::validate_file_extension(&resume, &cli::RESUME_EXTENSIONS)
                .map_err(|e| ScreenerError::InvalidInput(format!("Resume file: {}", e)))?;

            let mut input_manager = new_input_manager(&config)?;
            let parsed_resume = input_manager.load_resume(&resume).await?;

            if parsed_resume.skills.is_empty() {
                println!("No known skills found in {}", resume.display());
            } else {
                println!("Skills found in {}:", resume.display());
                for skill in &parsed_resume.skills {
                    println!("  • {}", skill);
                }
            }
        }

        Commands::Config { .. } => {
            return Err(ScreenerError::Processing(
                "config commands run before the configuration is loaded".to_string(),
            ));
        }
    }

    Ok(())
}

fn run_config_command(action: Option<ConfigAction>, config_path: Option<PathBuf>) -> Result<()> {
    let path = config_path.unwrap_or_else(Config::config_path);

    match action {
        Some(ConfigAction::Show) | None => {
            let config = read_config(&path)?;
            println!("Configuration ({})\n", path.display());
            let content = toml::to_string_pretty(&config)
                .map_err(|e| ScreenerError::Configuration(e.to_string()))?;
            println!("{}", content);
        }
        Some(ConfigAction::Reset) => {
            Config::default().save_to(&path)?;
            println!("Configuration reset to defaults at {}", path.display());
        }
        Some(ConfigAction::Path) => {
            println!("{}", path.display());
        }
        Some(ConfigAction::Validate) => {
            let config = read_config(&path)?;
            config.validate()?;
            println!(
                "Configuration is valid (weights sum to {:.2})",
                config.scoring.weights.sum()
            );
        }
    }

    Ok(())
}

/// Read without validating; the default file is created on first use.
fn read_config(path: &Path) -> Result<Config> {
    if !path.exists() && path == Config::config_path() {
        Config::load()
    } else {
        Config::read_from(path)
    }
}

fn new_input_manager(config: &Config) -> Result<InputManager> {
    let extractor = SkillExtractor::with_custom_skills(&config.extraction.custom_skills)?;
    Ok(InputManager::new(extractor))
}

fn resolve_format(output: Option<&str>, config: &Config) -> Result<OutputFormat> {
    match output {
        Some(format) => cli::parse_output_format(format).map_err(ScreenerError::InvalidInput),
        None => Ok(config.output.format),
    }
}

fn resolve_year(current_year: Option<i32>) -> i32 {
    current_year.unwrap_or_else(|| chrono::Local::now().year())
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}
