//! Output formatters: colored console, JSON and Markdown

use crate::config::{OutputFormat, ScoreWeights};
use crate::error::Result;
use crate::model::{MatchTier, ScoreBreakdown, SkillCategory};
use crate::output::report::{RankingReport, ScreeningReport};
use colored::{Color, Colorize};
use std::path::Path;

pub trait OutputFormatter {
    fn format_screening(&self, report: &ScreeningReport) -> Result<String>;
    fn format_ranking(&self, report: &RankingReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Report generator that coordinates the formatters
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

/// Sub-score rows shared by the console and Markdown breakdowns
fn breakdown_rows(b: &ScoreBreakdown, w: &ScoreWeights) -> Vec<(&'static str, Option<u8>, f64)> {
    vec![
        ("Skills", Some(b.skills), w.skills),
        ("Experience", Some(b.experience), w.experience),
        ("Education", Some(b.education), w.education),
        ("Keywords", Some(b.keyword), w.keyword),
        ("ATS compatibility", b.ats_compatibility, w.ats),
    ]
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let (prefix, color) = match level {
            1 => ("█", Color::Blue),
            2 => ("▓", Color::Green),
            _ => ("▒", Color::Yellow),
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn tier_color(tier: MatchTier) -> Color {
        match tier {
            MatchTier::High => Color::Green,
            MatchTier::Medium => Color::Yellow,
            MatchTier::Low => Color::Red,
        }
    }

    fn format_tier_badge(&self, score: u8) -> String {
        let tier = MatchTier::from_score(score);
        let label = tier.to_string().to_uppercase();
        if self.use_colors {
            format!("[{}]", label.color(Self::tier_color(tier)).bold())
        } else {
            format!("[{}]", label)
        }
    }

    fn format_bar(&self, score: u8) -> String {
        let filled = usize::from(score) / 5;
        let bar = format!("{}{}", "■".repeat(filled), "·".repeat(20 - filled));
        self.colorize(&bar, Self::tier_color(MatchTier::from_score(score)))
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_screening(&self, report: &ScreeningReport) -> Result<String> {
        let mut output = String::new();
        let result = &report.result;

        output.push_str(&self.format_header("CANDIDATE SCREENING", 1));
        output.push_str(&format!(
            "Candidate: {} | Job: {} ({})\n",
            report.candidate, report.job_title, report.company
        ));
        output.push_str(&format!(
            "Generated: {} | Processing time: {}ms\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            report.metadata.processing_time_ms
        ));

        output.push_str(&self.format_header("Summary", 2));
        output.push_str(&format!(
            "Overall Score: {}% {}\n",
            result.overall,
            self.format_tier_badge(result.overall)
        ));
        output.push_str(&format!("Verdict: {}\n", self.colorize(&report.verdict, Color::Cyan)));

        output.push_str(&self.format_header("Score Breakdown", 3));
        for (label, score, weight) in breakdown_rows(&result.breakdown, &report.metadata.weights) {
            match score {
                Some(score) => output.push_str(&format!(
                    "{:<18} {:>3}% {} (weight {:.0}%)\n",
                    label,
                    score,
                    self.format_bar(score),
                    weight * 100.0
                )),
                None => output.push_str(&format!("{:<18}  n/a (weight redistributed)\n", label)),
            }
        }

        output.push_str(&self.format_header("Skills", 3));
        if result.skills.is_empty() {
            output.push_str("No skills listed\n");
        }
        for skill in &result.skills {
            let line = match skill.category {
                Some(SkillCategory::Required) => self.colorize(&format!("✓ {} (required)", skill.name), Color::Green),
                Some(SkillCategory::Preferred) => self.colorize(&format!("✓ {} (preferred)", skill.name), Color::Cyan),
                None => format!("· {}", skill.name),
            };
            output.push_str(&format!("  {}\n", line));
        }

        if !report.strengths.is_empty() {
            output.push_str(&self.format_header("Strengths", 3));
            for strength in &report.strengths {
                output.push_str(&format!("  + {}\n", strength));
            }
        }

        if !report.improvement_areas.is_empty() {
            output.push_str(&self.format_header("Gaps", 3));
            for area in &report.improvement_areas {
                output.push_str(&format!("  {} {}\n", self.colorize("-", Color::Red), area));
            }
        }

        if self.detailed {
            let insights = &result.insights;
            output.push_str(&self.format_header("Details", 3));
            output.push_str(&format!("Total experience: {} years\n", insights.total_years));
            output.push_str(&format!("Highest degree: {}\n", insights.highest_degree));
            output.push_str(&format!("Matched keywords: {}\n", insights.matched_keywords.join(", ")));
            output.push_str(&format!("Missing keywords: {}\n", insights.missing_keywords.join(", ")));
            output.push_str(&format!(
                "ATS provider: {} | Current year: {}\n",
                report.metadata.ats_provider, report.metadata.current_year
            ));
        }

        Ok(output)
    }

    fn format_ranking(&self, report: &RankingReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("CANDIDATE RANKING", 1));
        output.push_str(&format!("Job: {} ({})\n", report.job_title, report.company));
        output.push_str(&format!(
            "Screened {} | Showing {} | Sort: {} | Filter: {}{}\n",
            report.total_screened,
            report.candidates.len(),
            report.sort,
            report.filter,
            report
                .search
                .as_deref()
                .map(|s| format!(" | Search: \"{}\"", s))
                .unwrap_or_default()
        ));

        output.push_str(&self.format_header("Candidates", 2));
        if report.candidates.is_empty() {
            output.push_str("No candidates match\n");
        }
        for (rank, candidate) in report.candidates.iter().enumerate() {
            let b = &candidate.result.breakdown;
            output.push_str(&format!(
                "{:>2}. {:<28} {:>3}% {}\n",
                rank + 1,
                candidate.name,
                candidate.result.overall,
                self.format_tier_badge(candidate.result.overall)
            ));
            if self.detailed {
                output.push_str(&format!(
                    "    skills {} | experience {} | education {} | keywords {} | ats {}\n",
                    b.skills,
                    b.experience,
                    b.education,
                    b.keyword,
                    b.ats_compatibility.map_or("n/a".to_string(), |v| v.to_string())
                ));
            }
        }

        if !report.failures.is_empty() {
            output.push_str(&self.format_header("Not screened", 3));
            for failure in &report.failures {
                output.push_str(&format!(
                    "  {} {}: {}\n",
                    self.colorize("✗", Color::Red),
                    failure.name,
                    failure.reason
                ));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    fn to_json<T: serde::Serialize>(&self, value: &T) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(value)?)
        } else {
            Ok(serde_json::to_string(value)?)
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_screening(&self, report: &ScreeningReport) -> Result<String> {
        self.to_json(report)
    }

    fn format_ranking(&self, report: &RankingReport) -> Result<String> {
        self.to_json(report)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn tier_badge(score: u8) -> &'static str {
        match MatchTier::from_score(score) {
            MatchTier::High => "🟢 High",
            MatchTier::Medium => "🟡 Medium",
            MatchTier::Low => "🔴 Low",
        }
    }

    fn bullet_list(output: &mut String, title: &str, items: &[String]) {
        if items.is_empty() {
            return;
        }
        output.push_str(&format!("### {}\n\n", title));
        for item in items {
            output.push_str(&format!("- {}\n", item));
        }
        output.push('\n');
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_screening(&self, report: &ScreeningReport) -> Result<String> {
        let mut output = String::new();
        let result = &report.result;

        output.push_str(&format!("# Screening: {} for {}\n\n", report.candidate, report.job_title));

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Company:** {} | **Job file:** `{}`\n\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.company,
                report.metadata.job_file
            ));
        }

        output.push_str(&format!(
            "**Overall Score:** {}% {}\n\n",
            result.overall,
            Self::tier_badge(result.overall)
        ));
        output.push_str(&format!("**Verdict:** {}\n\n", report.verdict));

        output.push_str("## Score Breakdown\n\n");
        output.push_str("| Component | Score | Weight |\n");
        output.push_str("|-----------|-------|--------|\n");
        for (label, score, weight) in breakdown_rows(&result.breakdown, &report.metadata.weights) {
            let score = score.map_or("n/a".to_string(), |s| format!("{}%", s));
            output.push_str(&format!("| {} | {} | {:.0}% |\n", label, score, weight * 100.0));
        }
        output.push('\n');

        output.push_str("## Skills\n\n");
        output.push_str("| Skill | Match |\n");
        output.push_str("|-------|-------|\n");
        for skill in &result.skills {
            let category = match skill.category {
                Some(SkillCategory::Required) => "required",
                Some(SkillCategory::Preferred) => "preferred",
                None => "-",
            };
            output.push_str(&format!("| {} | {} |\n", skill.name, category));
        }
        output.push('\n');

        Self::bullet_list(&mut output, "Strengths", &report.strengths);
        Self::bullet_list(&mut output, "Gaps", &report.improvement_areas);

        Ok(output)
    }

    fn format_ranking(&self, report: &RankingReport) -> Result<String> {
        let mut output = String::new();

        output.push_str(&format!("# Ranking: {} ({})\n\n", report.job_title, report.company));

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Screened:** {} | **Sort:** {} | **Filter:** {}\n\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.total_screened,
                report.sort,
                report.filter
            ));
        }

        output.push_str("| # | Candidate | Overall | Tier | Skills | Experience | Education | Keywords |\n");
        output.push_str("|---|-----------|---------|------|--------|------------|-----------|----------|\n");
        for (rank, candidate) in report.candidates.iter().enumerate() {
            let b = &candidate.result.breakdown;
            output.push_str(&format!(
                "| {} | {} | {}% | {} | {} | {} | {} | {} |\n",
                rank + 1,
                candidate.name,
                b.overall,
                Self::tier_badge(b.overall),
                b.skills,
                b.experience,
                b.education,
                b.keyword
            ));
        }
        output.push('\n');

        let failures: Vec<String> = report
            .failures
            .iter()
            .map(|f| format!("`{}`: {}", f.name, f.reason))
            .collect();
        Self::bullet_list(&mut output, "Not screened", &failures);

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true)
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    fn formatter(&self, format: &OutputFormat) -> &dyn OutputFormatter {
        match format {
            OutputFormat::Console => &self.console_formatter,
            OutputFormat::Json => &self.json_formatter,
            OutputFormat::Markdown => &self.markdown_formatter,
        }
    }

    pub fn generate_screening(&self, report: &ScreeningReport, format: &OutputFormat) -> Result<String> {
        self.formatter(format).format_screening(report)
    }

    pub fn generate_ranking(&self, report: &RankingReport, format: &OutputFormat) -> Result<String> {
        self.formatter(format).format_ranking(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, base_name: &str, timestamp: bool) -> String {
    let stem = Path::new(base_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
    };

    format!("{}_screening{}.{}", stem, timestamp_suffix, extension)
}
