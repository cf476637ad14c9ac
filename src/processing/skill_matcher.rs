//! Required / preferred skill matching

use crate::config::{Breakpoint, SkillScoringConfig};
use crate::model::{JobDescription, NearMiss, Skill, SkillCategory};
use std::collections::HashSet;
use strsim::jaro_winkler;

pub struct SkillMatcher {
    config: SkillScoringConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkillMatch {
    pub score: f64,
    pub required_ratio: f64,
    pub preferred_ratio: f64,
    pub skills: Vec<Skill>,
    pub missing_required: Vec<String>,
    pub missing_preferred: Vec<String>,
    pub near_misses: Vec<NearMiss>,
}

impl SkillMatcher {
    pub fn new(config: SkillScoringConfig) -> Self {
        Self { config }
    }

    /// Score resume skills against the job's required and preferred lists.
    ///
    /// An empty job list counts as fully satisfied; an empty resume scores zero.
    pub fn match_skills(&self, resume_skills: &[String], job: &JobDescription) -> SkillMatch {
        let unique_skills = dedup_skills(resume_skills);
        let resume_set: HashSet<String> = unique_skills.iter().map(|s| s.to_lowercase()).collect();

        let (required_hits, missing_required) = partition_hits(&job.required_skills, &resume_set);
        let (preferred_hits, missing_preferred) = partition_hits(&job.preferred_skills, &resume_set);

        let (required_ratio, preferred_ratio) = if resume_set.is_empty() {
            (0.0, 0.0)
        } else {
            (
                hit_ratio(required_hits, job.required_skills.len()),
                hit_ratio(preferred_hits, job.preferred_skills.len()),
            )
        };

        let required_score = Breakpoint::lookup(&self.config.required_breakpoints, required_ratio)
            .unwrap_or(required_ratio * 100.0);
        let preferred_score = preferred_ratio * 100.0;

        let score = (required_score * self.config.required_weight
            + preferred_score * self.config.preferred_weight)
            .clamp(0.0, 100.0);

        let skills = annotate(&unique_skills, job);

        let near_misses = missing_required
            .iter()
            .chain(missing_preferred.iter())
            .filter_map(|missing| self.closest_resume_skill(missing, &unique_skills))
            .collect();

        SkillMatch {
            score,
            required_ratio,
            preferred_ratio,
            skills,
            missing_required,
            missing_preferred,
            near_misses,
        }
    }

    /// Find a resume skill spelled close to a missing job skill ("Postgres" vs "PostgreSQL").
    fn closest_resume_skill(&self, job_skill: &str, resume_skills: &[String]) -> Option<NearMiss> {
        let target = job_skill.to_lowercase();
        let mut best: Option<NearMiss> = None;

        for candidate in resume_skills {
            let similarity = jaro_winkler(&target, &candidate.to_lowercase());
            if similarity < self.config.near_miss_threshold {
                continue;
            }
            if best.as_ref().map_or(true, |b| similarity > b.similarity) {
                best = Some(NearMiss {
                    job_skill: job_skill.to_string(),
                    resume_skill: candidate.clone(),
                    similarity,
                });
            }
        }

        best
    }
}

/// Trim, drop blanks and coalesce case-insensitive duplicates, keeping the first spelling.
fn dedup_skills(skills: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .filter(|s| seen.insert(s.to_lowercase()))
        .map(|s| s.to_string())
        .collect()
}

fn partition_hits(job_skills: &[String], resume_set: &HashSet<String>) -> (usize, Vec<String>) {
    let mut hits = 0;
    let mut missing = Vec::new();
    for skill in job_skills {
        if resume_set.contains(&skill.trim().to_lowercase()) {
            hits += 1;
        } else {
            missing.push(skill.clone());
        }
    }
    (hits, missing)
}

fn hit_ratio(hits: usize, total: usize) -> f64 {
    if total == 0 {
        1.0
    } else {
        hits as f64 / total as f64
    }
}

fn annotate(skills: &[String], job: &JobDescription) -> Vec<Skill> {
    let required: HashSet<String> = job.required_skills.iter().map(|s| s.trim().to_lowercase()).collect();
    let preferred: HashSet<String> = job.preferred_skills.iter().map(|s| s.trim().to_lowercase()).collect();

    skills
        .iter()
        .map(|name| {
            let key = name.to_lowercase();
            let category = if required.contains(&key) {
                Some(SkillCategory::Required)
            } else if preferred.contains(&key) {
                Some(SkillCategory::Preferred)
            } else {
                None
            };
            Skill {
                name: name.clone(),
                is_match: category.is_some(),
                category,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoringConfig;

    fn matcher() -> SkillMatcher {
        SkillMatcher::new(ScoringConfig::default().skills)
    }

    fn job(required: &[&str], preferred: &[&str]) -> JobDescription {
        JobDescription {
            title: "Engineer".to_string(),
            company: "Acme".to_string(),
            description: String::new(),
            required_skills: required.iter().map(|s| s.to_string()).collect(),
            preferred_skills: preferred.iter().map(|s| s.to_string()).collect(),
            minimum_experience: 0,
        }
    }

    fn skills(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_exact_union_scores_full_marks() {
        let job = job(&["Rust", "SQL"], &["Docker"]);
        let result = matcher().match_skills(&skills(&["rust", "sql", "DOCKER"]), &job);
        assert_eq!(result.score, 100.0);
        assert!(result.missing_required.is_empty());
    }

    #[test]
    fn test_required_only_job_fully_met() {
        let job = job(&["Python"], &[]);
        let result = matcher().match_skills(&skills(&["python"]), &job);
        assert_eq!(result.required_ratio, 1.0);
        assert_eq!(result.preferred_ratio, 1.0);
        assert_eq!(result.score, 100.0);
    }

    #[test]
    fn test_no_required_skills_defaults_ratio_to_one() {
        let job = job(&[], &["Go", "Kafka"]);
        let result = matcher().match_skills(&skills(&["Go"]), &job);
        assert_eq!(result.required_ratio, 1.0);
        // 100 * 0.8 + 50 * 0.2
        assert!((result.score - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_resume_scores_zero() {
        let job = job(&[], &[]);
        let result = matcher().match_skills(&[], &job);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.required_ratio, 0.0);
        assert!(result.skills.is_empty());
    }

    #[test]
    fn test_step_function_breakpoints() {
        let job = job(&["a", "b", "c", "d", "e"], &[]);
        let m = matcher();

        let four = m.match_skills(&skills(&["a", "b", "c", "d"]), &job);
        assert!((four.score - (90.0 * 0.8 + 100.0 * 0.2)).abs() < 1e-9);

        let three = m.match_skills(&skills(&["a", "b", "c"]), &job);
        assert!((three.score - (70.0 * 0.8 + 20.0)).abs() < 1e-9);

        let two = m.match_skills(&skills(&["a", "b"]), &job);
        assert!((two.score - (50.0 * 0.8 + 20.0)).abs() < 1e-9);

        // below the last breakpoint the curve is linear
        let one = m.match_skills(&skills(&["a", "x"]), &job);
        assert!((one.score - (20.0 * 0.8 + 20.0)).abs() < 1e-9);
    }

    #[test]
    fn test_annotation_marks_categories() {
        let job = job(&["Rust"], &["Docker"]);
        let result = matcher().match_skills(&skills(&["rust", "Docker", "Excel", "RUST"]), &job);

        assert_eq!(result.skills.len(), 3);
        assert_eq!(result.skills[0].category, Some(SkillCategory::Required));
        assert_eq!(result.skills[1].category, Some(SkillCategory::Preferred));
        assert!(!result.skills[2].is_match);
        assert_eq!(result.skills[2].category, None);
    }

    #[test]
    fn test_near_miss_reported_without_affecting_score() {
        let job = job(&["PostgreSQL"], &[]);
        let result = matcher().match_skills(&skills(&["Postgres"]), &job);

        assert_eq!(result.missing_required, vec!["PostgreSQL".to_string()]);
        assert_eq!(result.near_misses.len(), 1);
        assert_eq!(result.near_misses[0].resume_skill, "Postgres");
        assert_eq!(result.score, 20.0);
    }
}
