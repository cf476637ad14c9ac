//! Request and response records exchanged with the scoring engine

use crate::error::{Result, ScreenerError};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Job description a batch of candidates is screened against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDescription {
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, alias = "requiredSkills")]
    pub required_skills: Vec<String>,
    #[serde(default, alias = "preferredSkills")]
    pub preferred_skills: Vec<String>,
    #[serde(default, alias = "minimumExperience")]
    pub minimum_experience: i32,
}

impl JobDescription {
    /// Reject job descriptions the engine cannot score meaningfully.
    pub fn validate(&self) -> Result<()> {
        if self.minimum_experience < 0 {
            return Err(ScreenerError::InvalidInput(format!(
                "Minimum experience must not be negative (got {})",
                self.minimum_experience
            )));
        }

        Self::check_skill_list("required", &self.required_skills)?;
        Self::check_skill_list("preferred", &self.preferred_skills)?;
        Ok(())
    }

    fn check_skill_list(kind: &str, skills: &[String]) -> Result<()> {
        let mut seen = HashSet::new();
        for skill in skills {
            let normalized = skill.trim().to_lowercase();
            if normalized.is_empty() {
                return Err(ScreenerError::InvalidInput(format!(
                    "Blank name in {} skills",
                    kind
                )));
            }
            if !seen.insert(normalized) {
                return Err(ScreenerError::InvalidInput(format!(
                    "Duplicate {} skill: {}",
                    kind, skill
                )));
            }
        }
        Ok(())
    }
}

/// Resume content after an external parser has done its work
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedResume {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(alias = "startDate")]
    pub start_date: String,
    /// A year, or `present` / `current` / `now` for an ongoing role
    #[serde(default, alias = "endDate")]
    pub end_date: Option<String>,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default)]
    pub year: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Required,
    Preferred,
}

/// A resume skill annotated against the job's skill lists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub is_match: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<SkillCategory>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub overall: u8,
    pub skills: u8,
    pub experience: u8,
    pub education: u8,
    pub keyword: u8,
    /// Absent when the configured ATS provider does not compute it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ats_compatibility: Option<u8>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegreeLevel {
    #[default]
    None,
    Bachelor,
    Master,
    Doctorate,
}

impl fmt::Display for DegreeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DegreeLevel::None => write!(f, "None detected"),
            DegreeLevel::Bachelor => write!(f, "Bachelor"),
            DegreeLevel::Master => write!(f, "Master"),
            DegreeLevel::Doctorate => write!(f, "Doctorate"),
        }
    }
}

/// A missing job skill that resembles a skill the candidate does list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearMiss {
    pub job_skill: String,
    pub resume_skill: String,
    pub similarity: f64,
}

/// Explanatory details gathered while scoring. They never feed back into the numbers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchInsights {
    pub missing_required: Vec<String>,
    pub missing_preferred: Vec<String>,
    pub near_misses: Vec<NearMiss>,
    pub matched_keywords: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub total_years: i32,
    pub highest_degree: DegreeLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub overall: u8,
    pub breakdown: ScoreBreakdown,
    pub skills: Vec<Skill>,
    pub insights: MatchInsights,
}

impl ScoreResult {
    pub fn tier(&self) -> MatchTier {
        MatchTier::from_score(self.overall)
    }
}

/// Coarse match bands used for filtering and colouring results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchTier {
    High,
    Medium,
    Low,
}

impl MatchTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => MatchTier::High,
            60..=79 => MatchTier::Medium,
            _ => MatchTier::Low,
        }
    }
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchTier::High => write!(f, "High match"),
            MatchTier::Medium => write!(f, "Medium match"),
            MatchTier::Low => write!(f, "Low match"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job() -> JobDescription {
        JobDescription {
            title: "Backend Engineer".to_string(),
            company: "Acme".to_string(),
            description: "Build services".to_string(),
            required_skills: vec!["Rust".to_string(), "SQL".to_string()],
            preferred_skills: vec!["Docker".to_string()],
            minimum_experience: 3,
        }
    }

    #[test]
    fn test_valid_job_passes() {
        assert!(job().validate().is_ok());
    }

    #[test]
    fn test_negative_experience_rejected() {
        let mut job = job();
        job.minimum_experience = -1;
        assert!(matches!(job.validate(), Err(ScreenerError::InvalidInput(_))));
    }

    #[test]
    fn test_case_insensitive_duplicate_rejected() {
        let mut job = job();
        job.required_skills.push("rust".to_string());
        assert!(matches!(job.validate(), Err(ScreenerError::InvalidInput(_))));
    }

    #[test]
    fn test_blank_skill_rejected() {
        let mut job = job();
        job.preferred_skills.push("   ".to_string());
        assert!(job.validate().is_err());
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(MatchTier::from_score(100), MatchTier::High);
        assert_eq!(MatchTier::from_score(80), MatchTier::High);
        assert_eq!(MatchTier::from_score(79), MatchTier::Medium);
        assert_eq!(MatchTier::from_score(60), MatchTier::Medium);
        assert_eq!(MatchTier::from_score(59), MatchTier::Low);
        assert_eq!(MatchTier::from_score(0), MatchTier::Low);
    }

    #[test]
    fn test_dashboard_field_names_accepted() {
        let json = r#"{
            "title": "Dev",
            "company": "X",
            "description": "",
            "requiredSkills": ["Python"],
            "preferredSkills": [],
            "minimumExperience": 2
        }"#;
        let job: JobDescription = serde_json::from_str(json).unwrap();
        assert_eq!(job.required_skills, vec!["Python".to_string()]);
        assert_eq!(job.minimum_experience, 2);
    }
}
