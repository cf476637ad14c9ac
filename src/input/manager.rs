//! Input manager for loading job descriptions and resumes

use crate::error::{Result, ScreenerError};
use crate::input::file_detector::FileType;
use crate::input::text_extractor::{MarkdownExtractor, PlainTextExtractor, TextExtractor};
use crate::model::{JobDescription, ParsedResume};
use crate::processing::ranking::CandidateSource;
use crate::processing::skill_extractor::SkillExtractor;
use log::info;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub struct InputManager {
    extractor: SkillExtractor,
    cache: HashMap<PathBuf, String>,
    enable_cache: bool,
}

impl InputManager {
    pub fn new(extractor: SkillExtractor) -> Self {
        Self {
            extractor,
            cache: HashMap::new(),
            enable_cache: true,
        }
    }

    pub fn with_cache(mut self, enable: bool) -> Self {
        self.enable_cache = enable;
        self
    }

    /// Load a job description from JSON or TOML and validate it
    pub async fn load_job(&mut self, path: &Path) -> Result<JobDescription> {
        let file_type = self.detect_file_type(path)?;
        if !file_type.is_structured() {
            return Err(ScreenerError::UnsupportedFormat(format!(
                "Job descriptions must be JSON or TOML: {}",
                path.display()
            )));
        }

        let content = self.read_source(path, file_type).await?;
        let job: JobDescription = parse_structured(&content, file_type)?;
        job.validate()?;

        info!("Loaded job '{}' from {}", job.title, path.display());
        Ok(job)
    }

    /// Load a resume: structured records as-is, free text through skill extraction
    pub async fn load_resume(&mut self, path: &Path) -> Result<ParsedResume> {
        let file_type = self.detect_file_type(path)?;
        let content = self.read_source(path, file_type).await?;

        let resume = if file_type.is_structured() {
            parse_structured(&content, file_type)?
        } else {
            self.extractor.parse_resume(&content)
        };

        info!(
            "Loaded resume {} ({} skills, {} roles, {} degrees)",
            path.display(),
            resume.skills.len(),
            resume.experience.len(),
            resume.education.len()
        );
        Ok(resume)
    }

    /// Load a resume for batch screening. Failures become part of the
    /// candidate so one bad file does not stop the batch.
    pub async fn load_candidate(&mut self, path: &Path) -> CandidateSource {
        let name = candidate_name(path);
        match self.load_resume(path).await {
            Ok(resume) => CandidateSource::parsed(name, resume),
            Err(e) => CandidateSource::unreadable(name, e.to_string()),
        }
    }

    pub fn extractor(&self) -> &SkillExtractor {
        &self.extractor
    }

    async fn read_source(&mut self, path: &Path, file_type: FileType) -> Result<String> {
        if self.enable_cache {
            if let Some(cached) = self.cache.get(path) {
                info!("Using cached content for: {}", path.display());
                return Ok(cached.clone());
            }
        }

        if !path.exists() {
            return Err(ScreenerError::InvalidInput(format!(
                "File does not exist: {}",
                path.display()
            )));
        }

        let content = match file_type {
            FileType::Json | FileType::Toml | FileType::Text => PlainTextExtractor.extract(path).await?,
            FileType::Markdown => {
                info!("Rendering markdown file: {}", path.display());
                MarkdownExtractor.extract(path).await?
            }
            FileType::Unknown => {
                return Err(ScreenerError::UnsupportedFormat(format!(
                    "Unsupported file type for: {}",
                    path.display()
                )));
            }
        };

        if self.enable_cache {
            self.cache.insert(path.to_path_buf(), content.clone());
        }

        Ok(content)
    }

    fn detect_file_type(&self, path: &Path) -> Result<FileType> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .ok_or_else(|| {
                ScreenerError::InvalidInput(format!("File has no extension: {}", path.display()))
            })?;

        Ok(FileType::from_extension(extension))
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }
}

fn parse_structured<T: DeserializeOwned>(content: &str, file_type: FileType) -> Result<T> {
    match file_type {
        FileType::Json => Ok(serde_json::from_str(content)?),
        FileType::Toml => Ok(toml::from_str(content)?),
        other => Err(ScreenerError::UnsupportedFormat(format!(
            "{:?} content is not a structured record",
            other
        ))),
    }
}

/// Display name for a candidate: the resume's file name
pub fn candidate_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn manager() -> InputManager {
        InputManager::new(SkillExtractor::new().unwrap())
    }

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[tokio::test]
    async fn test_text_resume_goes_through_extraction() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "cv.txt", "Engineer with Rust and Kafka");

        let resume = manager().load_resume(&path).await.unwrap();
        assert_eq!(resume.skills, vec!["Rust", "Kafka"]);
        assert!(resume.experience.is_empty());
    }

    #[tokio::test]
    async fn test_job_rejects_free_text() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "job.txt", "Rust engineer");

        let result = manager().load_job(&path).await;
        assert!(matches!(result, Err(ScreenerError::UnsupportedFormat(_))));
    }

    #[tokio::test]
    async fn test_invalid_job_is_rejected_on_load() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "job.json",
            r#"{"title": "Dev", "required_skills": ["Go", "go"], "minimum_experience": 1}"#,
        );

        let result = manager().load_job(&path).await;
        assert!(matches!(result, Err(ScreenerError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_cache_reuses_content() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "cv.md", "# Jane\n\nPython");

        let mut manager = manager();
        manager.load_resume(&path).await.unwrap();
        manager.load_resume(&path).await.unwrap();
        assert_eq!(manager.cache_size(), 1);

        manager.clear_cache();
        assert_eq!(manager.cache_size(), 0);
    }

    #[tokio::test]
    async fn test_unreadable_candidate_is_carried_as_data() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "broken.json", "{ not json");

        let candidate = manager().load_candidate(&path).await;
        assert!(matches!(candidate, CandidateSource::Unreadable { .. }));
        assert_eq!(candidate.name(), "broken.json");
    }
}
