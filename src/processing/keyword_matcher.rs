//! Job-description keyword coverage in resume text

use crate::config::KeywordScoringConfig;
use crate::processing::text_processor::TextProcessor;

pub struct KeywordMatcher {
    config: KeywordScoringConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeywordMatch {
    pub score: f64,
    pub keywords: Vec<KeywordHit>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordHit {
    pub keyword: String,
    pub count: usize,
}

impl KeywordMatch {
    pub fn matched(&self) -> Vec<String> {
        self.keywords
            .iter()
            .filter(|k| k.count > 0)
            .map(|k| k.keyword.clone())
            .collect()
    }

    pub fn missing(&self) -> Vec<String> {
        self.keywords
            .iter()
            .filter(|k| k.count == 0)
            .map(|k| k.keyword.clone())
            .collect()
    }
}

impl KeywordMatcher {
    pub fn new(config: KeywordScoringConfig) -> Self {
        Self { config }
    }

    pub fn match_keywords(&self, resume_text: &str, job_description: &str, text: &TextProcessor) -> KeywordMatch {
        let keywords = text.extract_keywords(
            job_description,
            self.config.max_keywords,
            self.config.min_token_len,
        );

        if keywords.is_empty() {
            return KeywordMatch {
                score: 0.0,
                keywords: Vec::new(),
            };
        }

        let counts = text.keyword_counts(resume_text);
        let hits: Vec<KeywordHit> = keywords
            .into_iter()
            .map(|keyword| {
                let count = counts.get(&keyword).copied().unwrap_or(0);
                KeywordHit { keyword, count }
            })
            .collect();

        let cap = self.config.per_keyword_cap;
        let total: usize = hits.iter().map(|hit| hit.count.min(cap)).sum();
        let score = (total as f64 / (hits.len() * cap) as f64 * 100.0).clamp(0.0, 100.0);

        KeywordMatch { score, keywords: hits }
    }
}
