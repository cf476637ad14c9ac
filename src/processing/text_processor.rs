//! Text normalization, tokenization and keyword extraction

use regex::Regex;
use std::collections::{HashMap, HashSet};
use unicode_segmentation::UnicodeSegmentation;

pub struct TextProcessor {
    stop_words: HashSet<String>,
    email_regex: Regex,
    phone_regex: Regex,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    pub fn new() -> Self {
        let stop_words = Self::create_stop_words();

        let email_regex = Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}")
            .expect("Invalid email regex");

        let phone_regex = Regex::new(r"(?:\+?\d{1,3}[-. ]?)?\(?\d{3}\)?[-. ]?\d{3}[-. ]?\d{4}\b")
            .expect("Invalid phone regex");

        Self {
            stop_words,
            email_regex,
            phone_regex,
        }
    }

    /// Add caller-supplied stop words on top of the built-in list
    pub fn with_extra_stop_words(mut self, extra: &[String]) -> Self {
        self.stop_words
            .extend(extra.iter().map(|w| w.trim().to_lowercase()).filter(|w| !w.is_empty()));
        self
    }

    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Lowercase and drop every character that is neither a word character nor whitespace.
    ///
    /// Punctuation is removed rather than replaced, so `node.js` becomes `nodejs`.
    pub fn normalize(&self, text: &str) -> String {
        text.to_lowercase()
            .chars()
            .filter(|c| is_word_char(*c) || c.is_whitespace())
            .collect()
    }

    /// Split on anything that is not a word character, like a `\b` word boundary.
    pub fn word_tokens(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !is_word_char(c))
            .filter(|t| !t.is_empty())
            .map(|t| t.to_string())
            .collect()
    }

    /// Word tokens with stop words removed
    pub fn content_tokens(&self, text: &str) -> HashSet<String> {
        self.word_tokens(text)
            .into_iter()
            .filter(|t| !self.is_stop_word(t))
            .collect()
    }

    /// Extract the most frequent non-trivial words of a text.
    ///
    /// Ties in frequency keep the order in which the words first appeared.
    pub fn extract_keywords(&self, text: &str, max_keywords: usize, min_len: usize) -> Vec<String> {
        let normalized = self.normalize(text);
        let mut word_freq: HashMap<&str, (usize, usize)> = HashMap::new();

        for (position, word) in normalized.split_whitespace().enumerate() {
            if word.chars().count() < min_len || self.is_stop_word(word) {
                continue;
            }
            let entry = word_freq.entry(word).or_insert((0, position));
            entry.0 += 1;
        }

        let mut keywords: Vec<(&str, (usize, usize))> = word_freq.into_iter().collect();
        keywords.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));

        keywords
            .into_iter()
            .take(max_keywords)
            .map(|(word, _)| word.to_string())
            .collect()
    }

    /// Occurrence counts keyed the way `extract_keywords` keys its words.
    ///
    /// Each whitespace-separated token counts once in its normalized form
    /// (`node.js` as `nodejs`) and, when it carries inner punctuation, once
    /// for each part (`node`, `js`).
    pub fn keyword_counts(&self, text: &str) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for raw in text.split_whitespace() {
            let parts = self.word_tokens(raw);
            let joined = parts.concat();
            if joined.is_empty() {
                continue;
            }
            if parts.len() > 1 {
                for part in parts {
                    *counts.entry(part).or_insert(0) += 1;
                }
            }
            *counts.entry(joined).or_insert(0) += 1;
        }
        counts
    }

    pub fn word_count(&self, text: &str) -> usize {
        text.unicode_words().count()
    }

    /// Whether the text carries an e-mail address or phone number
    pub fn has_contact_details(&self, text: &str) -> bool {
        self.email_regex.is_match(text) || self.phone_regex.is_match(text)
    }

    fn create_stop_words() -> HashSet<String> {
        let stop_words = [
            "a", "an", "the", "and", "or", "but", "is", "are", "in", "to", "with", "for",
            "of", "on", "at", "as", "by", "be", "we", "you", "our", "your", "will", "from",
            "that", "this", "these", "those", "have", "has", "had", "was", "were", "been",
            "their", "they", "them", "there", "which", "what", "when", "where", "who",
            "would", "should", "could", "into", "also", "more", "most", "such", "than",
            "then", "other", "only", "very", "just", "over", "some", "each", "must",
            "able", "well", "about", "while", "within", "across", "upon", "including",
            "using", "work", "working", "looking", "join", "strong", "years", "year",
            "plus", "etc", "both", "all", "any", "can", "its", "it", "not",
        ];

        stop_words.iter().map(|&s| s.to_string()).collect()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_punctuation() {
        let processor = TextProcessor::new();
        assert_eq!(processor.normalize("Node.js, C++ & Rust!"), "nodejs c  rust");
    }

    #[test]
    fn test_word_tokens_split_on_boundaries() {
        let processor = TextProcessor::new();
        let tokens = processor.word_tokens("Python/Java; node.js");
        assert_eq!(tokens, vec!["python", "java", "node", "js"]);
    }

    #[test]
    fn test_keyword_extraction_frequency_then_first_occurrence() {
        let processor = TextProcessor::new();
        let text = "Kubernetes clusters. Terraform modules. Kubernetes operators, terraform state. Golang services.";

        let keywords = processor.extract_keywords(text, 10, 4);

        assert_eq!(keywords[0], "kubernetes");
        assert_eq!(keywords[1], "terraform");
        // single occurrences keep document order
        assert_eq!(&keywords[2..], &["clusters", "modules", "operators", "state", "golang", "services"]);
    }

    #[test]
    fn test_keyword_extraction_skips_short_and_stop_words() {
        let processor = TextProcessor::new();
        let keywords = processor.extract_keywords("The API and SQL skills with which we ship", 10, 4);
        assert_eq!(keywords, vec!["skills", "ship"]);
    }

    #[test]
    fn test_keyword_extraction_respects_limit() {
        let processor = TextProcessor::new();
        let keywords = processor.extract_keywords("alpha bravo charlie delta echoes foxtrot", 3, 4);
        assert_eq!(keywords, vec!["alpha", "bravo", "charlie"]);
    }

    #[test]
    fn test_blank_text_has_no_keywords() {
        let processor = TextProcessor::new();
        assert!(processor.extract_keywords("   \n\t", 25, 4).is_empty());
    }

    #[test]
    fn test_keyword_counts_are_whole_word() {
        let processor = TextProcessor::new();
        let counts = processor.keyword_counts("Rust rusty RUST trust");
        assert_eq!(counts.get("rust"), Some(&2));
        assert_eq!(counts.get("rusty"), Some(&1));
    }

    #[test]
    fn test_keyword_counts_hold_joined_and_split_forms() {
        let processor = TextProcessor::new();
        let counts = processor.keyword_counts("Full-stack Node.js, rust. Rust!");
        assert_eq!(counts.get("fullstack"), Some(&1));
        assert_eq!(counts.get("full"), Some(&1));
        assert_eq!(counts.get("nodejs"), Some(&1));
        assert_eq!(counts.get("js"), Some(&1));
        assert_eq!(counts.get("rust"), Some(&2));
        // keywords come out of the same normalization
        for keyword in processor.extract_keywords("Full-stack Node.js", 10, 4) {
            assert!(counts.contains_key(&keyword), "{} not counted", keyword);
        }
    }

    #[test]
    fn test_extra_stop_words() {
        let processor = TextProcessor::new().with_extra_stop_words(&["Company".to_string()]);
        assert!(processor.is_stop_word("company"));
    }

    #[test]
    fn test_contact_detection() {
        let processor = TextProcessor::new();
        assert!(processor.has_contact_details("Reach me at jane.doe@example.com"));
        assert!(processor.has_contact_details("Phone: (555) 123-4567"));
        assert!(!processor.has_contact_details("No contact here"));
    }
}
