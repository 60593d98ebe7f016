//! Keyword extraction from skill names and descriptions
//!
//! Tokens are split on non-alphanumeric boundaries and lowercased. There is
//! no stemming and no word segmentation: a run of CJK characters is a single
//! token, and matching later relies on substring containment.

use std::collections::{BTreeSet, HashSet};

/// Default minimum token length, in characters
pub const DEFAULT_MIN_KEYWORD_LENGTH: usize = 2;

/// Words too common to discriminate between skills
const STOP_WORDS: &[&str] = &[
    "a", "an", "and", "any", "are", "as", "at", "be", "but", "by", "can", "for", "from", "has",
    "have", "help", "helps", "if", "in", "into", "is", "it", "its", "of", "on", "or", "other",
    "per", "should", "such", "that", "the", "their", "them", "these", "this", "to", "use",
    "used", "user", "uses", "using", "via", "when", "which", "will", "with", "you", "your",
    "的", "是", "在", "和", "与", "或", "为", "有", "了", "等", "专业", "专家",
];

/// Derives keyword sets for skills
#[derive(Debug, Clone)]
pub struct KeywordExtractor {
    min_length: usize,
    stop_words: HashSet<String>,
}

impl KeywordExtractor {
    /// Create an extractor with the built-in stop words
    pub fn new(min_length: usize) -> Self {
        Self {
            min_length,
            stop_words: STOP_WORDS.iter().map(|w| (*w).to_string()).collect(),
        }
    }

    /// Add extra stop words
    pub fn with_stop_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stop_words
            .extend(words.into_iter().map(|w| w.as_ref().to_lowercase()));
        self
    }

    /// Split text into lowercase tokens that pass the length and stop-word filters
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|token| token.chars().count() >= self.min_length)
            .filter(|token| !self.stop_words.contains(*token))
            .map(str::to_string)
            .collect()
    }

    /// Keywords for a skill: the full name, plus name and description tokens
    pub fn extract(&self, name: &str, description: &str) -> BTreeSet<String> {
        let mut keywords = BTreeSet::new();

        let full_name = name.trim().to_lowercase();
        if !full_name.is_empty() {
            keywords.insert(full_name);
        }

        keywords.extend(self.tokenize(name));
        keywords.extend(self.tokenize(description));
        keywords
    }
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_KEYWORD_LENGTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_filters_short_and_stop_words() {
        let extractor = KeywordExtractor::default();
        let tokens = extractor.tokenize("Use it to design a System Architecture!");
        assert_eq!(tokens, vec!["design", "system", "architecture"]);
    }

    #[test]
    fn test_cjk_runs_are_single_tokens() {
        let extractor = KeywordExtractor::default();
        let tokens = extractor.tokenize("创建智能体，设计agent角色");
        assert_eq!(tokens, vec!["创建智能体", "设计agent角色"]);
    }

    #[test]
    fn test_extract_includes_full_name() {
        let extractor = KeywordExtractor::default();
        let keywords = extractor.extract("task-decomposer", "Breaks down complex tasks");

        assert!(keywords.contains("task-decomposer"));
        assert!(keywords.contains("task"));
        assert!(keywords.contains("decomposer"));
        assert!(keywords.contains("breaks"));
        assert!(keywords.contains("tasks"));
        assert!(keywords.contains("complex"));
    }

    #[test]
    fn test_min_length_counts_characters() {
        let extractor = KeywordExtractor::new(3);
        let tokens = extractor.tokenize("约束 api ab 生成约束");
        assert_eq!(tokens, vec!["api", "生成约束"]);
    }

    #[test]
    fn test_custom_stop_words() {
        let extractor = KeywordExtractor::default().with_stop_words(["Design"]);
        assert_eq!(extractor.tokenize("design systems"), vec!["systems"]);
    }
}
