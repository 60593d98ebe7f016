//! Keyword overlap confidence scoring

use dnaspec_types::{MatchCandidate, SkillDescriptor};

use crate::config::ScoringConfig;

/// Weight of a plain keyword
const BASE_WEIGHT: f64 = 1.0;

/// Scores a message against a single skill
///
/// Each keyword contained in the lowercased message adds its weight once.
/// Confidence is the matched weight divided by
/// `min(available_weight, saturation_weight)`, capped at 1.0, where the
/// available weight counts every keyword at the boosted weight. A full match
/// on plain keywords therefore stays below a match on priority keywords.
#[derive(Debug, Clone)]
pub struct ConfidenceScorer {
    priority_boost: f64,
    saturation_weight: f64,
}

impl ConfidenceScorer {
    /// Create a scorer from configuration
    #[must_use]
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            priority_boost: config.priority_boost,
            saturation_weight: config.saturation_weight,
        }
    }

    /// Score `message` against `skill`
    ///
    /// Never fails: an empty message or an empty keyword set yields confidence 0.
    #[must_use]
    pub fn score<'a>(&self, message: &str, skill: &'a SkillDescriptor) -> MatchCandidate<'a> {
        let message = message.trim().to_lowercase();
        if message.is_empty() || skill.keywords.is_empty() {
            return MatchCandidate::no_match(skill);
        }

        let mut matched_weight = 0.0;
        let mut matched_keywords = Vec::new();

        for keyword in &skill.keywords {
            if message.contains(keyword.as_str()) {
                matched_weight += self.weight(skill, keyword);
                matched_keywords.push(keyword.clone());
            }
        }

        if matched_keywords.is_empty() {
            return MatchCandidate::no_match(skill);
        }

        #[allow(clippy::cast_precision_loss)]
        let available_weight = skill.keywords.len() as f64 * self.max_weight();
        let denominator = if self.saturation_weight > 0.0 {
            available_weight.min(self.saturation_weight)
        } else {
            available_weight
        };

        MatchCandidate::new(skill, matched_weight / denominator, matched_keywords)
    }

    fn max_weight(&self) -> f64 {
        BASE_WEIGHT.max(BASE_WEIGHT * self.priority_boost)
    }

    fn weight(&self, skill: &SkillDescriptor, keyword: &str) -> f64 {
        if skill.is_priority(keyword) {
            BASE_WEIGHT * self.priority_boost
        } else {
            BASE_WEIGHT
        }
    }
}

impl Default for ConfidenceScorer {
    fn default() -> Self {
        Self::new(&ScoringConfig::default())
    }
}
