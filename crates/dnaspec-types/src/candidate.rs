//! Per-message routing result

use crate::SkillDescriptor;

/// Result of scoring one message against one skill
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCandidate<'a> {
    /// Scored skill
    pub skill: &'a SkillDescriptor,
    /// Always within [0, 1]
    pub confidence: f64,
    /// Matched keywords, in the order they were checked
    pub matched_keywords: Vec<String>,
}

impl<'a> MatchCandidate<'a> {
    /// Build a candidate, clamping the confidence into [0, 1] (NaN becomes 0)
    pub fn new(skill: &'a SkillDescriptor, confidence: f64, matched_keywords: Vec<String>) -> Self {
        let confidence = if confidence.is_nan() {
            0.0
        } else {
            confidence.clamp(0.0, 1.0)
        };
        Self {
            skill,
            confidence,
            matched_keywords,
        }
    }

    /// Candidate with confidence 0 and no matched keywords
    pub fn no_match(skill: &'a SkillDescriptor) -> Self {
        Self::new(skill, 0.0, Vec::new())
    }

    /// Name of the scored skill
    pub fn skill_name(&self) -> &str {
        &self.skill.name
    }

    /// True when any keyword matched
    pub fn is_match(&self) -> bool {
        self.confidence > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_is_clamped() {
        let skill = SkillDescriptor::new("architect", "Designs systems");

        assert_eq!(MatchCandidate::new(&skill, 1.7, vec![]).confidence, 1.0);
        assert_eq!(MatchCandidate::new(&skill, -0.2, vec![]).confidence, 0.0);
        assert_eq!(MatchCandidate::new(&skill, f64::NAN, vec![]).confidence, 0.0);
    }

    #[test]
    fn test_no_match() {
        let skill = SkillDescriptor::new("architect", "Designs systems");
        let candidate = MatchCandidate::no_match(&skill);

        assert!(!candidate.is_match());
        assert!(candidate.matched_keywords.is_empty());
        assert_eq!(candidate.skill_name(), "architect");
    }
}
