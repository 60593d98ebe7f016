//! Intent routing over the whole registry

use dnaspec_skills::SkillsRegistry;
use dnaspec_types::MatchCandidate;
use std::cmp::Ordering;
use tracing::debug;

use crate::config::ScoringConfig;
use crate::scorer::ConfidenceScorer;

/// Ranks every registered skill against a message
///
/// Ordering is deterministic: confidence descending, then number of matched
/// keywords descending, then skill name ascending.
#[derive(Debug, Clone)]
pub struct IntentRouter {
    scorer: ConfidenceScorer,
    threshold: f64,
}

impl IntentRouter {
    /// Create a router from configuration
    #[must_use]
    pub fn new(config: &ScoringConfig) -> Self {
        Self {
            scorer: ConfidenceScorer::new(config),
            threshold: config.threshold,
        }
    }

    /// Candidates at or above their threshold, best first
    ///
    /// An empty result means no skill matched and the caller should proceed
    /// with its default behavior.
    #[must_use]
    pub fn route<'a>(&self, message: &str, registry: &'a SkillsRegistry) -> Vec<MatchCandidate<'a>> {
        let mut candidates: Vec<_> = registry
            .iter()
            .map(|skill| self.scorer.score(message, skill))
            .filter(|candidate| {
                candidate.is_match() && candidate.confidence >= self.threshold_for(registry, candidate)
            })
            .collect();

        candidates.sort_by(compare_candidates);

        debug!(
            "Routed message against {} skills: {} candidates",
            registry.len(),
            candidates.len()
        );
        candidates
    }

    /// The top candidate, if any
    #[must_use]
    pub fn best_match<'a>(
        &self,
        message: &str,
        registry: &'a SkillsRegistry,
    ) -> Option<MatchCandidate<'a>> {
        self.route(message, registry).into_iter().next()
    }

    fn threshold_for(&self, registry: &SkillsRegistry, candidate: &MatchCandidate<'_>) -> f64 {
        registry
            .threshold_for(candidate.skill_name())
            .unwrap_or(self.threshold)
    }
}

impl Default for IntentRouter {
    fn default() -> Self {
        Self::new(&ScoringConfig::default())
    }
}

fn compare_candidates(a: &MatchCandidate<'_>, b: &MatchCandidate<'_>) -> Ordering {
    b.confidence
        .total_cmp(&a.confidence)
        .then_with(|| b.matched_keywords.len().cmp(&a.matched_keywords.len()))
        .then_with(|| a.skill_name().cmp(b.skill_name()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use dnaspec_skills::{SkillConfig, SkillsLoader};
    use dnaspec_types::SkillDescriptor;
    use std::collections::HashMap;

    fn registry() -> SkillsRegistry {
        SkillsRegistry::from_descriptors([
            SkillDescriptor::new("agent-creator", "Creates agents").with_keywords(["智能体", "agent"]),
            SkillDescriptor::new("architect", "Designs systems").with_keywords(["架构", "系统设计"]),
            SkillDescriptor::new("constraint-generator", "Generates constraints")
                .with_keywords(["约束"])
                .with_priority_keywords(["生成约束"]),
            SkillDescriptor::new("constraint-lite", "Lists constraints").with_keywords(["约束"]),
        ])
    }

    #[test]
    fn test_agent_creation_routes_to_agent_creator() {
        let registry = registry();
        let router = IntentRouter::default();

        let candidates = router.route("创建一个智能体", &registry);
        assert_eq!(candidates[0].skill_name(), "agent-creator");
        assert!(candidates[0].confidence > 0.0);
        assert_eq!(candidates[0].matched_keywords, vec!["智能体"]);
    }

    #[test]
    fn test_empty_message_routes_nowhere() {
        let registry = registry();
        let router = IntentRouter::default();

        assert!(router.route("", &registry).is_empty());
        assert!(router.best_match("", &registry).is_none());
    }

    #[test]
    fn test_specific_keyword_ranks_first() {
        let registry = registry();
        let router = IntentRouter::default();

        let candidates = router.route("生成约束", &registry);
        let names: Vec<_> = candidates.iter().map(MatchCandidate::skill_name).collect();
        assert_eq!(names, vec!["constraint-generator", "constraint-lite"]);
        assert!(candidates[0].confidence > candidates[1].confidence);
    }

    #[test]
    fn test_priority_keyword_outranks_more_plain_matches() {
        let registry = SkillsRegistry::from_descriptors([
            SkillDescriptor::new("a-priority", "").with_priority_keywords(["生成约束"]),
            SkillDescriptor::new("b-generic", "").with_keywords(["生成", "约束"]),
        ]);

        let candidates = IntentRouter::default().route("生成约束", &registry);
        let names: Vec<_> = candidates.iter().map(MatchCandidate::skill_name).collect();
        assert_eq!(names, vec!["a-priority", "b-generic"]);
        assert!(candidates[0].confidence > candidates[1].confidence);
    }

    #[test]
    fn test_more_matched_keywords_break_confidence_ties() {
        let registry = SkillsRegistry::from_descriptors([
            SkillDescriptor::new("constraint-lite", "").with_keywords(["约束"]),
            SkillDescriptor::new("constraint-generator", "").with_keywords(["约束", "生成约束"]),
        ]);

        // 1 of 1.5 and 2 of 3 available: equal without any priority keyword
        let candidates = IntentRouter::default().route("生成约束", &registry);
        assert_eq!(candidates[0].confidence, candidates[1].confidence);
        assert_eq!(candidates[0].skill_name(), "constraint-generator");
    }

    #[test]
    fn test_name_breaks_full_ties() {
        let registry = SkillsRegistry::from_descriptors([
            SkillDescriptor::new("zeta", "").with_keywords(["deploy"]),
            SkillDescriptor::new("alpha", "").with_keywords(["deploy"]),
        ]);
        let router = IntentRouter::default();

        let candidates = router.route("deploy it", &registry);
        let names: Vec<_> = candidates.iter().map(MatchCandidate::skill_name).collect();
        assert_eq!(names, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_routing_is_deterministic() {
        let registry = registry();
        let router = IntentRouter::default();

        let first = router.route("设计系统架构并生成约束", &registry);
        let second = router.route("设计系统架构并生成约束", &registry);
        assert_eq!(first, second);
    }

    #[test]
    fn test_threshold_filters_weak_matches() {
        let registry = SkillsRegistry::from_descriptors([SkillDescriptor::new("architect", "")
            .with_keywords(["架构", "设计", "系统", "蓝图", "architecture"])]);

        // 1/3 passes the default 0.3, fails a 0.5 threshold
        assert_eq!(IntentRouter::default().route("系统", &registry).len(), 1);

        let strict = IntentRouter::new(&ScoringConfig {
            threshold: 0.5,
            ..ScoringConfig::default()
        });
        assert!(strict.route("系统", &registry).is_empty());
    }

    #[test]
    fn test_per_skill_threshold_overrides_global() {
        let mut overrides = HashMap::new();
        overrides.insert(
            "architect".to_string(),
            SkillConfig {
                threshold: Some(0.9),
                ..SkillConfig::default()
            },
        );
        let registry = SkillsLoader::new()
            .with_descriptors([
                SkillDescriptor::new("architect", "").with_keywords(["架构", "设计", "系统"]),
                SkillDescriptor::new("modulizer", "").with_keywords(["系统", "模块化", "重构"]),
            ])
            .with_overrides(overrides)
            .load();

        let candidates = IntentRouter::default().route("系统", &registry);
        let names: Vec<_> = candidates.iter().map(MatchCandidate::skill_name).collect();
        assert_eq!(names, vec!["modulizer"]);
    }
}
