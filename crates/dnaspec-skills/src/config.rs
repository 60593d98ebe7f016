//! Configuration types for skill discovery

use serde::Deserialize;
use std::collections::HashMap;

use crate::keywords::DEFAULT_MIN_KEYWORD_LENGTH;

/// Skill discovery configuration
#[derive(Debug, Deserialize, Clone)]
pub struct SkillsConfig {
    /// Extra skills directories (`~` is expanded by the caller)
    #[serde(default)]
    pub directories: Vec<String>,

    /// Scan `~/.dnaspec/skills`
    #[serde(default = "default_true")]
    pub personal: bool,

    /// Scan `./.dnaspec/skills`
    #[serde(default = "default_true")]
    pub project: bool,

    /// Register the built-in skills before scanning directories
    #[serde(default = "default_true")]
    pub builtins: bool,

    /// Minimum length of extracted keywords, in characters
    #[serde(default = "default_min_keyword_length")]
    pub min_keyword_length: usize,

    /// Per-skill overrides, keyed by skill name
    #[serde(default)]
    pub overrides: HashMap<String, SkillConfig>,
}

fn default_true() -> bool {
    true
}

fn default_min_keyword_length() -> usize {
    DEFAULT_MIN_KEYWORD_LENGTH
}

impl Default for SkillsConfig {
    fn default() -> Self {
        Self {
            directories: Vec::new(),
            personal: true,
            project: true,
            builtins: true,
            min_keyword_length: default_min_keyword_length(),
            overrides: HashMap::new(),
        }
    }
}

/// Per-skill routing options
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct SkillConfig {
    /// Routing threshold for this skill, replacing the global one
    #[serde(default)]
    pub threshold: Option<f64>,

    /// Curated keywords merged into the skill's keyword set
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Curated keywords that score with the priority boost
    #[serde(default)]
    pub priority_keywords: Vec<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_table() {
        let config: SkillsConfig = toml::from_str("").expect("Failed to parse TOML");
        assert!(config.personal);
        assert!(config.project);
        assert!(config.builtins);
        assert_eq!(config.min_keyword_length, DEFAULT_MIN_KEYWORD_LENGTH);
        assert!(config.overrides.is_empty());
    }

    #[test]
    fn test_toml_overrides() {
        let toml_str = r#"
            directories = ["~/work/skills"]
            personal = false

            [overrides.constraint-generator]
            threshold = 0.2
            keywords = ["规则"]
            priority_keywords = ["生成约束"]
        "#;

        let config: SkillsConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
        assert_eq!(config.directories, vec!["~/work/skills"]);
        assert!(!config.personal);

        let skill = config
            .overrides
            .get("constraint-generator")
            .expect("Override not found");
        assert_eq!(skill.threshold, Some(0.2));
        assert_eq!(skill.keywords, vec!["规则"]);
        assert_eq!(skill.priority_keywords, vec!["生成约束"]);
    }
}
