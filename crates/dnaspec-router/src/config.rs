//! Configuration types for scoring, routing and the hook gate

use dnaspec_types::{DnaspecError, Result};
use serde::Deserialize;

/// Confidence scoring and routing configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ScoringConfig {
    /// Minimum confidence for a candidate to be returned by the router
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Weight multiplier for priority keywords (plain keywords weigh 1.0)
    #[serde(default = "default_priority_boost")]
    pub priority_boost: f64,

    /// Matched weight at which confidence saturates to 1.0
    ///
    /// The denominator is `min(available_weight, saturation_weight)`, where
    /// the available weight counts every keyword at the boosted weight. A
    /// value of zero or less divides by the available weight alone.
    #[serde(default = "default_saturation_weight")]
    pub saturation_weight: f64,
}

fn default_threshold() -> f64 {
    0.3
}

fn default_priority_boost() -> f64 {
    1.5
}

fn default_saturation_weight() -> f64 {
    3.0
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            priority_boost: default_priority_boost(),
            saturation_weight: default_saturation_weight(),
        }
    }
}

impl ScoringConfig {
    /// Reject values that would break the [0, 1] confidence range
    ///
    /// # Errors
    /// Returns [`DnaspecError::Config`] for an out-of-range threshold or a
    /// non-positive boost
    pub fn validate(&self) -> Result<()> {
        validate_unit("scoring.threshold", self.threshold)?;
        if !(self.priority_boost.is_finite() && self.priority_boost > 0.0) {
            return Err(DnaspecError::Config(format!(
                "scoring.priority_boost must be positive, got {}",
                self.priority_boost
            )));
        }
        if self.saturation_weight.is_nan() {
            return Err(DnaspecError::Config(
                "scoring.saturation_weight must be a number".to_string(),
            ));
        }
        Ok(())
    }
}

/// Hook gate configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct HookConfig {
    /// Master switch; a disabled hook never intercepts
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Minimum confidence for the best keyword match to be invoked automatically
    #[serde(default = "default_auto_invoke_threshold")]
    pub auto_invoke_threshold: f64,

    /// Skills allowed to run; empty allows all
    #[serde(default)]
    pub enabled_skills: Vec<String>,

    /// Case-insensitive regexes; matching messages are never intercepted
    #[serde(default)]
    pub disabled_patterns: Vec<String>,

    /// Prefix of explicit skill commands, followed by the skill name
    #[serde(default = "default_command_prefix")]
    pub command_prefix: String,
}

fn default_enabled() -> bool {
    true
}

fn default_auto_invoke_threshold() -> f64 {
    0.6
}

fn default_command_prefix() -> String {
    "/speckit.dnaspec.".to_string()
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            auto_invoke_threshold: default_auto_invoke_threshold(),
            enabled_skills: Vec::new(),
            disabled_patterns: Vec::new(),
            command_prefix: default_command_prefix(),
        }
    }
}

impl HookConfig {
    /// Check if a skill may run
    #[must_use]
    pub fn is_skill_enabled(&self, skill_name: &str) -> bool {
        self.enabled_skills.is_empty() || self.enabled_skills.iter().any(|s| s == skill_name)
    }

    /// Reject an out-of-range auto-invoke threshold
    ///
    /// # Errors
    /// Returns [`DnaspecError::Config`] when the threshold is outside [0, 1]
    pub fn validate(&self) -> Result<()> {
        validate_unit("hook.auto_invoke_threshold", self.auto_invoke_threshold)
    }
}

fn validate_unit(key: &str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(DnaspecError::Config(format!(
            "{key} must be within [0, 1], got {value}"
        )))
    }
}
