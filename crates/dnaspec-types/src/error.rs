//! Error types shared by the DNASPEC crates

use std::path::PathBuf;
use thiserror::Error;

/// DNASPEC errors
///
/// None of these ever escape the hook entry point; they are converted into
/// skipped registry entries or error-carrying envelopes.
#[derive(Debug, Error)]
pub enum DnaspecError {
    /// A skill's metadata file is missing or malformed
    #[error("Failed to load skill from {}: {reason}", .path.display())]
    RegistryLoad {
        /// Skill directory or metadata file
        path: PathBuf,
        /// Failure reason
        reason: String,
    },

    /// The user message is not usable input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A skill handler returned an error
    #[error("Skill '{skill}' failed: {reason}")]
    SkillExecution {
        /// Skill name
        skill: String,
        /// Failure reason
        reason: String,
    },

    /// A skill handler panicked
    #[error("Skill '{skill}' panicked: {message}")]
    SkillPanic {
        /// Skill name
        skill: String,
        /// Panic payload, when it was a string
        message: String,
    },

    /// No skill with this name is registered
    #[error("Skill '{0}' not found")]
    SkillNotFound(String),

    /// The skill exists but the hook configuration does not allow it
    #[error("Skill '{0}' is disabled")]
    SkillDisabled(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DnaspecError {
    /// Stable machine-readable kind, surfaced as `metadata.error_kind`
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RegistryLoad { .. } => "registry_load",
            Self::InvalidInput(_) => "invalid_input",
            Self::SkillExecution { .. } => "skill_execution",
            Self::SkillPanic { .. } => "skill_panic",
            Self::SkillNotFound(_) => "skill_not_found",
            Self::SkillDisabled(_) => "skill_disabled",
            Self::Config(_) => "config",
            Self::Json(_) => "json",
            Self::Io(_) => "io",
        }
    }

    /// Shorthand for a handler failure
    pub fn execution(skill: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SkillExecution {
            skill: skill.into(),
            reason: reason.into(),
        }
    }
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, DnaspecError>;
