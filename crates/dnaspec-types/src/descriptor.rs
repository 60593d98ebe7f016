//! Skill metadata used for routing

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Version assigned to skills whose metadata does not declare one
pub const DEFAULT_SKILL_VERSION: &str = "1.0.0";

/// Metadata of a registered skill
///
/// Keywords are stored lowercased and sorted, so scoring walks them in a
/// stable order. Priority keywords are always a subset of `keywords`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillDescriptor {
    /// Unique skill name
    pub name: String,
    /// One-line description
    pub description: String,
    /// Lowercased routing keywords
    pub keywords: BTreeSet<String>,
    /// Keywords weighted with the priority boost
    pub priority_keywords: BTreeSet<String>,
    /// Declared version
    pub version: String,
    /// Skill directory, for skills discovered on disk
    pub source: Option<PathBuf>,
}

impl SkillDescriptor {
    /// Descriptor with no keywords and the default version
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            keywords: BTreeSet::new(),
            priority_keywords: BTreeSet::new(),
            version: DEFAULT_SKILL_VERSION.to_string(),
            source: None,
        }
    }

    /// Add keywords, normalized
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for keyword in keywords {
            if let Some(keyword) = normalize_keyword(keyword.as_ref()) {
                self.keywords.insert(keyword);
            }
        }
        self
    }

    /// Add priority keywords; they are also added to the keyword set
    /// Add priority keywords, which also join the keyword set
    pub fn with_priority_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for keyword in keywords {
            if let Some(keyword) = normalize_keyword(keyword.as_ref()) {
                self.keywords.insert(keyword.clone());
                self.priority_keywords.insert(keyword);
            }
        }
        self
    }

    /// Set the version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the skill directory
    pub fn with_source(mut self, source: impl Into<PathBuf>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Whether `keyword` carries the priority boost
    pub fn is_priority(&self, keyword: &str) -> bool {
        self.priority_keywords.contains(keyword)
    }

    /// Format: "- {name}: {description}"
    pub fn to_summary(&self) -> String {
        format!("- {}: {}", self.name, self.description)
    }
}

/// Lowercase and trim a keyword, dropping it if nothing is left
pub fn normalize_keyword(keyword: &str) -> Option<String> {
    let keyword = keyword.trim().to_lowercase();
    if keyword.is_empty() {
        None
    } else {
        Some(keyword)
    }
}
