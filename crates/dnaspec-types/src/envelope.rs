//! Response envelope returned to the host for every message

use crate::{DnaspecError, MatchCandidate};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// How the skill behind an envelope was selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchType {
    /// Slash command naming the skill
    Explicit,
    /// Keyword confidence routing
    Keyword,
    /// No skill was selected
    None,
}

impl MatchType {
    /// Wire name used in `metadata.match_type`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Explicit => "explicit",
            Self::Keyword => "keyword",
            Self::None => "none",
        }
    }
}

/// Response returned to the host CLI for every message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope {
    /// Skill that handled the message, `None` when no skill ran
    pub skill_name: Option<String>,
    /// Generated output, empty unless a skill succeeded
    pub content: String,
    /// Routing confidence in [0, 1]
    pub confidence: f64,
    /// Keywords that matched, or the command token for explicit commands
    pub matched_keywords: Vec<String>,
    /// Error message when the invocation failed
    pub error: Option<String>,
    /// Invocation id, timestamp, match type and error kind
    #[serde(default)]
    pub metadata: Map<String, Value>,
}

impl ResponseEnvelope {
    fn base(skill_name: Option<String>, content: String, match_type: MatchType) -> Self {
        let mut metadata = Map::new();
        metadata.insert(
            "invocation_id".to_string(),
            Value::String(Uuid::new_v4().to_string()),
        );
        metadata.insert(
            "timestamp".to_string(),
            Value::String(Utc::now().to_rfc3339()),
        );
        metadata.insert(
            "match_type".to_string(),
            Value::String(match_type.as_str().to_string()),
        );

        Self {
            skill_name,
            content,
            confidence: 0.0,
            matched_keywords: Vec::new(),
            error: None,
            metadata,
        }
    }

    /// A skill produced `content`
    pub fn success(
        skill_name: impl Into<String>,
        content: impl Into<String>,
        match_type: MatchType,
    ) -> Self {
        Self::base(Some(skill_name.into()), content.into(), match_type)
    }

    /// No skill handled the message; the host continues with its default behavior
    pub fn unhandled() -> Self {
        Self::base(None, String::new(), MatchType::None)
    }

    /// A failure, described in `error` and `metadata.error_kind`
    pub fn failure(skill_name: Option<String>, error: &DnaspecError, match_type: MatchType) -> Self {
        let mut envelope = Self::base(skill_name, String::new(), match_type);
        envelope.error = Some(error.to_string());
        envelope.metadata.insert(
            "error_kind".to_string(),
            Value::String(error.kind().to_string()),
        );
        envelope
    }

    /// Copy confidence and matched keywords from a routing candidate
    pub fn with_candidate(mut self, candidate: &MatchCandidate<'_>) -> Self {
        self.confidence = candidate.confidence;
        self.matched_keywords = candidate.matched_keywords.clone();
        self
    }

    /// Set confidence (clamped into [0, 1]) and matched keywords
    pub fn with_confidence(mut self, confidence: f64, matched_keywords: Vec<String>) -> Self {
        self.confidence = confidence.clamp(0.0, 1.0);
        self.matched_keywords = matched_keywords;
        self
    }

    /// Add a metadata entry
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// True when a skill ran and produced content
    pub fn is_handled(&self) -> bool {
        self.skill_name.is_some() && self.error.is_none()
    }

    /// Stable error kind, for failures
    pub fn error_kind(&self) -> Option<&str> {
        self.metadata.get("error_kind").and_then(Value::as_str)
    }

    /// `explicit`, `keyword` or `none`
    pub fn match_type(&self) -> Option<&str> {
        self.metadata.get("match_type").and_then(Value::as_str)
    }

    /// Serialize as a single JSON line
    pub fn to_json_line(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            r#"{"skill_name":null,"content":"","confidence":0.0,"matched_keywords":[],"error":"failed to serialize envelope"}"#
                .to_string()
        })
    }
}
