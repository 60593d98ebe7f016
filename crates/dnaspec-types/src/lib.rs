//! DNASPEC Types - Core types for the DNASPEC skill router
//!
//! Skill descriptors, routing candidates, response envelopes and the shared
//! error enum.

#![deny(missing_docs)]

use std::collections::HashMap;

mod candidate;
mod descriptor;
mod envelope;
mod error;

pub use candidate::MatchCandidate;
pub use descriptor::{normalize_keyword, SkillDescriptor, DEFAULT_SKILL_VERSION};
pub use envelope::{MatchType, ResponseEnvelope};
pub use error::{DnaspecError, Result};

/// Optional session metadata passed along with a user message
pub type Context = HashMap<String, serde_json::Value>;
