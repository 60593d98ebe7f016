//! DNASPEC Skills
//!
//! Skill discovery for the DNASPEC router.
//!
//! ## Features
//!
//! - `SKILL.md` front matter parsing (YAML, with a `key: value` fallback)
//! - Multiple skills directories (personal, project, configured)
//! - Keyword extraction from skill names and descriptions
//! - Curated and priority keywords from front matter or configuration
//! - Immutable registry, built once and shared read-only
//!
//! Malformed skills are skipped with a warning and recorded in
//! [`SkillsRegistry::load_errors`]; loading never fails as a whole.

#![deny(unsafe_code, dead_code, unused_imports, unused_variables, missing_docs)]

pub mod config;
pub mod keywords;
pub mod registry;
pub mod skill;

pub use config::{SkillConfig, SkillsConfig};
pub use keywords::KeywordExtractor;
pub use registry::{SkillsLoader, SkillsRegistry};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{KeywordExtractor, SkillConfig, SkillsConfig, SkillsLoader, SkillsRegistry};
}
