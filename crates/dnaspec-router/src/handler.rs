//! Typed skill handlers
//!
//! Every skill that produces content implements [`SkillHandler`]. Handlers are
//! looked up by skill name in [`SkillHandlers`]; skills discovered on disk
//! without a dedicated handler fall back to [`DocumentHandler`].

use dnaspec_skills::skill;
use dnaspec_types::{Context, DnaspecError, Result};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn};

/// Content generation for one skill
pub trait SkillHandler: Send + Sync {
    /// Name of the skill this handler serves
    fn name(&self) -> &str;

    /// Generate the skill's response for a user message
    ///
    /// # Errors
    /// Returns [`DnaspecError::SkillExecution`] when the request cannot be served
    fn generate(&self, message: &str, context: &Context) -> Result<String>;
}

/// Name → handler map
#[derive(Clone, Default)]
pub struct SkillHandlers {
    handlers: HashMap<String, Arc<dyn SkillHandler>>,
}

impl SkillHandlers {
    /// Create an empty handler map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler under its own name, replacing any previous one
    pub fn register(&mut self, handler: impl SkillHandler + 'static) {
        let name = handler.name().to_string();
        debug!("Registering handler for skill '{}'", name);
        if self.handlers.insert(name.clone(), Arc::new(handler)).is_some() {
            warn!("Replacing existing handler for skill '{}'", name);
        }
    }

    /// Builder form of [`SkillHandlers::register`]
    #[must_use]
    pub fn with(mut self, handler: impl SkillHandler + 'static) -> Self {
        self.register(handler);
        self
    }

    /// Get a handler by skill name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn SkillHandler>> {
        self.handlers.get(name).cloned()
    }

    /// Whether a handler is registered for this skill
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Number of registered handlers
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if no handler is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for SkillHandlers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<_> = self.handlers.keys().collect();
        names.sort();
        f.debug_struct("SkillHandlers").field("handlers", &names).finish()
    }
}

/// Serves a discovered skill by rendering its `SKILL.md` instructions
///
/// The body is read on activation, not at discovery time.
#[derive(Debug, Clone)]
pub struct DocumentHandler {
    name: String,
    source: PathBuf,
}

impl DocumentHandler {
    /// Handler for the skill stored in `source`
    pub fn new(name: impl Into<String>, source: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
        }
    }
}

impl SkillHandler for DocumentHandler {
    fn name(&self) -> &str {
        &self.name
    }

    fn generate(&self, message: &str, _context: &Context) -> Result<String> {
        let body = skill::read_body(&self.source)
            .map_err(|e| DnaspecError::execution(&self.name, format!("{e:#}")))?;

        Ok(format!(
            "# Skill: {}\n\n## Request\n\n{}\n\n## Instructions\n\n{}",
            self.name,
            message.trim(),
            body.trim_end()
        ))
    }
}
