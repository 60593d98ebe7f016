//! Skill invocation with envelope packaging
//!
//! The invoker is the boundary where handler failures stop: errors and
//! panics become error-carrying envelopes and never reach the host.

use dnaspec_skills::SkillsRegistry;
use dnaspec_types::{Context, DnaspecError, MatchCandidate, MatchType, ResponseEnvelope, Result};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{error, info, warn};

use crate::handler::{DocumentHandler, SkillHandler, SkillHandlers};

/// Runs skill handlers against a registry
#[derive(Debug, Clone, Copy)]
pub struct SkillInvoker<'a> {
    registry: &'a SkillsRegistry,
    handlers: &'a SkillHandlers,
}

impl<'a> SkillInvoker<'a> {
    /// Create an invoker over a registry and its handlers
    #[must_use]
    pub fn new(registry: &'a SkillsRegistry, handlers: &'a SkillHandlers) -> Self {
        Self { registry, handlers }
    }

    /// Invoke the skill of a routing candidate
    #[must_use]
    pub fn invoke(
        &self,
        candidate: &MatchCandidate<'_>,
        message: &str,
        context: &Context,
        match_type: MatchType,
    ) -> ResponseEnvelope {
        self.invoke_by_name(candidate.skill_name(), message, context, match_type)
            .with_candidate(candidate)
    }

    /// Invoke a skill by name
    ///
    /// An unknown name yields an envelope with `skill_name: null` and a
    /// `skill_not_found` error.
    #[must_use]
    pub fn invoke_by_name(
        &self,
        name: &str,
        message: &str,
        context: &Context,
        match_type: MatchType,
    ) -> ResponseEnvelope {
        let Some(handler) = self.resolve(name) else {
            warn!("Cannot invoke unknown skill '{}'", name);
            return ResponseEnvelope::failure(
                None,
                &DnaspecError::SkillNotFound(name.to_string()),
                match_type,
            );
        };

        let version = self.registry.get(name).map(|skill| skill.version.clone());

        let envelope = match run_handler(handler.as_ref(), message, context) {
            Ok(content) => {
                info!("Skill '{}' produced {} bytes", name, content.len());
                ResponseEnvelope::success(name, content, match_type)
            }
            Err(e) => {
                error!("Skill '{}' failed: {}", name, e);
                ResponseEnvelope::failure(Some(name.to_string()), &e, match_type)
            }
        };

        match version {
            Some(version) => envelope.with_metadata("skill_version", version),
            None => envelope,
        }
    }

    /// Dedicated handler first, then the skill's own document
    ///
    /// Only registered skills resolve; a handler alone is not enough.
    fn resolve(&self, name: &str) -> Option<Arc<dyn SkillHandler>> {
        let skill = self.registry.get(name)?;
        if let Some(handler) = self.handlers.get(name) {
            return Some(handler);
        }

        let source = skill.source.clone()?;
        Some(Arc::new(DocumentHandler::new(name, source)))
    }
}

/// Run a handler, turning a panic into [`DnaspecError::SkillPanic`]
fn run_handler(handler: &dyn SkillHandler, message: &str, context: &Context) -> Result<String> {
    match panic::catch_unwind(AssertUnwindSafe(|| handler.generate(message, context))) {
        Ok(result) => result,
        Err(payload) => {
            let message = if let Some(s) = payload.downcast_ref::<&str>() {
                (*s).to_string()
            } else if let Some(s) = payload.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };

            Err(DnaspecError::SkillPanic {
                skill: handler.name().to_string(),
                message,
            })
        }
    }
}
