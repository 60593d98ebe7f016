//! Hook system: the single entry point for host CLI messages
//!
//! Decides whether a message is intercepted at all, resolves explicit skill
//! commands, routes everything else by keyword confidence, and always answers
//! with a [`ResponseEnvelope`].

use dnaspec_skills::SkillsRegistry;
use dnaspec_types::{
    Context, DnaspecError, MatchCandidate, MatchType, ResponseEnvelope, Result,
};
use regex::{Regex, RegexBuilder};
use serde_json::Value;
use tracing::{debug, info};

use crate::config::{HookConfig, ScoringConfig};
use crate::handler::SkillHandlers;
use crate::invoker::SkillInvoker;
use crate::router::IntentRouter;

/// Confidence reported for skills selected by an explicit command
pub const EXPLICIT_COMMAND_CONFIDENCE: f64 = 0.95;

/// Prefix tried when a commanded skill name is not registered as-is
const SKILL_NAME_PREFIX: &str = "dnaspec-";

/// Owns the registry and handlers for the lifetime of the process
#[derive(Debug)]
pub struct HookSystem {
    registry: SkillsRegistry,
    handlers: SkillHandlers,
    router: IntentRouter,
    config: HookConfig,
    disabled_patterns: Vec<Regex>,
}

/// A message that names its skill directly
#[derive(Debug, PartialEq)]
struct ExplicitCommand<'m> {
    /// Command token as typed, e.g. `/speckit.dnaspec.architect`
    token: &'m str,
    /// Requested skill name, before registry resolution
    skill: &'m str,
    /// Remainder of the message, passed to the skill
    request: &'m str,
    /// Whether the configured command prefix was used
    prefixed: bool,
}

impl HookSystem {
    /// Create a hook system
    ///
    /// # Errors
    /// Returns [`DnaspecError::Config`] for invalid thresholds or disabled patterns
    pub fn new(
        registry: SkillsRegistry,
        handlers: SkillHandlers,
        scoring: &ScoringConfig,
        config: HookConfig,
    ) -> Result<Self> {
        scoring.validate()?;
        config.validate()?;

        let disabled_patterns = config
            .disabled_patterns
            .iter()
            .map(|pattern| {
                RegexBuilder::new(pattern)
                    .case_insensitive(true)
                    .build()
                    .map_err(|e| {
                        DnaspecError::Config(format!("invalid disabled pattern '{pattern}': {e}"))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        info!(
            "Hook system ready: {} skills, {} handlers, {} disabled patterns",
            registry.len(),
            handlers.len(),
            disabled_patterns.len()
        );

        Ok(Self {
            registry,
            handlers,
            router: IntentRouter::new(scoring),
            config,
            disabled_patterns,
        })
    }

    /// The loaded registry
    #[must_use]
    pub fn registry(&self) -> &SkillsRegistry {
        &self.registry
    }

    /// The hook configuration
    #[must_use]
    pub fn config(&self) -> &HookConfig {
        &self.config
    }

    /// Ranked candidates for a message, without invoking anything
    #[must_use]
    pub fn route(&self, message: &str) -> Vec<MatchCandidate<'_>> {
        self.router.route(message, &self.registry)
    }

    /// Handle a message whose type is not yet known
    ///
    /// Anything other than a JSON string is invalid input and yields an
    /// unhandled envelope with confidence 0.
    #[must_use]
    pub fn handle_value(&self, message: &Value, context: &Context) -> ResponseEnvelope {
        match message {
            Value::String(text) => self.handle(text, context),
            other => {
                let error = DnaspecError::InvalidInput(format!(
                    "message must be a string, got {}",
                    json_type_name(other)
                ));
                debug!("{}", error);
                ResponseEnvelope::failure(None, &error, MatchType::None)
            }
        }
    }

    /// Handle one user message
    #[must_use]
    pub fn handle(&self, message: &str, context: &Context) -> ResponseEnvelope {
        let request = message.trim();

        if !self.config.enabled {
            debug!("Hook disabled, not intercepting");
            return ResponseEnvelope::unhandled();
        }

        if request.is_empty() {
            return ResponseEnvelope::unhandled();
        }

        if self.is_pattern_disabled(request) {
            debug!("Message matches a disabled pattern, not intercepting");
            return ResponseEnvelope::unhandled().with_metadata("reason", "disabled_pattern");
        }

        if let Some(command) = self.parse_command(request) {
            return self.handle_command(&command, context);
        }

        self.handle_routed(request, context)
    }

    fn handle_command(&self, command: &ExplicitCommand<'_>, context: &Context) -> ResponseEnvelope {
        let Some(skill) = self.resolve_skill_name(command.skill) else {
            let error = DnaspecError::SkillNotFound(command.skill.to_string());
            return ResponseEnvelope::failure(None, &error, MatchType::Explicit);
        };

        let matched = vec![command.token.to_string()];

        if !self.config.is_skill_enabled(skill) {
            let error = DnaspecError::SkillDisabled(skill.to_string());
            return ResponseEnvelope::failure(Some(skill.to_string()), &error, MatchType::Explicit)
                .with_confidence(EXPLICIT_COMMAND_CONFIDENCE, matched);
        }

        info!(
            "Explicit command for skill '{}' (prefixed: {})",
            skill, command.prefixed
        );
        self.invoker()
            .invoke_by_name(skill, command.request, context, MatchType::Explicit)
            .with_confidence(EXPLICIT_COMMAND_CONFIDENCE, matched)
    }

    fn handle_routed(&self, request: &str, context: &Context) -> ResponseEnvelope {
        let Some(best) = self.router.best_match(request, &self.registry) else {
            debug!("No skill matched");
            return ResponseEnvelope::unhandled();
        };

        if best.confidence < self.config.auto_invoke_threshold {
            debug!(
                "Best match '{}' at {:.2} is below auto-invoke threshold {:.2}",
                best.skill_name(),
                best.confidence,
                self.config.auto_invoke_threshold
            );
            return ResponseEnvelope::unhandled()
                .with_candidate(&best)
                .with_metadata("reason", "confidence_below_threshold")
                .with_metadata("candidate", best.skill_name());
        }

        if !self.config.is_skill_enabled(best.skill_name()) {
            let error = DnaspecError::SkillDisabled(best.skill_name().to_string());
            return ResponseEnvelope::failure(
                Some(best.skill_name().to_string()),
                &error,
                MatchType::Keyword,
            )
            .with_candidate(&best);
        }

        info!(
            "Routing to skill '{}' (confidence {:.2})",
            best.skill_name(),
            best.confidence
        );
        self.invoker()
            .invoke(&best, request, context, MatchType::Keyword)
    }

    fn invoker(&self) -> SkillInvoker<'_> {
        SkillInvoker::new(&self.registry, &self.handlers)
    }

    fn is_pattern_disabled(&self, text: &str) -> bool {
        self.disabled_patterns.iter().any(|re| re.is_match(text))
    }

    /// Recognize `<prefix><skill> ...` and `/<skill> ...`
    ///
    /// A bare slash command only counts when it names a registered skill;
    /// other slash commands belong to the host.
    fn parse_command<'m>(&self, request: &'m str) -> Option<ExplicitCommand<'m>> {
        let (token, rest) = request
            .split_once(char::is_whitespace)
            .unwrap_or((request, ""));

        let prefix = self.config.command_prefix.as_str();
        if !prefix.is_empty()
            && token.len() > prefix.len()
            && token.is_char_boundary(prefix.len())
            && token[..prefix.len()].eq_ignore_ascii_case(prefix)
        {
            return Some(ExplicitCommand {
                token,
                skill: &token[prefix.len()..],
                request: rest.trim(),
                prefixed: true,
            });
        }

        let skill = token.strip_prefix('/')?;
        self.resolve_skill_name(skill)?;
        Some(ExplicitCommand {
            token,
            skill,
            request: rest.trim(),
            prefixed: false,
        })
    }

    /// Registered name for a commanded skill, also trying the `dnaspec-` prefix
    fn resolve_skill_name(&self, skill: &str) -> Option<&str> {
        if let Some(descriptor) = self.registry.get(skill) {
            return Some(descriptor.name.as_str());
        }
        self.registry
            .get(&format!("{SKILL_NAME_PREFIX}{skill}"))
            .map(|descriptor| descriptor.name.as_str())
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
