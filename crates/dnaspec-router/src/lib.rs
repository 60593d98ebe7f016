//! DNASPEC Router
//!
//! Confidence routing and invocation of DNASPEC skills.
//!
//! ## Features
//!
//! - Keyword overlap scoring with priority keywords and saturation
//! - Deterministic ranking of every registered skill
//! - Typed skill handlers, with a `SKILL.md` document fallback
//! - Hook gate for host CLI messages: explicit commands, disabled patterns,
//!   allow lists and an auto-invoke threshold
//!
//! Every message yields a [`ResponseEnvelope`](dnaspec_types::ResponseEnvelope);
//! handler errors and panics are reported in the envelope and never propagate.

#![deny(unsafe_code, dead_code, unused_imports, unused_variables, missing_docs)]

pub mod config;
pub mod handler;
pub mod hook;
pub mod invoker;
pub mod router;
pub mod scorer;

pub use config::{HookConfig, ScoringConfig};
pub use handler::{DocumentHandler, SkillHandler, SkillHandlers};
pub use hook::HookSystem;
pub use invoker::SkillInvoker;
pub use router::IntentRouter;
pub use scorer::ConfidenceScorer;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        ConfidenceScorer, HookConfig, HookSystem, IntentRouter, ScoringConfig, SkillHandler,
        SkillHandlers, SkillInvoker,
    };
}
