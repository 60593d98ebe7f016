//! DNASPEC Built-in Skills
//!
//! The six skills shipped with DNASPEC. Each one has a descriptor with
//! curated Chinese and English keywords and a template handler that turns the
//! request into a Markdown document.
//!
//! | Skill | Output |
//! |-------|--------|
//! | `architect` | Architecture outline |
//! | `agent-creator` | Agent definition |
//! | `task-decomposer` | Numbered task breakdown |
//! | `constraint-generator` | Domain-aware constraint list |
//! | `dapi-checker` | Interface consistency checklist |
//! | `modulizer` | Modularization report |

#![deny(unsafe_code, dead_code, unused_imports, unused_variables, missing_docs)]

mod common;

pub mod agent_creator;
pub mod architect;
pub mod constraint_generator;
pub mod dapi_checker;
pub mod modulizer;
pub mod task_decomposer;

use dnaspec_router::SkillHandlers;
use dnaspec_types::SkillDescriptor;

pub use agent_creator::AgentCreatorSkill;
pub use architect::ArchitectSkill;
pub use constraint_generator::ConstraintGeneratorSkill;
pub use dapi_checker::DapiCheckerSkill;
pub use modulizer::ModulizerSkill;
pub use task_decomposer::TaskDecomposerSkill;

/// Version reported by every built-in skill
pub const BUILTIN_VERSION: &str = "2.0.0";

/// Descriptors of all built-in skills
pub fn builtin_descriptors() -> Vec<SkillDescriptor> {
    vec![
        architect::descriptor(),
        agent_creator::descriptor(),
        task_decomposer::descriptor(),
        constraint_generator::descriptor(),
        dapi_checker::descriptor(),
        modulizer::descriptor(),
    ]
}

/// Handlers for all built-in skills
pub fn builtin_handlers() -> SkillHandlers {
    SkillHandlers::new()
        .with(ArchitectSkill)
        .with(AgentCreatorSkill)
        .with(TaskDecomposerSkill)
        .with(ConstraintGeneratorSkill)
        .with(DapiCheckerSkill)
        .with(ModulizerSkill)
}
