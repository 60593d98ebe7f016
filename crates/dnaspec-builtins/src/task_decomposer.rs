//! `task-decomposer`: numbered task breakdown

use dnaspec_router::SkillHandler;
use dnaspec_types::{Context, Result, SkillDescriptor};
use tracing::debug;

use crate::common::require_request;
use crate::BUILTIN_VERSION;

/// Skill name
pub const NAME: &str = "task-decomposer";

const KEYWORDS: &[&str] = &[
    "分解任务", "任务分解", "task decomposition", "break down", "拆分", "细化", "任务分析",
    "decompose", "analyze", "分解", "细化任务", "任务拆分",
];

const PRIORITY_KEYWORDS: &[&str] = &["分解任务", "任务分解", "任务拆分"];

/// Clause boundaries
const PUNCTUATION: &[char] = &['。', '；', ';', '，', ',', '！', '!', '？', '?', '\n'];

/// Sequencing words that start a new step
const CONJUNCTIONS: &[&str] = &[
    "然后", "接着", "之后", "最后", "并且", "以及", "首先", "其次", ". ", " and then ", " then ",
    " finally ",
];

/// Leading words left over after splitting
const LEADING_WORDS: &[&str] = &["and then ", "then ", "and ", "finally ", "first ", "next "];

/// Generic phases used when the request is a single step
const PHASES: &[&str] = &[
    "Clarify scope and acceptance criteria",
    "Design the solution",
    "Implement",
    "Test and verify",
];

/// Descriptor of the `task-decomposer` skill
pub fn descriptor() -> SkillDescriptor {
    SkillDescriptor::new(
        NAME,
        "Breaks complex tasks down into ordered, independently verifiable subtasks",
    )
    .with_keywords(KEYWORDS)
    .with_priority_keywords(PRIORITY_KEYWORDS)
    .with_version(BUILTIN_VERSION)
}

/// Task breakdown generator
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskDecomposerSkill;

impl TaskDecomposerSkill {
    /// Split a request into steps at punctuation and sequencing words
    pub fn split(request: &str) -> Vec<String> {
        let mut parts: Vec<String> = request
            .split(PUNCTUATION)
            .map(str::to_string)
            .collect();

        for conjunction in CONJUNCTIONS {
            parts = parts
                .iter()
                .flat_map(|part| part.split(conjunction))
                .map(str::to_string)
                .collect();
        }

        parts
            .iter()
            .map(|part| strip_leading_words(part.trim()))
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect()
    }
}

fn strip_leading_words(mut part: &str) -> &str {
    while let Some(word) = LEADING_WORDS
        .iter()
        .find(|word| {
            part.len() > word.len()
                && part
                    .get(..word.len())
                    .is_some_and(|head| head.eq_ignore_ascii_case(word))
        })
    {
        part = part.get(word.len()..).unwrap_or_default().trim_start();
    }
    part
}

impl SkillHandler for TaskDecomposerSkill {
    fn name(&self) -> &str {
        NAME
    }

    fn generate(&self, message: &str, _context: &Context) -> Result<String> {
        let request = require_request(NAME, message)?;

        let steps = Self::split(request);
        let (subtasks, sequential) = if steps.len() > 1 {
            (steps, true)
        } else {
            let subject = steps.first().map_or(request, String::as_str);
            let phased = PHASES
                .iter()
                .map(|phase| format!("{phase}: {subject}"))
                .collect();
            (phased, false)
        };
        debug!("Decomposed request into {} subtasks", subtasks.len());

        let numbered: String = subtasks
            .iter()
            .enumerate()
            .map(|(i, task)| format!("{}. {}\n", i + 1, task))
            .collect();

        let order = if sequential {
            "Subtasks follow the order given in the request; each depends on the previous one."
        } else {
            "Single-step request, expanded into standard delivery phases."
        };

        Ok(format!(
            "# Task Breakdown\n\n\
             **Task**: {request}\n\n\
             ## Subtasks\n\n{numbered}\n\
             ## Execution Order\n\n{order}\n"
        ))
    }
}
