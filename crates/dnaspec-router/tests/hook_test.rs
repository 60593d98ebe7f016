//! End-to-end hook handling over skills discovered on disk

use dnaspec_router::{HookConfig, HookSystem, ScoringConfig, SkillHandler, SkillHandlers};
use dnaspec_skills::SkillsLoader;
use dnaspec_types::{Context, Result, SkillDescriptor};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const CODE_REVIEW: &str = "---
name: code-review
description: Reviews pull requests
version: 2.1.0
keywords: [代码审查]
---
# Code Review

Check naming and error handling.
";

fn write_skill(root: &Path, dir: &str, content: &str) {
    let skill_dir = root.join(dir);
    fs::create_dir_all(&skill_dir).unwrap();
    fs::write(skill_dir.join("SKILL.md"), content).unwrap();
}

struct AgentCreator;

impl SkillHandler for AgentCreator {
    fn name(&self) -> &str {
        "agent-creator"
    }

    fn generate(&self, message: &str, context: &Context) -> Result<String> {
        let domain = context
            .get("domain")
            .and_then(Value::as_str)
            .unwrap_or("general");
        Ok(format!("Agent for {domain}: {message}"))
    }
}

fn hook_over(root: &Path, config: HookConfig) -> HookSystem {
    let registry = SkillsLoader::new()
        .with_descriptors([SkillDescriptor::new("agent-creator", "Creates agents")
            .with_keywords(["智能体"])])
        .add_directory(root)
        .load();
    let handlers = SkillHandlers::new().with(AgentCreator);
    HookSystem::new(registry, handlers, &ScoringConfig::default(), config).unwrap()
}

#[test]
fn test_agent_request_uses_dedicated_handler_and_context() {
    let root = TempDir::new().unwrap();
    write_skill(root.path(), "code-review", CODE_REVIEW);
    let hook = hook_over(root.path(), HookConfig::default());

    let mut context = Context::new();
    context.insert("domain".to_string(), json!("finance"));
    let envelope = hook.handle("创建一个智能体", &context);

    assert_eq!(envelope.skill_name.as_deref(), Some("agent-creator"));
    assert_eq!(envelope.content, "Agent for finance: 创建一个智能体");
    assert_eq!(envelope.matched_keywords, vec!["智能体"]);
}

#[test]
fn test_discovered_skill_serves_its_document() {
    let root = TempDir::new().unwrap();
    write_skill(root.path(), "code-review", CODE_REVIEW);
    let hook = hook_over(root.path(), HookConfig::default());

    let envelope = hook.handle("代码审查 code review", &Context::new());

    assert_eq!(envelope.skill_name.as_deref(), Some("code-review"));
    assert!(envelope.content.starts_with("# Skill: code-review"));
    assert!(envelope.content.contains("代码审查 code review"));
    assert!(envelope.content.contains("Check naming and error handling."));
    assert!((envelope.confidence - 1.0).abs() < 1e-9);
    assert_eq!(envelope.metadata["skill_version"], "2.1.0");
}

#[test]
fn test_explicit_command_for_discovered_skill() {
    let root = TempDir::new().unwrap();
    write_skill(root.path(), "code-review", CODE_REVIEW);
    let hook = hook_over(root.path(), HookConfig::default());

    let envelope = hook.handle("/code-review look at the diff", &Context::new());

    assert_eq!(envelope.skill_name.as_deref(), Some("code-review"));
    assert!(envelope.content.contains("look at the diff"));
    assert_eq!(envelope.match_type(), Some("explicit"));
}

#[test]
fn test_weak_match_is_left_to_the_host() {
    let root = TempDir::new().unwrap();
    write_skill(root.path(), "code-review", CODE_REVIEW);
    let hook = hook_over(root.path(), HookConfig::default());

    let envelope = hook.handle("请帮我做代码审查", &Context::new());

    assert!(envelope.skill_name.is_none());
    assert!(envelope.error.is_none());
    assert_eq!(envelope.metadata["candidate"], "code-review");
}

#[test]
fn test_unrelated_message_is_unhandled() {
    let root = TempDir::new().unwrap();
    write_skill(root.path(), "code-review", CODE_REVIEW);
    let hook = hook_over(root.path(), HookConfig::default());

    let envelope = hook.handle("write a poem about autumn", &Context::new());

    assert!(envelope.skill_name.is_none());
    assert_eq!(envelope.confidence, 0.0);
    assert!(envelope.matched_keywords.is_empty());
}

#[test]
fn test_skill_removed_after_loading_reports_execution_error() {
    let root = TempDir::new().unwrap();
    write_skill(root.path(), "code-review", CODE_REVIEW);
    let hook = hook_over(root.path(), HookConfig::default());

    fs::remove_dir_all(root.path().join("code-review")).unwrap();
    let envelope = hook.handle("/code-review anything", &Context::new());

    assert_eq!(envelope.skill_name.as_deref(), Some("code-review"));
    assert_eq!(envelope.error_kind(), Some("skill_execution"));
}

#[test]
fn test_envelope_wire_format() {
    let root = TempDir::new().unwrap();
    let hook = hook_over(root.path(), HookConfig::default());

    for message in [json!("创建一个智能体"), json!(7), json!("")] {
        let line = hook.handle_value(&message, &Context::new()).to_json_line();
        assert!(!line.contains('\n'));

        let value: Value = serde_json::from_str(&line).unwrap();
        for key in ["skill_name", "content", "confidence", "matched_keywords", "error", "metadata"] {
            assert!(value.get(key).is_some(), "missing {key} in {line}");
        }
    }
}

#[test]
fn test_hook_config_from_toml() {
    let config: HookConfig = toml::from_str(
        r#"
auto_invoke_threshold = 0.9
disabled_patterns = ["^/help"]
"#,
    )
    .unwrap();
    let root = TempDir::new().unwrap();
    let hook = hook_over(root.path(), config);

    assert!(hook.config().enabled);
    assert_eq!(hook.config().auto_invoke_threshold, 0.9);
    assert_eq!(hook.config().command_prefix, "/speckit.dnaspec.");
    assert_eq!(hook.registry().len(), 1);

    // a single plain keyword scores 2/3, short of 0.9
    let envelope = hook.handle("创建一个智能体", &Context::new());
    assert!(!envelope.is_handled());
    assert_eq!(envelope.metadata["reason"], "confidence_below_threshold");
    assert!(hook.handle("/agent-creator 创建一个智能体", &Context::new()).is_handled());
}
