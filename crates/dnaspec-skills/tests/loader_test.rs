//! Registry loading against real skill directories

use dnaspec_skills::{SkillsLoader, SkillsRegistry};
use dnaspec_types::SkillDescriptor;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_skill(root: &Path, dir: &str, content: &str) {
    let skill_dir = root.join(dir);
    fs::create_dir_all(&skill_dir).unwrap();
    fs::write(skill_dir.join("SKILL.md"), content).unwrap();
}

#[test]
fn test_malformed_skill_is_skipped() {
    let root = TempDir::new().unwrap();
    write_skill(
        root.path(),
        "broken",
        "---\ndescription: Missing the name field\n---\n",
    );
    write_skill(
        root.path(),
        "agent-creator",
        "---\nname: agent-creator\ndescription: Creates specialized AI agents\nkeywords: [智能体]\n---\n# Agent Creator\n",
    );

    let registry = SkillsLoader::new().add_directory(root.path()).load();

    assert_eq!(registry.len(), 1);
    let skill = registry.get("agent-creator").unwrap();
    assert!(skill.keywords.contains("智能体"));
    assert!(skill.keywords.contains("agents"));
    assert_eq!(skill.source.as_deref(), Some(root.path().join("agent-creator").as_path()));
    assert_eq!(registry.load_errors().len(), 1);
    assert_eq!(registry.load_errors()[0].kind(), "registry_load");
}

#[test]
fn test_directory_without_valid_skills_is_empty() {
    let root = TempDir::new().unwrap();
    fs::create_dir_all(root.path().join("scripts")).unwrap();
    fs::write(root.path().join("README.md"), "not a skill").unwrap();
    write_skill(root.path(), "no-front-matter", "# Nothing here\n");

    let registry = SkillsLoader::new().add_directory(root.path()).load();

    assert!(registry.is_empty());
    assert_eq!(registry.load_errors().len(), 1);
}

#[test]
fn test_disk_skill_replaces_code_defined_skill() {
    let root = TempDir::new().unwrap();
    write_skill(
        root.path(),
        "architect",
        "---\nname: architect\ndescription: Project specific architecture rules\nversion: \"3.1.0\"\n---\n",
    );

    let registry = SkillsLoader::new()
        .with_descriptors([SkillDescriptor::new("architect", "Built-in architect")])
        .add_directory(root.path())
        .load();

    let skill = registry.get("architect").unwrap();
    assert_eq!(skill.description, "Project specific architecture rules");
    assert_eq!(skill.version, "3.1.0");
}

#[test]
fn test_later_directory_wins_on_duplicate_names() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    write_skill(
        first.path(),
        "modulizer",
        "---\nname: modulizer\ndescription: First copy\n---\n",
    );
    write_skill(
        second.path(),
        "modulizer-copy",
        "---\nname: modulizer\ndescription: Second copy\n---\n",
    );

    let registry = SkillsLoader::new()
        .add_directory(first.path())
        .add_directory(second.path())
        .load();

    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get("modulizer").unwrap().description, "Second copy");
}

#[test]
fn test_body_is_read_on_demand() {
    let root = TempDir::new().unwrap();
    write_skill(
        root.path(),
        "review",
        "---\nname: review\ndescription: Reviews code\n---\n\n# Review\n\nCheck error handling.\n",
    );

    let registry: SkillsRegistry = SkillsLoader::new().add_directory(root.path()).load();
    let source = registry.get("review").unwrap().source.clone().unwrap();

    let body = dnaspec_skills::skill::read_body(&source).unwrap();
    assert!(body.starts_with("# Review"));
    assert!(body.contains("Check error handling."));
}
