//! Skill metadata parsing
//!
//! Each skill is a folder containing SKILL.md with a `---` delimited front matter block

use anyhow::{anyhow, Context, Result};
use regex::Regex;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;

/// Metadata file expected in every skill directory
pub const SKILL_FILE: &str = "SKILL.md";

/// Maximum recommended name length
const MAX_NAME_LENGTH: usize = 64;
/// Maximum recommended description length
const MAX_DESCRIPTION_LENGTH: usize = 1024;

/// Skill metadata extracted from the front matter
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SkillMetadata {
    /// Skill name (lowercase letters, numbers and hyphens only)
    pub name: String,
    /// What the skill does and when to use it
    pub description: String,
    /// Declared version, if any
    #[serde(default)]
    pub version: Option<String>,
    /// Curated keywords added on top of the extracted ones
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Curated keywords that score with the priority boost
    #[serde(default)]
    pub priority_keywords: Vec<String>,
}

/// Read and validate the metadata of the skill in `dir`
pub fn read_metadata(dir: &Path) -> Result<SkillMetadata> {
    let content = read_skill_file(dir)?;
    let (metadata, _) = parse_skill_content(&content)
        .with_context(|| format!("Failed to parse {:?}", dir.join(SKILL_FILE)))?;

    validate_metadata(&metadata)?;
    Ok(metadata)
}

/// Read the instructions body (everything after the front matter) of the skill in `dir`
pub fn read_body(dir: &Path) -> Result<String> {
    let content = read_skill_file(dir)?;
    let (_, body) = parse_skill_content(&content)
        .with_context(|| format!("Failed to parse {:?}", dir.join(SKILL_FILE)))?;
    Ok(body)
}

fn read_skill_file(dir: &Path) -> Result<String> {
    let skill_file = dir.join(SKILL_FILE);

    if !skill_file.is_file() {
        return Err(anyhow!("{} not found in {:?}", SKILL_FILE, dir));
    }

    fs::read_to_string(&skill_file).with_context(|| format!("Failed to read {:?}", skill_file))
}

/// Parse skill content into front matter metadata and body
///
/// YAML is tried first. Front matter that is not valid YAML (typically a
/// description containing `: `) falls back to plain `key: value` lines.
pub fn parse_skill_content(content: &str) -> Result<(SkillMetadata, String)> {
    let frontmatter_re = Regex::new(r"^\u{feff}?---[ \t]*\r?\n([\s\S]*?)\r?\n---[ \t]*(?:\r?\n([\s\S]*))?$")
        .map_err(|e| anyhow!("Failed to compile regex: {}", e))?;

    let captures = frontmatter_re
        .captures(content)
        .ok_or_else(|| anyhow!("No valid front matter found"))?;

    let frontmatter = captures
        .get(1)
        .ok_or_else(|| anyhow!("Failed to extract front matter"))?
        .as_str();

    let body = captures.get(2).map(|m| m.as_str()).unwrap_or("");

    let metadata = match serde_yaml::from_str::<SkillMetadata>(frontmatter) {
        Ok(metadata) => metadata,
        Err(yaml_err) => parse_key_value_lines(frontmatter)
            .with_context(|| format!("Front matter is neither YAML ({yaml_err}) nor key: value lines"))?,
    };

    Ok((metadata, body.trim_start().to_string()))
}

/// Fallback parser for `key: value` front matter
///
/// List keys accept `[a, b]`, `a, b` or following `- item` lines.
fn parse_key_value_lines(frontmatter: &str) -> Result<SkillMetadata> {
    let mut name = None;
    let mut description = None;
    let mut metadata = SkillMetadata::default();
    let mut current_list: Option<&mut Vec<String>> = None;

    for line in frontmatter.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        if let Some(item) = trimmed.strip_prefix("- ") {
            if let Some(list) = current_list.as_mut() {
                list.push(unquote(item).to_string());
                continue;
            }
            return Err(anyhow!("List item outside of a list key: {}", trimmed));
        }

        let Some((key, value)) = trimmed.split_once(':') else {
            return Err(anyhow!("Expected `key: value`, found: {}", trimmed));
        };
        let value = unquote(value.trim());
        current_list = None;

        match key.trim() {
            "name" => name = Some(value.to_string()),
            "description" => description = Some(value.to_string()),
            "version" => metadata.version = Some(value.to_string()),
            "keywords" => {
                metadata.keywords = split_inline_list(value);
                current_list = Some(&mut metadata.keywords);
            }
            "priority_keywords" => {
                metadata.priority_keywords = split_inline_list(value);
                current_list = Some(&mut metadata.priority_keywords);
            }
            // Unknown keys are tolerated, like serde does
            _ => {}
        }
    }

    metadata.name = name.ok_or_else(|| anyhow!("Missing required field: name"))?;
    metadata.description = description.ok_or_else(|| anyhow!("Missing required field: description"))?;
    Ok(metadata)
}

fn unquote(value: &str) -> &str {
    let value = value.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

fn split_inline_list(value: &str) -> Vec<String> {
    let value = value.trim();
    let value = value
        .strip_prefix('[')
        .and_then(|v| v.strip_suffix(']'))
        .unwrap_or(value);

    value
        .split(',')
        .map(unquote)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// Validate skill metadata
fn validate_metadata(metadata: &SkillMetadata) -> Result<()> {
    if metadata.name.is_empty() {
        return Err(anyhow!("Skill name cannot be empty"));
    }

    if metadata.name.chars().count() > MAX_NAME_LENGTH {
        warn!(
            "Skill name '{}' exceeds {} characters (was {})",
            metadata.name,
            MAX_NAME_LENGTH,
            metadata.name.chars().count()
        );
    }

    let name_re = Regex::new(r"^[a-z0-9-]+$")
        .map_err(|e| anyhow!("Failed to compile name validation regex: {}", e))?;

    if !name_re.is_match(&metadata.name) {
        return Err(anyhow!(
            "Skill name '{}' must contain only lowercase letters, numbers, and hyphens",
            metadata.name
        ));
    }

    if metadata.description.trim().is_empty() {
        return Err(anyhow!("Skill description cannot be empty"));
    }

    if metadata.description.chars().count() > MAX_DESCRIPTION_LENGTH {
        warn!(
            "Skill '{}' description exceeds {} characters (was {})",
            metadata.name,
            MAX_DESCRIPTION_LENGTH,
            metadata.description.chars().count()
        );
    }

    Ok(())
}
