//! Skills registry and its loader
//!
//! The loader scans skill directories once and produces an immutable
//! [`SkillsRegistry`]. Broken skills are skipped with a warning; a missing
//! directory just contributes nothing.

use anyhow::{Context, Result};
use dnaspec_types::{DnaspecError, SkillDescriptor};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::{SkillConfig, SkillsConfig};
use crate::keywords::KeywordExtractor;
use crate::skill::{self, SkillMetadata};

/// Builds a [`SkillsRegistry`] from code-defined skills and skill directories
#[derive(Debug, Default)]
pub struct SkillsLoader {
    /// Skills registered before any directory is scanned
    descriptors: Vec<SkillDescriptor>,
    /// Skills directories to scan, in order
    directories: Vec<PathBuf>,
    extractor: KeywordExtractor,
    overrides: HashMap<String, SkillConfig>,
}

impl SkillsLoader {
    /// Create a loader with no directories
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader from configuration
    ///
    /// Personal and project directories come first, so configured
    /// directories win on name conflicts.
    pub fn from_config(config: &SkillsConfig) -> Self {
        let mut loader = Self::new()
            .with_extractor(KeywordExtractor::new(config.min_keyword_length))
            .with_overrides(config.overrides.clone());

        if config.personal {
            loader = loader.with_personal_skills();
        }
        if config.project {
            loader = loader.with_project_skills();
        }
        for dir in &config.directories {
            loader = loader.add_directory(expand_home(dir));
        }
        loader
    }

    /// Add a skills directory to scan
    pub fn add_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.directories.push(dir.into());
        self
    }

    /// Add personal skills directory: ~/.dnaspec/skills/
    pub fn with_personal_skills(self) -> Self {
        if let Some(home) = dirs::home_dir() {
            self.add_directory(home.join(".dnaspec").join("skills"))
        } else {
            warn!("Could not find home directory for personal skills");
            self
        }
    }

    /// Add project skills directory: ./.dnaspec/skills/
    pub fn with_project_skills(self) -> Self {
        self.add_directory(PathBuf::from(".dnaspec/skills"))
    }

    /// Register code-defined skills; discovered skills with the same name replace them
    pub fn with_descriptors(mut self, descriptors: impl IntoIterator<Item = SkillDescriptor>) -> Self {
        self.descriptors.extend(descriptors);
        self
    }

    /// Use a custom keyword extractor
    pub fn with_extractor(mut self, extractor: KeywordExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    /// Per-skill overrides, merged into descriptors at load time
    pub fn with_overrides(mut self, overrides: HashMap<String, SkillConfig>) -> Self {
        self.overrides = overrides;
        self
    }

    /// Register code-defined skills, then scan every directory
    pub fn load(self) -> SkillsRegistry {
        info!(
            "Starting skills discovery in {} directories",
            self.directories.len()
        );

        let mut skills = BTreeMap::new();
        let mut load_errors = Vec::new();

        for descriptor in &self.descriptors {
            insert_skill(&mut skills, self.apply_override(descriptor.clone()));
        }

        for dir in &self.directories {
            if !dir.exists() {
                debug!("Skills directory does not exist: {:?}", dir);
                continue;
            }

            if !dir.is_dir() {
                warn!("Skills path is not a directory: {:?}", dir);
                continue;
            }

            if let Err(e) = self.scan_directory(dir, &mut skills, &mut load_errors) {
                warn!("Failed to scan skills directory {:?}: {:#}", dir, e);
            }
        }

        info!(
            "Discovered {} skills ({} skipped)",
            skills.len(),
            load_errors.len()
        );

        SkillsRegistry {
            skills,
            overrides: self.overrides,
            load_errors,
        }
    }

    /// Scan a single directory for skills
    fn scan_directory(
        &self,
        dir: &Path,
        skills: &mut BTreeMap<String, SkillDescriptor>,
        load_errors: &mut Vec<DnaspecError>,
    ) -> Result<()> {
        let entries = std::fs::read_dir(dir)
            .with_context(|| format!("Failed to read directory {:?}", dir))?;

        // Sorted so that "last loaded wins" is reproducible
        let mut paths = entries
            .map(|entry| entry.map(|e| e.path()))
            .collect::<std::io::Result<Vec<_>>>()?;
        paths.sort();

        for path in paths {
            if !path.is_dir() {
                continue;
            }

            if !path.join(skill::SKILL_FILE).exists() {
                debug!("No {} in {:?}, not a skill", skill::SKILL_FILE, path);
                continue;
            }

            match skill::read_metadata(&path) {
                Ok(metadata) => {
                    let descriptor = self.apply_override(self.build_descriptor(&path, metadata));
                    debug!("Discovered skill: {} at {:?}", descriptor.name, path);
                    insert_skill(skills, descriptor);
                }
                Err(e) => {
                    let error = DnaspecError::RegistryLoad {
                        path: path.clone(),
                        reason: format!("{e:#}"),
                    };
                    warn!("Skipping skill: {}", error);
                    load_errors.push(error);
                }
            }
        }

        Ok(())
    }

    fn build_descriptor(&self, dir: &Path, metadata: SkillMetadata) -> SkillDescriptor {
        let extracted = self.extractor.extract(&metadata.name, &metadata.description);

        let mut descriptor = SkillDescriptor::new(metadata.name, metadata.description)
            .with_keywords(extracted)
            .with_keywords(metadata.keywords)
            .with_priority_keywords(metadata.priority_keywords)
            .with_source(dir);

        if let Some(version) = metadata.version.filter(|v| !v.trim().is_empty()) {
            descriptor = descriptor.with_version(version);
        }
        descriptor
    }

    fn apply_override(&self, descriptor: SkillDescriptor) -> SkillDescriptor {
        match self.overrides.get(&descriptor.name) {
            Some(config) => descriptor
                .with_keywords(&config.keywords)
                .with_priority_keywords(&config.priority_keywords),
            None => descriptor,
        }
    }
}

fn insert_skill(skills: &mut BTreeMap<String, SkillDescriptor>, descriptor: SkillDescriptor) {
    if let Some(previous) = skills.insert(descriptor.name.clone(), descriptor) {
        warn!(
            "Duplicate skill '{}', replacing the one from {:?}",
            previous.name, previous.source
        );
    }
}

/// Expand a leading `~` to the home directory
pub fn expand_home(dir: &str) -> PathBuf {
    match (dir.strip_prefix('~'), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest.trim_start_matches(['/', '\\'])),
        _ => PathBuf::from(dir),
    }
}

/// Immutable collection of skill descriptors
#[derive(Debug, Default)]
pub struct SkillsRegistry {
    skills: BTreeMap<String, SkillDescriptor>,
    overrides: HashMap<String, SkillConfig>,
    load_errors: Vec<DnaspecError>,
}

impl SkillsRegistry {
    /// Create an empty registry
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a registry from code-defined skills, without touching the filesystem
    pub fn from_descriptors(descriptors: impl IntoIterator<Item = SkillDescriptor>) -> Self {
        SkillsLoader::new().with_descriptors(descriptors).load()
    }

    /// Get a skill by name
    pub fn get(&self, name: &str) -> Option<&SkillDescriptor> {
        self.skills.get(name)
    }

    /// Whether a skill with this name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.skills.contains_key(name)
    }

    /// All skills, ordered by name
    pub fn iter(&self) -> impl Iterator<Item = &SkillDescriptor> {
        self.skills.values()
    }

    /// Routing threshold configured for a skill, if any
    pub fn threshold_for(&self, name: &str) -> Option<f64> {
        self.overrides.get(name).and_then(|config| config.threshold)
    }

    /// Skills skipped during loading
    pub fn load_errors(&self) -> &[DnaspecError] {
        &self.load_errors
    }

    /// Get number of skills
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    /// Check if registry is empty
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Skills list for a host CLI system prompt
    /// Format:
    /// Available DNASPEC skills (use /speckit.dnaspec.{skill-name} to activate):
    /// - skill-name: Description of what this skill does and when to use it
    pub fn generate_system_prompt(&self) -> String {
        if self.skills.is_empty() {
            return String::new();
        }

        let mut prompt =
            String::from("Available DNASPEC skills (use /speckit.dnaspec.{skill-name} to activate):\n");

        for skill in self.skills.values() {
            prompt.push_str(&skill.to_summary());
            prompt.push('\n');
        }

        prompt
    }
}
