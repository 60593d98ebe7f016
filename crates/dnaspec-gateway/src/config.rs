use anyhow::Context as _;
use dnaspec_logging::LogFormat;
use dnaspec_router::{HookConfig, ScoringConfig};
use dnaspec_skills::SkillsConfig;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Default config template created when no config exists
const DEFAULT_CONFIG: &str = r#"
[logging]
level = "info"  # trace, debug, info, warn, error
format = "pretty"  # or "json"

[skills]
directories = []  # extra skills directories; ~ is expanded
personal = true  # ~/.dnaspec/skills
project = true  # ./.dnaspec/skills
builtins = true
min_keyword_length = 2

# [skills.overrides.architect]
# threshold = 0.5
# keywords = ["蓝图"]
# priority_keywords = ["系统架构"]

[scoring]
threshold = 0.3
priority_boost = 1.5
saturation_weight = 3.0

[hook]
enabled = true
auto_invoke_threshold = 0.6
enabled_skills = []  # empty enables every skill
disabled_patterns = []  # case-insensitive regexes
command_prefix = "/speckit.dnaspec."
"#;

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub skills: SkillsConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub hook: HookConfig,
}

impl Config {
    /// Get the global config path: ~/.dnaspec/dnaspec.toml
    fn global_config_path() -> anyhow::Result<PathBuf> {
        let home = dirs::home_dir().context("Could not find home directory")?;
        Ok(home.join(".dnaspec").join("dnaspec.toml"))
    }

    /// Ensure global config directory and file exist, creating defaults if needed
    fn ensure_global_config() -> anyhow::Result<PathBuf> {
        let config_path = Self::global_config_path()?;

        if let Some(config_dir) = config_path.parent() {
            if !config_dir.exists() {
                fs::create_dir_all(config_dir).with_context(|| {
                    format!("Failed to create config directory {}", config_dir.display())
                })?;
                eprintln!("Created config directory: {}", config_dir.display());
            }
        }

        if !config_path.exists() {
            fs::write(&config_path, DEFAULT_CONFIG.trim())
                .with_context(|| format!("Failed to write {}", config_path.display()))?;
            eprintln!("Created default config: {}", config_path.display());
        }

        Ok(config_path)
    }

    /// Load configuration with layered approach:
    /// 1. Global config: ~/.dnaspec/dnaspec.toml (auto-created if missing)
    /// 2. Local override: ./dnaspec.toml (workspace, optional)
    /// 3. Environment variables with DNASPEC__ prefix
    /// 4. DNASPEC_LOG_LEVEL and DNASPEC_SKILLS_DIR (highest priority)
    pub fn load() -> anyhow::Result<Self> {
        // Load .env file from current directory
        dotenvy::dotenv().ok();

        let global_config_path = Self::ensure_global_config()?;

        let mut config_builder = config::Config::builder()
            // Layer 1: Global config (required - we just created it if missing)
            .add_source(config::File::from(global_config_path))
            // Layer 2: Local workspace config (optional override)
            .add_source(config::File::with_name("dnaspec").required(false))
            // Layer 3: Environment variables, e.g. DNASPEC__HOOK__ENABLED=false
            .add_source(
                config::Environment::with_prefix("DNASPEC")
                    .prefix_separator("__")
                    .separator("__"),
            );

        // Layer 4: Convenience env var overrides
        if let Ok(level) = env::var("DNASPEC_LOG_LEVEL") {
            config_builder = config_builder.set_override("logging.level", level)?;
        }

        if let Ok(dir) = env::var("DNASPEC_SKILLS_DIR") {
            config_builder = config_builder.set_override("skills.directories", vec![dir])?;
        }

        let config: Self = config_builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the router would refuse at startup
    pub fn validate(&self) -> anyhow::Result<()> {
        self.scoring.validate()?;
        self.hook.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::{File, FileFormat};

    fn parse(toml: &str) -> Config {
        config::Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_default_template_matches_defaults() {
        let config = parse(DEFAULT_CONFIG);

        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.skills.builtins);
        assert_eq!(config.skills.min_keyword_length, 2);
        assert_eq!(config.scoring, ScoringConfig::default());
        assert_eq!(config.hook, HookConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = parse(
            r#"
[hook]
auto_invoke_threshold = 0.8

[skills.overrides.architect]
threshold = 0.5
"#,
        );

        assert_eq!(config.hook.auto_invoke_threshold, 0.8);
        assert!(config.hook.enabled);
        assert_eq!(config.scoring.threshold, 0.3);
        assert_eq!(config.skills.overrides["architect"].threshold, Some(0.5));
    }

    #[test]
    fn test_out_of_range_threshold_is_rejected() {
        let config = parse("[scoring]\nthreshold = 1.5\n");
        assert!(config.validate().is_err());
    }
}
