use crate::config::Config;
use anyhow::Result;
use dnaspec_builtins::{builtin_descriptors, builtin_handlers};
use dnaspec_router::{HookSystem, SkillHandlers};
use dnaspec_skills::SkillsLoader;
use dnaspec_types::{Context, DnaspecError, MatchType, ResponseEnvelope};
use serde::Deserialize;
use serde_json::Value;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::signal;
use tracing::{debug, error, info, warn};

/// One request line in JSON form
#[derive(Debug, Deserialize)]
struct HookRequest {
    #[serde(default)]
    message: Value,
    #[serde(default)]
    context: Context,
}

/// Gateway service - reads messages from stdin, answers on stdout
pub struct GatewayService {
    config: Config,
}

impl GatewayService {
    /// Create a new gateway service
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Load skills and build the hook system
    fn build_hook(&self) -> Result<HookSystem> {
        let skills = &self.config.skills;

        let mut loader = SkillsLoader::from_config(skills);
        if skills.builtins {
            loader = loader.with_descriptors(builtin_descriptors());
        }

        let registry = loader.load();
        for e in registry.load_errors() {
            warn!("Skipped skill: {}", e);
        }
        info!("Skills registry loaded with {} skills", registry.len());

        let handlers = if skills.builtins {
            builtin_handlers()
        } else {
            SkillHandlers::new()
        };

        let hook = HookSystem::new(
            registry,
            handlers,
            &self.config.scoring,
            self.config.hook.clone(),
        )?;
        Ok(hook)
    }

    /// Run the gateway service
    pub async fn run(self) -> Result<()> {
        // Initialize logging
        dnaspec_logging::init_logging(&self.config.logging.level, self.config.logging.format)?;
        info!("Starting DNASPEC Gateway Service");

        let hook = self.build_hook()?;
        debug!("Skills:\n{}", hook.registry().generate_system_prompt());

        // Setup signal handler for graceful shutdown
        let shutdown = async {
            if let Err(e) = signal::ctrl_c().await {
                error!("Failed to install Ctrl+C handler: {}", e);
            }
            info!("Received shutdown signal");
        };
        tokio::pin!(shutdown);

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    match line {
                        Ok(Some(line)) => {
                            if let Some(response) = handle_line(&hook, &line) {
                                stdout.write_all(response.as_bytes()).await?;
                                stdout.write_all(b"\n").await?;
                                stdout.flush().await?;
                            }
                        }
                        Ok(None) => {
                            info!("Input closed");
                            break;
                        }
                        Err(e) => {
                            error!("Failed to read input: {}", e);
                            break;
                        }
                    }
                }
                _ = &mut shutdown => {
                    info!("Shutting down gracefully...");
                    break;
                }
            }
        }

        info!("Gateway service stopped");
        Ok(())
    }
}

/// Answer one input line; blank lines get no answer
///
/// A line starting with `{` is a JSON request, anything else is the message itself.
fn handle_line(hook: &HookSystem, line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let envelope = if line.starts_with('{') {
        match serde_json::from_str::<HookRequest>(line) {
            Ok(request) => hook.handle_value(&request.message, &request.context),
            Err(e) => {
                let error = DnaspecError::InvalidInput(format!("malformed request: {e}"));
                warn!("{}", error);
                ResponseEnvelope::failure(None, &error, MatchType::None)
            }
        }
    } else {
        hook.handle(line, &Context::new())
    };

    Some(envelope.to_json_line())
}
