//! Subcommand implementations.

use anyhow::Result;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::{ConfigFile, ConfigManager, ResolveOptions, ResolvedConfig, resolve_config};

/// Configure command handler.
pub mod configure;

/// Word list export command handler.
pub mod export;

/// Single word lookup command handler.
pub mod lookup;

/// Provider listing command handler.
pub mod providers;

/// Bot command handler.
pub mod run;

/// Options shared by every command that talks to a translation engine.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Explicit config file path.
    pub config: Option<PathBuf>,
    pub resolve: ResolveOptions,
}

impl CommandOptions {
    pub fn config_manager(&self) -> Result<ConfigManager> {
        ConfigManager::from_option(self.config.clone())
    }

    /// Loads the config file and merges the CLI overrides into it.
    pub fn load(&self) -> Result<(ConfigFile, ResolvedConfig)> {
        let config_file = self.config_manager()?.load_or_default()?;
        let resolved = resolve_config(&self.resolve, &config_file)?;
        Ok((config_file, resolved))
    }
}

/// Installs the stderr log subscriber. `RUST_LOG` overrides `default_directive`.
pub fn init_tracing(default_directive: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    // A second init (e.g. in tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
