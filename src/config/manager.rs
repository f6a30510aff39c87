use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::bot::messages::DEFAULT_TRIGGER;
use crate::bot::telegram::DEFAULT_API_URL;
use crate::document::DEFAULT_FONT_URL;
use crate::paths;
use crate::pronunciation;
use crate::translation::{GoogleTranslator, ProviderTranslator, Translator, validate_language};

pub const DEFAULT_TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";
pub const DEFAULT_TARGET_LANGUAGE: &str = "uk";
pub const DEFAULT_HEALTH_ADDR: &str = "0.0.0.0:8080";
pub const GOOGLE_ENGINE: &str = "google";

/// Value of `health_addr` that turns the liveness endpoint off.
const HEALTH_OFF: &str = "off";

/// Settings in the `[bot]` section of config.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BotConfig {
    /// Environment variable holding the Telegram bot token.
    pub token_env: Option<String>,
    /// Target language (ISO 639-1 code).
    pub to: Option<String>,
    /// Exact message text that triggers the export.
    pub trigger: Option<String>,
    /// Translation engine: `google` or a `[providers.*]` name.
    pub provider: Option<String>,
    /// Model for provider engines.
    pub model: Option<String>,
    /// Liveness endpoint address, or `off`.
    pub health_addr: Option<String>,
    /// Where the TrueType font is downloaded from.
    pub font_url: Option<String>,
    /// Telegram Bot API base URL (for self-hosted API servers).
    pub api_url: Option<String>,
    /// Dictionary endpoint used for transcriptions.
    pub dictionary_url: Option<String>,
}

/// Configuration for an OpenAI-compatible translation provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// The OpenAI-compatible API endpoint URL.
    pub endpoint: String,
    /// API key stored directly in config (not recommended).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// List of available models for this provider.
    #[serde(default)]
    pub models: Vec<String>,
}

impl ProviderConfig {
    /// Gets the API key, preferring environment variable over config file.
    pub fn get_api_key(&self) -> Option<String> {
        if let Some(env_var) = &self.api_key_env
            && let Ok(key) = std::env::var(env_var)
            && !key.is_empty()
        {
            return Some(key);
        }
        self.api_key.clone()
    }

    /// Returns `true` if this provider requires an API key.
    pub const fn requires_api_key(&self) -> bool {
        self.api_key.is_some() || self.api_key_env.is_some()
    }
}

/// The complete configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub bot: BotConfig,
    /// Provider configurations keyed by name.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

impl ConfigFile {
    pub fn token_env(&self) -> &str {
        self.bot.token_env.as_deref().unwrap_or(DEFAULT_TOKEN_ENV)
    }
}

/// Translation engine after resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineConfig {
    Google,
    Provider {
        name: String,
        endpoint: String,
        model: String,
        api_key: Option<String>,
    },
}

/// Resolved configuration after merging CLI arguments, the config file and
/// built-in defaults.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub target_language: String,
    pub trigger: String,
    pub engine: EngineConfig,
    /// `None` when the liveness endpoint is disabled.
    pub health_addr: Option<String>,
    pub font_url: String,
    pub api_url: String,
    pub dictionary_url: String,
}

impl ResolvedConfig {
    /// Builds the translation engine for the target language.
    pub fn translator(&self) -> Box<dyn Translator> {
        match &self.engine {
            EngineConfig::Google => Box::new(GoogleTranslator::new(self.target_language.clone())),
            EngineConfig::Provider {
                name,
                endpoint,
                model,
                api_key,
            } => Box::new(ProviderTranslator::new(
                name.clone(),
                endpoint.clone(),
                api_key.clone(),
                model.clone(),
                self.target_language.clone(),
            )),
        }
    }
}

/// Options for resolving configuration.
///
/// Contains CLI overrides that take precedence over config file values.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Target language code override.
    pub to: Option<String>,
    /// Provider name override.
    pub provider: Option<String>,
    /// Model name override.
    pub model: Option<String>,
}

/// Resolves configuration by merging CLI options with config file settings.
///
/// CLI options take precedence over config file values, which take
/// precedence over built-in defaults.
///
/// # Errors
///
/// Returns an error if the target language is unsupported, the provider is
/// unknown, a provider engine has no model, or a required API key is missing.
pub fn resolve_config(options: &ResolveOptions, config_file: &ConfigFile) -> Result<ResolvedConfig> {
    let bot = &config_file.bot;

    let target_language = options
        .to
        .as_ref()
        .or(bot.to.as_ref())
        .cloned()
        .unwrap_or_else(|| DEFAULT_TARGET_LANGUAGE.to_string());
    validate_language(&target_language)?;

    let trigger = bot
        .trigger
        .clone()
        .unwrap_or_else(|| DEFAULT_TRIGGER.to_string());
    if trigger.trim().is_empty() {
        bail!("Configuration error: 'trigger' must not be empty");
    }

    let provider_name = options
        .provider
        .as_ref()
        .or(bot.provider.as_ref())
        .cloned()
        .unwrap_or_else(|| GOOGLE_ENGINE.to_string());

    let engine = if provider_name == GOOGLE_ENGINE {
        EngineConfig::Google
    } else {
        resolve_provider(&provider_name, options, config_file)?
    };

    let health_addr = match bot.health_addr.as_deref() {
        Some(HEALTH_OFF) => None,
        Some(addr) => Some(addr.to_string()),
        None => Some(DEFAULT_HEALTH_ADDR.to_string()),
    };

    Ok(ResolvedConfig {
        target_language,
        trigger,
        engine,
        health_addr,
        font_url: bot
            .font_url
            .clone()
            .unwrap_or_else(|| DEFAULT_FONT_URL.to_string()),
        api_url: bot
            .api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        dictionary_url: bot
            .dictionary_url
            .clone()
            .unwrap_or_else(|| pronunciation::DEFAULT_ENDPOINT.to_string()),
    })
}

fn resolve_provider(
    provider_name: &str,
    options: &ResolveOptions,
    config_file: &ConfigFile,
) -> Result<EngineConfig> {
    let provider_config = config_file.providers.get(provider_name).ok_or_else(|| {
        let mut available: Vec<_> = config_file.providers.keys().map(String::as_str).collect();
        available.sort_unstable();
        available.insert(0, GOOGLE_ENGINE);
        anyhow::anyhow!(
            "Provider '{provider_name}' not found\n\n\
             Available providers:\n  \
             - {}\n\n\
             Add providers to ~/.config/vocab-bot/config.toml",
            available.join("\n  - ")
        )
    })?;

    let model = options
        .model
        .as_ref()
        .or(config_file.bot.model.as_ref())
        .cloned()
        .ok_or_else(|| {
            anyhow::anyhow!(
                "Missing required configuration: 'model' for provider '{provider_name}'\n\n\
                 Please provide it via:\n  \
                 - CLI option: vocab-bot --model <name>\n  \
                 - Config file: ~/.config/vocab-bot/config.toml"
            )
        })?;

    if !provider_config.models.is_empty() && !provider_config.models.contains(&model) {
        tracing::warn!(
            model = %model,
            provider = provider_name,
            configured = %provider_config.models.join(", "),
            "model is not in the configured models list, proceeding anyway"
        );
    }

    let api_key = provider_config.get_api_key();

    if provider_config.requires_api_key() && api_key.is_none() {
        let env_var = provider_config.api_key_env.as_deref().unwrap_or("API_KEY");
        bail!(
            "Provider '{provider_name}' requires an API key\n\n\
             Set the {env_var} environment variable:\n  \
             export {env_var}=\"your-api-key\"\n\n\
             Or set api_key in ~/.config/vocab-bot/config.toml"
        );
    }

    Ok(EngineConfig::Provider {
        name: provider_name.to_string(),
        endpoint: provider_config.endpoint.clone(),
        model,
        api_key,
    })
}

/// Reads the bot token from the configured environment variable.
///
/// The token is never stored in the config file.
pub fn resolve_token(config_file: &ConfigFile) -> Result<String> {
    let env_var = config_file.token_env();

    match std::env::var(env_var) {
        Ok(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => bail!(
            "Missing Telegram bot token\n\n\
             Set the {env_var} environment variable:\n  \
             export {env_var}=\"123456:ABC-your-token\"\n\n\
             Or point token_env in ~/.config/vocab-bot/config.toml at another variable"
        ),
    }
}

/// Manages loading and saving configuration files.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is stored at `$XDG_CONFIG_HOME/vocab-bot/config.toml`
    /// or `~/.config/vocab-bot/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    /// Uses an explicit config file (`--config`).
    pub const fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// The explicit path when given, the default location otherwise.
    pub fn from_option(config_path: Option<PathBuf>) -> Result<Self> {
        config_path.map_or_else(Self::new, |path| Ok(Self::with_path(path)))
    }

    pub const fn config_path(&self) -> &PathBuf {
        &self.config_path
    }

    pub fn load(&self) -> Result<ConfigFile> {
        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        let config_file: ConfigFile = toml::from_str(&contents).with_context(|| {
            format!("Failed to parse config file: {}", self.config_path.display())
        })?;

        Ok(config_file)
    }

    /// Loads the file, falling back to defaults only when it does not exist.
    ///
    /// A file that exists but does not parse is still an error.
    pub fn load_or_default(&self) -> Result<ConfigFile> {
        if self.config_path.exists() {
            self.load()
        } else {
            Ok(ConfigFile::default())
        }
    }

    pub fn save(&self, config: &ConfigFile) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let contents = toml::to_string_pretty(config).context("Failed to serialize config")?;

        fs::write(&self.config_path, contents).with_context(|| {
            format!(
                "Failed to write config file: {}",
                self.config_path.display()
            )
        })?;

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn create_test_manager(temp_dir: &TempDir) -> ConfigManager {
        ConfigManager::with_path(temp_dir.path().join("config.toml"))
    }

    fn create_test_config() -> ConfigFile {
        let mut providers = HashMap::new();
        providers.insert(
            "ollama".to_string(),
            ProviderConfig {
                endpoint: "http://localhost:11434".to_string(),
                api_key: None,
                api_key_env: None,
                models: vec!["gemma3:12b".to_string()],
            },
        );
        providers.insert(
            "openrouter".to_string(),
            ProviderConfig {
                endpoint: "https://openrouter.ai/api".to_string(),
                api_key: None,
                api_key_env: Some("VOCAB_BOT_TEST_NONEXISTENT_API_KEY".to_string()),
                models: vec!["gpt-4o".to_string()],
            },
        );

        ConfigFile {
            bot: BotConfig {
                to: Some("de".to_string()),
                model: Some("gemma3:12b".to_string()),
                ..BotConfig::default()
            },
            providers,
        }
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        let mut config = create_test_config();
        config.bot.trigger = Some("export".to_string());
        config.bot.health_addr = Some("off".to_string());

        manager.save(&config).unwrap();
        let loaded = manager.load().unwrap();

        assert_eq!(loaded.bot.to, Some("de".to_string()));
        assert_eq!(loaded.bot.trigger, Some("export".to_string()));
        assert_eq!(loaded.bot.health_addr, Some("off".to_string()));
        assert_eq!(loaded.providers.len(), 2);
        assert_eq!(loaded.providers["ollama"].models, vec!["gemma3:12b"]);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);

        let config = manager.load_or_default().unwrap();
        assert!(config.providers.is_empty());
        assert_eq!(config.token_env(), DEFAULT_TOKEN_ENV);
    }

    #[test]
    fn test_load_or_default_rejects_broken_file() {
        let temp_dir = TempDir::new().unwrap();
        let manager = create_test_manager(&temp_dir);
        fs::write(manager.config_path(), "[bot\nto = ").unwrap();

        let err = manager.load_or_default().unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_parse_minimal_file() {
        let config: ConfigFile = toml::from_str(
            r#"
            [bot]
            token_env = "MY_BOT_TOKEN"
            trigger = "📄 Передати слова"
            "#,
        )
        .unwrap();

        assert_eq!(config.token_env(), "MY_BOT_TOKEN");
        assert!(config.providers.is_empty());
    }

    #[test]
    fn test_resolve_defaults() {
        let resolved = resolve_config(&ResolveOptions::default(), &ConfigFile::default()).unwrap();

        assert_eq!(resolved.target_language, "uk");
        assert_eq!(resolved.trigger, DEFAULT_TRIGGER);
        assert_eq!(resolved.engine, EngineConfig::Google);
        assert_eq!(resolved.health_addr.as_deref(), Some(DEFAULT_HEALTH_ADDR));
        assert_eq!(resolved.font_url, DEFAULT_FONT_URL);
        assert_eq!(resolved.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_resolve_health_off() {
        let mut config = ConfigFile::default();
        config.bot.health_addr = Some("off".to_string());

        let resolved = resolve_config(&ResolveOptions::default(), &config).unwrap();
        assert!(resolved.health_addr.is_none());
    }

    #[test]
    fn test_resolve_invalid_language() {
        let options = ResolveOptions {
            to: Some("klingon".to_string()),
            ..ResolveOptions::default()
        };

        let err = resolve_config(&options, &ConfigFile::default()).unwrap_err();
        assert!(err.to_string().contains("Invalid language code"));
    }

    #[test]
    fn test_resolve_empty_trigger() {
        let mut config = ConfigFile::default();
        config.bot.trigger = Some("  ".to_string());

        let err = resolve_config(&ResolveOptions::default(), &config).unwrap_err();
        assert!(err.to_string().contains("trigger"));
    }

    #[test]
    fn test_resolve_provider_engine() {
        let options = ResolveOptions {
            provider: Some("ollama".to_string()),
            ..ResolveOptions::default()
        };

        let resolved = resolve_config(&options, &create_test_config()).unwrap();

        assert_eq!(
            resolved.engine,
            EngineConfig::Provider {
                name: "ollama".to_string(),
                endpoint: "http://localhost:11434".to_string(),
                model: "gemma3:12b".to_string(),
                api_key: None,
            }
        );
        assert_eq!(resolved.translator().name(), "ollama");
    }

    #[test]
    fn test_resolve_provider_not_found() {
        let options = ResolveOptions {
            provider: Some("nonexistent".to_string()),
            ..ResolveOptions::default()
        };

        let err = resolve_config(&options, &create_test_config()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("not found"));
        assert!(message.contains("- google"));
        assert!(message.contains("- ollama"));
    }

    #[test]
    fn test_resolve_provider_missing_model() {
        let mut config = create_test_config();
        config.bot.model = None;
        let options = ResolveOptions {
            provider: Some("ollama".to_string()),
            ..ResolveOptions::default()
        };

        let err = resolve_config(&options, &config).unwrap_err();
        assert!(err.to_string().contains("model"));
    }

    #[test]
    fn test_resolve_api_key_required_but_missing() {
        let options = ResolveOptions {
            provider: Some("openrouter".to_string()),
            ..ResolveOptions::default()
        };

        let err = resolve_config(&options, &create_test_config()).unwrap_err();
        assert!(err.to_string().contains("API key"));
    }

    #[test]
    fn test_google_engine_ignores_model() {
        let resolved = resolve_config(&ResolveOptions::default(), &create_test_config()).unwrap();
        assert_eq!(resolved.engine, EngineConfig::Google);
        assert_eq!(resolved.translator().name(), "google");
    }

    #[test]
    #[serial]
    fn test_resolve_token_from_env() {
        let mut config = ConfigFile::default();
        config.bot.token_env = Some("VOCAB_BOT_TEST_TOKEN".to_string());

        unsafe { std::env::set_var("VOCAB_BOT_TEST_TOKEN", " 123:abc\n") };
        assert_eq!(resolve_token(&config).unwrap(), "123:abc");

        unsafe { std::env::remove_var("VOCAB_BOT_TEST_TOKEN") };
        let err = resolve_token(&config).unwrap_err();
        assert!(err.to_string().contains("VOCAB_BOT_TEST_TOKEN"));
    }
}
