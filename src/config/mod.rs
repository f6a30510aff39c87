//! Configuration file handling and resolution.

mod manager;

pub use manager::{
    BotConfig, ConfigFile, ConfigManager, DEFAULT_HEALTH_ADDR, DEFAULT_TARGET_LANGUAGE,
    DEFAULT_TOKEN_ENV, EngineConfig, GOOGLE_ENGINE, ProviderConfig, ResolveOptions,
    ResolvedConfig, resolve_config, resolve_token,
};
