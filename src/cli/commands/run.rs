//! Bot command handler.

use anyhow::{Context, Result};

use super::{CommandOptions, init_tracing};
use crate::bot::{Controller, ControllerSettings, TelegramClient, run_polling};
use crate::config::{ResolvedConfig, resolve_token};
use crate::document::{FONT_FILE_NAME, FontStore, document_title};
use crate::health;
use crate::paths;
use crate::pronunciation::DictionaryClient;
use crate::translation::language_name;

/// Document title for the target language, e.g. `English - Pronunciation - Ukrainian`.
pub fn title_for(config: &ResolvedConfig) -> String {
    document_title(language_name(&config.target_language).unwrap_or(&config.target_language))
}

/// Font store backed by the cache directory.
pub fn font_store(config: &ResolvedConfig) -> Result<FontStore> {
    let path = paths::cache_dir()?.join(FONT_FILE_NAME);
    Ok(FontStore::cached(path, config.font_url.clone()))
}

/// Runs the bot until Ctrl+C.
pub async fn run_bot(options: CommandOptions) -> Result<()> {
    init_tracing("info");

    let (config_file, config) = options.load()?;
    let token = resolve_token(&config_file)?;

    let client = TelegramClient::new(&config.api_url, &token);
    let me = client
        .get_me()
        .await
        .context("Failed to authenticate with Telegram; check the bot token")?;

    let health_task = match &config.health_addr {
        Some(addr) => Some(health::spawn(health::bind(addr).await?)),
        None => None,
    };

    let translator = config.translator();
    tracing::info!(
        bot = me.username.as_deref().unwrap_or("unknown"),
        id = me.id,
        engine = translator.name(),
        to = %config.target_language,
        "bot started"
    );

    let settings = ControllerSettings {
        trigger: config.trigger.clone(),
        title: title_for(&config),
        temp_dir: None,
    };
    let mut controller = Controller::new(
        client.clone(),
        translator,
        Box::new(DictionaryClient::with_endpoint(config.dictionary_url.clone())),
        font_store(&config)?,
        settings,
    );

    let result = run_polling(&client, &mut controller).await;

    if let Some(task) = health_task {
        task.abort();
    }

    result
}
