//! Configure command handler for editing bot defaults.

use anyhow::{Result, bail};
use inquire::{Select, Text};

use crate::bot::messages::DEFAULT_TRIGGER;
use crate::config::{
    ConfigFile, ConfigManager, DEFAULT_HEALTH_ADDR, DEFAULT_TARGET_LANGUAGE, DEFAULT_TOKEN_ENV,
    GOOGLE_ENGINE,
};
use crate::translation::SUPPORTED_LANGUAGES;
use crate::ui::{Style, handle_prompt_cancellation};

/// Prints the current `[bot]` settings.
pub fn show_config(manager: &ConfigManager) -> Result<()> {
    let config = manager.load_or_default()?;
    println!(
        "{} {}",
        Style::header("Configuration"),
        Style::secondary(manager.config_path().display())
    );
    print_current_defaults(&config);
    Ok(())
}

/// Interactively edits the `[bot]` section and saves the file.
pub fn run_configure(manager: &ConfigManager) -> Result<()> {
    handle_prompt_cancellation(|| run_configure_inner(manager))
}

fn run_configure_inner(manager: &ConfigManager) -> Result<()> {
    let mut config = manager.load_or_default()?;

    print_current_defaults(&config);

    let mut engines = vec![GOOGLE_ENGINE.to_string()];
    let mut provider_names: Vec<String> = config.providers.keys().cloned().collect();
    provider_names.sort_unstable();
    engines.extend(provider_names);

    let provider = select_from(
        "Translation engine:",
        &engines,
        config.bot.provider.as_deref(),
    )?;

    let model = if provider == GOOGLE_ENGINE {
        config.bot.model.clone()
    } else {
        let available_models = config
            .providers
            .get(&provider)
            .map(|p| p.models.clone())
            .unwrap_or_default();
        Some(select_model(&available_models, config.bot.model.as_deref())?)
    };

    let to = select_target_language(config.bot.to.as_deref())?;

    let trigger = Text::new("Export button text:")
        .with_default(config.bot.trigger.as_deref().unwrap_or(DEFAULT_TRIGGER))
        .prompt()?;
    if trigger.trim().is_empty() {
        bail!("Export button text cannot be empty");
    }

    let token_env = Text::new("Environment variable with the bot token:")
        .with_default(config.token_env())
        .prompt()?;

    let health_addr = Text::new("Liveness endpoint address:")
        .with_help_message("host:port, or 'off' to disable")
        .with_default(config.bot.health_addr.as_deref().unwrap_or(DEFAULT_HEALTH_ADDR))
        .prompt()?;

    config.bot.provider = Some(provider);
    config.bot.model = model;
    config.bot.to = Some(to);
    config.bot.trigger = Some(trigger);
    config.bot.token_env = Some(token_env.trim().to_string());
    config.bot.health_addr = Some(health_addr.trim().to_string());

    manager.save(&config)?;

    println!();
    println!(
        "{} Configuration saved to {}",
        Style::success("✓"),
        Style::secondary(manager.config_path().display())
    );

    Ok(())
}

fn print_current_defaults(config: &ConfigFile) {
    let bot = &config.bot;
    let rows = [
        ("provider", bot.provider.as_deref().unwrap_or(GOOGLE_ENGINE)),
        ("model", bot.model.as_deref().unwrap_or("(not set)")),
        ("to", bot.to.as_deref().unwrap_or(DEFAULT_TARGET_LANGUAGE)),
        ("trigger", bot.trigger.as_deref().unwrap_or(DEFAULT_TRIGGER)),
        ("token_env", bot.token_env.as_deref().unwrap_or(DEFAULT_TOKEN_ENV)),
        ("health", bot.health_addr.as_deref().unwrap_or(DEFAULT_HEALTH_ADDR)),
    ];

    println!("{}", Style::header("Current defaults"));
    for (label, value) in rows {
        println!("  {} {}", Style::label(format!("{label:<10}")), Style::value(value));
    }
    println!();
}

fn select_from(prompt: &str, options: &[String], default: Option<&str>) -> Result<String> {
    let default_index = default
        .and_then(|d| options.iter().position(|o| o == d))
        .unwrap_or(0);

    Ok(Select::new(prompt, options.to_vec())
        .with_starting_cursor(default_index)
        .prompt()?)
}

fn select_model(available_models: &[String], default: Option<&str>) -> Result<String> {
    if !available_models.is_empty() {
        return select_from("Model:", available_models, default);
    }

    let mut prompt = Text::new("Model:").with_help_message("Enter the model name");
    if let Some(d) = default {
        prompt = prompt.with_default(d);
    }

    let model = prompt.prompt()?;
    if model.trim().is_empty() {
        bail!("Model name cannot be empty");
    }
    Ok(model.trim().to_string())
}

fn select_target_language(default: Option<&str>) -> Result<String> {
    let options: Vec<String> = SUPPORTED_LANGUAGES
        .iter()
        .map(|(code, name)| format!("{code} - {name}"))
        .collect();

    let default_code = default.unwrap_or(DEFAULT_TARGET_LANGUAGE);
    let default_index = SUPPORTED_LANGUAGES
        .iter()
        .position(|(code, _)| *code == default_code)
        .unwrap_or(0);

    let selection = Select::new("Target language:", options)
        .with_starting_cursor(default_index)
        .prompt()?;

    let code = selection.split(" - ").next().unwrap_or(&selection);
    Ok(code.to_string())
}
