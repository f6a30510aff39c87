//! Provider listing command handler.

use anyhow::{Result, bail};

use crate::config::{ConfigManager, GOOGLE_ENGINE};
use crate::ui::Style;

/// Prints the translation engines the bot can use.
///
/// `google` is always available; the rest come from `[providers.*]`.
pub fn print_providers(manager: &ConfigManager, specific_provider: Option<&str>) -> Result<()> {
    let config = manager.load_or_default()?;
    let default_provider = config.bot.provider.as_deref().unwrap_or(GOOGLE_ENGINE);
    let marker = |name: &str| {
        if name == default_provider {
            format!(" {}", Style::default_marker())
        } else {
            String::new()
        }
    };

    if let Some(provider_name) = specific_provider {
        if provider_name == GOOGLE_ENGINE {
            println!("Provider: {}{}", Style::value(GOOGLE_ENGINE), marker(GOOGLE_ENGINE));
            println!("  {}", Style::secondary("built-in, no API key required"));
            return Ok(());
        }

        let Some(provider) = config.providers.get(provider_name) else {
            bail!("Provider '{provider_name}' not found");
        };

        println!("Provider: {}{}", Style::value(provider_name), marker(provider_name));
        println!("  {} = {}", Style::label("endpoint"), provider.endpoint);
        if provider.requires_api_key() {
            let status = if provider.get_api_key().is_some() {
                Style::success("(set)")
            } else {
                Style::warning("(not set)")
            };
            println!("  {}  = {status}", Style::label("api_key"));
        }
        if provider.models.is_empty() {
            println!("  {}   = {}", Style::label("models"), Style::secondary("(none configured)"));
        } else {
            println!("  {}:", Style::label("models"));
            for model in &provider.models {
                println!("    - {model}");
            }
        }
        return Ok(());
    }

    println!("{}\n", Style::header("Translation providers"));
    println!("  {}{}", Style::value(GOOGLE_ENGINE), marker(GOOGLE_ENGINE));
    println!("    {}", Style::secondary("built-in"));

    let mut names: Vec<_> = config.providers.keys().collect();
    names.sort_unstable();
    for name in names {
        let provider = &config.providers[name];
        println!("  {}{}", Style::value(name), marker(name));
        println!("    {} {}", Style::label("endpoint:"), provider.endpoint);
        if !provider.models.is_empty() {
            println!("    {} {}", Style::label("models:"), provider.models.join(", "));
        }
    }

    if config.providers.is_empty() {
        println!();
        println!(
            "{}",
            Style::hint(format!(
                "Add OpenAI-compatible providers to {}",
                manager.config_path().display()
            ))
        );
    }

    Ok(())
}
