//! Word list export command handler.

use anyhow::{Result, bail};
use std::path::Path;

use super::run::{font_store, title_for};
use super::{CommandOptions, init_tracing};
use crate::document::{build_records, render};
use crate::fs::atomic_write_async;
use crate::input::{InputReader, parse_words};
use crate::pronunciation::DictionaryClient;
use crate::ui::{Spinner, Style};

/// Builds the same PDF the bot sends, from a word list instead of a chat.
pub async fn run_export(options: CommandOptions, file: Option<&str>, output: &Path) -> Result<()> {
    init_tracing("warn");

    let words = parse_words(&InputReader::read(file)?);
    if words.is_empty() {
        bail!("No words to export");
    }

    let (_, config) = options.load()?;
    let translator = config.translator();
    let dictionary = DictionaryClient::with_endpoint(config.dictionary_url.clone());
    let mut fonts = font_store(&config)?;

    let spinner = Spinner::new(&format!("Translating {} words...", words.len()));
    let records = build_records(&words, translator.as_ref(), &dictionary).await?;

    spinner.set_message("Rendering PDF...");
    let font = fonts.font().await?;
    let pdf = render(&title_for(&config), &records, &font)?;
    spinner.stop();

    atomic_write_async(output.to_path_buf(), pdf).await?;

    println!(
        "{} {} words written to {}",
        Style::success("✓"),
        records.len(),
        Style::secondary(output.display())
    );

    Ok(())
}
