//! Single word lookup command handler.

use anyhow::{Result, bail};

use super::{CommandOptions, init_tracing};
use crate::document::{TranslationRecord, layout::format_row};
use crate::pronunciation::{DictionaryClient, Pronunciation, PronunciationLookup};
use crate::ui::{Spinner, Style};

/// Looks up one word the way the bot would and prints the document row.
pub async fn run_lookup(options: CommandOptions, word: &str) -> Result<()> {
    init_tracing("warn");

    let word = word.trim();
    if word.is_empty() {
        bail!("Word must not be empty");
    }

    let (_, config) = options.load()?;
    let translator = config.translator();
    let dictionary = DictionaryClient::with_endpoint(config.dictionary_url.clone());

    let spinner = Spinner::new(&format!("Looking up '{word}'..."));
    let (pronunciation, translation) =
        tokio::join!(dictionary.lookup(word), translator.translate(word));
    spinner.stop();

    let translation = translation?;

    match &pronunciation {
        Pronunciation::Found(_) => {}
        Pronunciation::NotFound => {
            eprintln!("{}", Style::hint("No transcription in the dictionary"));
        }
        Pronunciation::Unavailable(reason) => {
            eprintln!(
                "{} {}",
                Style::warning("Dictionary unavailable:"),
                Style::secondary(reason)
            );
        }
    }

    let record = TranslationRecord {
        word: word.to_string(),
        pronunciation: pronunciation.into_text(),
        translation,
    };
    println!("{}", format_row(&record));
    eprintln!(
        "{} {} {}",
        Style::label("via"),
        Style::value(translator.name()),
        Style::code(&config.target_language)
    );

    Ok(())
}
