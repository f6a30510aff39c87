use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "vocab-bot")]
#[command(about = "Telegram bot that turns collected English words into a PDF vocabulary list")]
#[command(version)]
pub struct Args {
    /// Config file (defaults to ~/.config/vocab-bot/config.toml)
    #[arg(short = 'c', long, global = true)]
    pub config: Option<PathBuf>,

    /// Target language code (ISO 639-1, e.g., uk, de, ja)
    #[arg(short = 't', long = "to", global = true)]
    pub to: Option<String>,

    /// Translation engine: google or a configured provider name
    #[arg(short = 'p', long, global = true)]
    pub provider: Option<String>,

    /// Model name (provider engines only)
    #[arg(short = 'm', long, global = true)]
    pub model: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the bot (default)
    Run,
    /// Show the transcription and translation of a word
    Lookup {
        /// English word or phrase
        word: String,
    },
    /// Build the vocabulary PDF from a word list, one word per line
    Export {
        /// Word list (reads from stdin if not provided)
        file: Option<String>,

        /// Where to write the PDF
        #[arg(short = 'o', long, default_value = "vocabulary.pdf")]
        output: PathBuf,
    },
    /// List supported language codes
    Languages,
    /// List configured translation providers
    Providers {
        /// Show details for a specific provider
        provider: Option<String>,
    },
    /// Configure bot defaults
    Configure {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}
