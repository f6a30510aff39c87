//! # vocab-bot - Vocabulary PDF Telegram bot
//!
//! Users send English words to the bot one message at a time. Each word is
//! acknowledged with its phonetic transcription. Pressing the export button
//! translates every collected word, renders a PDF with one row per word and
//! sends it back, then starts a fresh list.
//!
//! ## Quick Start
//!
//! ```bash
//! export TELEGRAM_BOT_TOKEN="123456:ABC..."
//! vocab-bot
//!
//! # Check a single word without Telegram
//! vocab-bot lookup cat
//!
//! # Build the PDF from a word list
//! vocab-bot export words.txt -o vocabulary.pdf
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/vocab-bot/config.toml`:
//!
//! ```toml
//! [bot]
//! token_env = "TELEGRAM_BOT_TOKEN"
//! to = "uk"
//! provider = "google"
//!
//! [providers.ollama]
//! endpoint = "http://localhost:11434"
//! models = ["gemma3:12b"]
//! ```

/// Chat handling, sessions and the Telegram transport.
pub mod bot;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Configuration file management and provider settings.
pub mod config;

/// PDF layout and rendering.
pub mod document;

/// File system utilities.
pub mod fs;

/// Liveness HTTP endpoint.
pub mod health;

/// Word list reading for the `export` command.
pub mod input;

/// XDG-style path utilities for configuration and cache.
pub mod paths;

/// Phonetic transcription lookup.
pub mod pronunciation;

/// English-to-target translation engines.
pub mod translation;

/// Terminal UI components (spinner, colors).
pub mod ui;
