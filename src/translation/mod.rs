//! Translation engines for single vocabulary words.

mod client;
mod google;
mod language;
mod prompt;
mod sse_parser;
mod translator;

pub use client::{ProviderTranslator, TranslationClient, TranslationRequest};
pub use google::GoogleTranslator;
pub use language::{SUPPORTED_LANGUAGES, language_name, print_languages, validate_language};
pub use translator::{SOURCE_LANGUAGE, Translator};
