//! Phonetic transcription lookup against the free dictionary API.

mod dictionary;

pub use dictionary::{DEFAULT_ENDPOINT, DictionaryClient, DictionaryEntry, extract_phonetic};

use async_trait::async_trait;

/// Outcome of a single pronunciation lookup.
///
/// Kept three-way so callers and tests can tell a dictionary miss from a
/// network problem; the bot collapses both to an empty string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pronunciation {
    /// A non-empty transcription such as `/kæt/`.
    Found(String),
    /// The service answered but has no transcription for the word.
    NotFound,
    /// The request or the response parsing failed.
    Unavailable(String),
}

impl Pronunciation {
    /// Transcription text, or `""` when nothing was found.
    pub fn into_text(self) -> String {
        match self {
            Self::Found(text) => text,
            Self::NotFound | Self::Unavailable(_) => String::new(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Found(text) => Some(text),
            Self::NotFound | Self::Unavailable(_) => None,
        }
    }
}

/// A source of phonetic transcriptions. Lookups never fail.
#[async_trait]
pub trait PronunciationLookup: Send + Sync {
    async fn lookup(&self, word: &str) -> Pronunciation;
}
