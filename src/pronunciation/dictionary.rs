use anyhow::{Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;

use super::{Pronunciation, PronunciationLookup};

pub const DEFAULT_ENDPOINT: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

#[derive(Debug, Deserialize)]
pub struct DictionaryEntry {
    #[serde(default)]
    phonetic: Option<String>,
    #[serde(default)]
    phonetics: Vec<Phonetic>,
}

#[derive(Debug, Deserialize)]
struct Phonetic {
    #[serde(default)]
    text: Option<String>,
}

/// Client for `dictionaryapi.dev`-style endpoints (`GET {endpoint}/{word}`).
pub struct DictionaryClient {
    client: Client,
    endpoint: String,
}

impl DictionaryClient {
    pub fn new() -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT.to_string())
    }

    pub fn with_endpoint(endpoint: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
        }
    }

    /// Builds `{endpoint}/{word}` with the word as one encoded path segment.
    fn entry_url(&self, word: &str) -> Result<Url> {
        let mut url = Url::parse(&self.endpoint)?;
        url.path_segments_mut()
            .map_err(|()| anyhow!("Dictionary endpoint cannot take a path: {}", self.endpoint))?
            .pop_if_empty()
            .push(word);
        Ok(url)
    }

    async fn fetch(&self, word: &str) -> Result<Option<Vec<DictionaryEntry>>> {
        let url = self.entry_url(word)?;
        let response = self.client.get(url).send().await?;

        // The service answers 404 with an error object for unknown words
        if !response.status().is_success() {
            return Ok(None);
        }

        Ok(Some(response.json().await?))
    }
}

impl Default for DictionaryClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PronunciationLookup for DictionaryClient {
    async fn lookup(&self, word: &str) -> Pronunciation {
        match self.fetch(word).await {
            Ok(Some(entries)) => {
                extract_phonetic(&entries).map_or(Pronunciation::NotFound, Pronunciation::Found)
            }
            Ok(None) => Pronunciation::NotFound,
            Err(e) => {
                // reqwest errors carry the URL; the word is enough here
                let reason = e
                    .downcast::<reqwest::Error>()
                    .map_or_else(|e| e.to_string(), |e| e.without_url().to_string());
                tracing::debug!(word, %reason, "pronunciation lookup failed");
                Pronunciation::Unavailable(reason)
            }
        }
    }
}

/// Picks the transcription from the first dictionary entry.
///
/// The top-level `phonetic` wins when it is non-empty; otherwise the first
/// non-empty `phonetics[].text` is used.
pub fn extract_phonetic(entries: &[DictionaryEntry]) -> Option<String> {
    let entry = entries.first()?;

    entry
        .phonetic
        .iter()
        .chain(entry.phonetics.iter().filter_map(|p| p.text.as_ref()))
        .find(|text| !text.is_empty())
        .cloned()
}
