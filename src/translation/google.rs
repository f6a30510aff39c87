//! Google Translate engine using the public web endpoint.
//!
//! No API key is needed. The endpoint answers with nested JSON arrays where
//! `[0]` holds the translated segments as `[translated, original, ...]`.

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use reqwest::{Client, Url};

use super::translator::{SOURCE_LANGUAGE, Translator};

pub const DEFAULT_ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

pub struct GoogleTranslator {
    client: Client,
    endpoint: String,
    target_language: String,
}

impl GoogleTranslator {
    pub fn new(target_language: String) -> Self {
        Self::with_endpoint(DEFAULT_ENDPOINT.to_string(), target_language)
    }

    pub fn with_endpoint(endpoint: String, target_language: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            target_language,
        }
    }

    fn request_url(&self, word: &str) -> Result<Url> {
        Url::parse_with_params(
            &self.endpoint,
            &[
                ("client", "gtx"),
                ("sl", SOURCE_LANGUAGE),
                ("tl", self.target_language.as_str()),
                ("dt", "t"),
                ("q", word),
            ],
        )
        .with_context(|| format!("Invalid translation endpoint: {}", self.endpoint))
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, word: &str) -> Result<String> {
        let url = self.request_url(word)?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .context("Failed to reach the translation service")?;

        if !response.status().is_success() {
            let status = response.status();
            bail!("Translation request failed with status {status}");
        }

        let body: serde_json::Value = response
            .json()
            .await
            .context("Failed to parse translation response")?;

        parse_translation(&body)
            .with_context(|| format!("Translation service returned no text for '{word}'"))
    }

    fn name(&self) -> &str {
        "google"
    }
}

/// Joins the translated segments of a `translate_a/single` response.
fn parse_translation(body: &serde_json::Value) -> Option<String> {
    let translated: String = body
        .get(0)?
        .as_array()?
        .iter()
        .filter_map(|segment| segment.get(0).and_then(serde_json::Value::as_str))
        .collect();

    let translated = translated.trim();
    if translated.is_empty() {
        None
    } else {
        Some(translated.to_string())
    }
}
