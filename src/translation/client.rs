use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use futures_util::{Stream, StreamExt};
use reqwest::Client;
use serde::Serialize;
use std::borrow::Cow;
use std::pin::Pin;

use super::language::language_name;
use super::prompt::build_system_prompt;
use super::sse_parser::sse_to_text_stream;
use super::translator::Translator;

#[derive(Debug, Clone)]
pub struct TranslationRequest {
    pub source_text: String,
    pub target_language: String,
    pub model: String,
}

// Use Cow to avoid cloning strings that are only borrowed for serialization
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: Cow<'a, str>,
}

/// Streaming client for OpenAI-compatible chat completion endpoints.
pub struct TranslationClient {
    client: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl TranslationClient {
    pub fn new(endpoint: String, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            api_key,
        }
    }

    pub async fn translate_stream(
        &self,
        request: &TranslationRequest,
    ) -> Result<Pin<Box<dyn Stream<Item = Result<String>> + Send>>> {
        let url = format!(
            "{}/v1/chat/completions",
            self.endpoint.trim_end_matches('/')
        );

        // The prompt reads better with "Ukrainian" than with "uk"
        let language = language_name(&request.target_language)
            .unwrap_or(request.target_language.as_str());
        let system_prompt = build_system_prompt(language);

        let chat_request = ChatCompletionRequest {
            model: &request.model,
            messages: vec![
                Message {
                    role: "system",
                    content: Cow::Owned(system_prompt),
                },
                Message {
                    role: "user",
                    content: Cow::Borrowed(&request.source_text),
                },
            ],
            stream: true,
        };

        let mut http_request = self.client.post(&url).json(&chat_request);

        if let Some(api_key) = &self.api_key {
            http_request = http_request.header("Authorization", format!("Bearer {api_key}"));
        }

        let response = http_request
            .send()
            .await
            .with_context(|| format!("Failed to connect to API endpoint: {url}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            bail!("API request failed with status {status}: {body}");
        }

        Ok(Box::pin(sse_to_text_stream(response.bytes_stream())))
    }

    /// Runs a streamed request to completion and returns the whole answer.
    pub async fn translate(&self, request: &TranslationRequest) -> Result<String> {
        let mut stream = self.translate_stream(request).await?;
        let mut full_response = String::new();

        while let Some(chunk) = stream.next().await {
            full_response.push_str(&chunk?);
        }

        Ok(full_response)
    }
}

/// [`Translator`] backed by a configured OpenAI-compatible provider.
pub struct ProviderTranslator {
    provider_name: String,
    client: TranslationClient,
    model: String,
    target_language: String,
}

impl ProviderTranslator {
    pub fn new(
        provider_name: String,
        endpoint: String,
        api_key: Option<String>,
        model: String,
        target_language: String,
    ) -> Self {
        Self {
            provider_name,
            client: TranslationClient::new(endpoint, api_key),
            model,
            target_language,
        }
    }
}

#[async_trait]
impl Translator for ProviderTranslator {
    async fn translate(&self, word: &str) -> Result<String> {
        let request = TranslationRequest {
            source_text: word.to_string(),
            target_language: self.target_language.clone(),
            model: self.model.clone(),
        };

        let translated = self.client.translate(&request).await?;
        let translated = translated.trim();

        if translated.is_empty() {
            bail!(
                "Provider '{}' returned an empty translation for '{word}'",
                self.provider_name
            );
        }

        Ok(translated.to_string())
    }

    fn name(&self) -> &str {
        &self.provider_name
    }
}
