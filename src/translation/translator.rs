use anyhow::Result;
use async_trait::async_trait;

/// Words are always collected in English.
pub const SOURCE_LANGUAGE: &str = "en";

/// A translation backend for single words or short phrases.
///
/// The target language is fixed when the engine is built, so callers only
/// hand over the word. Errors are returned as-is: the export flow aborts on
/// the first failed translation.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translates `word` from English into the configured target language.
    async fn translate(&self, word: &str) -> Result<String>;

    /// Name of the engine, for logs and the `lookup` command.
    fn name(&self) -> &str;
}
