//! PDF export of collected words.

pub mod font;
pub mod layout;
mod render;

pub use font::{DEFAULT_FONT_URL, FONT_FILE_NAME, Font, FontStore};
pub use render::render;

use anyhow::{Context, Result};

use crate::pronunciation::PronunciationLookup;
use crate::translation::Translator;

/// One exported row, computed fresh at export time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRecord {
    pub word: String,
    /// Empty when no transcription was found.
    pub pronunciation: String,
    pub translation: String,
}

/// Title line of the document, e.g. `English - Pronunciation - Ukrainian`.
pub fn document_title(target_language_name: &str) -> String {
    format!("English - Pronunciation - {target_language_name}")
}

/// Translates and transcribes every word, in order.
///
/// A failed translation aborts; a failed lookup leaves the transcription empty.
pub async fn build_records(
    words: &[String],
    translator: &dyn Translator,
    pronunciation: &dyn PronunciationLookup,
) -> Result<Vec<TranslationRecord>> {
    let mut records = Vec::with_capacity(words.len());

    for word in words {
        let translation = translator
            .translate(word)
            .await
            .with_context(|| format!("Failed to translate '{word}'"))?;
        let pronunciation = pronunciation.lookup(word).await.into_text();

        records.push(TranslationRecord {
            word: word.clone(),
            pronunciation,
            translation,
        });
    }

    Ok(records)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::pronunciation::Pronunciation;
    use async_trait::async_trait;

    struct Upper;

    #[async_trait]
    impl Translator for Upper {
        async fn translate(&self, word: &str) -> Result<String> {
            Ok(word.to_uppercase())
        }

        fn name(&self) -> &str {
            "upper"
        }
    }

    struct OnlyCat;

    #[async_trait]
    impl PronunciationLookup for OnlyCat {
        async fn lookup(&self, word: &str) -> Pronunciation {
            if word == "cat" {
                Pronunciation::Found("/kæt/".to_string())
            } else {
                Pronunciation::Unavailable("offline".to_string())
            }
        }
    }

    #[tokio::test]
    async fn test_build_records_keeps_order() {
        let words = vec!["cat".to_string(), "dog".to_string()];
        let records = build_records(&words, &Upper, &OnlyCat).await.unwrap();

        let rows: Vec<_> = layout::layout("title", &records)[0]
            .lines
            .iter()
            .skip(1)
            .map(|line| line.text.clone())
            .collect();
        assert_eq!(rows, vec!["cat [/kæt/] : CAT", "dog : DOG"]);
    }

    #[test]
    fn test_document_title() {
        assert_eq!(
            document_title("Ukrainian"),
            "English - Pronunciation - Ukrainian"
        );
    }
}
