use anyhow::{Context, Result};
use std::path::PathBuf;

use super::command::Inbound;
use super::messages::{self, DOCUMENT_CAPTION, DOCUMENT_FILE_NAME, GREETING, NOTHING_TO_EXPORT};
use super::session::SessionStore;
use super::{ChatId, Messenger};
use crate::document::{FontStore, TranslationRecord, build_records, render};
use crate::pronunciation::PronunciationLookup;
use crate::translation::Translator;

/// Settings the controller needs besides its collaborators.
#[derive(Debug, Clone)]
pub struct ControllerSettings {
    /// Exact text that starts an export.
    pub trigger: String,
    /// Title line of the exported document.
    pub title: String,
    /// Where temporary PDFs are written; the system temp dir when `None`.
    pub temp_dir: Option<PathBuf>,
}

/// Handles start commands, collects words and runs exports.
///
/// Updates are handled one at a time, so the controller owns its sessions
/// and takes `&mut self` instead of locking.
pub struct Controller<M> {
    messenger: M,
    translator: Box<dyn Translator>,
    pronunciation: Box<dyn PronunciationLookup>,
    fonts: FontStore,
    sessions: SessionStore,
    settings: ControllerSettings,
}

impl<M: Messenger> Controller<M> {
    pub fn new(
        messenger: M,
        translator: Box<dyn Translator>,
        pronunciation: Box<dyn PronunciationLookup>,
        fonts: FontStore,
        settings: ControllerSettings,
    ) -> Self {
        Self {
            messenger,
            translator,
            pronunciation,
            fonts,
            sessions: SessionStore::new(),
            settings,
        }
    }

    pub const fn messenger(&self) -> &M {
        &self.messenger
    }

    /// Words currently collected in `chat`.
    pub fn words(&self, chat: ChatId) -> &[String] {
        self.sessions.words(chat)
    }

    pub async fn handle(&mut self, chat: ChatId, inbound: Inbound) {
        match inbound {
            Inbound::Start => self.on_start(chat).await,
            Inbound::Text(text) => self.on_message(chat, &text).await,
            Inbound::Command(name) => {
                tracing::debug!(chat, command = %name, "ignoring unknown command");
            }
        }
    }

    pub async fn on_start(&self, chat: ChatId) {
        if let Err(e) = self
            .messenger
            .send_keyboard(chat, GREETING, &self.settings.trigger)
            .await
        {
            tracing::warn!(chat, error = %format!("{e:#}"), "failed to send greeting");
        }
    }

    pub async fn on_message(&mut self, chat: ChatId, text: &str) {
        if text == self.settings.trigger {
            self.export(chat).await;
            return;
        }

        let word = text.trim();
        if word.is_empty() {
            return;
        }

        self.sessions.push(chat, word.to_string());
        tracing::debug!(chat, word, collected = self.words(chat).len(), "word collected");

        let pronunciation = self.pronunciation.lookup(word).await;
        self.reply(chat, &messages::word_added(word, pronunciation.as_text()))
            .await;
    }

    /// Runs the export for `chat`. The session is cleared only after the
    /// document was delivered; on any failure the words stay.
    pub async fn export(&mut self, chat: ChatId) {
        let words = self.words(chat).to_vec();
        if words.is_empty() {
            self.reply(chat, NOTHING_TO_EXPORT).await;
            return;
        }

        match self.try_export(chat).await {
            Ok(()) => {
                tracing::info!(chat, words = words.len(), "vocabulary exported");
            }
            Err(e) => {
                tracing::warn!(chat, error = %format!("{e:#}"), "export failed");
                self.reply(chat, &messages::export_failed(&e)).await;
            }
        }
    }

    /// Translates and looks up every collected word of `chat`, in order.
    /// These are the rows the exported PDF lists.
    pub async fn records(&self, chat: ChatId) -> Result<Vec<TranslationRecord>> {
        build_records(
            self.words(chat),
            self.translator.as_ref(),
            self.pronunciation.as_ref(),
        )
        .await
    }

    async fn try_export(&mut self, chat: ChatId) -> Result<()> {
        let records = self.records(chat).await?;

        let font = self.fonts.font().await?;
        let pdf = render(&self.settings.title, &records, &font)?;

        let file = self.temp_file()?;
        tokio::fs::write(file.path(), &pdf)
            .await
            .context("Failed to write temporary PDF file")?;

        self.messenger
            .send_document(chat, file.path(), DOCUMENT_FILE_NAME, DOCUMENT_CAPTION)
            .await
            .context("Failed to send the document")?;

        self.sessions.clear(chat);

        // The document is already delivered; a leftover temp file is not an export failure
        if let Err(e) = file.close() {
            tracing::warn!(error = %e, "failed to remove temporary PDF");
        }

        Ok(())
    }

    fn temp_file(&self) -> Result<tempfile::NamedTempFile> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("vocabulary-").suffix(".pdf");

        let file = match &self.settings.temp_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        };
        file.context("Failed to create temporary PDF file")
    }

    async fn reply(&self, chat: ChatId, text: &str) {
        if let Err(e) = self.messenger.send_text(chat, text).await {
            tracing::warn!(chat, error = %format!("{e:#}"), "failed to send reply");
        }
    }
}
