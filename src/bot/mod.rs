//! The Telegram bot: word collection, export flow and transport.

mod command;
mod controller;
pub mod messages;
mod session;
pub mod telegram;

pub use command::{Inbound, classify};
pub use controller::{Controller, ControllerSettings};
pub use session::SessionStore;
pub use telegram::{TelegramClient, run_polling};

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

/// Telegram chat identifier.
pub type ChatId = i64;

/// Outbound side of the messaging transport.
#[async_trait]
pub trait Messenger: Send + Sync {
    async fn send_text(&self, chat: ChatId, text: &str) -> Result<()>;

    /// Sends `text` together with a persistent one-button reply keyboard.
    async fn send_keyboard(&self, chat: ChatId, text: &str, button: &str) -> Result<()>;

    /// Uploads the file at `path` as a document attachment.
    async fn send_document(
        &self,
        chat: ChatId,
        path: &Path,
        file_name: &str,
        caption: &str,
    ) -> Result<()>;
}
