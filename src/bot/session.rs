use std::collections::HashMap;

use super::ChatId;

/// Words collected per conversation, in arrival order.
///
/// Owned by the controller, so every chat has its own list and nothing is
/// shared between conversations.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: HashMap<ChatId, Vec<String>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, chat: ChatId, word: String) {
        self.sessions.entry(chat).or_default().push(word);
    }

    /// Words collected in `chat`; empty when nothing was collected yet.
    pub fn words(&self, chat: ChatId) -> &[String] {
        self.sessions.get(&chat).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn clear(&mut self, chat: ChatId) {
        self.sessions.remove(&chat);
    }
}
