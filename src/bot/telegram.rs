//! Minimal Telegram Bot API client: long polling plus the three send calls
//! the bot needs.
//!
//! Request URLs embed the bot token, so transport errors are stripped of
//! their URL before they are logged or shown to users.

use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::command::{Inbound, classify};
use super::controller::Controller;
use super::{ChatId, Messenger};

pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// Long-poll timeout passed to `getUpdates`.
const POLL_TIMEOUT_SECS: u32 = 30;

/// Pause after a failed `getUpdates` before polling again.
const POLL_ERROR_PAUSE: Duration = Duration::from_secs(5);

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<IncomingMessage>,
}

#[derive(Debug, Deserialize)]
pub struct IncomingMessage {
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: ChatId,
}

#[derive(Debug, Deserialize)]
pub struct BotUser {
    pub id: i64,
    #[serde(default)]
    pub username: Option<String>,
}

impl Update {
    /// The chat and classified text of a text message; `None` for anything else.
    pub fn into_inbound(self) -> Option<(ChatId, Inbound)> {
        let message = self.message?;
        let text = message.text?;
        Some((message.chat.id, classify(&text)))
    }
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: ChatId,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_markup: Option<ReplyKeyboard<'a>>,
}

#[derive(Debug, Serialize)]
struct ReplyKeyboard<'a> {
    keyboard: Vec<Vec<KeyboardButton<'a>>>,
    resize_keyboard: bool,
    one_time_keyboard: bool,
}

#[derive(Debug, Serialize)]
struct KeyboardButton<'a> {
    text: &'a str,
}

#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    base_url: String,
}

impl TelegramClient {
    pub fn new(api_url: &str, token: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: format!("{}/bot{token}", api_url.trim_end_matches('/')),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{method}", self.base_url)
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, request: RequestBuilder) -> Result<T> {
        let response = request
            .send()
            .await
            .map_err(|e| anyhow!("Telegram {method} request failed: {}", e.without_url()))?;

        let body: ApiResponse<T> = response
            .json()
            .await
            .map_err(|e| anyhow!("Telegram {method} returned an invalid response: {}", e.without_url()))?;

        if !body.ok {
            bail!(
                "Telegram {method} failed: {}",
                body.description.as_deref().unwrap_or("no description")
            );
        }

        body.result
            .with_context(|| format!("Telegram {method} returned no result"))
    }

    /// Checks the token and returns the bot account.
    pub async fn get_me(&self) -> Result<BotUser> {
        self.call("getMe", self.client.get(self.method_url("getMe")))
            .await
    }

    /// Long-polls for updates after `offset`.
    pub async fn get_updates(&self, offset: Option<i64>, timeout_secs: u32) -> Result<Vec<Update>> {
        let mut params = vec![
            ("timeout", timeout_secs.to_string()),
            ("allowed_updates", r#"["message"]"#.to_string()),
        ];
        if let Some(offset) = offset {
            params.push(("offset", offset.to_string()));
        }

        let url = Url::parse_with_params(&self.method_url("getUpdates"), &params)
            .context("Invalid Telegram API URL")?;

        self.call("getUpdates", self.client.get(url)).await
    }

    async fn send_message(&self, message: &SendMessage<'_>) -> Result<()> {
        let request = self.client.post(self.method_url("sendMessage")).json(message);
        self.call::<serde_json::Value>("sendMessage", request).await?;
        Ok(())
    }
}

#[async_trait]
impl Messenger for TelegramClient {
    async fn send_text(&self, chat: ChatId, text: &str) -> Result<()> {
        self.send_message(&SendMessage {
            chat_id: chat,
            text,
            reply_markup: None,
        })
        .await
    }

    async fn send_keyboard(&self, chat: ChatId, text: &str, button: &str) -> Result<()> {
        self.send_message(&SendMessage {
            chat_id: chat,
            text,
            reply_markup: Some(ReplyKeyboard {
                keyboard: vec![vec![KeyboardButton { text: button }]],
                resize_keyboard: true,
                one_time_keyboard: false,
            }),
        })
        .await
    }

    async fn send_document(
        &self,
        chat: ChatId,
        path: &Path,
        file_name: &str,
        caption: &str,
    ) -> Result<()> {
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("Failed to read document: {}", path.display()))?;

        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("application/pdf")?;
        let form = Form::new()
            .text("chat_id", chat.to_string())
            .text("caption", caption.to_string())
            .part("document", part);

        let request = self
            .client
            .post(self.method_url("sendDocument"))
            .multipart(form);
        self.call::<serde_json::Value>("sendDocument", request).await?;
        Ok(())
    }
}

/// Feeds updates to the controller until Ctrl+C.
///
/// Updates are acknowledged (offset advanced) before they are handled, so a
/// crash mid-export does not replay the trigger on restart.
pub async fn run_polling<M: Messenger>(
    client: &TelegramClient,
    controller: &mut Controller<M>,
) -> Result<()> {
    let mut offset = None;

    loop {
        let updates = tokio::select! {
            result = client.get_updates(offset, POLL_TIMEOUT_SECS) => result,
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("shutting down");
                return Ok(());
            }
        };

        let updates = match updates {
            Ok(updates) => updates,
            Err(e) => {
                tracing::warn!(error = %format!("{e:#}"), "polling failed");
                tokio::time::sleep(POLL_ERROR_PAUSE).await;
                continue;
            }
        };

        for update in updates {
            offset = Some(update.update_id + 1);
            if let Some((chat, inbound)) = update.into_inbound() {
                tracing::debug!(chat, ?inbound, "update received");
                controller.handle(chat, inbound).await;
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::{
        Json, Router,
        body::Bytes,
        extract::{Query, State},
        http::HeaderMap,
        routing::{get, post},
    };
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    const TOKEN: &str = "123456:TEST-token";

    #[derive(Clone, Default)]
    struct Recorded {
        requests: Arc<Mutex<Vec<(String, String, String)>>>,
    }

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    fn fake_api(recorded: Recorded) -> Router {
        let record = |method: &'static str| {
            move |State(state): State<Recorded>, headers: HeaderMap, body: Bytes| async move {
                let content_type = headers
                    .get("content-type")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_string();
                state.requests.lock().unwrap().push((
                    method.to_string(),
                    content_type,
                    String::from_utf8_lossy(&body).to_string(),
                ));
                Json(json!({ "ok": true, "result": { "message_id": 1 } }))
            }
        };

        Router::new()
            .route(
                &format!("/bot{TOKEN}/getUpdates"),
                get(|Query(params): Query<HashMap<String, String>>| async move {
                    let offset = params.get("offset").cloned().unwrap_or_default();
                    Json(json!({
                        "ok": true,
                        "result": [
                            { "update_id": 10, "message": { "message_id": 1, "chat": { "id": 7 }, "text": offset } },
                            { "update_id": 11, "message": { "message_id": 2, "chat": { "id": 7 }, "sticker": {} } },
                            { "update_id": 12, "edited_message": { "message_id": 1, "chat": { "id": 7 }, "text": "x" } }
                        ]
                    }))
                }),
            )
            .route(&format!("/bot{TOKEN}/sendMessage"), post(record("sendMessage")))
            .route(&format!("/bot{TOKEN}/sendDocument"), post(record("sendDocument")))
            .route(
                &format!("/bot{TOKEN}/getMe"),
                get(|| async { Json(json!({ "ok": false, "error_code": 401, "description": "Unauthorized" })) }),
            )
            .with_state(recorded)
    }

    #[test]
    fn test_update_into_inbound() {
        let update: Update = serde_json::from_value(json!({
            "update_id": 1,
            "message": { "message_id": 5, "chat": { "id": -100 }, "text": "/start" }
        }))
        .unwrap();
        assert_eq!(update.into_inbound(), Some((-100, Inbound::Start)));

        let photo: Update = serde_json::from_value(json!({
            "update_id": 2,
            "message": { "message_id": 6, "chat": { "id": 1 }, "photo": [] }
        }))
        .unwrap();
        assert_eq!(photo.into_inbound(), None);
    }

    #[test]
    fn test_keyboard_serialization() {
        let message = SendMessage {
            chat_id: 7,
            text: "hi",
            reply_markup: Some(ReplyKeyboard {
                keyboard: vec![vec![KeyboardButton { text: "📄 Передати слова" }]],
                resize_keyboard: true,
                one_time_keyboard: false,
            }),
        };
        let value = serde_json::to_value(&message).unwrap();

        assert_eq!(value["reply_markup"]["keyboard"][0][0]["text"], "📄 Передати слова");
        assert_eq!(value["reply_markup"]["resize_keyboard"], true);
        assert_eq!(value["reply_markup"]["one_time_keyboard"], false);

        let plain = serde_json::to_value(SendMessage {
            chat_id: 7,
            text: "hi",
            reply_markup: None,
        })
        .unwrap();
        assert!(plain.get("reply_markup").is_none());
    }

    #[tokio::test]
    async fn test_get_updates_passes_offset() {
        let base = serve(fake_api(Recorded::default())).await;
        let client = TelegramClient::new(&base, TOKEN);

        let updates = client.get_updates(Some(42), 0).await.unwrap();

        assert_eq!(updates.len(), 3);
        assert_eq!(updates[0].update_id, 10);
        let inbound: Vec<_> = updates.into_iter().filter_map(Update::into_inbound).collect();
        assert_eq!(inbound, vec![(7, Inbound::Text("42".to_string()))]);
    }

    #[tokio::test]
    async fn test_send_calls_reach_api() {
        let recorded = Recorded::default();
        let base = serve(fake_api(recorded.clone())).await;
        let client = TelegramClient::new(&format!("{base}/"), TOKEN);

        client.send_text(7, "Додано слово: cat").await.unwrap();
        client.send_keyboard(7, "Вітаю!", "📄 Передати слова").await.unwrap();

        let temp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(temp.path(), b"%PDF-1.3 fake").unwrap();
        client
            .send_document(7, temp.path(), "vocabulary.pdf", "caption")
            .await
            .unwrap();

        let requests = recorded.requests.lock().unwrap().clone();
        assert_eq!(requests.len(), 3);

        let (method, content_type, body) = &requests[0];
        assert_eq!(method, "sendMessage");
        assert!(content_type.starts_with("application/json"));
        let body: serde_json::Value = serde_json::from_str(body).unwrap();
        assert_eq!(body["chat_id"], 7);
        assert_eq!(body["text"], "Додано слово: cat");

        let body: serde_json::Value = serde_json::from_str(&requests[1].2).unwrap();
        assert_eq!(body["reply_markup"]["keyboard"][0][0]["text"], "📄 Передати слова");

        let (method, content_type, body) = &requests[2];
        assert_eq!(method, "sendDocument");
        assert!(content_type.starts_with("multipart/form-data"));
        assert!(body.contains("filename=\"vocabulary.pdf\""));
        assert!(body.contains("%PDF-1.3 fake"));
    }

    #[tokio::test]
    async fn test_api_error_description_is_reported() {
        let base = serve(fake_api(Recorded::default())).await;
        let client = TelegramClient::new(&base, TOKEN);

        let err = client.get_me().await.unwrap_err();
        assert!(err.to_string().contains("Unauthorized"));
    }

    #[tokio::test]
    async fn test_transport_error_hides_token() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = TelegramClient::new(&format!("http://{addr}"), TOKEN);
        let err = client.send_text(1, "hi").await.unwrap_err();

        assert!(!format!("{err:#}").contains(TOKEN));
    }
}
