//! Pure Telegram Bot API client.
//!
//! Only `sendMessage` is needed: the dashboard posts editorial events to a
//! single group chat.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const API_BASE: &str = "https://api.telegram.org";

pub type Result<T> = std::result::Result<T, TelegramError>;

#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Telegram API error ({status}): {description}")]
    Api { status: u16, description: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParseMode {
    #[serde(rename = "HTML")]
    Html,
    Markdown,
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    parse_mode: ParseMode,
}

#[derive(Debug, Deserialize)]
struct ApiReply {
    ok: bool,
    description: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TelegramClient {
    client: reqwest::Client,
    api_base: String,
    bot_token: String,
    chat_id: String,
}

impl TelegramClient {
    pub fn new(bot_token: &str, chat_id: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: API_BASE.to_string(),
            bot_token: bot_token.to_string(),
            chat_id: chat_id.to_string(),
        }
    }

    /// Point at a different API host (tests, self-hosted bot API).
    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    pub async fn send_message(&self, text: &str, parse_mode: ParseMode) -> Result<()> {
        let url = format!("{}/bot{}/sendMessage", self.api_base, self.bot_token);
        let payload = SendMessage {
            chat_id: &self.chat_id,
            text,
            parse_mode,
        };

        let response = self.client.post(&url).json(&payload).send().await?;
        let status = response.status();
        let reply: Option<ApiReply> = response.json().await.ok();

        match reply {
            Some(ApiReply { ok: true, .. }) if status.is_success() => {
                tracing::debug!(chat_id = %self.chat_id, "Telegram message sent");
                Ok(())
            }
            other => {
                let description = other
                    .and_then(|r| r.description)
                    .unwrap_or_else(|| "Failed to send Telegram message".to_string());
                tracing::error!(status = status.as_u16(), %description, "Telegram sendMessage failed");
                Err(TelegramError::Api {
                    status: status.as_u16(),
                    description,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_send_message_posts_html() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/botTOKEN/sendMessage"))
            .and(body_json(json!({
                "chat_id": "-100",
                "text": "<b>hi</b>",
                "parse_mode": "HTML"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true, "result": {}})))
            .expect(1)
            .mount(&server)
            .await;

        let client = TelegramClient::new("TOKEN", "-100").with_api_base(&server.uri());
        client.send_message("<b>hi</b>", ParseMode::Html).await.unwrap();
    }

    #[tokio::test]
    async fn test_send_message_surfaces_description() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "ok": false,
                "description": "Bad Request: chat not found"
            })))
            .mount(&server)
            .await;

        let client = TelegramClient::new("TOKEN", "-1").with_api_base(&server.uri());
        let err = client.send_message("x", ParseMode::Markdown).await.unwrap_err();
        match err {
            TelegramError::Api { status, description } => {
                assert_eq!(status, 400);
                assert_eq!(description, "Bad Request: chat not found");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }
}
