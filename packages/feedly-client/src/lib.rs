//! Pure Feedly streams API client.
//!
//! Reads the newest entries of a stream (a user category such as
//! `user/<id>/category/global.all`) with a developer OAuth token.

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use thiserror::Error;

const BASE_URL: &str = "https://cloud.feedly.com/v3";

pub type Result<T> = std::result::Result<T, FeedlyError>;

#[derive(Debug, Error)]
pub enum FeedlyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feedly API error: {status}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Link {
    pub href: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Origin {
    pub title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Content {
    pub content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Visual {
    pub url: Option<String>,
}

/// One entry of a stream.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedlyItem {
    pub id: String,
    pub title: Option<String>,
    #[serde(default)]
    pub alternate: Vec<Link>,
    pub origin: Option<Origin>,
    pub summary: Option<Content>,
    pub visual: Option<Visual>,
    /// Milliseconds since the epoch.
    pub published: Option<i64>,
}

impl FeedlyItem {
    pub fn url(&self) -> Option<&str> {
        self.alternate
            .first()
            .map(|l| l.href.as_str())
            .filter(|h| !h.is_empty())
    }

    pub fn source(&self) -> Option<&str> {
        self.origin.as_ref()?.title.as_deref()
    }

    pub fn summary_text(&self) -> Option<&str> {
        self.summary.as_ref()?.content.as_deref()
    }

    /// Visual URL, ignoring Feedly's "blank" placeholder.
    pub fn image_url(&self) -> Option<&str> {
        self.visual
            .as_ref()?
            .url
            .as_deref()
            .filter(|u| !u.contains("blank"))
    }

    pub fn published_at(&self) -> Option<DateTime<Utc>> {
        self.published
            .and_then(|ms| Utc.timestamp_millis_opt(ms).single())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StreamContents {
    #[serde(default)]
    pub items: Vec<FeedlyItem>,
    pub continuation: Option<String>,
}

#[derive(Debug, Clone)]
pub struct FeedlyClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl FeedlyClient {
    pub fn new(token: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: BASE_URL.to_string(),
            token: token.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Fetch the newest `count` entries of `stream_id`.
    pub async fn stream_contents(&self, stream_id: &str, count: u32) -> Result<StreamContents> {
        let url = format!(
            "{}/streams/contents?streamId={}&count={}&ranked=newest",
            self.base_url,
            urlencoding::encode(stream_id),
            count
        );

        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("OAuth {}", self.token))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FeedlyError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let contents: StreamContents = response.json().await?;
        tracing::info!(stream_id, count = contents.items.len(), "Fetched Feedly stream");
        Ok(contents)
    }
}
