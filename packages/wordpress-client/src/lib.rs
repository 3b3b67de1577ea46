//! Pure WordPress REST API client.
//!
//! Authenticates with an application password (HTTP Basic) and routes every
//! call through a [`RetryPolicy`] so transient 429/5xx responses are retried
//! with exponential backoff.
//!
//! # Example
//!
//! ```rust,ignore
//! use wordpress_client::WordPressClient;
//!
//! let client = WordPressClient::new("https://example.com", "editor", "app pass");
//! let drafts = client.list_posts(Some("draft"), 20).await?;
//! ```

pub mod error;
pub mod retry;
pub mod types;

pub use error::{Result, WordPressError};
pub use reqwest::Method;
pub use retry::{HasStatus, RetryPolicy, RETRYABLE_STATUSES};
pub use types::{NewPost, Rendered, WpBody, WpPost, WpResponse};

use base64::Engine;
use reqwest::multipart::{Form, Part};

const USER_AGENT: &str = "editorial-gateway/1.0";

/// Default taxonomy queried when the caller does not name one.
pub const DEFAULT_TAXONOMY: &str = "sections";

/// Taxonomy REST bases are `[a-z0-9_-]+`; anything else could leave
/// `/wp-json/wp/v2/`.
pub fn is_valid_taxonomy(taxonomy: &str) -> bool {
    !taxonomy.is_empty()
        && taxonomy
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'-')
}

#[derive(Debug, Clone)]
pub struct WordPressClient {
    client: reqwest::Client,
    base_url: String,
    user: String,
    app_password: String,
    retry: RetryPolicy,
}

impl WordPressClient {
    /// `base_url` is the site root; a trailing `/` or `/wp-json` is stripped.
    pub fn new(base_url: &str, user: &str, app_password: &str) -> Self {
        let trimmed = base_url.trim().trim_end_matches('/');
        let base_url = trimmed.strip_suffix("/wp-json").unwrap_or(trimmed);
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.to_string(),
            user: user.to_string(),
            app_password: app_password.to_string(),
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn basic_auth_header(&self) -> String {
        let token = base64::engine::general_purpose::STANDARD
            .encode(format!("{}:{}", self.user, self.app_password));
        format!("Basic {}", token)
    }

    async fn send_once(
        &self,
        method: &Method,
        path: &str,
        body: Option<&WpBody>,
    ) -> Result<WpResponse> {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self
            .client
            .request(method.clone(), &url)
            .header("Authorization", self.basic_auth_header())
            .header("User-Agent", USER_AGENT);

        request = match body {
            Some(WpBody::Json(value)) => request.json(value),
            Some(WpBody::Multipart {
                bytes,
                filename,
                mime_type,
            }) => {
                let part = Part::bytes(bytes.clone())
                    .file_name(filename.clone())
                    .mime_str(mime_type)?;
                request.multipart(Form::new().part("file", part))
            }
            None => request,
        };

        let response = request.send().await?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.to_string(), v.to_str().ok()?.to_string())))
            .collect();
        let text = response.text().await?;

        tracing::debug!(%method, path, status, "WordPress response");
        Ok(WpResponse {
            status,
            text,
            headers,
        })
    }

    /// Send a request with retry. Returns the final response whatever its status.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<WpBody>,
    ) -> Result<WpResponse> {
        self.retry
            .run(|_| self.send_once(&method, path, body.as_ref()))
            .await
    }

    /// Create (`id == None`) or update a post with an arbitrary JSON payload.
    pub async fn upsert_post(&self, id: Option<u64>, data: serde_json::Value) -> Result<WpResponse> {
        match id {
            Some(id) => {
                self.request(
                    Method::PUT,
                    &format!("/wp-json/wp/v2/posts/{}", id),
                    Some(WpBody::Json(data)),
                )
                .await
            }
            None => {
                self.request(Method::POST, "/wp-json/wp/v2/posts", Some(WpBody::Json(data)))
                    .await
            }
        }
    }

    pub async fn upload_media(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        mime_type: &str,
    ) -> Result<WpResponse> {
        self.request(
            Method::POST,
            "/wp-json/wp/v2/media",
            Some(WpBody::Multipart {
                bytes,
                filename: filename.to_string(),
                mime_type: mime_type.to_string(),
            }),
        )
        .await
    }

    pub async fn set_featured_media(&self, post_id: u64, media_id: u64) -> Result<WpResponse> {
        self.upsert_post(
            Some(post_id),
            serde_json::json!({ "featured_media": media_id }),
        )
        .await
    }

    pub async fn list_terms(&self, taxonomy: Option<&str>) -> Result<WpResponse> {
        let taxonomy = taxonomy.filter(|t| !t.is_empty()).unwrap_or(DEFAULT_TAXONOMY);
        if !is_valid_taxonomy(taxonomy) {
            return Err(WordPressError::InvalidInput {
                field: "taxonomy",
                value: taxonomy.to_string(),
            });
        }
        self.request(
            Method::GET,
            &format!("/wp-json/wp/v2/{}?per_page=100", taxonomy),
            None,
        )
        .await
    }

    pub async fn search_media(&self, search: Option<&str>) -> Result<WpResponse> {
        let query = match search.filter(|s| !s.is_empty()) {
            Some(term) => format!("?search={}&per_page=20", urlencoding::encode(term)),
            None => "?per_page=20".to_string(),
        };
        self.request(Method::GET, &format!("/wp-json/wp/v2/media{}", query), None)
            .await
    }

    pub async fn get_media(&self, id: u64) -> Result<WpResponse> {
        self.request(Method::GET, &format!("/wp-json/wp/v2/media/{}", id), None)
            .await
    }

    /// List posts with their featured media embedded.
    pub async fn list_posts(&self, status: Option<&str>, per_page: u32) -> Result<Vec<WpPost>> {
        let mut path = format!(
            "/wp-json/wp/v2/posts?per_page={}&_embed={}",
            per_page,
            urlencoding::encode("wp:featuredmedia")
        );
        if let Some(status) = status.filter(|s| !s.is_empty()) {
            path.push_str(&format!("&status={}", urlencoding::encode(status)));
        }

        let response = self.request(Method::GET, &path, None).await?;
        Self::expect_success(&response)?;
        serde_json::from_str(&response.text).map_err(|e| WordPressError::Parse(e.to_string()))
    }

    pub async fn create_post(&self, post: &NewPost) -> Result<WpPost> {
        let data =
            serde_json::to_value(post).map_err(|e| WordPressError::Parse(e.to_string()))?;
        let response = self.upsert_post(None, data).await?;
        Self::expect_success(&response)?;
        serde_json::from_str(&response.text).map_err(|e| WordPressError::Parse(e.to_string()))
    }

    fn expect_success(response: &WpResponse) -> Result<()> {
        if response.is_success() {
            return Ok(());
        }
        let message = serde_json::from_str::<serde_json::Value>(&response.text)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
            .unwrap_or_else(|| format!("HTTP {}", response.status));
        Err(WordPressError::Api {
            status: response.status,
            message,
        })
    }
}
