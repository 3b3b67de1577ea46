//! Pure Supabase REST (PostgREST) client.
//!
//! Talks to `{url}/rest/v1/{table}` with the service-role key. Writes ask for
//! `Prefer: return=representation` so inserted/updated rows come back.
//!
//! # Example
//!
//! ```rust,ignore
//! use supabase_client::{Query, SupabaseClient};
//!
//! let client = SupabaseClient::new("https://xyz.supabase.co", "service-key");
//! let pending: Vec<serde_json::Value> = client
//!     .select("editorial_stories", &Query::new().eq("status", "pending"))
//!     .await?;
//! ```

pub mod error;
pub mod query;

pub use error::{Result, SupabaseError, UNIQUE_VIOLATION};
pub use query::{Filter, Query};
pub use reqwest::Method;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// True when `path` (relative to `/rest/v1`) can be forwarded as-is: every
/// `/`-separated segment is non-empty, not `.` or `..`, and free of `%`,
/// backslash, `?` and `#`.
pub fn is_safe_path(path: &str) -> bool {
    !path.is_empty()
        && path.split('/').all(|segment| {
            !segment.is_empty()
                && segment != "."
                && segment != ".."
                && !segment.contains(['%', '\\', '?', '#'])
        })
}

#[derive(Debug, Deserialize)]
struct PostgrestError {
    code: Option<String>,
    message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct SupabaseClient {
    client: reqwest::Client,
    rest_url: String,
    service_key: String,
}

impl SupabaseClient {
    pub fn new(url: &str, service_key: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            rest_url: format!("{}/rest/v1", url.trim().trim_end_matches('/')),
            service_key: service_key.to_string(),
        }
    }

    fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, url)
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .header("Content-Type", "application/json")
            .header("Prefer", "return=representation")
    }

    fn table_url(&self, table: &str, query: &str) -> String {
        if query.is_empty() {
            format!("{}/{}", self.rest_url, table)
        } else {
            format!("{}/{}?{}", self.rest_url, table, query)
        }
    }

    async fn parse_rows<R: DeserializeOwned>(response: reqwest::Response) -> Result<Vec<R>> {
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let parsed: Option<PostgrestError> = serde_json::from_str(&text).ok();
            let (code, message) = match parsed {
                Some(err) => (err.code, err.message.unwrap_or_else(|| text.clone())),
                None => (None, text),
            };
            return Err(SupabaseError::Api {
                status: status.as_u16(),
                code,
                message,
            });
        }

        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&text).map_err(|e| SupabaseError::Parse(e.to_string()))
    }

    pub async fn select<R: DeserializeOwned>(&self, table: &str, query: &Query) -> Result<Vec<R>> {
        let url = self.table_url(table, &query.to_query_string());
        tracing::debug!(table, "Supabase select");
        let response = self.request(Method::GET, &url).send().await?;
        Self::parse_rows(response).await
    }

    pub async fn insert<T: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        table: &str,
        row: &T,
    ) -> Result<Vec<R>> {
        let url = self.table_url(table, "");
        tracing::debug!(table, "Supabase insert");
        let response = self.request(Method::POST, &url).json(row).send().await?;
        Self::parse_rows(response).await
    }

    pub async fn update<T: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        table: &str,
        query: &Query,
        patch: &T,
    ) -> Result<Vec<R>> {
        let url = self.table_url(table, &query.to_filter_string());
        tracing::debug!(table, "Supabase update");
        let response = self.request(Method::PATCH, &url).json(patch).send().await?;
        Self::parse_rows(response).await
    }

    pub async fn delete(&self, table: &str, query: &Query) -> Result<()> {
        let url = self.table_url(table, &query.to_filter_string());
        tracing::debug!(table, "Supabase delete");
        let response = self.request(Method::DELETE, &url).send().await?;
        Self::parse_rows::<Value>(response).await.map(|_| ())
    }

    /// Forward a raw request to `/rest/v1/{path}` and return the upstream
    /// status with its JSON body (`null` when the body is empty).
    pub async fn forward(
        &self,
        method: Method,
        path: &str,
        query: Option<&str>,
        body: Option<String>,
    ) -> Result<(u16, Value)> {
        let path = path.trim_start_matches('/');
        if !is_safe_path(path) {
            return Err(SupabaseError::InvalidPath(path.to_string()));
        }
        let url = self.table_url(path, query.unwrap_or(""));
        let mut request = self.request(method.clone(), &url);
        if method != Method::GET {
            if let Some(body) = body {
                request = request.body(body);
            }
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        let value = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).map_err(|e| SupabaseError::Parse(e.to_string()))?
        };
        Ok((status, value))
    }
}
