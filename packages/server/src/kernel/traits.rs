// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Editorial workflow rules live in domain functions that use these traits.
//
// Naming convention: Base* for trait names (e.g., BaseRecordStore, BaseNotifier)

use anyhow::Result;
use async_trait::async_trait;
use feedly_client::FeedlyItem;
use serde_json::Value;
use supabase_client::{Method, Query};
use wordpress_client::{NewPost, WpPost, WpResponse};

// =============================================================================
// Record Store Trait (Infrastructure - hosted PostgREST tables)
// =============================================================================

/// Row-level access to the editorial tables.
///
/// Rows travel as JSON; domain models convert with `serde_json::from_value`.
#[async_trait]
pub trait BaseRecordStore: Send + Sync {
    async fn select(&self, table: &str, query: &Query) -> Result<Vec<Value>>;

    /// Insert one row and return what the store persisted (ids, defaults).
    async fn insert(&self, table: &str, row: Value) -> Result<Vec<Value>>;

    /// Patch every row matching the query's filters; returns updated rows.
    async fn update(&self, table: &str, query: &Query, patch: Value) -> Result<Vec<Value>>;

    async fn delete(&self, table: &str, query: &Query) -> Result<()>;

    /// Raw pass-through to `/rest/v1/{path}`: upstream status and JSON body.
    async fn forward(
        &self,
        method: Method,
        path: &str,
        query: Option<&str>,
        body: Option<String>,
    ) -> Result<(u16, Value)>;
}

// =============================================================================
// WordPress Trait (Infrastructure - REST API with retry)
// =============================================================================

#[async_trait]
pub trait BaseWordPress: Send + Sync {
    /// Create (`id == None`) or update a post; upstream response untouched.
    async fn upsert_post(&self, id: Option<u64>, data: Value) -> Result<WpResponse>;

    async fn upload_media(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        mime_type: &str,
    ) -> Result<WpResponse>;

    async fn set_featured_media(&self, post_id: u64, media_id: u64) -> Result<WpResponse>;

    async fn list_terms(&self, taxonomy: Option<&str>) -> Result<WpResponse>;

    async fn search_media(&self, search: Option<&str>) -> Result<WpResponse>;

    async fn get_media(&self, id: u64) -> Result<WpResponse>;

    async fn list_posts(&self, status: Option<&str>, per_page: u32) -> Result<Vec<WpPost>>;

    async fn create_post(&self, post: &NewPost) -> Result<WpPost>;
}

// =============================================================================
// Notifier Trait (Infrastructure - chat messages)
// =============================================================================

#[async_trait]
pub trait BaseNotifier: Send + Sync {
    /// Send an HTML-formatted message to the editorial chat.
    async fn send(&self, html: &str) -> Result<()>;
}

// =============================================================================
// Feed Source Trait (Infrastructure - RSS aggregation)
// =============================================================================

#[async_trait]
pub trait BaseFeedSource: Send + Sync {
    /// Newest items of the configured stream.
    async fn fetch_items(&self, count: u32) -> Result<Vec<FeedlyItem>>;
}

// =============================================================================
// Asset Host Trait (Infrastructure - image hosting)
// =============================================================================

#[async_trait]
pub trait BaseAssetHost: Send + Sync {
    /// Upload an image and return its public URL.
    async fn upload_image(&self, bytes: Vec<u8>, filename: &str) -> Result<String>;
}
