//! Server dependencies for domain actions (using traits for testability)
//!
//! This module provides the central dependency container used by every
//! handler. All external services sit behind the `Base*` traits so tests can
//! swap in the mocks from `test_dependencies`.

use anyhow::Result;
use async_trait::async_trait;
use cloudinary_client::CloudinaryClient;
use feedly_client::{FeedlyClient, FeedlyItem};
use serde_json::Value;
use std::sync::Arc;
use supabase_client::{Method, Query, SupabaseClient};
use telegram_client::{ParseMode, TelegramClient};
use wordpress_client::{NewPost, WordPressClient, WpPost, WpResponse};

use crate::common::WorkflowError;
use crate::config::Config;
use crate::kernel::{BaseAssetHost, BaseFeedSource, BaseNotifier, BaseRecordStore, BaseWordPress};

// =============================================================================
// SupabaseClient Adapter (implements BaseRecordStore trait)
// =============================================================================

pub struct SupabaseStore(pub Arc<SupabaseClient>);

impl SupabaseStore {
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self(client)
    }
}

#[async_trait]
impl BaseRecordStore for SupabaseStore {
    async fn select(&self, table: &str, query: &Query) -> Result<Vec<Value>> {
        Ok(self.0.select(table, query).await?)
    }

    async fn insert(&self, table: &str, row: Value) -> Result<Vec<Value>> {
        Ok(self.0.insert(table, &row).await?)
    }

    async fn update(&self, table: &str, query: &Query, patch: Value) -> Result<Vec<Value>> {
        Ok(self.0.update(table, query, &patch).await?)
    }

    async fn delete(&self, table: &str, query: &Query) -> Result<()> {
        Ok(self.0.delete(table, query).await?)
    }

    async fn forward(
        &self,
        method: Method,
        path: &str,
        query: Option<&str>,
        body: Option<String>,
    ) -> Result<(u16, Value)> {
        Ok(self.0.forward(method, path, query, body).await?)
    }
}

// =============================================================================
// WordPressClient Adapter (implements BaseWordPress trait)
// =============================================================================

pub struct WordPressAdapter(pub Arc<WordPressClient>);

impl WordPressAdapter {
    pub fn new(client: Arc<WordPressClient>) -> Self {
        Self(client)
    }
}

#[async_trait]
impl BaseWordPress for WordPressAdapter {
    async fn upsert_post(&self, id: Option<u64>, data: Value) -> Result<WpResponse> {
        Ok(self.0.upsert_post(id, data).await?)
    }

    async fn upload_media(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        mime_type: &str,
    ) -> Result<WpResponse> {
        Ok(self.0.upload_media(bytes, filename, mime_type).await?)
    }

    async fn set_featured_media(&self, post_id: u64, media_id: u64) -> Result<WpResponse> {
        Ok(self.0.set_featured_media(post_id, media_id).await?)
    }

    async fn list_terms(&self, taxonomy: Option<&str>) -> Result<WpResponse> {
        Ok(self.0.list_terms(taxonomy).await?)
    }

    async fn search_media(&self, search: Option<&str>) -> Result<WpResponse> {
        Ok(self.0.search_media(search).await?)
    }

    async fn get_media(&self, id: u64) -> Result<WpResponse> {
        Ok(self.0.get_media(id).await?)
    }

    async fn list_posts(&self, status: Option<&str>, per_page: u32) -> Result<Vec<WpPost>> {
        Ok(self.0.list_posts(status, per_page).await?)
    }

    async fn create_post(&self, post: &NewPost) -> Result<WpPost> {
        Ok(self.0.create_post(post).await?)
    }
}

// =============================================================================
// Notifier Adapters
// =============================================================================

pub struct TelegramNotifier(pub Arc<TelegramClient>);

impl TelegramNotifier {
    pub fn new(client: Arc<TelegramClient>) -> Self {
        Self(client)
    }
}

#[async_trait]
impl BaseNotifier for TelegramNotifier {
    async fn send(&self, html: &str) -> Result<()> {
        Ok(self.0.send_message(html, ParseMode::Html).await?)
    }
}

/// Stand-in used when no bot token/chat id is configured.
pub struct NoopNotifier;

#[async_trait]
impl BaseNotifier for NoopNotifier {
    async fn send(&self, _html: &str) -> Result<()> {
        tracing::warn!("Telegram credentials not configured, notification skipped");
        Ok(())
    }
}

// =============================================================================
// Feed Source Adapter
// =============================================================================

pub struct FeedlyFeedSource {
    client: Arc<FeedlyClient>,
    stream_id: String,
}

impl FeedlyFeedSource {
    pub fn new(client: Arc<FeedlyClient>, stream_id: &str) -> Self {
        Self {
            client,
            stream_id: stream_id.to_string(),
        }
    }
}

#[async_trait]
impl BaseFeedSource for FeedlyFeedSource {
    async fn fetch_items(&self, count: u32) -> Result<Vec<FeedlyItem>> {
        let contents = self.client.stream_contents(&self.stream_id, count).await?;
        Ok(contents.items)
    }
}

// =============================================================================
// Asset Host Adapter
// =============================================================================

pub struct CloudinaryAssetHost(pub Arc<CloudinaryClient>);

impl CloudinaryAssetHost {
    pub fn new(client: Arc<CloudinaryClient>) -> Self {
        Self(client)
    }
}

#[async_trait]
impl BaseAssetHost for CloudinaryAssetHost {
    async fn upload_image(&self, bytes: Vec<u8>, filename: &str) -> Result<String> {
        Ok(self.0.upload_image(bytes, filename).await?)
    }
}

// =============================================================================
// Unconfigured integration
// =============================================================================

/// Placeholder for an integration whose env vars are absent. Every call fails
/// with [`WorkflowError::MissingConfig`] naming the variables to set.
pub struct Unconfigured(pub Vec<&'static str>);

impl Unconfigured {
    fn fail<T>(&self) -> Result<T> {
        Err(WorkflowError::MissingConfig(self.0.clone()).into())
    }
}

#[async_trait]
impl BaseRecordStore for Unconfigured {
    async fn select(&self, _table: &str, _query: &Query) -> Result<Vec<Value>> {
        self.fail()
    }

    async fn insert(&self, _table: &str, _row: Value) -> Result<Vec<Value>> {
        self.fail()
    }

    async fn update(&self, _table: &str, _query: &Query, _patch: Value) -> Result<Vec<Value>> {
        self.fail()
    }

    async fn delete(&self, _table: &str, _query: &Query) -> Result<()> {
        self.fail()
    }

    async fn forward(
        &self,
        _method: Method,
        _path: &str,
        _query: Option<&str>,
        _body: Option<String>,
    ) -> Result<(u16, Value)> {
        self.fail()
    }
}

#[async_trait]
impl BaseWordPress for Unconfigured {
    async fn upsert_post(&self, _id: Option<u64>, _data: Value) -> Result<WpResponse> {
        self.fail()
    }

    async fn upload_media(
        &self,
        _bytes: Vec<u8>,
        _filename: &str,
        _mime_type: &str,
    ) -> Result<WpResponse> {
        self.fail()
    }

    async fn set_featured_media(&self, _post_id: u64, _media_id: u64) -> Result<WpResponse> {
        self.fail()
    }

    async fn list_terms(&self, _taxonomy: Option<&str>) -> Result<WpResponse> {
        self.fail()
    }

    async fn search_media(&self, _search: Option<&str>) -> Result<WpResponse> {
        self.fail()
    }

    async fn get_media(&self, _id: u64) -> Result<WpResponse> {
        self.fail()
    }

    async fn list_posts(&self, _status: Option<&str>, _per_page: u32) -> Result<Vec<WpPost>> {
        self.fail()
    }

    async fn create_post(&self, _post: &NewPost) -> Result<WpPost> {
        self.fail()
    }
}

#[async_trait]
impl BaseFeedSource for Unconfigured {
    async fn fetch_items(&self, _count: u32) -> Result<Vec<FeedlyItem>> {
        self.fail()
    }
}

#[async_trait]
impl BaseAssetHost for Unconfigured {
    async fn upload_image(&self, _bytes: Vec<u8>, _filename: &str) -> Result<String> {
        self.fail()
    }
}

// =============================================================================
// ServerDeps
// =============================================================================

/// Server dependencies accessible to handlers (using traits for testability)
#[derive(Clone)]
pub struct ServerDeps {
    pub store: Arc<dyn BaseRecordStore>,
    pub wordpress: Arc<dyn BaseWordPress>,
    pub notifier: Arc<dyn BaseNotifier>,
    pub feed: Arc<dyn BaseFeedSource>,
    pub assets: Arc<dyn BaseAssetHost>,
    /// Linked from attention requests
    pub dashboard_url: String,
}

impl ServerDeps {
    pub fn new(
        store: Arc<dyn BaseRecordStore>,
        wordpress: Arc<dyn BaseWordPress>,
        notifier: Arc<dyn BaseNotifier>,
        feed: Arc<dyn BaseFeedSource>,
        assets: Arc<dyn BaseAssetHost>,
        dashboard_url: String,
    ) -> Self {
        Self {
            store,
            wordpress,
            notifier,
            feed,
            assets,
            dashboard_url,
        }
    }

    /// Wire real clients for every configured integration.
    pub fn from_config(config: &Config) -> Self {
        let store: Arc<dyn BaseRecordStore> = match &config.supabase {
            Some(c) => Arc::new(SupabaseStore::new(Arc::new(SupabaseClient::new(
                &c.url,
                &c.service_key,
            )))),
            None => Arc::new(Unconfigured(vec!["SUPABASE_URL", "SUPABASE_SERVICE_KEY"])),
        };

        let wordpress: Arc<dyn BaseWordPress> = match &config.wordpress {
            Some(c) => Arc::new(WordPressAdapter::new(Arc::new(WordPressClient::new(
                &c.base_url,
                &c.user,
                &c.app_password,
            )))),
            None => Arc::new(Unconfigured(vec!["WP_BASE", "WP_USER", "WP_APP_PASSWORD"])),
        };

        let notifier: Arc<dyn BaseNotifier> = match &config.telegram {
            Some(c) => Arc::new(TelegramNotifier::new(Arc::new(TelegramClient::new(
                &c.bot_token,
                &c.chat_id,
            )))),
            None => Arc::new(NoopNotifier),
        };

        let feed: Arc<dyn BaseFeedSource> = match &config.feedly {
            Some(c) => Arc::new(FeedlyFeedSource::new(
                Arc::new(FeedlyClient::new(&c.token)),
                &c.stream_id,
            )),
            None => Arc::new(Unconfigured(vec!["FEEDLY_TOKEN"])),
        };

        let assets: Arc<dyn BaseAssetHost> = match &config.cloudinary {
            Some(c) => Arc::new(CloudinaryAssetHost::new(Arc::new(CloudinaryClient::new(
                &c.cloud_name,
                &c.upload_preset,
            )))),
            None => Arc::new(Unconfigured(vec![
                "CLOUDINARY_CLOUD_NAME",
                "CLOUDINARY_UPLOAD_PRESET",
            ])),
        };

        Self::new(
            store,
            wordpress,
            notifier,
            feed,
            assets,
            config.dashboard_url.clone(),
        )
    }
}
