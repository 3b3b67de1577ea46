// TestDependencies - mock implementations for testing
//
// Provides in-memory stand-ins for every Base* trait so handlers and domain
// actions can be exercised without network access.

use anyhow::Result;
use async_trait::async_trait;
use feedly_client::{FeedlyError, FeedlyItem};
use serde_json::{json, Map, Value};
use std::cmp::Ordering;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::{Arc, Mutex};
use supabase_client::{Filter, Method, Query, SupabaseError, UNIQUE_VIOLATION};
use wordpress_client::{NewPost, WordPressError, WpPost, WpResponse};

use super::{
    BaseAssetHost, BaseFeedSource, BaseNotifier, BaseRecordStore, BaseWordPress, ServerDeps,
};

// =============================================================================
// Mock Record Store
// =============================================================================

/// Arguments captured from a raw forward call
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardCall {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub body: Option<String>,
}

/// In-memory tables with enough PostgREST semantics for the workflow code:
/// `eq`/`in` filters, one ordering column, limits and unique columns.
pub struct MockRecordStore {
    tables: Mutex<HashMap<String, Vec<Value>>>,
    unique_columns: Mutex<HashMap<String, Vec<String>>>,
    forward_calls: Mutex<Vec<ForwardCall>>,
    forward_responses: Mutex<VecDeque<(u16, Value)>>,
    next_id: AtomicU64,
}

impl MockRecordStore {
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(HashMap::new()),
            unique_columns: Mutex::new(HashMap::new()),
            forward_calls: Mutex::new(Vec::new()),
            forward_responses: Mutex::new(VecDeque::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Seed a table with rows
    pub fn with_rows(self, table: &str, rows: Vec<Value>) -> Self {
        self.tables
            .lock()
            .unwrap()
            .entry(table.to_string())
            .or_default()
            .extend(rows);
        self
    }

    /// Reject inserts that repeat a value of `column` (Postgres code 23505)
    pub fn with_unique(self, table: &str, column: &str) -> Self {
        self.unique_columns
            .lock()
            .unwrap()
            .entry(table.to_string())
            .or_default()
            .push(column.to_string());
        self
    }

    /// Queue a response for the next forward call
    pub fn with_forward_response(self, status: u16, body: Value) -> Self {
        self.forward_responses
            .lock()
            .unwrap()
            .push_back((status, body));
        self
    }

    /// Current contents of a table
    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    /// Find a row by its `id` column
    pub fn row(&self, table: &str, id: &str) -> Option<Value> {
        self.rows(table)
            .into_iter()
            .find(|r| filter_value(&r["id"]) == id)
    }

    pub fn forward_calls(&self) -> Vec<ForwardCall> {
        self.forward_calls.lock().unwrap().clone()
    }
}

impl Default for MockRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

/// How a cell compares against a filter value in a query string
fn filter_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "null".to_string(),
        other => other.to_string(),
    }
}

fn matches(row: &Value, query: &Query) -> bool {
    query.filters().iter().all(|filter| match filter {
        Filter::Eq(col, expected) => filter_value(&row[col.as_str()]) == *expected,
        Filter::In(col, options) => options.contains(&filter_value(&row[col.as_str()])),
    })
}

fn compare_cells(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Less,
        (_, Value::Null) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl BaseRecordStore for MockRecordStore {
    async fn select(&self, table: &str, query: &Query) -> Result<Vec<Value>> {
        let mut rows: Vec<Value> = self
            .rows(table)
            .into_iter()
            .filter(|row| matches(row, query))
            .collect();

        if let Some((column, ascending)) = query.ordering() {
            rows.sort_by(|a, b| {
                let ord = compare_cells(&a[column], &b[column]);
                if ascending {
                    ord
                } else {
                    ord.reverse()
                }
            });
        }
        if let Some(limit) = query.row_limit() {
            rows.truncate(limit as usize);
        }
        Ok(rows)
    }

    async fn insert(&self, table: &str, row: Value) -> Result<Vec<Value>> {
        let mut row = match row {
            Value::Object(map) => map,
            other => anyhow::bail!("insert expects an object, got {}", other),
        };

        let unique = self
            .unique_columns
            .lock()
            .unwrap()
            .get(table)
            .cloned()
            .unwrap_or_default();
        let mut tables = self.tables.lock().unwrap();
        let existing = tables.entry(table.to_string()).or_default();

        for column in unique {
            let Some(value) = row.get(&column) else { continue };
            if existing.iter().any(|r| &r[column.as_str()] == value) {
                return Err(SupabaseError::Api {
                    status: 409,
                    code: Some(UNIQUE_VIOLATION.to_string()),
                    message: format!(
                        "duplicate key value violates unique constraint \"{}_{}_key\"",
                        table, column
                    ),
                }
                .into());
            }
        }

        if !row.contains_key("id") {
            let id = self.next_id.fetch_add(1, AtomicOrdering::SeqCst);
            row.insert("id".into(), json!(format!("{}-{}", table, id)));
        }
        if !row.contains_key("created_at") {
            row.insert("created_at".into(), json!(chrono::Utc::now().to_rfc3339()));
        }

        let row = Value::Object(row);
        existing.push(row.clone());
        Ok(vec![row])
    }

    async fn update(&self, table: &str, query: &Query, patch: Value) -> Result<Vec<Value>> {
        let patch: Map<String, Value> = match patch {
            Value::Object(map) => map,
            other => anyhow::bail!("update expects an object, got {}", other),
        };

        let mut tables = self.tables.lock().unwrap();
        let mut updated = Vec::new();
        if let Some(rows) = tables.get_mut(table) {
            for row in rows.iter_mut().filter(|r| matches(r, query)) {
                if let Value::Object(fields) = row {
                    for (k, v) in &patch {
                        fields.insert(k.clone(), v.clone());
                    }
                }
                updated.push(row.clone());
            }
        }
        Ok(updated)
    }

    async fn delete(&self, table: &str, query: &Query) -> Result<()> {
        if let Some(rows) = self.tables.lock().unwrap().get_mut(table) {
            rows.retain(|r| !matches(r, query));
        }
        Ok(())
    }

    async fn forward(
        &self,
        method: Method,
        path: &str,
        query: Option<&str>,
        body: Option<String>,
    ) -> Result<(u16, Value)> {
        self.forward_calls.lock().unwrap().push(ForwardCall {
            method,
            path: path.to_string(),
            query: query.map(String::from),
            body,
        });
        Ok(self
            .forward_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or((200, json!([]))))
    }
}

// =============================================================================
// Mock WordPress
// =============================================================================

/// Calls captured by [`MockWordPress`]
#[derive(Debug, Clone, PartialEq)]
pub enum WordPressCall {
    UpsertPost { id: Option<u64>, data: Value },
    UploadMedia { filename: String, mime_type: String, size: usize },
    SetFeaturedMedia { post_id: u64, media_id: u64 },
    ListTerms { taxonomy: Option<String> },
    SearchMedia { search: Option<String> },
    GetMedia { id: u64 },
    ListPosts { status: Option<String>, per_page: u32 },
    CreatePost { post: Value },
}

pub struct MockWordPress {
    calls: Mutex<Vec<WordPressCall>>,
    responses: Mutex<VecDeque<WpResponse>>,
    posts: Mutex<Vec<WpPost>>,
    create_error: Mutex<Option<(u16, String)>>,
    next_post_id: AtomicU64,
}

/// Build a JSON upstream response
pub fn wp_response(status: u16, body: Value) -> WpResponse {
    WpResponse {
        status,
        text: body.to_string(),
        headers: HashMap::new(),
    }
}

impl MockWordPress {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            responses: Mutex::new(VecDeque::new()),
            posts: Mutex::new(Vec::new()),
            create_error: Mutex::new(None),
            next_post_id: AtomicU64::new(1000),
        }
    }

    /// Queue a raw response for the next upsert/media/terms call
    pub fn with_response(self, status: u16, body: Value) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(wp_response(status, body));
        self
    }

    /// Add a post returned by `list_posts` (REST JSON shape)
    pub fn with_post(self, post: Value) -> Self {
        let post: WpPost = serde_json::from_value(post).expect("valid WordPress post JSON");
        self.posts.lock().unwrap().push(post);
        self
    }

    /// Make `create_post` fail with an API error
    pub fn with_create_error(self, status: u16, message: &str) -> Self {
        *self.create_error.lock().unwrap() = Some((status, message.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<WordPressCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: WordPressCall) {
        self.calls.lock().unwrap().push(call);
    }

    /// Next queued response, or `200 {"id": <n>}`
    fn next_response(&self) -> WpResponse {
        self.responses.lock().unwrap().pop_front().unwrap_or_else(|| {
            let id = self.next_post_id.fetch_add(1, AtomicOrdering::SeqCst);
            wp_response(200, json!({ "id": id }))
        })
    }
}

impl Default for MockWordPress {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseWordPress for MockWordPress {
    async fn upsert_post(&self, id: Option<u64>, data: Value) -> Result<WpResponse> {
        self.record(WordPressCall::UpsertPost { id, data });
        Ok(self.next_response())
    }

    async fn upload_media(
        &self,
        bytes: Vec<u8>,
        filename: &str,
        mime_type: &str,
    ) -> Result<WpResponse> {
        self.record(WordPressCall::UploadMedia {
            filename: filename.to_string(),
            mime_type: mime_type.to_string(),
            size: bytes.len(),
        });
        Ok(self.next_response())
    }

    async fn set_featured_media(&self, post_id: u64, media_id: u64) -> Result<WpResponse> {
        self.record(WordPressCall::SetFeaturedMedia { post_id, media_id });
        Ok(self.next_response())
    }

    async fn list_terms(&self, taxonomy: Option<&str>) -> Result<WpResponse> {
        self.record(WordPressCall::ListTerms {
            taxonomy: taxonomy.map(String::from),
        });
        Ok(self.next_response())
    }

    async fn search_media(&self, search: Option<&str>) -> Result<WpResponse> {
        self.record(WordPressCall::SearchMedia {
            search: search.map(String::from),
        });
        Ok(self.next_response())
    }

    async fn get_media(&self, id: u64) -> Result<WpResponse> {
        self.record(WordPressCall::GetMedia { id });
        Ok(self.next_response())
    }

    async fn list_posts(&self, status: Option<&str>, per_page: u32) -> Result<Vec<WpPost>> {
        self.record(WordPressCall::ListPosts {
            status: status.map(String::from),
            per_page,
        });
        let posts = self.posts.lock().unwrap();
        Ok(posts
            .iter()
            .filter(|p| status.map_or(true, |s| p.status == s))
            .take(per_page as usize)
            .cloned()
            .collect())
    }

    async fn create_post(&self, post: &NewPost) -> Result<WpPost> {
        self.record(WordPressCall::CreatePost {
            post: serde_json::to_value(post)?,
        });

        if let Some((status, message)) = self.create_error.lock().unwrap().clone() {
            return Err(WordPressError::Api { status, message }.into());
        }

        let id = self.next_post_id.fetch_add(1, AtomicOrdering::SeqCst);
        let created: WpPost = serde_json::from_value(json!({
            "id": id,
            "title": { "rendered": post.title },
            "content": { "rendered": post.content },
            "excerpt": { "rendered": post.excerpt },
            "slug": post.slug,
            "status": post.status,
            "link": format!("https://example.com/?p={}", id),
        }))?;
        Ok(created)
    }
}

// =============================================================================
// Mock Notifier
// =============================================================================

pub struct MockNotifier {
    messages: Mutex<Vec<String>>,
    fail: bool,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    /// Every send fails after recording the message
    pub fn failing() -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Default for MockNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseNotifier for MockNotifier {
    async fn send(&self, html: &str) -> Result<()> {
        self.messages.lock().unwrap().push(html.to_string());
        if self.fail {
            anyhow::bail!("Telegram API error (502): Bad Gateway");
        }
        Ok(())
    }
}

// =============================================================================
// Mock Feed Source
// =============================================================================

pub struct MockFeedSource {
    items: Mutex<Vec<FeedlyItem>>,
    error_status: Option<u16>,
    requested: Mutex<Vec<u32>>,
}

impl MockFeedSource {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            error_status: None,
            requested: Mutex::new(Vec::new()),
        }
    }

    /// Add an item in Feedly's stream JSON shape
    pub fn with_item(self, item: Value) -> Self {
        let item: FeedlyItem = serde_json::from_value(item).expect("valid Feedly item JSON");
        self.items.lock().unwrap().push(item);
        self
    }

    /// Fail every fetch with a Feedly API error of this status
    pub fn with_error(mut self, status: u16) -> Self {
        self.error_status = Some(status);
        self
    }

    /// Item counts requested so far
    pub fn requests(&self) -> Vec<u32> {
        self.requested.lock().unwrap().clone()
    }
}

impl Default for MockFeedSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseFeedSource for MockFeedSource {
    async fn fetch_items(&self, count: u32) -> Result<Vec<FeedlyItem>> {
        self.requested.lock().unwrap().push(count);
        if let Some(status) = self.error_status {
            return Err(FeedlyError::Api {
                status,
                message: "unauthorized".to_string(),
            }
            .into());
        }
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .take(count as usize)
            .cloned()
            .collect())
    }
}

// =============================================================================
// Mock Asset Host
// =============================================================================

pub struct MockAssetHost {
    uploads: Mutex<Vec<(String, usize)>>,
}

impl MockAssetHost {
    pub fn new() -> Self {
        Self {
            uploads: Mutex::new(Vec::new()),
        }
    }

    /// `(filename, byte length)` of every upload
    pub fn uploads(&self) -> Vec<(String, usize)> {
        self.uploads.lock().unwrap().clone()
    }
}

impl Default for MockAssetHost {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseAssetHost for MockAssetHost {
    async fn upload_image(&self, bytes: Vec<u8>, filename: &str) -> Result<String> {
        self.uploads
            .lock()
            .unwrap()
            .push((filename.to_string(), bytes.len()));
        Ok(format!(
            "https://res.cloudinary.com/dork/image/upload/v1/{}",
            filename
        ))
    }
}

// =============================================================================
// TestDependencies - Builder for test dependencies
// =============================================================================

#[derive(Clone)]
pub struct TestDependencies {
    pub store: Arc<MockRecordStore>,
    pub wordpress: Arc<MockWordPress>,
    pub notifier: Arc<MockNotifier>,
    pub feed: Arc<MockFeedSource>,
    pub assets: Arc<MockAssetHost>,
}

impl TestDependencies {
    pub fn new() -> Self {
        Self {
            store: Arc::new(MockRecordStore::new()),
            wordpress: Arc::new(MockWordPress::new()),
            notifier: Arc::new(MockNotifier::new()),
            feed: Arc::new(MockFeedSource::new()),
            assets: Arc::new(MockAssetHost::new()),
        }
    }

    /// Set a mock record store
    pub fn mock_store(mut self, store: MockRecordStore) -> Self {
        self.store = Arc::new(store);
        self
    }

    /// Set a mock WordPress
    pub fn mock_wordpress(mut self, wordpress: MockWordPress) -> Self {
        self.wordpress = Arc::new(wordpress);
        self
    }

    /// Set a mock notifier
    pub fn mock_notifier(mut self, notifier: MockNotifier) -> Self {
        self.notifier = Arc::new(notifier);
        self
    }

    /// Set a mock feed source
    pub fn mock_feed(mut self, feed: MockFeedSource) -> Self {
        self.feed = Arc::new(feed);
        self
    }

    /// Convert into ServerDeps sharing the same mocks
    pub fn into_server_deps(&self) -> ServerDeps {
        ServerDeps::new(
            self.store.clone(),
            self.wordpress.clone(),
            self.notifier.clone(),
            self.feed.clone(),
            self.assets.clone(),
            "https://dashboard.example.com".to_string(),
        )
    }
}

impl Default for TestDependencies {
    fn default() -> Self {
        Self::new()
    }
}
