//! Feed ingestion: pull the newest Feedly items into the story inbox.

use anyhow::Result;
use chrono::Utc;
use tracing::{debug, error, info};

use crate::common::records::is_unique_violation;
use crate::common::utils::truncate_chars;
use crate::common::Editor;
use crate::domains::stories::classify::classify;
use crate::domains::stories::models::{NewStory, Story, StoryStatus};
use crate::kernel::ServerDeps;

/// Items requested from the feed per sync
pub const FEED_BATCH_SIZE: u32 = 100;

const SUMMARY_MAX_CHARS: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncReport {
    pub fetched: usize,
    pub added: usize,
}

impl SyncReport {
    pub fn message(&self) -> String {
        format!(
            "Synced {} items, added {} new stories",
            self.fetched, self.added
        )
    }
}

/// Fetch the feed and insert every new item as a pending story.
///
/// Items without a link are skipped. Repeated URLs are rejected by the store
/// and silently counted as not added; other insert failures are logged.
pub async fn sync_feedly(deps: &ServerDeps) -> Result<SyncReport> {
    let items = deps.feed.fetch_items(FEED_BATCH_SIZE).await?;
    let mut added = 0;

    for item in &items {
        let Some(url) = item.url() else {
            debug!(item_id = %item.id, "Skipping feed item without link");
            continue;
        };

        let title = item
            .title
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .unwrap_or("Untitled");
        let source = item.source().unwrap_or("Unknown");
        let summary = item
            .summary_text()
            .filter(|s| !s.is_empty())
            .map(|s| truncate_chars(s, SUMMARY_MAX_CHARS).to_string());

        let classification = classify(title, summary.as_deref(), source);

        let story = NewStory {
            title: title.to_string(),
            url: url.to_string(),
            source: source.to_string(),
            summary,
            image_url: item.image_url().map(String::from),
            published_at: item.published_at().unwrap_or_else(Utc::now),
            status: StoryStatus::Pending,
            priority: classification.priority,
            section: classification.section.map(|s| s.as_str().to_string()),
            is_festival: classification.is_festival,
            artist_names: (!classification.artist_names.is_empty())
                .then_some(classification.artist_names),
            created_by: Editor::Dan,
        };

        match Story::insert(&story, deps.store.as_ref()).await {
            Ok(_) => added += 1,
            Err(e) if is_unique_violation(&e) => debug!(url, "Story already in inbox"),
            Err(e) => error!(url, error = %e, "Failed to insert story"),
        }
    }

    let report = SyncReport {
        fetched: items.len(),
        added,
    };
    info!(fetched = report.fetched, added = report.added, "Feedly sync complete");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::stories::STORIES_TABLE;
    use crate::kernel::test_dependencies::{MockFeedSource, MockRecordStore};
    use crate::kernel::TestDependencies;
    use serde_json::json;

    fn feed_item(id: &str, title: &str, url: Option<&str>) -> serde_json::Value {
        let mut item = json!({
            "id": id,
            "title": title,
            "origin": { "title": "NME" },
            "summary": { "content": "A festival-ready single." },
            "visual": { "url": "https://img.example.com/blank.png" },
            "published": 1_767_225_600_000i64
        });
        if let Some(url) = url {
            item["alternate"] = json!([{ "href": url }]);
        }
        item
    }

    #[tokio::test]
    async fn test_sync_inserts_and_skips_duplicates() {
        let test_deps = TestDependencies::new()
            .mock_store(
                MockRecordStore::new()
                    .with_unique(STORIES_TABLE, "url")
                    .with_rows(STORIES_TABLE, vec![json!({"id": "old", "url": "https://a.example/1"})]),
            )
            .mock_feed(
                MockFeedSource::new()
                    .with_item(feed_item("1", "Wet Leg announce tour", Some("https://a.example/1")))
                    .with_item(feed_item("2", "Foals share new single", Some("https://a.example/2")))
                    .with_item(feed_item("3", "No link here", None)),
            );
        let deps = test_deps.into_server_deps();

        let report = sync_feedly(&deps).await.unwrap();
        assert_eq!(report, SyncReport { fetched: 3, added: 1 });
        assert_eq!(report.message(), "Synced 3 items, added 1 new stories");
        assert_eq!(test_deps.feed.requests(), vec![FEED_BATCH_SIZE]);

        let rows = test_deps.store.rows(STORIES_TABLE);
        assert_eq!(rows.len(), 2);
        let foals = &rows[1];
        assert_eq!(foals["status"], "pending");
        assert_eq!(foals["created_by"], "dan");
        assert_eq!(foals["priority"], true);
        assert_eq!(foals["section"], "Festivals");
        assert_eq!(foals["is_festival"], true);
        assert_eq!(foals["image_url"], serde_json::Value::Null);
        assert_eq!(foals["artist_names"], json!(["Foals"]));
    }

    #[tokio::test]
    async fn test_sync_propagates_feed_errors() {
        let test_deps = TestDependencies::new().mock_feed(MockFeedSource::new().with_error(401));
        let err = sync_feedly(&test_deps.into_server_deps()).await.unwrap_err();
        assert_eq!(err.to_string(), "Feedly API error: 401");
    }

    #[tokio::test]
    async fn test_sync_defaults_missing_fields() {
        let test_deps = TestDependencies::new().mock_feed(MockFeedSource::new().with_item(json!({
            "id": "x",
            "alternate": [{ "href": "https://b.example/x" }]
        })));
        let report = sync_feedly(&test_deps.into_server_deps()).await.unwrap();
        assert_eq!(report.added, 1);

        let row = &test_deps.store.rows(STORIES_TABLE)[0];
        assert_eq!(row["title"], "Untitled");
        assert_eq!(row["source"], "Unknown");
        assert_eq!(row["summary"], serde_json::Value::Null);
        assert_eq!(row["section"], serde_json::Value::Null);
        assert_eq!(row["artist_names"], serde_json::Value::Null);
    }
}
