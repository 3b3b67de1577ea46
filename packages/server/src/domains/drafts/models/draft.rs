use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use supabase_client::Query;

use crate::common::records::{decode_rows, single_row};
use crate::common::Editor;
use crate::kernel::BaseRecordStore;

pub const DRAFTS_TABLE: &str = "editorial_drafts";

/// Lifecycle of an article draft
///
/// ```text
/// draft ⇄ in_review → approved → published
///   └──────────┴──────────────────→ published
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftStatus {
    #[default]
    Draft,
    InReview,
    Approved,
    Published,
}

impl DraftStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftStatus::Draft => "draft",
            DraftStatus::InReview => "in_review",
            DraftStatus::Approved => "approved",
            DraftStatus::Published => "published",
        }
    }

    pub fn can_transition_to(&self, next: DraftStatus) -> bool {
        use DraftStatus as S;
        match self {
            S::Draft => matches!(next, S::Draft | S::InReview | S::Published),
            S::InReview => matches!(next, S::Draft | S::InReview | S::Approved | S::Published),
            S::Approved => next == S::Published,
            S::Published => false,
        }
    }

    /// States an editor can still save into
    pub fn is_editable(&self) -> bool {
        matches!(self, DraftStatus::Draft | DraftStatus::InReview)
    }
}

impl std::fmt::Display for DraftStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Draft {
    pub id: String,
    #[serde(default)]
    pub story_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub featured_image: Option<String>,
    pub status: DraftStatus,
    #[serde(default)]
    pub wordpress_post_id: Option<u64>,
    #[serde(default)]
    pub wordpress_status: Option<String>,
    #[serde(default)]
    pub artist_names: Option<Vec<String>>,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub created_by: Option<Editor>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

/// Insert payload for `editorial_drafts`
#[derive(Debug, Clone, Serialize)]
pub struct NewDraft {
    pub story_id: Option<String>,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    pub featured_image: Option<String>,
    pub status: DraftStatus,
    pub artist_names: Option<Vec<String>>,
    pub section: Option<String>,
    pub created_by: Editor,
    pub updated_at: DateTime<Utc>,
}

impl Draft {
    pub async fn find_by_id(id: &str, store: &dyn BaseRecordStore) -> Result<Draft> {
        let rows = store
            .select(DRAFTS_TABLE, &Query::new().eq("id", id).limit(1))
            .await?;
        single_row(rows, "draft", id)
    }

    /// Drafts still being worked on, most recently edited first
    pub async fn find_open(store: &dyn BaseRecordStore) -> Result<Vec<Draft>> {
        let rows = store
            .select(
                DRAFTS_TABLE,
                &Query::new()
                    .in_list("status", &[DraftStatus::Draft, DraftStatus::InReview])
                    .order("updated_at", false),
            )
            .await?;
        decode_rows(rows, DRAFTS_TABLE)
    }

    pub async fn count_by_status(status: DraftStatus, store: &dyn BaseRecordStore) -> Result<usize> {
        let rows = store
            .select(DRAFTS_TABLE, &Query::new().select("id").eq("status", status))
            .await?;
        Ok(rows.len())
    }

    pub async fn insert(draft: &NewDraft, store: &dyn BaseRecordStore) -> Result<Draft> {
        let rows = store.insert(DRAFTS_TABLE, serde_json::to_value(draft)?).await?;
        single_row(rows, "draft", &draft.slug)
    }

    /// Apply a partial update and return the stored row
    pub async fn update(id: &str, patch: Value, store: &dyn BaseRecordStore) -> Result<Draft> {
        let rows = store
            .update(DRAFTS_TABLE, &Query::new().eq("id", id), patch)
            .await?;
        single_row(rows, "draft", id)
    }

    pub async fn delete(id: &str, store: &dyn BaseRecordStore) -> Result<()> {
        store.delete(DRAFTS_TABLE, &Query::new().eq("id", id)).await
    }
}
