use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use supabase_client::Query;

use crate::common::records::{decode_rows, single_row};
use crate::common::Editor;
use crate::kernel::BaseRecordStore;

pub const STORIES_TABLE: &str = "editorial_stories";

/// Review state of a candidate story
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl StoryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoryStatus::Pending => "pending",
            StoryStatus::Approved => "approved",
            StoryStatus::Rejected => "rejected",
        }
    }

    /// Only pending stories can be decided, and only once.
    pub fn can_transition_to(&self, next: StoryStatus) -> bool {
        matches!(
            (self, next),
            (StoryStatus::Pending, StoryStatus::Approved)
                | (StoryStatus::Pending, StoryStatus::Rejected)
        )
    }
}

impl std::fmt::Display for StoryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StoryStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(StoryStatus::Pending),
            "approved" => Ok(StoryStatus::Approved),
            "rejected" => Ok(StoryStatus::Rejected),
            _ => Err(anyhow::anyhow!("Invalid story status: {}", s)),
        }
    }
}

/// Candidate story from a feed or an imported press release
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    pub status: StoryStatus,
    #[serde(default)]
    pub priority: bool,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub is_festival: bool,
    #[serde(default)]
    pub artist_names: Option<Vec<String>>,
    #[serde(default)]
    pub created_by: Option<Editor>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Insert payload for `editorial_stories`
#[derive(Debug, Clone, Serialize)]
pub struct NewStory {
    pub title: String,
    pub url: String,
    pub source: String,
    pub summary: Option<String>,
    pub image_url: Option<String>,
    pub published_at: DateTime<Utc>,
    pub status: StoryStatus,
    pub priority: bool,
    pub section: Option<String>,
    pub is_festival: bool,
    pub artist_names: Option<Vec<String>>,
    pub created_by: Editor,
}

impl Story {
    pub async fn find_by_id(id: &str, store: &dyn BaseRecordStore) -> Result<Story> {
        let rows = store
            .select(STORIES_TABLE, &Query::new().eq("id", id).limit(1))
            .await?;
        single_row(rows, "story", id)
    }

    /// Stories in a given state, newest publication first
    pub async fn find_by_status(
        status: StoryStatus,
        store: &dyn BaseRecordStore,
    ) -> Result<Vec<Story>> {
        let rows = store
            .select(
                STORIES_TABLE,
                &Query::new()
                    .eq("status", status)
                    .order("published_at", false),
            )
            .await?;
        decode_rows(rows, STORIES_TABLE)
    }

    pub async fn count_by_status(status: StoryStatus, store: &dyn BaseRecordStore) -> Result<usize> {
        let rows = store
            .select(STORIES_TABLE, &Query::new().select("id").eq("status", status))
            .await?;
        Ok(rows.len())
    }

    pub async fn insert(story: &NewStory, store: &dyn BaseRecordStore) -> Result<Story> {
        let rows = store.insert(STORIES_TABLE, serde_json::to_value(story)?).await?;
        single_row(rows, "story", &story.url)
    }

    pub async fn set_status(
        id: &str,
        status: StoryStatus,
        store: &dyn BaseRecordStore,
    ) -> Result<Story> {
        let rows = store
            .update(
                STORIES_TABLE,
                &Query::new().eq("id", id),
                json!({ "status": status, "updated_at": Utc::now() }),
            )
            .await?;
        single_row(rows, "story", id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_story_transitions() {
        use StoryStatus::*;
        assert!(Pending.can_transition_to(Approved));
        assert!(Pending.can_transition_to(Rejected));
        assert!(!Approved.can_transition_to(Rejected));
        assert!(!Rejected.can_transition_to(Approved));
        assert!(!Pending.can_transition_to(Pending));
    }

    #[test]
    fn test_story_deserializes_sparse_row() {
        let story: Story = serde_json::from_value(json!({
            "id": "1",
            "title": "Wet Leg announce tour",
            "url": "https://example.com/a",
            "status": "pending",
            "published_at": "2026-03-01T10:00:00+00:00",
            "artist_names": null
        }))
        .unwrap();
        assert_eq!(story.status, StoryStatus::Pending);
        assert!(story.artist_names.is_none());
        assert!(!story.priority);
    }
}
