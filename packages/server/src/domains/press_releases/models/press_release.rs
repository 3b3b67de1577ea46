use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use supabase_client::Query;

use crate::common::records::{decode_rows, single_row};
use crate::kernel::BaseRecordStore;

pub const PRESS_RELEASES_TABLE: &str = "editorial_press_releases";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PressReleaseStatus {
    #[default]
    Pending,
    Imported,
    Rejected,
}

impl PressReleaseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PressReleaseStatus::Pending => "pending",
            PressReleaseStatus::Imported => "imported",
            PressReleaseStatus::Rejected => "rejected",
        }
    }

    /// Only pending releases can be decided on
    pub fn can_transition_to(&self, next: PressReleaseStatus) -> bool {
        *self == PressReleaseStatus::Pending && next != PressReleaseStatus::Pending
    }
}

impl std::fmt::Display for PressReleaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Email attachment re-hosted on Cloudinary by the mail importer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Attachment {
    pub filename: String,
    #[serde(default)]
    pub cloudinary_url: Option<String>,
    #[serde(default)]
    pub mime_type: Option<String>,
}

/// Asset links found in the email body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExternalLinks {
    #[serde(default)]
    pub dropbox: Vec<String>,
    #[serde(default)]
    pub google_drive: Vec<String>,
    #[serde(default)]
    pub youtube: Vec<String>,
    #[serde(default)]
    pub vimeo: Vec<String>,
    #[serde(default)]
    pub wetransfer: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PressRelease {
    pub id: String,
    #[serde(default)]
    pub email_id: Option<String>,
    #[serde(default)]
    pub sender_email: String,
    #[serde(default)]
    pub sender_name: Option<String>,
    pub subject: String,
    #[serde(default)]
    pub body_text: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub external_links: Option<ExternalLinks>,
    #[serde(default)]
    pub artist_names: Option<Vec<String>>,
    #[serde(default)]
    pub status: PressReleaseStatus,
    #[serde(default)]
    pub imported_to_story_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl PressRelease {
    /// Display name of the sender, falling back to the address
    pub fn sender(&self) -> &str {
        self.sender_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.sender_email)
    }

    /// First hosted attachment, used as the featured image
    pub fn lead_image(&self) -> Option<&str> {
        self.attachments
            .iter()
            .find_map(|a| a.cloudinary_url.as_deref())
    }

    pub async fn find_by_id(id: &str, store: &dyn BaseRecordStore) -> Result<PressRelease> {
        let rows = store
            .select(PRESS_RELEASES_TABLE, &Query::new().eq("id", id).limit(1))
            .await?;
        single_row(rows, "press release", id)
    }

    pub async fn find_all(store: &dyn BaseRecordStore) -> Result<Vec<PressRelease>> {
        let rows = store
            .select(PRESS_RELEASES_TABLE, &Query::new().order("created_at", false))
            .await?;
        decode_rows(rows, PRESS_RELEASES_TABLE)
    }

    pub async fn count_by_status(
        status: PressReleaseStatus,
        store: &dyn BaseRecordStore,
    ) -> Result<usize> {
        let rows = store
            .select(
                PRESS_RELEASES_TABLE,
                &Query::new().select("id").eq("status", status),
            )
            .await?;
        Ok(rows.len())
    }

    pub async fn mark_imported(
        id: &str,
        story_id: &str,
        store: &dyn BaseRecordStore,
    ) -> Result<PressRelease> {
        let rows = store
            .update(
                PRESS_RELEASES_TABLE,
                &Query::new().eq("id", id),
                json!({
                    "status": PressReleaseStatus::Imported,
                    "imported_to_story_id": story_id,
                }),
            )
            .await?;
        single_row(rows, "press release", id)
    }

    pub async fn set_status(
        id: &str,
        status: PressReleaseStatus,
        store: &dyn BaseRecordStore,
    ) -> Result<PressRelease> {
        let rows = store
            .update(
                PRESS_RELEASES_TABLE,
                &Query::new().eq("id", id),
                json!({ "status": status }),
            )
            .await?;
        single_row(rows, "press release", id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_pending_can_transition() {
        use PressReleaseStatus as S;
        assert!(S::Pending.can_transition_to(S::Imported));
        assert!(S::Pending.can_transition_to(S::Rejected));
        assert!(!S::Pending.can_transition_to(S::Pending));
        assert!(!S::Imported.can_transition_to(S::Rejected));
        assert!(!S::Rejected.can_transition_to(S::Imported));
    }

    #[test]
    fn test_sender_and_lead_image() {
        let release: PressRelease = serde_json::from_value(json!({
            "id": "p1",
            "sender_email": "press@label.com",
            "sender_name": "",
            "subject": "News",
            "attachments": [
                {"filename": "notes.pdf"},
                {"filename": "press.jpg", "cloudinary_url": "https://res.cloudinary.com/x/press.jpg"}
            ]
        }))
        .unwrap();

        assert_eq!(release.sender(), "press@label.com");
        assert_eq!(
            release.lead_image(),
            Some("https://res.cloudinary.com/x/press.jpg")
        );
        assert_eq!(release.status, PressReleaseStatus::Pending);
    }
}
