//! Press release review: import into the story/draft pipeline or reject.

use anyhow::Result;
use chrono::Utc;
use serde::Serialize;
use tracing::info;

use super::models::{PressRelease, PressReleaseStatus};
use crate::common::utils::{escape_html, slugify, truncate_chars};
use crate::common::{Editor, WorkflowError};
use crate::domains::drafts::{Draft, DraftStatus, NewDraft};
use crate::domains::notifications::{notify, Priority};
use crate::domains::stories::{NewStory, Story, StoryStatus};
use crate::kernel::ServerDeps;

/// Placeholder URL for stories that did not come from a feed
pub const PRESS_RELEASE_URL: &str = "#press-release";

const SUMMARY_CHARS: usize = 500;
const EXCERPT_CHARS: usize = 300;

/// Everything created by approving a release
#[derive(Debug, Clone, Serialize)]
pub struct ImportedPressRelease {
    pub press_release: PressRelease,
    pub story: Story,
    pub draft: Draft,
}

pub async fn list_press_releases(deps: &ServerDeps) -> Result<Vec<PressRelease>> {
    PressRelease::find_all(deps.store.as_ref()).await
}

/// Plain email text as paragraphs
fn body_html(body: &str) -> String {
    format!("<p>{}</p>", escape_html(body).replace("\n\n", "</p><p>"))
}

/// Turn a pending release into an approved priority story plus a draft.
///
/// Rows are written one after another; a failure part way leaves the earlier
/// rows in place.
pub async fn approve_press_release(
    id: &str,
    editor: Editor,
    deps: &ServerDeps,
) -> Result<ImportedPressRelease> {
    let store = deps.store.as_ref();
    let release = PressRelease::find_by_id(id, store).await?;

    if !release.status.can_transition_to(PressReleaseStatus::Imported) {
        return Err(WorkflowError::transition(
            "press release",
            release.status,
            PressReleaseStatus::Imported,
        )
        .into());
    }

    let story = Story::insert(
        &NewStory {
            title: release.subject.clone(),
            url: PRESS_RELEASE_URL.to_string(),
            source: release.sender().to_string(),
            summary: Some(truncate_chars(&release.body_text, SUMMARY_CHARS).to_string()),
            image_url: release.lead_image().map(String::from),
            published_at: release.created_at.unwrap_or_else(Utc::now),
            status: StoryStatus::Approved,
            priority: true,
            section: None,
            is_festival: false,
            artist_names: release.artist_names.clone(),
            created_by: editor,
        },
        store,
    )
    .await?;

    let draft = Draft::insert(
        &NewDraft {
            story_id: Some(story.id.clone()),
            title: release.subject.clone(),
            slug: slugify(&release.subject),
            excerpt: truncate_chars(&release.body_text, EXCERPT_CHARS).to_string(),
            content: body_html(&release.body_text),
            featured_image: release.lead_image().map(String::from),
            status: DraftStatus::Draft,
            artist_names: release.artist_names.clone(),
            section: None,
            created_by: editor,
            updated_at: Utc::now(),
        },
        store,
    )
    .await?;

    let press_release = PressRelease::mark_imported(id, &story.id, store).await?;
    info!(
        press_release_id = %id,
        story_id = %story.id,
        draft_id = %draft.id,
        "Press release imported"
    );

    let images = press_release
        .attachments
        .iter()
        .filter(|a| a.cloudinary_url.is_some())
        .count();
    notify(
        deps,
        "Press Release Approved & Draft Created",
        &format!(
            "\"{}\" from {}\nDraft created with {} images",
            escape_html(&press_release.subject),
            escape_html(press_release.sender()),
            images
        ),
        Priority::High,
    )
    .await;

    Ok(ImportedPressRelease {
        press_release,
        story,
        draft,
    })
}

pub async fn reject_press_release(id: &str, deps: &ServerDeps) -> Result<PressRelease> {
    let store = deps.store.as_ref();
    let release = PressRelease::find_by_id(id, store).await?;

    if !release.status.can_transition_to(PressReleaseStatus::Rejected) {
        return Err(WorkflowError::transition(
            "press release",
            release.status,
            PressReleaseStatus::Rejected,
        )
        .into());
    }

    let rejected = PressRelease::set_status(id, PressReleaseStatus::Rejected, store).await?;
    info!(press_release_id = %id, "Press release rejected");
    Ok(rejected)
}
