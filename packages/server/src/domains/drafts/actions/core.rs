use anyhow::Result;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::common::utils::{escape_html, slugify};
use crate::common::{Editor, WorkflowError};
use crate::domains::drafts::models::{Draft, DraftStatus, NewDraft};
use crate::domains::notifications::{notify, Priority};
use crate::kernel::ServerDeps;

/// Editor form submission; `id` present means update.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SaveDraftInput {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub story_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub status: DraftStatus,
    #[serde(default)]
    pub artist_names: Option<Vec<String>>,
    #[serde(default)]
    pub section: Option<String>,
}

pub async fn list_drafts(deps: &ServerDeps) -> Result<Vec<Draft>> {
    Draft::find_open(deps.store.as_ref()).await
}

/// Create or update a draft. Saving as `in_review` pings the other editor.
pub async fn save_draft(input: SaveDraftInput, editor: Editor, deps: &ServerDeps) -> Result<Draft> {
    let store = deps.store.as_ref();

    let title = input.title.trim().to_string();
    if title.is_empty() {
        return Err(WorkflowError::Invalid("Title is required".into()).into());
    }
    if !input.status.is_editable() {
        return Err(WorkflowError::Invalid(format!(
            "Drafts can only be saved as draft or in_review, not {}",
            input.status
        ))
        .into());
    }

    let slug = input
        .slug
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .unwrap_or_else(|| slugify(&title));
    let featured_image = input.featured_image.filter(|url| !url.trim().is_empty());

    let draft = match input.id.as_deref() {
        Some(id) => {
            let existing = Draft::find_by_id(id, store).await?;
            if !existing.status.can_transition_to(input.status) {
                return Err(WorkflowError::transition("draft", existing.status, input.status).into());
            }

            Draft::update(
                id,
                json!({
                    "title": title,
                    "slug": slug,
                    "excerpt": input.excerpt,
                    "content": input.content,
                    "featured_image": featured_image,
                    "status": input.status,
                    "artist_names": input.artist_names,
                    "section": input.section,
                    "updated_at": Utc::now(),
                }),
                store,
            )
            .await?
        }
        None => {
            Draft::insert(
                &NewDraft {
                    story_id: input.story_id,
                    title,
                    slug,
                    excerpt: input.excerpt,
                    content: input.content,
                    featured_image,
                    status: input.status,
                    artist_names: input.artist_names,
                    section: input.section,
                    created_by: editor,
                    updated_at: Utc::now(),
                },
                store,
            )
            .await?
        }
    };

    info!(draft_id = %draft.id, status = %draft.status, editor = %editor, "Draft saved");

    if draft.status == DraftStatus::InReview {
        notify(
            deps,
            "Draft Ready for Review",
            &format!(
                "\"{}\" is ready for {}'s review",
                escape_html(&draft.title),
                reviewer_for(editor)
            ),
            Priority::Medium,
        )
        .await;
    }

    Ok(draft)
}

/// The other editor
fn reviewer_for(editor: Editor) -> &'static str {
    match editor {
        Editor::Dan => "Stephen",
        Editor::Stephen => "Dan",
    }
}

/// Sign off a draft that is in review.
pub async fn approve_draft(id: &str, deps: &ServerDeps) -> Result<Draft> {
    let store = deps.store.as_ref();
    let draft = Draft::find_by_id(id, store).await?;

    if draft.status != DraftStatus::InReview {
        return Err(WorkflowError::transition("draft", draft.status, DraftStatus::Approved).into());
    }

    let approved = Draft::update(
        id,
        json!({ "status": DraftStatus::Approved, "updated_at": Utc::now() }),
        store,
    )
    .await?;
    info!(draft_id = %id, "Draft approved");
    Ok(approved)
}

pub async fn delete_draft(id: &str, deps: &ServerDeps) -> Result<()> {
    let store = deps.store.as_ref();
    Draft::find_by_id(id, store).await?;
    Draft::delete(id, store).await?;
    info!(draft_id = %id, "Draft deleted");
    Ok(())
}
