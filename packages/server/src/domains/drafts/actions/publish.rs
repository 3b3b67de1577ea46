use anyhow::Result;
use chrono::Utc;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::json;
use tracing::info;
use wordpress_client::NewPost;

use crate::common::utils::escape_html;
use crate::common::WorkflowError;
use crate::domains::drafts::models::{Draft, DraftStatus};
use crate::domains::notifications::{notify, Priority};
use crate::kernel::ServerDeps;

/// WordPress "Uncategorized"
pub const DEFAULT_CATEGORY_ID: u64 = 1;

/// Term id of a magazine section in the WordPress `sections` taxonomy
pub fn section_term_id(section: &str) -> Option<u64> {
    match section {
        "Upset" => Some(6),
        "Hype" => Some(7),
        "Festivals" => Some(8),
        _ => None,
    }
}

lazy_static! {
    static ref BOLD: Regex = Regex::new(r"\*\*(.+?)\*\*").unwrap();
}

/// Editor markup to post HTML: `**bold**` and hard line breaks.
pub fn to_wordpress_html(content: &str) -> String {
    BOLD.replace_all(content, "<strong>$1</strong>")
        .replace('\n', "<br>\n")
}

/// Push a draft to WordPress as a WP draft and mark it published here.
pub async fn publish_draft(id: &str, deps: &ServerDeps) -> Result<Draft> {
    let store = deps.store.as_ref();
    let draft = Draft::find_by_id(id, store).await?;

    if !draft.status.can_transition_to(DraftStatus::Published) {
        return Err(WorkflowError::transition("draft", draft.status, DraftStatus::Published).into());
    }

    let post = deps
        .wordpress
        .create_post(&NewPost {
            title: draft.title.clone(),
            content: to_wordpress_html(&draft.content),
            excerpt: draft.excerpt.clone(),
            slug: draft.slug.clone(),
            status: "draft".to_string(),
            author: None,
            categories: vec![DEFAULT_CATEGORY_ID],
            sections: draft
                .section
                .as_deref()
                .and_then(section_term_id)
                .into_iter()
                .collect(),
            featured_media: None,
        })
        .await?;

    let now = Utc::now();
    let published = Draft::update(
        id,
        json!({
            "status": DraftStatus::Published,
            "wordpress_post_id": post.id,
            "wordpress_status": post.status,
            "published_at": now,
            "updated_at": now,
        }),
        store,
    )
    .await?;

    info!(draft_id = %id, wordpress_post_id = post.id, "Draft pushed to WordPress");

    notify(
        deps,
        "Draft Published to WordPress",
        &format!(
            "\"{}\" has been pushed to WordPress as a draft",
            escape_html(&published.title)
        ),
        Priority::High,
    )
    .await;

    Ok(published)
}
