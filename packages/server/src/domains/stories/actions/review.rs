use anyhow::Result;
use tracing::info;

use crate::common::WorkflowError;
use crate::domains::stories::models::{Story, StoryStatus};
use crate::kernel::ServerDeps;

pub async fn list_stories(status: StoryStatus, deps: &ServerDeps) -> Result<Vec<Story>> {
    Story::find_by_status(status, deps.store.as_ref()).await
}

pub async fn approve_story(id: &str, deps: &ServerDeps) -> Result<Story> {
    decide(id, StoryStatus::Approved, deps).await
}

pub async fn reject_story(id: &str, deps: &ServerDeps) -> Result<Story> {
    decide(id, StoryStatus::Rejected, deps).await
}

async fn decide(id: &str, next: StoryStatus, deps: &ServerDeps) -> Result<Story> {
    let store = deps.store.as_ref();
    let story = Story::find_by_id(id, store).await?;

    if !story.status.can_transition_to(next) {
        return Err(WorkflowError::transition("story", story.status, next).into());
    }

    let updated = Story::set_status(id, next, store).await?;
    info!(story_id = %id, status = %next, "Story reviewed");
    Ok(updated)
}
