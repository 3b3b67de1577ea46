use axum::extract::{Extension, Path, Query};
use axum::Json;
use serde::Deserialize;

use crate::common::{ApiError, ApiResult};
use crate::domains::stories::actions::{approve_story, list_stories, reject_story};
use crate::domains::stories::{Story, StoryStatus};
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
pub struct StoryFilter {
    status: Option<String>,
}

/// GET /api/stories?status=
pub async fn list_stories_handler(
    Extension(state): Extension<AppState>,
    Query(filter): Query<StoryFilter>,
) -> ApiResult<Json<Vec<Story>>> {
    let status = match filter.status.as_deref() {
        Some(s) => s
            .parse::<StoryStatus>()
            .map_err(|e| ApiError::BadRequest(e.to_string()))?,
        None => StoryStatus::Pending,
    };
    Ok(Json(list_stories(status, &state.deps).await?))
}

/// POST /api/stories/:id/approve
pub async fn approve_story_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Story>> {
    Ok(Json(approve_story(&id, &state.deps).await?))
}

/// POST /api/stories/:id/reject
pub async fn reject_story_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Story>> {
    Ok(Json(reject_story(&id, &state.deps).await?))
}
