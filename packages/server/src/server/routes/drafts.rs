use axum::extract::{Extension, Path};
use axum::http::StatusCode;
use axum::Json;

use crate::common::ApiResult;
use crate::domains::drafts::actions::{
    approve_draft, delete_draft, list_drafts, publish_draft, save_draft, SaveDraftInput,
};
use crate::domains::drafts::Draft;
use crate::server::app::AppState;
use crate::server::middleware::CurrentEditor;

/// GET /api/drafts
pub async fn list_drafts_handler(
    Extension(state): Extension<AppState>,
) -> ApiResult<Json<Vec<Draft>>> {
    Ok(Json(list_drafts(&state.deps).await?))
}

/// POST /api/drafts - create or update
pub async fn save_draft_handler(
    Extension(state): Extension<AppState>,
    CurrentEditor(editor): CurrentEditor,
    Json(input): Json<SaveDraftInput>,
) -> ApiResult<Json<Draft>> {
    Ok(Json(save_draft(input, editor, &state.deps).await?))
}

/// POST /api/drafts/:id/approve
pub async fn approve_draft_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Draft>> {
    Ok(Json(approve_draft(&id, &state.deps).await?))
}

/// POST /api/drafts/:id/publish
pub async fn publish_draft_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Draft>> {
    Ok(Json(publish_draft(&id, &state.deps).await?))
}

/// DELETE /api/drafts/:id
pub async fn delete_draft_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    delete_draft(&id, &state.deps).await?;
    Ok(StatusCode::NO_CONTENT)
}
