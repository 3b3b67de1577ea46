use axum::extract::{Extension, Path};
use axum::Json;

use crate::common::ApiResult;
use crate::domains::press_releases::actions::{
    approve_press_release, list_press_releases, reject_press_release, ImportedPressRelease,
};
use crate::domains::press_releases::PressRelease;
use crate::server::app::AppState;
use crate::server::middleware::CurrentEditor;

/// GET /api/press-releases
pub async fn list_press_releases_handler(
    Extension(state): Extension<AppState>,
) -> ApiResult<Json<Vec<PressRelease>>> {
    Ok(Json(list_press_releases(&state.deps).await?))
}

/// POST /api/press-releases/:id/approve
pub async fn approve_press_release_handler(
    Extension(state): Extension<AppState>,
    CurrentEditor(editor): CurrentEditor,
    Path(id): Path<String>,
) -> ApiResult<Json<ImportedPressRelease>> {
    Ok(Json(approve_press_release(&id, editor, &state.deps).await?))
}

/// POST /api/press-releases/:id/reject
pub async fn reject_press_release_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<PressRelease>> {
    Ok(Json(reject_press_release(&id, &state.deps).await?))
}
