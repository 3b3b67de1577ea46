use axum::extract::Extension;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::common::{ApiResult, Editor};
use crate::domains::dashboard::{load_counters, upload_asset, AssetUpload, Counters, UploadedAsset};
use crate::domains::notifications::request_attention;
use crate::server::app::AppState;
use crate::server::middleware::CurrentEditor;

/// GET /api/counters
pub async fn counters_handler(Extension(state): Extension<AppState>) -> ApiResult<Json<Counters>> {
    Ok(Json(load_counters(&state.deps).await?))
}

#[derive(Debug, Deserialize)]
pub struct AttentionRequest {
    /// Falls back to the `X-Editor` header
    requester: Option<Editor>,
    #[serde(default)]
    reason: String,
}

/// POST /api/notifications/attention
pub async fn attention_handler(
    Extension(state): Extension<AppState>,
    CurrentEditor(editor): CurrentEditor,
    Json(request): Json<AttentionRequest>,
) -> ApiResult<Json<Value>> {
    let requester = request.requester.unwrap_or(editor);
    request_attention(&state.deps, requester, &request.reason).await?;
    Ok(Json(json!({ "success": true })))
}

/// POST /api/assets
pub async fn upload_asset_handler(
    Extension(state): Extension<AppState>,
    Json(upload): Json<AssetUpload>,
) -> ApiResult<Json<UploadedAsset>> {
    Ok(Json(upload_asset(upload, &state.deps).await?))
}
