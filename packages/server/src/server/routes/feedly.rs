use axum::extract::Extension;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use crate::common::{ApiError, ApiResult};
use crate::domains::stories::actions::sync_feedly;
use crate::server::app::AppState;

/// POST /functions/sync-feedly
pub async fn sync_feedly_handler(Extension(state): Extension<AppState>) -> ApiResult<Json<Value>> {
    let report = sync_feedly(&state.deps)
        .await
        .map_err(|e| ApiError::failed(StatusCode::INTERNAL_SERVER_ERROR, "Sync failed", e))?;

    Ok(Json(json!({ "success": true, "message": report.message() })))
}
