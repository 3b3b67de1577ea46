use axum::body::Bytes;
use axum::extract::{Extension, Path, RawQuery};
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::{debug, error, warn};

use crate::server::app::AppState;

/// /functions/supabase/*path - forward to PostgREST with the service key
///
/// `path` arrives percent-decoded and must stay under `/rest/v1`.
pub async fn supabase_proxy_handler(
    Extension(state): Extension<AppState>,
    method: Method,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
    body: Bytes,
) -> Response {
    if !supabase_client::is_safe_path(path.trim_start_matches('/')) {
        warn!(%method, path = %path, "Rejected Supabase path");
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Invalid path" })),
        )
            .into_response();
    }

    let body = (!body.is_empty()).then(|| String::from_utf8_lossy(&body).into_owned());

    match state
        .deps
        .store
        .forward(method.clone(), &path, query.as_deref(), body)
        .await
    {
        Ok((status, value)) => {
            debug!(%method, path, status, "Supabase request forwarded");
            let status = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            (status, Json(value)).into_response()
        }
        Err(e) => {
            error!(%method, path, error = %e, "Supabase forward failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}
