//! Signed WordPress gateway functions.
//!
//! Each handler relays one WordPress REST call and answers with the upstream
//! status. The signed handlers read their body through [`SignedBody`].

use axum::body::Bytes;
use axum::extract::{Extension, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};
use wordpress_client::{is_valid_taxonomy, WpResponse};

use crate::common::utils::decode_base64_file;
use crate::common::{ApiError, ApiResult};
use crate::server::app::AppState;
use crate::server::middleware::SignedBody;

fn parse_json(body: &Bytes) -> ApiResult<Value> {
    serde_json::from_slice(body).map_err(|_| ApiError::BadRequest("Invalid JSON".into()))
}

fn status_of(response: &WpResponse) -> StatusCode {
    StatusCode::from_u16(response.status).unwrap_or(StatusCode::BAD_GATEWAY)
}

/// `{ok, status, body}` envelope with the upstream status
fn envelope(response: &WpResponse) -> Response {
    (
        status_of(response),
        Json(json!({
            "ok": response.is_success(),
            "status": response.status,
            "body": response.json_or_raw(),
        })),
    )
        .into_response()
}

/// Upstream status and JSON body as-is
fn passthrough(response: &WpResponse) -> Response {
    (status_of(response), Json(response.json_or_raw())).into_response()
}

/// Optional taxonomy name; rejected unless it is a plain REST base
fn taxonomy_param(taxonomy: Option<&str>) -> ApiResult<Option<&str>> {
    match taxonomy.filter(|t| !t.is_empty()) {
        Some(t) if !is_valid_taxonomy(t) => Err(ApiError::BadRequest("Invalid taxonomy".into())),
        other => Ok(other),
    }
}

/// Numeric id given as a JSON number or a digit string
fn id_field(value: &Value) -> Option<u64> {
    value
        .as_u64()
        .or_else(|| value.as_str().and_then(|s| s.trim().parse().ok()))
}

/// POST /functions/wp-post - create (no `id`) or update a post
pub async fn wp_post_handler(
    Extension(state): Extension<AppState>,
    SignedBody(body): SignedBody,
) -> ApiResult<Response> {
    let payload = parse_json(&body)?;
    let data = payload
        .get("data")
        .or_else(|| payload.get("post"))
        .filter(|d| d.is_object())
        .cloned()
        .ok_or_else(|| ApiError::BadRequest("Missing data".into()))?;
    let id = payload.get("id").and_then(id_field);

    let response = state.deps.wordpress.upsert_post(id, data).await?;
    info!(post_id = ?id, status = response.status, "wp-post relayed");
    Ok(envelope(&response))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MediaUpload {
    file: Option<String>,
    filename: Option<String>,
    mime_type: Option<String>,
    post_id: Option<Value>,
    featured: Option<Value>,
}

/// JavaScript-style truthiness for loosely typed flags (`true`, `1`, `"yes"`)
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// POST /functions/wp-media - upload a file, optionally as a featured image
pub async fn wp_media_handler(
    Extension(state): Extension<AppState>,
    SignedBody(body): SignedBody,
) -> ApiResult<Response> {
    let upload: MediaUpload = serde_json::from_value(parse_json(&body)?)
        .map_err(|e| ApiError::BadRequest(format!("Invalid media payload: {}", e)))?;

    let file = upload
        .file
        .as_deref()
        .filter(|f| !f.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Missing file (base64)".into()))?;
    let bytes = decode_base64_file(file).map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let filename = upload.filename.as_deref().unwrap_or("upload");
    let mime_type = upload
        .mime_type
        .as_deref()
        .unwrap_or("application/octet-stream");

    let response = state
        .deps
        .wordpress
        .upload_media(bytes, filename, mime_type)
        .await?;
    info!(filename, status = response.status, "wp-media uploaded");

    let post_id = upload.post_id.as_ref().and_then(id_field);
    let media_id = response.json_or_raw().get("id").and_then(Value::as_u64);
    let featured = upload.featured.as_ref().is_some_and(is_truthy);
    if let (Some(post_id), Some(media_id), true) = (post_id, media_id, featured) {
        let featured_response = state
            .deps
            .wordpress
            .set_featured_media(post_id, media_id)
            .await?;
        debug!(post_id, media_id, status = featured_response.status, "Featured media set");
    }

    Ok(envelope(&response))
}

/// POST /functions/wp-query - read-only taxonomy and media lookups
pub async fn wp_query_handler(
    Extension(state): Extension<AppState>,
    SignedBody(body): SignedBody,
) -> ApiResult<Response> {
    let payload = parse_json(&body)?;
    let wordpress = &state.deps.wordpress;
    let text = |key: &str| payload.get(key).and_then(Value::as_str);

    let response = match text("action") {
        Some("list_terms") | Some("get_terms") => {
            wordpress.list_terms(taxonomy_param(text("taxonomy"))?).await?
        }
        Some("search_media") => wordpress.search_media(text("search")).await?,
        Some("get_media") => match payload.get("id").and_then(id_field) {
            Some(id) => wordpress.get_media(id).await?,
            None => {
                return Err(ApiError::BadRequest(
                    "Unknown action or missing parameters".into(),
                ))
            }
        },
        _ => {
            return Err(ApiError::BadRequest(
                "Unknown action or missing parameters".into(),
            ))
        }
    };

    Ok(passthrough(&response))
}

#[derive(Debug, Deserialize)]
pub struct TaxonomyParams {
    taxonomy: Option<String>,
}

/// GET /functions/wp-taxonomy?taxonomy= - unsigned term listing
pub async fn wp_taxonomy_handler(
    Extension(state): Extension<AppState>,
    Query(params): Query<TaxonomyParams>,
) -> ApiResult<Response> {
    let taxonomy = taxonomy_param(params.taxonomy.as_deref())?;
    let response = state.deps.wordpress.list_terms(taxonomy).await?;
    Ok(passthrough(&response))
}
