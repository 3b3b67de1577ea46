use axum::extract::{Extension, Path, Query};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use wordpress_client::WpPost;

use crate::common::ApiResult;
use crate::domains::wordpress::actions::{
    import_to_barry, list_awaiting_barry, list_wp_posts, sync_posts,
};
use crate::domains::wordpress::WordPressArticle;
use crate::server::app::AppState;

#[derive(Debug, Deserialize)]
pub struct PostFilter {
    status: Option<String>,
    per_page: Option<u32>,
}

/// GET /api/wordpress/posts?status=&per_page=
pub async fn list_wp_posts_handler(
    Extension(state): Extension<AppState>,
    Query(filter): Query<PostFilter>,
) -> ApiResult<Json<Vec<WpPost>>> {
    let status = filter.status.as_deref().filter(|s| !s.is_empty());
    Ok(Json(list_wp_posts(status, filter.per_page, &state.deps).await?))
}

/// POST /api/wordpress/sync
pub async fn sync_wp_posts_handler(
    Extension(state): Extension<AppState>,
) -> ApiResult<Json<Value>> {
    let added = sync_posts(&state.deps).await?;
    Ok(Json(json!({ "success": true, "added": added })))
}

/// GET /api/barry
pub async fn list_barry_handler(
    Extension(state): Extension<AppState>,
) -> ApiResult<Json<Vec<WordPressArticle>>> {
    Ok(Json(list_awaiting_barry(&state.deps).await?))
}

/// POST /api/barry/:id/import
pub async fn import_barry_handler(
    Extension(state): Extension<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<WordPressArticle>> {
    Ok(Json(import_to_barry(&id, &state.deps).await?))
}
