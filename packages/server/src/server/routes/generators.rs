use axum::body::Bytes;
use axum::http::StatusCode;
use axum::Json;

use crate::common::{ApiError, ApiResult};
use crate::domains::articles::{
    generate_feed_article, generate_press_article, FeedItemInput, GeneratedArticle,
    PressReleaseInput,
};

fn parse_input<T: serde::de::DeserializeOwned>(body: &Bytes) -> ApiResult<T> {
    serde_json::from_slice(body).map_err(|e| {
        ApiError::failed(StatusCode::BAD_REQUEST, "Failed to generate article", e)
    })
}

/// POST /functions/generate-article
pub async fn generate_article_handler(body: Bytes) -> ApiResult<Json<GeneratedArticle>> {
    let input: PressReleaseInput = parse_input(&body)?;
    Ok(Json(generate_press_article(&input)))
}

/// POST /functions/generate-feed-article
pub async fn generate_feed_article_handler(body: Bytes) -> ApiResult<Json<GeneratedArticle>> {
    let input: FeedItemInput = parse_input(&body)?;
    Ok(Json(generate_feed_article(&input)))
}
