use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::common::{ApiError, Editor};

pub const EDITOR_HEADER: &str = "x-editor";

/// Editor acting on the request, from `X-Editor` (defaults to dan)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrentEditor(pub Editor);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentEditor
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.headers.get(EDITOR_HEADER) {
            None => Ok(CurrentEditor(Editor::default())),
            Some(value) => value
                .to_str()
                .map_err(|_| ApiError::BadRequest("Invalid X-Editor header".into()))?
                .parse()
                .map(CurrentEditor)
                .map_err(ApiError::BadRequest),
        }
    }
}
