use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use axum::http::HeaderMap;
use chrono::Utc;
use tracing::{debug, warn};

use crate::common::auth::{verify, SIGNATURE_HEADER, TIMESTAMP_HEADER};
use crate::common::ApiError;
use crate::server::app::AppState;

/// Largest body accepted on signed routes (base64 media uploads)
pub const MAX_SIGNED_BODY_BYTES: usize = 25 * 1024 * 1024;

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(String::from)
}

/// Raw request body whose `X-Timestamp`/`X-Signature` headers match the
/// gateway secret.
///
/// Runs as the handler's body extractor, after method routing, so a wrong
/// method is still answered with 405. Rejections are
/// `401 {"error": "Unauthorized", "why": ...}`.
#[derive(Debug, Clone)]
pub struct SignedBody(pub Bytes);

#[async_trait]
impl<S> FromRequest<S> for SignedBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let secret = req
            .extensions()
            .get::<AppState>()
            .and_then(|app| app.gateway_secret.clone());
        let timestamp = header(req.headers(), TIMESTAMP_HEADER);
        let signature = header(req.headers(), SIGNATURE_HEADER);
        let path = req.uri().path().to_string();

        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::BadRequest(format!("Unreadable body: {}", e)))?;

        if let Err(why) = verify(
            secret.as_deref(),
            timestamp.as_deref(),
            signature.as_deref(),
            &body,
            Utc::now().timestamp(),
        ) {
            warn!(path, why = %why, "Rejected unsigned request");
            return Err(ApiError::Unauthorized(why.to_string()));
        }

        debug!(path, "Signature verified");
        Ok(SignedBody(body))
    }
}
