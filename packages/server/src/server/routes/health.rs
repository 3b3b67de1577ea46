use axum::{extract::Extension, Json};
use serde::Serialize;

use crate::server::app::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    integrations: Vec<&'static str>,
}

/// Health check endpoint
///
/// Liveness only; lists the integrations that have credentials configured.
pub async fn health_handler(Extension(state): Extension<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        integrations: state.integrations.clone(),
    })
}
