//! Error types shared by domain actions and HTTP handlers.
//!
//! Domain actions return `anyhow::Result` and raise [`WorkflowError`] for the
//! cases a handler must distinguish. [`ApiError`] turns either into a JSON
//! response body of the form `{"error": ..., "message": ...}`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Errors raised by editorial workflow actions.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("cannot move {entity} from {from} to {to}")]
    InvalidTransition {
        entity: &'static str,
        from: String,
        to: String,
    },

    #[error("Missing env vars: {}", .0.join(", "))]
    MissingConfig(Vec<&'static str>),

    /// Caller-supplied data the action cannot accept
    #[error("{0}")]
    Invalid(String),
}

impl WorkflowError {
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn transition(entity: &'static str, from: impl ToString, to: impl ToString) -> Self {
        Self::InvalidTransition {
            entity,
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// 400 with `{"error": <message>}`
    #[error("{0}")]
    BadRequest(String),

    /// 401 with `{"error": "Unauthorized", "why": <reason>}`
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Missing env vars: {}", .0.join(", "))]
    MissingConfig(Vec<&'static str>),

    /// A handler-specific failure label with detail, e.g. "Sync failed".
    #[error("{error}: {message}")]
    Failed {
        status: StatusCode,
        error: &'static str,
        message: String,
    },

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn failed(status: StatusCode, error: &'static str, message: impl ToString) -> Self {
        Self::Failed {
            status,
            error,
            message: message.to_string(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Failed { status, .. } => *status,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::MissingConfig(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<WorkflowError>() {
            Ok(WorkflowError::NotFound { entity, id }) => {
                Self::NotFound(format!("{} {} not found", entity, id))
            }
            Ok(transition @ WorkflowError::InvalidTransition { .. }) => {
                Self::Conflict(transition.to_string())
            }
            Ok(WorkflowError::MissingConfig(keys)) => Self::MissingConfig(keys),
            Ok(WorkflowError::Invalid(message)) => Self::BadRequest(message),
            Err(err) => {
                if let Some(e) = err.downcast_ref::<wordpress_client::WordPressError>() {
                    return match e {
                        wordpress_client::WordPressError::InvalidInput { .. } => {
                            Self::BadRequest(e.to_string())
                        }
                        _ => Self::Upstream(e.to_string()),
                    };
                }
                if let Some(e) = err.downcast_ref::<supabase_client::SupabaseError>() {
                    return match e {
                        supabase_client::SupabaseError::InvalidPath(_) => {
                            Self::BadRequest(e.to_string())
                        }
                        _ => Self::Upstream(e.to_string()),
                    };
                }
                Self::Internal(err)
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match &self {
            Self::BadRequest(message) => json!({ "error": message }),
            Self::Unauthorized(why) => json!({ "error": "Unauthorized", "why": why }),
            Self::NotFound(message) => json!({ "error": "Not found", "message": message }),
            Self::Conflict(message) => json!({ "error": "Conflict", "message": message }),
            Self::MissingConfig(_) => json!({ "error": self.to_string() }),
            Self::Failed { error, message, .. } => json!({ "error": error, "message": message }),
            Self::Upstream(message) => json!({ "error": "Upstream error", "message": message }),
            Self::Internal(err) => {
                tracing::error!(error = %err, "Request failed");
                json!({ "error": "Internal error", "message": err.to_string() })
            }
        };
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
