//! Error types for the Supabase client.

use thiserror::Error;

/// Result type for Supabase client operations.
pub type Result<T> = std::result::Result<T, SupabaseError>;

/// Postgres SQLSTATE for unique constraint violations.
pub const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Error)]
pub enum SupabaseError {
    /// Transport failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// PostgREST rejected the request
    #[error("Supabase API error ({status}): {message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },

    /// Response body did not match the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// Forward path that would leave `/rest/v1`
    #[error("Invalid path: {0:?}")]
    InvalidPath(String),
}

impl SupabaseError {
    /// True when the write collided with a unique index (e.g. a story URL).
    pub fn is_unique_violation(&self) -> bool {
        match self {
            SupabaseError::Api { code, message, .. } => {
                code.as_deref() == Some(UNIQUE_VIOLATION) || message.contains("duplicate")
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_violation_detection() {
        let by_code = SupabaseError::Api {
            status: 409,
            code: Some("23505".into()),
            message: "conflict".into(),
        };
        let by_message = SupabaseError::Api {
            status: 409,
            code: None,
            message: "duplicate key value violates unique constraint".into(),
        };
        let other = SupabaseError::Api {
            status: 400,
            code: Some("PGRST204".into()),
            message: "column not found".into(),
        };

        assert!(by_code.is_unique_violation());
        assert!(by_message.is_unique_violation());
        assert!(!other.is_unique_violation());
        assert!(!SupabaseError::Parse("x".into()).is_unique_violation());
    }
}
