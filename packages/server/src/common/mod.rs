// Common types and utilities shared across the application

pub mod auth;
pub mod error;
pub mod records;
pub mod types;
pub mod utils;

pub use error::{ApiError, ApiResult, WorkflowError};
pub use types::*;
