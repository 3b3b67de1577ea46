//! Decoding rows returned by the record store into domain models.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;
use supabase_client::SupabaseError;

use super::WorkflowError;

/// True when the store rejected a write against a unique index.
pub fn is_unique_violation(err: &anyhow::Error) -> bool {
    err.downcast_ref::<SupabaseError>()
        .is_some_and(SupabaseError::is_unique_violation)
}

pub fn decode_rows<T: DeserializeOwned>(rows: Vec<Value>, table: &str) -> Result<Vec<T>> {
    rows.into_iter()
        .map(|row| {
            serde_json::from_value(row).with_context(|| format!("Malformed {} row", table))
        })
        .collect()
}

/// The first returned row, or [`WorkflowError::NotFound`].
pub fn single_row<T: DeserializeOwned>(
    rows: Vec<Value>,
    entity: &'static str,
    id: &str,
) -> Result<T> {
    let row = rows
        .into_iter()
        .next()
        .ok_or_else(|| WorkflowError::not_found(entity, id))?;
    serde_json::from_value(row).with_context(|| format!("Malformed {} row", entity))
}
