use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::common::WorkflowError;

/// Decode a base64 file payload. A `data:<mime>;base64,` prefix is accepted.
pub fn decode_base64_file(encoded: &str) -> Result<Vec<u8>, WorkflowError> {
    let data = match encoded.strip_prefix("data:") {
        Some(rest) => rest.split_once(',').map(|(_, d)| d).unwrap_or(rest),
        None => encoded,
    };
    let data: String = data.chars().filter(|c| !c.is_whitespace()).collect();

    STANDARD
        .decode(data)
        .map_err(|e| WorkflowError::Invalid(format!("Invalid base64 file: {}", e)))
}
