use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AppError;

// ========== REQUEST MODELS ==========

/// Request body for `POST /filter`.
#[derive(Debug, Serialize, Deserialize)]
pub struct FilterRequest {
    pub ipn_serials: Vec<String>,
}

/// Query parameters for the `GET /filter` debug path.
#[derive(Debug, Deserialize)]
pub struct DebugQuery {
    pub test: Option<String>,
    pub serials: Option<String>,
}

/// Pulls `ipn_serials` out of a raw JSON body.
///
/// Validation stays manual so the endpoint answers 400 with an `error`
/// message for a missing key or wrong shape, rather than axum's default
/// rejection.
pub fn parse_filter_request(body: &Value) -> Result<Vec<String>, AppError> {
    let serials = body
        .get("ipn_serials")
        .ok_or_else(|| AppError::InvalidInput("ipn_serials is required".to_string()))?;

    let serials = serials
        .as_array()
        .ok_or_else(|| AppError::InvalidInput("ipn_serials must be an array".to_string()))?;

    serials
        .iter()
        .map(|v| {
            v.as_str().map(str::to_string).ok_or_else(|| {
                AppError::InvalidInput("ipn_serials must be an array of strings".to_string())
            })
        })
        .collect()
}
