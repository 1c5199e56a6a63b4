use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use tracing::info;

use super::models::{parse_filter_request, DebugQuery};
use crate::{
    error::{AppError, AppResult},
    filter::{FilterResult, SettlementFilter},
};

#[derive(Clone)]
pub struct AppState {
    pub filter: Arc<SettlementFilter>,
}

/// Filter settled IPN serials out of a candidate list
/// POST /filter
pub async fn filter_serials(
    State(state): State<AppState>,
    Json(body): Json<Value>,
) -> AppResult<Json<FilterResult>> {
    let serials = parse_filter_request(&body)?;

    info!("Filtering {} candidate serials", serials.len());

    let result = state.filter.filter(&serials).await;
    Ok(Json(result))
}

/// Debug path, same filter over comma-separated serials
/// GET /filter?test=1&serials=a,b,c
pub async fn filter_serials_debug(
    State(state): State<AppState>,
    Query(params): Query<DebugQuery>,
) -> AppResult<Json<FilterResult>> {
    if params.test.is_none() {
        return Err(AppError::InvalidInput(
            "test parameter is required".to_string(),
        ));
    }

    let serials: Vec<String> = params
        .serials
        .map(|s| s.split(',').map(str::to_string).collect())
        .unwrap_or_default();

    let result = state.filter.filter(&serials).await;
    Ok(Json(result))
}

/// Answers plain OPTIONS probes; preflight itself is handled by the CORS layer
pub async fn filter_preflight() -> StatusCode {
    StatusCode::OK
}

/// Health check endpoint
pub async fn health_check() -> Json<Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "hdb-filter",
    }))
}
