use axum::http::{header, Method};
use tower_http::cors::{Any, CorsLayer};

/// Wide-open CORS: the filter API is called from browser tooling on other
/// hosts during LN issuance.
pub fn create_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}
