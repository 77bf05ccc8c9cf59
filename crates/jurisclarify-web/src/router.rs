//! Axum router — maps all URL paths to handlers.

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{
    analyze::analyze,
    ask::ask,
    auth::auth_me,
    ocr::ocr_extract,
    simplify::simplify_text,
    system::{health, root},
    upload::{upload_page, upload_submit},
};
use crate::sse::sse_handler;
use crate::state::{AppState, SharedState};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    // Multipart framing needs headroom beyond the raw file cap.
    let body_limit = state.config.limits.max_upload_bytes + 64 * 1024;
    let cors = cors_layer(&state.config.server.allowed_origins);
    let shared: SharedState = Arc::new(state);

    Router::new()
        // Service status
        .route("/", get(root))
        .route("/health", get(health))

        // Analysis backend
        .route("/ocr", post(ocr_extract))
        .route("/simplify", post(simplify_text))

        // Full pipeline
        .route("/analyze", post(analyze))
        .route("/upload", get(upload_page).post(upload_submit))

        // Inference relay
        .route("/ask", post(ask))

        // Identity
        .route("/auth/me", get(auth_me))

        // SSE streaming
        .route("/api/events", get(sse_handler))

        // Middleware
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}
