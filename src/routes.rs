// src/routes.rs

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::{handlers::sanitize, state::AppState};

/// Headroom for JSON framing and escaping on top of the raw input limit.
const BODY_LIMIT_FACTOR: usize = 6;

/// Assembles the main application router.
///
/// * Mounts the sanitizer endpoints under `/api/sanitize`.
/// * Applies global middleware (Trace, CORS, body limit).
/// * Injects global state (shared Sanitizer).
pub fn create_router(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([axum::http::header::CONTENT_TYPE]);

    let body_limit = state
        .sanitizer
        .max_input_bytes()
        .saturating_mul(BODY_LIMIT_FACTOR);

    let sanitize_routes = Router::new()
        .route("/html", post(sanitize::sanitize_html))
        .route("/css", post(sanitize::sanitize_css))
        .route("/strip-tags", post(sanitize::strip_tags))
        .route("/strip-links", post(sanitize::strip_links))
        .route("/policy", get(sanitize::get_policy));

    Router::new()
        .nest("/api/sanitize", sanitize_routes)
        // Global Middleware (applied from outside in)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors)
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(state)
}
