//! Route definitions for the Wingman API.

pub mod dashboard;
pub mod health;

use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let cors = match state.config.frontend_url.parse::<HeaderValue>() {
        Ok(origin) => CorsLayer::new().allow_origin(origin),
        Err(_) => {
            tracing::warn!(frontend_url = %state.config.frontend_url, "Invalid FRONTEND_URL, allowing any origin");
            CorsLayer::new().allow_origin(Any)
        }
    }
    .allow_methods(Any)
    .allow_headers(Any);

    let list_routes = Router::new()
        .route("/lists/{list_id}/summary", get(dashboard::summary))
        .route("/lists/{list_id}/dashboard", get(dashboard::report));

    Router::new()
        .route("/health/live", get(health::live))
        .nest("/api/v1", list_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
