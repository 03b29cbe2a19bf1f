//! Application setup and router configuration.

use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::kernel::ServerDeps;
use crate::server::routes::{
    health_handler, list_submissions_handler, moderation_handler, submit_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub deps: Arc<ServerDeps>,
}

/// Build the Axum application router.
///
/// `/api/submit` is the public intake endpoint; `/api/submissions` is the
/// admin moderation endpoint (POST to act, GET to list).
pub fn build_app(pool: PgPool, deps: Arc<ServerDeps>) -> Router {
    let state = AppState {
        db_pool: pool,
        deps,
    };

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/submit", post(submit_handler))
        .route(
            "/api/submissions",
            post(moderation_handler).get(list_submissions_handler),
        )
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        // The submission form posts cross-origin from the public site
        .layer(CorsLayer::permissive())
}
