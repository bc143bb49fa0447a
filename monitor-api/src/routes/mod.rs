//! API route definitions

mod articles;
mod feeds;
mod health;
mod report;

use crate::AppState;
use axum::Router;

/// Create all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(feeds::routes())
        .merge(articles::routes())
        .merge(report::routes())
}

/// Create health routes (mounted at the root, not under /api)
pub fn health_routes() -> Router<AppState> {
    health::routes()
}
