//! Feed registry endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
    Json, Router,
};
use serde::Deserialize;
use tracing::error;

use crate::AppState;

/// Request body for registering a feed
#[derive(Debug, Deserialize)]
pub struct AddFeedRequest {
    pub name: String,
    pub url: String,
    /// Grouping label; defaults to "uncategorized"
    pub category: Option<String>,
}

/// Create feed routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/feeds", get(list_feeds).post(add_feed))
        .route("/feeds/{id}", delete(remove_feed))
}

/// GET /api/feeds - List registered feed sources
async fn list_feeds(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.state.feeds().await)
}

/// POST /api/feeds - Register a new feed source
async fn add_feed(
    State(state): State<AppState>,
    Json(body): Json<AddFeedRequest>,
) -> impl IntoResponse {
    if body.name.trim().is_empty() || body.url.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({
                "error": "Both name and url are required"
            })),
        )
            .into_response();
    }

    let category = body.category.as_deref().unwrap_or("uncategorized");
    let source = state
        .state
        .add_feed(body.name.trim(), body.url.trim(), category)
        .await;

    // Pick up the new source's articles in the background
    let aggregator = state.aggregator.clone();
    tokio::spawn(async move {
        aggregator.refresh().await;
    });

    (StatusCode::CREATED, Json(source)).into_response()
}

/// DELETE /api/feeds/:id - Remove a feed source and purge its articles
async fn remove_feed(State(state): State<AppState>, Path(id): Path<String>) -> impl IntoResponse {
    if state.state.remove_feed(&id).await {
        StatusCode::NO_CONTENT.into_response()
    } else {
        error!("Attempted to remove unknown feed source: {}", id);
        (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "error": format!("No feed source with id {}", id)
            })),
        )
            .into_response()
    }
}
