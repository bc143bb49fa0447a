//! Article listing, refresh, and analysis endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use monitor_core::MonitorError;
use tracing::error;

use crate::AppState;

/// Create article routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/articles", get(list_articles))
        .route("/articles/refresh", post(refresh_articles))
        .route("/articles/{id}/analyze", post(analyze_article))
}

/// GET /api/articles - Current merged article list, newest first
async fn list_articles(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.state.articles().await)
}

/// POST /api/articles/refresh - Launch a new fetch cycle
///
/// Returns the cycle token immediately; the merged list is published
/// once every feed fetch has settled. A cycle that loses the race to a
/// newer one is discarded by the controller.
async fn refresh_articles(State(state): State<AppState>) -> impl IntoResponse {
    let aggregator = state.aggregator.clone();
    tokio::spawn(async move {
        aggregator.refresh().await;
    });

    (
        StatusCode::ACCEPTED,
        Json(serde_json::json!({ "status": "refreshing" })),
    )
}

/// POST /api/articles/:id/analyze - Request AI analysis for one article
async fn analyze_article(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.analysis.request_analysis(&id).await {
        Ok(()) => (
            StatusCode::ACCEPTED,
            Json(serde_json::json!({ "status": "analyzing", "articleId": id })),
        )
            .into_response(),
        Err(MonitorError::NotFound(msg)) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": msg })),
        )
            .into_response(),
        Err(e) => {
            error!("Failed to dispatch analysis for {}: {}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": format!("Failed to dispatch analysis: {}", e) })),
            )
                .into_response()
        }
    }
}
