//! Trend-report endpoints

use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::AppState;

/// Create trend-report routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/report", get(get_report).post(regenerate_report))
}

/// GET /api/report - Current trend report, if one has been generated
async fn get_report(State(state): State<AppState>) -> impl IntoResponse {
    match state.state.trend_report().await {
        Some(report) => (StatusCode::OK, Json(report)).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "error": "No trend report generated yet"
            })),
        )
            .into_response(),
    }
}

/// POST /api/report - Regenerate the trend report from current headlines
///
/// Waits for the AI call and returns the new report; on any service
/// failure this is the fixed fallback report, never an error.
async fn regenerate_report(State(state): State<AppState>) -> impl IntoResponse {
    let report = state.analysis.regenerate_trend_report().await;
    (StatusCode::OK, Json(report))
}
