//! Public-Opinion Monitor API Server
//!
//! HTTP surface for the hospital communications dashboard: feed
//! management, article listing and refresh, per-article AI analysis,
//! and trend-report regeneration.

mod routes;

use axum::{
    http::{header, Method},
    Router,
};
use monitor_ai::OpinionAiClient;
use monitor_feeds::RelayClient;
use monitor_services::{
    seed_feeds, AnalysisService, FeedAggregator, MonitorController, MonitorState,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Default relay endpoint prefix; the feed URL is appended percent-encoded
const DEFAULT_RELAY_URL: &str = "https://api.allorigins.win/get?url=";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub state: Arc<MonitorState>,
    pub aggregator: FeedAggregator,
    pub analysis: AnalysisService,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env.local file
    if let Err(e) = dotenvy::from_filename(".env.local") {
        // Not an error if the file doesn't exist
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env.local: {}", e);
        }
    }

    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,monitor_api=debug")),
        )
        .init();

    info!("Starting Public-Opinion Monitor API");

    if std::env::var("OPENAI_API_KEY").is_err() {
        info!("No OPENAI_API_KEY in environment - analysis requests will return fallbacks");
    }

    // Session state and its single-consumer update queue
    let (state, updates_rx) = MonitorState::new(seed_feeds());
    let _controller = MonitorController::new(Arc::clone(&state), updates_rx).spawn();

    // Feed ingestion through the relay
    let relay_url =
        std::env::var("RELAY_URL").unwrap_or_else(|_| DEFAULT_RELAY_URL.to_string());
    info!("Using feed relay: {}", relay_url);
    let aggregator = FeedAggregator::new(Arc::new(RelayClient::new(relay_url)), Arc::clone(&state));

    // AI clients
    let mut ai_client = OpinionAiClient::new();
    if let Ok(model) = std::env::var("MONITOR_MODEL") {
        info!("Using analysis model: {}", model);
        ai_client = ai_client.with_model(&model);
    }
    let analysis = AnalysisService::new(ai_client, Arc::clone(&state));

    // Populate the article list in the background on startup
    let aggregator_for_boot = aggregator.clone();
    tokio::spawn(async move {
        info!("Running initial fetch cycle...");
        aggregator_for_boot.refresh().await;
    });

    let app_state = AppState {
        state,
        aggregator,
        analysis,
    };

    // Configure CORS for the dashboard frontend
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    // Build router
    let app = Router::new()
        .nest("/api", routes::api_routes())
        .merge(routes::health_routes())
        .layer(cors)
        .with_state(app_state);

    // Start server
    let port = std::env::var("SERVER_PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(3001);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
