//! Relay-based feed retrieval
//!
//! Direct cross-origin fetches of the feed documents are disallowed by
//! the target sites, so raw documents are retrieved through a relay
//! endpoint that wraps them in a JSON envelope.

use async_trait::async_trait;
use chrono::Utc;
use monitor_core::{Article, FeedSource};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::FeedError;
use crate::parse::parse_feed;

/// Fetch seam between the aggregator and the network
///
/// The contract is total: implementations return an empty list on any
/// failure instead of erroring, so one broken feed can never poison a
/// fetch cycle.
#[async_trait]
pub trait FetchArticles: Send + Sync {
    async fn fetch(&self, source: &FeedSource) -> Vec<Article>;
}

/// JSON envelope returned by the relay
///
/// Absence of `contents` is a hard failure for that feed.
#[derive(Debug, Deserialize)]
struct RelayEnvelope {
    contents: Option<String>,
}

/// Client for fetching feeds through the relay
pub struct RelayClient {
    client: Client,
    relay_url: String,
}

impl RelayClient {
    /// Create a new relay client
    ///
    /// `relay_url` is the relay endpoint prefix; the percent-encoded feed
    /// URL is appended as its parameter.
    pub fn new(relay_url: impl Into<String>) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .unwrap_or_else(|_| Client::new()),
            relay_url: relay_url.into(),
        }
    }

    async fn try_fetch(&self, source: &FeedSource) -> Result<Vec<Article>, FeedError> {
        let url = format!("{}{}", self.relay_url, urlencoding::encode(&source.url));

        let response = self
            .client
            .get(&url)
            .header("User-Agent", "OpinionMonitor/1.0")
            .send()
            .await
            .map_err(|e| FeedError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FeedError::RelayError {
                status: response.status().as_u16(),
                message: format!("Failed to fetch {}", source.url),
            });
        }

        let envelope: RelayEnvelope = response
            .json()
            .await
            .map_err(|e| FeedError::ParseError(e.to_string()))?;

        let contents = envelope.contents.ok_or(FeedError::MissingContents)?;

        parse_feed(&contents, source, Utc::now())
    }
}

#[async_trait]
impl FetchArticles for RelayClient {
    async fn fetch(&self, source: &FeedSource) -> Vec<Article> {
        match self.try_fetch(source).await {
            Ok(articles) => {
                debug!("Fetched {} articles from {}", articles.len(), source.name);
                articles
            }
            Err(e) => {
                warn!("Failed to fetch feed {}: {}", source.name, e);
                Vec::new()
            }
        }
    }
}
