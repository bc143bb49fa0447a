//! Concurrent feed aggregation
//!
//! Fans out over every registered source, waits for all fetches to
//! settle (failures are already absorbed to empty lists inside the
//! fetcher), and publishes one merged list sorted newest-first through
//! the state-update queue.

use std::sync::Arc;

use futures::future::join_all;
use monitor_core::{Article, FeedSource};
use monitor_feeds::FetchArticles;
use tracing::{debug, info};

use crate::state::{MonitorState, StateUpdate};

/// Aggregates per-feed batches into the session article list
#[derive(Clone)]
pub struct FeedAggregator {
    fetcher: Arc<dyn FetchArticles>,
    state: Arc<MonitorState>,
}

impl FeedAggregator {
    pub fn new(fetcher: Arc<dyn FetchArticles>, state: Arc<MonitorState>) -> Self {
        Self { fetcher, state }
    }

    /// Run one fetch cycle and post the merged list to the update queue
    ///
    /// Returns the cycle token. The controller discards the batch if a
    /// newer cycle was committed while this one was in flight.
    pub async fn refresh(&self) -> u64 {
        let cycle = self.state.begin_cycle();
        let sources = self.state.feeds().await;
        info!("Fetch cycle {} over {} sources", cycle, sources.len());

        let articles = aggregate(self.fetcher.as_ref(), &sources).await;

        // Queue send only fails when the controller is gone, i.e. at shutdown
        let _ = self
            .state
            .updates()
            .send(StateUpdate::ArticlesFetched { cycle, articles });
        cycle
    }
}

/// Fetch all sources concurrently and merge, sorted newest-first
///
/// Never fails: a slow or broken feed contributes an empty batch and the
/// rest of the cycle proceeds.
pub async fn aggregate(fetcher: &dyn FetchArticles, sources: &[FeedSource]) -> Vec<Article> {
    let batches = join_all(sources.iter().map(|source| fetcher.fetch(source))).await;

    let mut all: Vec<Article> = batches.into_iter().flatten().collect();
    all.sort_by(|a, b| b.published_at.cmp(&a.published_at));

    debug!(
        "Aggregated {} articles from {} sources",
        all.len(),
        sources.len()
    );
    all
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, TimeZone, Utc};
    use std::collections::HashMap;

    /// Stub fetcher with canned batches per source id
    struct StubFetcher {
        batches: HashMap<String, Vec<Article>>,
    }

    #[async_trait]
    impl FetchArticles for StubFetcher {
        async fn fetch(&self, source: &FeedSource) -> Vec<Article> {
            self.batches.get(&source.id).cloned().unwrap_or_default()
        }
    }

    fn source(id: &str) -> FeedSource {
        FeedSource::new(id, id, "https://example.com/rss", "news")
    }

    fn article(id: &str, source_id: &str, published_at: DateTime<Utc>) -> Article {
        Article {
            id: id.to_string(),
            title: id.to_string(),
            link: "#".to_string(),
            published_at,
            content: "c...".to_string(),
            source_id: source_id.to_string(),
            source_name: source_id.to_string(),
            analysis: None,
            analyzing: false,
        }
    }

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, 0, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn test_two_feed_merge_order() {
        let fetcher = StubFetcher {
            batches: HashMap::from([
                (
                    "f1".to_string(),
                    vec![article("a", "f1", day(1)), article("b", "f1", day(3))],
                ),
                ("f2".to_string(), vec![article("c", "f2", day(2))]),
            ]),
        };

        let merged = aggregate(&fetcher, &[source("f1"), source("f2")]).await;
        let order: Vec<_> = merged.iter().map(|a| a.published_at).collect();
        assert_eq!(order, vec![day(3), day(2), day(1)]);
    }

    #[tokio::test]
    async fn test_shuffled_timestamps_sort_non_increasing() {
        let times = [5, 2, 9, 1, 7, 3, 8, 4, 6, 10];
        let fetcher = StubFetcher {
            batches: HashMap::from([(
                "f1".to_string(),
                times
                    .iter()
                    .map(|d| article(&format!("a{}", d), "f1", day(*d)))
                    .collect(),
            )]),
        };

        let merged = aggregate(&fetcher, &[source("f1")]).await;
        assert_eq!(merged.len(), times.len());
        for pair in merged.windows(2) {
            assert!(pair[0].published_at >= pair[1].published_at);
        }
    }

    #[tokio::test]
    async fn test_failing_feed_contributes_empty_batch() {
        // f2 has no canned batch: the stub's equivalent of an absorbed failure
        let fetcher = StubFetcher {
            batches: HashMap::from([("f1".to_string(), vec![article("a", "f1", day(1))])]),
        };

        let merged = aggregate(&fetcher, &[source("f1"), source("f2")]).await;
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].source_id, "f1");
    }

    #[tokio::test]
    async fn test_no_sources_yields_empty_list() {
        let fetcher = StubFetcher {
            batches: HashMap::new(),
        };
        assert!(aggregate(&fetcher, &[]).await.is_empty());
    }

    #[tokio::test]
    async fn test_refresh_publishes_through_queue() {
        let (state, rx) = crate::state::MonitorState::new(vec![source("f1")]);
        let handle = crate::state::MonitorController::new(std::sync::Arc::clone(&state), rx).spawn();

        let fetcher = StubFetcher {
            batches: HashMap::from([("f1".to_string(), vec![article("a", "f1", day(1))])]),
        };
        let aggregator = FeedAggregator::new(Arc::new(fetcher), Arc::clone(&state));
        let cycle = aggregator.refresh().await;
        assert_eq!(cycle, 1);

        for _ in 0..50 {
            if !state.articles().await.is_empty() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        assert_eq!(state.articles().await.len(), 1);
        handle.abort();
    }
}
