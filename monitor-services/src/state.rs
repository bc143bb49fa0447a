//! In-memory session state and the state-update queue
//!
//! All shared state lives in one [`MonitorState`] object. Request
//! handlers mutate the feed registry directly through its methods;
//! background tasks (fetch cycles, analysis tasks) instead post
//! [`StateUpdate`] events to a queue that a single
//! [`MonitorController`] task consumes, so there is never more than one
//! writer racing on the article list.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use monitor_core::{AiAnalysis, Article, FeedSource, TrendReport};
use tokio::sync::{mpsc, RwLock};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Updates posted by background tasks
#[derive(Debug)]
pub enum StateUpdate {
    /// A fetch cycle settled; replaces the article list wholesale
    ArticlesFetched { cycle: u64, articles: Vec<Article> },
    /// A per-article analysis finished (success or fallback)
    AnalysisCompleted {
        article_id: String,
        analysis: AiAnalysis,
    },
    /// A trend report was regenerated
    TrendReportReady { report: TrendReport },
}

/// Outcome of marking an article for analysis
#[derive(Debug, PartialEq, Eq)]
pub enum AnalysisSlot {
    /// The article is now flagged; analyze this material
    Marked { title: String, content: String },
    /// A request for this article is already outstanding
    AlreadyAnalyzing,
    /// No article with that id
    NotFound,
}

/// Session-scoped state for one monitor instance
pub struct MonitorState {
    feeds: RwLock<Vec<FeedSource>>,
    articles: RwLock<Vec<Article>>,
    trend_report: RwLock<Option<TrendReport>>,
    /// Monotonic fetch-cycle counter; each refresh takes the next token
    next_cycle: AtomicU64,
    /// Highest cycle whose articles were committed
    committed_cycle: AtomicU64,
    updates_tx: mpsc::UnboundedSender<StateUpdate>,
}

impl MonitorState {
    /// Create the state object and the receiving end of its update queue
    ///
    /// The receiver must be handed to a [`MonitorController`]; updates
    /// posted before the controller runs are buffered, not lost.
    pub fn new(seed: Vec<FeedSource>) -> (Arc<Self>, mpsc::UnboundedReceiver<StateUpdate>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let state = Arc::new(Self {
            feeds: RwLock::new(seed),
            articles: RwLock::new(Vec::new()),
            trend_report: RwLock::new(None),
            next_cycle: AtomicU64::new(0),
            committed_cycle: AtomicU64::new(0),
            updates_tx: tx,
        });
        (state, rx)
    }

    /// Sender for posting updates from background tasks
    pub fn updates(&self) -> mpsc::UnboundedSender<StateUpdate> {
        self.updates_tx.clone()
    }

    pub async fn feeds(&self) -> Vec<FeedSource> {
        self.feeds.read().await.clone()
    }

    pub async fn articles(&self) -> Vec<Article> {
        self.articles.read().await.clone()
    }

    pub async fn trend_report(&self) -> Option<TrendReport> {
        self.trend_report.read().await.clone()
    }

    /// Register a new feed source
    pub async fn add_feed(&self, name: &str, url: &str, category: &str) -> FeedSource {
        let source = FeedSource::new(&Uuid::new_v4().to_string(), name, url, category);
        self.feeds.write().await.push(source.clone());
        info!("Registered feed source: {} ({})", source.name, source.url);
        source
    }

    /// Remove a feed source and purge its articles
    ///
    /// Cascading delete: no article may reference an unregistered
    /// source. Returns false when the id is unknown.
    pub async fn remove_feed(&self, id: &str) -> bool {
        let mut feeds = self.feeds.write().await;
        let before = feeds.len();
        feeds.retain(|f| f.id != id);
        if feeds.len() == before {
            return false;
        }
        // Purge while still holding the registry lock so no reader sees
        // an article whose source is gone
        let mut articles = self.articles.write().await;
        let purged = articles.len();
        articles.retain(|a| a.source_id != id);
        info!(
            "Removed feed source {} and purged {} of its articles",
            id,
            purged - articles.len()
        );
        true
    }

    /// Take the token for a new fetch cycle
    pub fn begin_cycle(&self) -> u64 {
        self.next_cycle.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Flag an article as having an analysis request outstanding
    pub async fn mark_analyzing(&self, article_id: &str) -> AnalysisSlot {
        let mut articles = self.articles.write().await;
        match articles.iter_mut().find(|a| a.id == article_id) {
            Some(article) if article.analyzing => AnalysisSlot::AlreadyAnalyzing,
            Some(article) => {
                article.analyzing = true;
                AnalysisSlot::Marked {
                    title: article.title.clone(),
                    content: article.content.clone(),
                }
            }
            None => AnalysisSlot::NotFound,
        }
    }

    /// Apply one queued update; called only from the controller task
    async fn apply(&self, update: StateUpdate) {
        match update {
            StateUpdate::ArticlesFetched { cycle, articles } => {
                // Discard results from any cycle older than the latest
                // committed one; a slow fetch must not overwrite fresher data
                let committed = self.committed_cycle.load(Ordering::SeqCst);
                if cycle <= committed {
                    warn!(
                        "Discarding stale fetch cycle {} (committed: {})",
                        cycle, committed
                    );
                    return;
                }
                let count = articles.len();
                *self.articles.write().await = articles;
                self.committed_cycle.store(cycle, Ordering::SeqCst);
                info!("Committed fetch cycle {} with {} articles", cycle, count);
            }
            StateUpdate::AnalysisCompleted {
                article_id,
                analysis,
            } => {
                let mut articles = self.articles.write().await;
                match articles.iter_mut().find(|a| a.id == article_id) {
                    Some(article) => {
                        article.analysis = Some(analysis);
                        article.analyzing = false;
                        debug!("Attached analysis to article {}", article_id);
                    }
                    None => {
                        // Article was refetched or its source removed while
                        // the request was in flight
                        debug!("Dropping analysis for vanished article {}", article_id);
                    }
                }
            }
            StateUpdate::TrendReportReady { report } => {
                *self.trend_report.write().await = Some(report);
                info!("Trend report updated");
            }
        }
    }
}

/// Single consumer of the state-update queue
pub struct MonitorController {
    state: Arc<MonitorState>,
    rx: mpsc::UnboundedReceiver<StateUpdate>,
}

impl MonitorController {
    pub fn new(state: Arc<MonitorState>, rx: mpsc::UnboundedReceiver<StateUpdate>) -> Self {
        Self { state, rx }
    }

    /// Consume updates until every sender is dropped
    pub async fn run(mut self) {
        info!("Monitor controller started");
        while let Some(update) = self.rx.recv().await {
            self.state.apply(update).await;
        }
        info!("Monitor controller stopped");
    }

    /// Spawn the controller onto the runtime
    pub fn spawn(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(self.run())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use monitor_core::Sentiment;

    fn article(id: &str, source_id: &str) -> Article {
        Article {
            id: id.to_string(),
            title: format!("Title {}", id),
            link: "#".to_string(),
            published_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
            content: "content...".to_string(),
            source_id: source_id.to_string(),
            source_name: "Source".to_string(),
            analysis: None,
            analyzing: false,
        }
    }

    fn analysis() -> AiAnalysis {
        AiAnalysis {
            summary: "s".to_string(),
            sentiment: Sentiment::Negative,
            keywords: vec!["k".to_string()],
            risk_score: 60,
            category: "billing".to_string(),
            key_takeaway: "t".to_string(),
        }
    }

    #[tokio::test]
    async fn test_add_and_remove_feed_cascades() {
        let (state, _rx) = MonitorState::new(Vec::new());
        let kept = state.add_feed("Kept", "https://a.example/rss", "news").await;
        let doomed = state.add_feed("Doomed", "https://b.example/rss", "news").await;

        state
            .apply(StateUpdate::ArticlesFetched {
                cycle: state.begin_cycle(),
                articles: vec![
                    article("a1", &kept.id),
                    article("a2", &doomed.id),
                    article("a3", &doomed.id),
                ],
            })
            .await;

        assert!(state.remove_feed(&doomed.id).await);

        let feeds = state.feeds().await;
        assert_eq!(feeds.len(), 1);
        assert_eq!(feeds[0].id, kept.id);

        let articles = state.articles().await;
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].source_id, kept.id);
    }

    #[tokio::test]
    async fn test_remove_unknown_feed_is_noop() {
        let (state, _rx) = MonitorState::new(Vec::new());
        state.add_feed("A", "https://a.example/rss", "news").await;
        assert!(!state.remove_feed("no-such-id").await);
        assert_eq!(state.feeds().await.len(), 1);
    }

    #[tokio::test]
    async fn test_stale_cycle_discarded() {
        let (state, _rx) = MonitorState::new(Vec::new());
        let old_cycle = state.begin_cycle();
        let new_cycle = state.begin_cycle();

        state
            .apply(StateUpdate::ArticlesFetched {
                cycle: new_cycle,
                articles: vec![article("fresh", "s1")],
            })
            .await;
        // The older cycle settles late; its batch must not win
        state
            .apply(StateUpdate::ArticlesFetched {
                cycle: old_cycle,
                articles: vec![article("stale", "s1")],
            })
            .await;

        let articles = state.articles().await;
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].id, "fresh");
    }

    #[tokio::test]
    async fn test_analysis_lifecycle() {
        let (state, _rx) = MonitorState::new(Vec::new());
        state
            .apply(StateUpdate::ArticlesFetched {
                cycle: state.begin_cycle(),
                articles: vec![article("a1", "s1"), article("a2", "s1")],
            })
            .await;

        match state.mark_analyzing("a1").await {
            AnalysisSlot::Marked { title, .. } => assert_eq!(title, "Title a1"),
            other => panic!("unexpected slot: {:?}", other),
        }
        assert_eq!(
            state.mark_analyzing("a1").await,
            AnalysisSlot::AlreadyAnalyzing
        );
        assert_eq!(state.mark_analyzing("nope").await, AnalysisSlot::NotFound);

        state
            .apply(StateUpdate::AnalysisCompleted {
                article_id: "a1".to_string(),
                analysis: analysis(),
            })
            .await;

        let articles = state.articles().await;
        let a1 = articles.iter().find(|a| a.id == "a1").unwrap();
        assert!(!a1.analyzing);
        assert_eq!(a1.analysis.as_ref().unwrap().risk_score, 60);
        // The other article is untouched
        let a2 = articles.iter().find(|a| a.id == "a2").unwrap();
        assert!(a2.analysis.is_none());
    }

    #[tokio::test]
    async fn test_analysis_for_vanished_article_dropped() {
        let (state, _rx) = MonitorState::new(Vec::new());
        state
            .apply(StateUpdate::AnalysisCompleted {
                article_id: "gone".to_string(),
                analysis: analysis(),
            })
            .await;
        assert!(state.articles().await.is_empty());
    }

    #[tokio::test]
    async fn test_controller_consumes_queue() {
        let (state, rx) = MonitorState::new(Vec::new());
        let handle = MonitorController::new(Arc::clone(&state), rx).spawn();

        let cycle = state.begin_cycle();
        state
            .updates()
            .send(StateUpdate::ArticlesFetched {
                cycle,
                articles: vec![article("a1", "s1")],
            })
            .unwrap();

        // Give the controller a chance to drain the queue
        tokio::task::yield_now().await;
        for _ in 0..50 {
            if !state.articles().await.is_empty() {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        assert_eq!(state.articles().await.len(), 1);
        handle.abort();
    }

    #[tokio::test]
    async fn test_trend_report_replaced_wholesale() {
        let (state, _rx) = MonitorState::new(Vec::new());
        assert!(state.trend_report().await.is_none());

        let report = TrendReport {
            timestamp: Utc::now(),
            top_risks: vec!["r1".to_string()],
            overall_sentiment: "tense".to_string(),
            actionable_advice: "advice".to_string(),
        };
        state
            .apply(StateUpdate::TrendReportReady {
                report: report.clone(),
            })
            .await;
        assert_eq!(
            state.trend_report().await.unwrap().top_risks,
            report.top_risks
        );
    }
}
