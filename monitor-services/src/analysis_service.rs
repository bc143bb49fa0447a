//! Per-article analysis dispatch and trend-report regeneration
//!
//! Analysis requests are fire-and-forget from the caller's perspective:
//! each spawned task targets exactly one article and reports back
//! through the state-update queue, so concurrent analyses for different
//! articles never interfere.

use std::sync::Arc;

use monitor_ai::{OpinionAiClient, TREND_TITLE_CAP};
use monitor_core::{MonitorError, MonitorResult, TrendReport};
use tracing::debug;

use crate::state::{AnalysisSlot, MonitorState, StateUpdate};

/// Dispatches AI work against the session state
#[derive(Clone)]
pub struct AnalysisService {
    client: OpinionAiClient,
    state: Arc<MonitorState>,
}

impl AnalysisService {
    pub fn new(client: OpinionAiClient, state: Arc<MonitorState>) -> Self {
        Self { client, state }
    }

    /// Request analysis for one article
    ///
    /// Marks the article as analyzing and spawns the AI call; the result
    /// (real or fallback) arrives via the update queue. Idempotent while
    /// a request is outstanding. Errors only for an unknown article id.
    pub async fn request_analysis(&self, article_id: &str) -> MonitorResult<()> {
        let (title, content) = match self.state.mark_analyzing(article_id).await {
            AnalysisSlot::Marked { title, content } => (title, content),
            AnalysisSlot::AlreadyAnalyzing => {
                debug!("Analysis already outstanding for {}", article_id);
                return Ok(());
            }
            AnalysisSlot::NotFound => {
                return Err(MonitorError::not_found(format!(
                    "No article with id {}",
                    article_id
                )))
            }
        };

        let client = self.client.clone();
        let tx = self.state.updates();
        let article_id = article_id.to_string();
        tokio::spawn(async move {
            // Never fails; falls back to the safe default internally
            let analysis = client.analyze_article(&title, &content).await;
            let _ = tx.send(StateUpdate::AnalysisCompleted {
                article_id,
                analysis,
            });
        });

        Ok(())
    }

    /// Regenerate the session trend report from current article titles
    ///
    /// Titles are taken newest-first (the article list is already sorted
    /// that way) up to the client's cap. The new report is published
    /// through the update queue and also returned to the caller.
    pub async fn regenerate_trend_report(&self) -> TrendReport {
        let titles: Vec<String> = self
            .state
            .articles()
            .await
            .iter()
            .take(TREND_TITLE_CAP)
            .map(|a| a.title.clone())
            .collect();

        let report = self.client.generate_trend_report(&titles).await;

        let _ = self.state.updates().send(StateUpdate::TrendReportReady {
            report: report.clone(),
        });
        report
    }
}
