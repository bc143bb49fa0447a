//! Aggregate trend reports

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Session-wide risk summary computed over many article titles
///
/// Singleton per session; replaced wholesale each time it is regenerated.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendReport {
    /// Generation time, stamped locally (never trusted from the service)
    pub timestamp: DateTime<Utc>,
    /// Top risk themes to watch, at most three
    pub top_risks: Vec<String>,
    /// Free-text description of overall public sentiment
    pub overall_sentiment: String,
    /// Combined response advice for hospital leadership
    pub actionable_advice: String,
}
