//! Normalized feed articles

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::AiAnalysis;

/// One normalized feed item with bounded content length
///
/// Articles are replaced wholesale on each fetch cycle and purged when
/// their owning [`crate::FeedSource`] is removed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// Synthetic identifier: `{source_id}-{item_index}-{fetch_millis}`
    pub id: String,
    /// Item title ("No Title" when the feed omits it)
    pub title: String,
    /// Link to the original article ("#" when the feed omits it)
    pub link: String,
    /// Publication time; fetch time when missing or unparseable
    pub published_at: DateTime<Utc>,
    /// Sanitized snippet, truncated to the content budget
    pub content: String,
    /// Owning feed source id
    pub source_id: String,
    /// Owning feed source display name
    pub source_name: String,
    /// AI analysis, absent until requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<AiAnalysis>,
    /// True while an analysis request is outstanding
    #[serde(default)]
    pub analyzing: bool,
}
