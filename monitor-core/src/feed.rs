//! Feed source registry entries

use serde::{Deserialize, Serialize};

/// A configured RSS feed endpoint
///
/// Immutable once created; removing and re-adding is the only way to
/// change a source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedSource {
    /// Unique, stable identifier
    pub id: String,
    /// Display name (e.g., "Health Industry News")
    pub name: String,
    /// Feed URL, fetched through the relay
    pub url: String,
    /// Grouping label for the dashboard sidebar
    pub category: String,
}

impl FeedSource {
    pub fn new(id: &str, name: &str, url: &str, category: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            url: url.to_string(),
            category: category.to_string(),
        }
    }
}
