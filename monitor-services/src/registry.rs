//! Seed feed sources

use monitor_core::FeedSource;

/// Default sources the registry starts with
///
/// Used when the server boots with no user configuration; the dashboard
/// can add and remove sources at runtime.
pub fn seed_feeds() -> Vec<FeedSource> {
    vec![
        FeedSource::new(
            "seed-health-industry",
            "Health Industry News",
            "https://www.wired.com/feed/category/science/health/latest/rss",
            "industry news",
        ),
        FeedSource::new(
            "seed-public-health",
            "Public Health Updates",
            "https://tools.cdc.gov/api/v2/resources/media/132608.rss",
            "policy",
        ),
        FeedSource::new(
            "seed-health-tech",
            "Health Tech",
            "https://www.theverge.com/rss/science/index.xml",
            "medical technology",
        ),
        FeedSource::new(
            "seed-community-health",
            "Community Health",
            "https://rss.nytimes.com/services/xml/rss/nyt/Health.xml",
            "patient voices",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_feed_ids_unique() {
        let feeds = seed_feeds();
        let ids: std::collections::HashSet<_> = feeds.iter().map(|f| &f.id).collect();
        assert_eq!(ids.len(), feeds.len());
    }
}
