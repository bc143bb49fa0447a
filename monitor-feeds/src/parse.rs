//! RSS document parsing and article normalization

use chrono::{DateTime, Utc};
use monitor_core::{Article, FeedSource};

use crate::error::FeedError;

/// Maximum items taken per feed, in document order
///
/// Feeds are assumed newest-first, so the cap drops the oldest items.
pub const MAX_ITEMS_PER_FEED: usize = 10;

/// Character budget for the sanitized content snippet
pub const CONTENT_BUDGET: usize = 500;

/// Appended after truncating the snippet
const TRUNCATION_MARKER: &str = "...";

/// Parse a raw RSS document into normalized articles
///
/// Per-item failures never abort the feed: missing fields take their
/// defaults ("No Title", "#", `fetched_at` for the timestamp) instead of
/// raising. Only a document that fails to parse at all is an error.
pub fn parse_feed(
    xml: &str,
    source: &FeedSource,
    fetched_at: DateTime<Utc>,
) -> Result<Vec<Article>, FeedError> {
    let channel =
        rss::Channel::read_from(xml.as_bytes()).map_err(|e| FeedError::ParseError(e.to_string()))?;

    let fetch_millis = fetched_at.timestamp_millis();

    let articles = channel
        .items()
        .iter()
        .take(MAX_ITEMS_PER_FEED)
        .enumerate()
        .map(|(index, item)| {
            let title = item.title().unwrap_or("No Title").to_string();
            let link = item.link().unwrap_or("#").to_string();

            let published_at = item
                .pub_date()
                .and_then(|d| DateTime::parse_from_rfc2822(d).ok())
                .map(|d| d.with_timezone(&Utc))
                .unwrap_or(fetched_at);

            // Prefer the namespaced full-content field over the short description
            let body = item.content().or_else(|| item.description()).unwrap_or("");

            Article {
                // Fetch millis keep ids unique across concurrent fetches
                // of the same source
                id: format!("{}-{}-{}", source.id, index, fetch_millis),
                title,
                link,
                published_at,
                content: snippet(body),
                source_id: source.id.clone(),
                source_name: source.name.clone(),
                analysis: None,
                analyzing: false,
            }
        })
        .collect();

    Ok(articles)
}

/// Strip markup, truncate to the content budget, append the marker
fn snippet(body: &str) -> String {
    let text = strip_html(body);
    let truncated: String = text.chars().take(CONTENT_BUDGET).collect();
    format!("{}{}", truncated, TRUNCATION_MARKER)
}

/// Strip HTML tags from text
fn strip_html(html: &str) -> String {
    let mut result = String::new();
    let mut in_tag = false;

    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(c),
            _ => {}
        }
    }

    // Clean up whitespace and HTML entities
    result
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn source() -> FeedSource {
        FeedSource::new("s1", "Test Feed", "https://example.com/rss", "news")
    }

    fn rss_doc(items: &str) -> String {
        format!(
            r#"<?xml version="1.0"?>
<rss version="2.0" xmlns:content="http://purl.org/rss/1.0/modules/content/">
  <channel>
    <title>Test</title>
    <link>https://example.com</link>
    <description>Test channel</description>
    {}
  </channel>
</rss>"#,
            items
        )
    }

    fn fetch_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_strip_html() {
        let html = "<p>Hello <b>world</b>!</p>";
        assert_eq!(strip_html(html), "Hello world!");
    }

    #[test]
    fn test_tags_stripped_and_marker_appended() {
        let doc = rss_doc(
            "<item><title>A</title><description>&lt;p&gt;Hello&lt;/p&gt;World</description></item>",
        );
        let articles = parse_feed(&doc, &source(), fetch_time()).unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "A");
        assert_eq!(articles[0].content, "HelloWorld...");
        // No pubDate: timestamp falls back to fetch time
        assert_eq!(articles[0].published_at, fetch_time());
    }

    #[test]
    fn test_item_cap_in_document_order() {
        let items: String = (0..14)
            .map(|i| format!("<item><title>Item {}</title></item>", i))
            .collect();
        let articles = parse_feed(&rss_doc(&items), &source(), fetch_time()).unwrap();
        assert_eq!(articles.len(), MAX_ITEMS_PER_FEED);
        assert_eq!(articles[0].title, "Item 0");
        assert_eq!(articles[9].title, "Item 9");
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let doc = rss_doc("<item><description>body</description></item>");
        let articles = parse_feed(&doc, &source(), fetch_time()).unwrap();
        assert_eq!(articles[0].title, "No Title");
        assert_eq!(articles[0].link, "#");
    }

    #[test]
    fn test_full_content_preferred_over_description() {
        let doc = rss_doc(
            "<item><title>A</title><description>short</description>\
             <content:encoded>full body text</content:encoded></item>",
        );
        let articles = parse_feed(&doc, &source(), fetch_time()).unwrap();
        assert_eq!(articles[0].content, "full body text...");
    }

    #[test]
    fn test_pub_date_parsed_rfc2822() {
        let doc = rss_doc(
            "<item><title>A</title><pubDate>Mon, 01 Jan 2024 09:30:00 GMT</pubDate></item>",
        );
        let articles = parse_feed(&doc, &source(), fetch_time()).unwrap();
        assert_eq!(
            articles[0].published_at,
            Utc.with_ymd_and_hms(2024, 1, 1, 9, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_unparseable_pub_date_falls_back_to_fetch_time() {
        let doc = rss_doc("<item><title>A</title><pubDate>not a date</pubDate></item>");
        let articles = parse_feed(&doc, &source(), fetch_time()).unwrap();
        assert_eq!(articles[0].published_at, fetch_time());
    }

    #[test]
    fn test_content_budget_enforced() {
        let long = "x".repeat(CONTENT_BUDGET * 2);
        let doc = rss_doc(&format!(
            "<item><title>A</title><description>{}</description></item>",
            long
        ));
        let articles = parse_feed(&doc, &source(), fetch_time()).unwrap();
        assert_eq!(
            articles[0].content.chars().count(),
            CONTENT_BUDGET + TRUNCATION_MARKER.len()
        );
        assert!(articles[0].content.ends_with("..."));
    }

    #[test]
    fn test_ids_unique_within_fetch() {
        let items: String = (0..3)
            .map(|i| format!("<item><title>Item {}</title></item>", i))
            .collect();
        let articles = parse_feed(&rss_doc(&items), &source(), fetch_time()).unwrap();
        assert_eq!(articles[0].id, format!("s1-0-{}", fetch_time().timestamp_millis()));
        assert_eq!(articles[1].id, format!("s1-1-{}", fetch_time().timestamp_millis()));
        let ids: std::collections::HashSet<_> = articles.iter().map(|a| &a.id).collect();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        assert!(parse_feed("this is not xml", &source(), fetch_time()).is_err());
    }

    #[test]
    fn test_empty_channel_yields_empty_list() {
        let articles = parse_feed(&rss_doc(""), &source(), fetch_time()).unwrap();
        assert!(articles.is_empty());
    }
}
