//! Feed ingestion for the public-opinion monitor
//!
//! Retrieves raw RSS documents through a CORS-bypass relay, parses the
//! item elements, and normalizes them into bounded [`monitor_core::Article`]
//! records. Every failure mode degrades to an empty list plus a logged
//! diagnostic; nothing in this crate aborts a fetch cycle.

pub mod error;
pub mod parse;
pub mod relay;

pub use error::FeedError;
pub use parse::{parse_feed, CONTENT_BUDGET, MAX_ITEMS_PER_FEED};
pub use relay::{FetchArticles, RelayClient};
