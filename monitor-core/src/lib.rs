//! Core types for the hospital public-opinion monitor
//!
//! Shared data structures used across the feed ingestion pipeline,
//! the AI analysis clients, and the HTTP API.

pub mod analysis;
pub mod article;
pub mod error;
pub mod feed;
pub mod report;

pub use analysis::{AiAnalysis, Sentiment};
pub use article::Article;
pub use error::{MonitorError, MonitorResult};
pub use feed::FeedSource;
pub use report::TrendReport;
