//! AI analysis clients for the public-opinion monitor
//!
//! Two request/response contracts against the generative service: a
//! per-article sentiment/risk scoring call and a batch trend report over
//! recent headlines. Both constrain the output to a named JSON schema,
//! validate whatever comes back, and fall back to a fixed safe default on
//! any failure, so callers always receive a well-formed result.

pub mod client;
pub mod payload;
pub mod prompt;

pub use client::OpinionAiClient;
pub use payload::{fallback_analysis, fallback_trend_report};
pub use prompt::TREND_TITLE_CAP;
