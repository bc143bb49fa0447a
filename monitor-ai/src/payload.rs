//! Response payload parsing, validation, and fallbacks
//!
//! The declared response schema is a hint, not a guarantee: payloads are
//! deserialized into raw structs and every field is validated or coerced
//! before it reaches an [`AiAnalysis`] or [`TrendReport`].

use chrono::{DateTime, Utc};
use monitor_core::{AiAnalysis, MonitorError, MonitorResult, Sentiment, TrendReport};
use serde::Deserialize;

/// Maximum risk themes kept in a trend report
const TOP_RISK_CAP: usize = 3;

/// Raw per-article payload, before validation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAnalysisPayload {
    summary: String,
    sentiment: String,
    keywords: Vec<String>,
    risk_score: f64,
    category: String,
    key_takeaway: String,
}

/// Raw trend payload, before validation
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTrendPayload {
    top_risks: Vec<String>,
    overall_sentiment: String,
    actionable_advice: String,
}

/// Parse and validate a per-article analysis response
pub fn parse_analysis(text: &str) -> MonitorResult<AiAnalysis> {
    let json = extract_json(text)?;
    let raw: RawAnalysisPayload = serde_json::from_str(&json)
        .map_err(|e| MonitorError::parse(format!("Analysis payload mismatch: {}", e)))?;

    Ok(AiAnalysis {
        summary: raw.summary,
        sentiment: Sentiment::coerce(&raw.sentiment),
        keywords: raw.keywords,
        risk_score: clamp_risk(raw.risk_score),
        category: raw.category,
        key_takeaway: raw.key_takeaway,
    })
}

/// Parse and validate a trend-report response
///
/// The generation timestamp is always `stamped_at`, never anything the
/// service echoed back.
pub fn parse_trend_report(text: &str, stamped_at: DateTime<Utc>) -> MonitorResult<TrendReport> {
    let json = extract_json(text)?;
    let raw: RawTrendPayload = serde_json::from_str(&json)
        .map_err(|e| MonitorError::parse(format!("Trend payload mismatch: {}", e)))?;

    let mut top_risks = raw.top_risks;
    top_risks.truncate(TOP_RISK_CAP);

    Ok(TrendReport {
        timestamp: stamped_at,
        top_risks,
        overall_sentiment: raw.overall_sentiment,
        actionable_advice: raw.actionable_advice,
    })
}

/// Fixed safe default when a per-article analysis fails
pub fn fallback_analysis() -> AiAnalysis {
    AiAnalysis {
        summary: "Unable to analyze this article right now.".to_string(),
        sentiment: Sentiment::Neutral,
        keywords: vec!["unknown".to_string()],
        risk_score: 0,
        category: "unclassified".to_string(),
        key_takeaway: "Needs manual review.".to_string(),
    }
}

/// Fixed safe default when trend-report generation fails
pub fn fallback_trend_report(stamped_at: DateTime<Utc>) -> TrendReport {
    TrendReport {
        timestamp: stamped_at,
        top_risks: vec!["Insufficient data".to_string()],
        overall_sentiment: "Unknown".to_string(),
        actionable_advice: "Report generation failed; check the network or the feed sources."
            .to_string(),
    }
}

fn clamp_risk(raw: f64) -> u8 {
    if raw.is_nan() {
        return 0;
    }
    raw.clamp(0.0, 100.0).round() as u8
}

/// Extract JSON from a response that might contain markdown code blocks
pub(crate) fn extract_json(content: &str) -> MonitorResult<String> {
    // Try to find JSON in code blocks first
    if let Some(start) = content.find("```json") {
        let start = start + 7;
        if let Some(end) = content[start..].find("```") {
            return Ok(content[start..start + end].trim().to_string());
        }
    }

    // Try to find raw JSON
    if let Some(start) = content.find('{') {
        if let Some(end) = content.rfind('}') {
            return Ok(content[start..=end].to_string());
        }
    }

    Err(MonitorError::parse("No JSON found in response"))
}
