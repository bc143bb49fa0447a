//! Prompt composition and response schemas
//!
//! Prompts are deterministic: persona, the article material, and an
//! explicit enumeration of the required output fields with their
//! semantics. The schemas restate the same shape for the service's
//! response-format constraint.

use serde_json::{json, Value};

/// Maximum headlines included in a trend-report request
///
/// Titles are assumed newest-first; older titles beyond the cap are
/// dropped.
pub const TREND_TITLE_CAP: usize = 50;

/// System prompt for per-article analysis
pub const ANALYSIS_SYSTEM_PROMPT: &str = r#"You are a senior hospital public-opinion analyst. Analyze the article you are given and assess its potential impact on the hospital's brand image, patient relations, and medical services.

Respond with valid JSON in this exact format:
{
  "summary": "Brief public-opinion summary (50 words or fewer)",
  "sentiment": "Positive|Neutral|Negative",
  "keywords": ["3-5 keyword tags, e.g. service attitude, billing, medical ethics, wait times, medication shortage"],
  "riskScore": 0,
  "category": "Classification such as care quality, service attitude, administration, billing, other",
  "keyTakeaway": "One-line advice or warning for hospital leadership"
}

Scoring guidelines for riskScore (integer 0-100):
- 0 means no risk (or positive coverage); 100 means a severe crisis
- Medical malpractice, disputes with patients, and overcharging score high
- Praise and health-education content score low"#;

/// System prompt for the aggregate trend report
pub const TREND_SYSTEM_PROMPT: &str = r#"You are the hospital's public-opinion monitoring system. From the list of recently monitored headlines you are given, produce a briefing.

Respond with valid JSON in this exact format:
{
  "topRisks": ["The 3 risk themes or trending negative topics that most need attention"],
  "overallSentiment": "Description of the current public mood toward the healthcare sector",
  "actionableAdvice": "Combined response advice for the hospital director (100 words or fewer)"
}"#;

/// Build the user prompt for a per-article analysis request
pub fn analysis_user_prompt(title: &str, content: &str) -> String {
    format!(
        "## Article\nTitle: {}\nContent: {}\n\nAnalyze this article for the hospital communications team.",
        title, content
    )
}

/// Build the user prompt for a trend-report request
///
/// Caps the input at [`TREND_TITLE_CAP`] headlines.
pub fn trend_user_prompt(titles: &[String]) -> String {
    let headlines = titles
        .iter()
        .take(TREND_TITLE_CAP)
        .map(|t| format!("- {}", t))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "## Recent Headlines\n{}\n\nGenerate the briefing from these headlines.",
        headlines
    )
}

/// JSON schema for the per-article analysis response
pub fn analysis_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "summary": { "type": "string" },
            "sentiment": { "type": "string", "enum": ["Positive", "Neutral", "Negative"] },
            "keywords": { "type": "array", "items": { "type": "string" } },
            "riskScore": { "type": "integer", "minimum": 0, "maximum": 100 },
            "category": { "type": "string" },
            "keyTakeaway": { "type": "string" }
        },
        "required": ["summary", "sentiment", "keywords", "riskScore", "category", "keyTakeaway"],
        "additionalProperties": false
    })
}

/// JSON schema for the trend-report response
pub fn trend_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "topRisks": { "type": "array", "items": { "type": "string" } },
            "overallSentiment": { "type": "string" },
            "actionableAdvice": { "type": "string" }
        },
        "required": ["topRisks", "overallSentiment", "actionableAdvice"],
        "additionalProperties": false
    })
}
