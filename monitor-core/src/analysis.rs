//! Per-article AI analysis results

use serde::{Deserialize, Serialize};

/// Sentiment of an article toward the hospital
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Coerce a free-form value from the AI into the three-value domain
    ///
    /// Anything outside the domain maps to `Neutral` rather than being
    /// propagated raw.
    pub fn coerce(raw: &str) -> Self {
        match raw.trim() {
            "Positive" | "positive" => Sentiment::Positive,
            "Negative" | "negative" => Sentiment::Negative,
            _ => Sentiment::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }
}

/// Risk and sentiment scoring for a single article
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiAnalysis {
    /// Short summary of the public-opinion angle
    pub summary: String,
    /// Three-way sentiment, coerced into the domain
    pub sentiment: Sentiment,
    /// 3-5 keyword tags (e.g., "billing", "wait times")
    pub keywords: Vec<String>,
    /// Reputational risk, 0 (none/positive) to 100 (crisis)
    pub risk_score: u8,
    /// Free-text classification (e.g., "service quality")
    pub category: String,
    /// One-line recommendation for hospital leadership
    pub key_takeaway: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_in_domain() {
        assert_eq!(Sentiment::coerce("Positive"), Sentiment::Positive);
        assert_eq!(Sentiment::coerce("negative"), Sentiment::Negative);
        assert_eq!(Sentiment::coerce("Neutral"), Sentiment::Neutral);
    }

    #[test]
    fn test_coerce_out_of_domain() {
        assert_eq!(Sentiment::coerce("Very Negative"), Sentiment::Neutral);
        assert_eq!(Sentiment::coerce(""), Sentiment::Neutral);
        assert_eq!(Sentiment::coerce("mixed"), Sentiment::Neutral);
    }

    #[test]
    fn test_serde_round_trip() {
        let json = serde_json::to_string(&Sentiment::Negative).unwrap();
        assert_eq!(json, "\"Negative\"");
        let back: Sentiment = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Sentiment::Negative);
    }
}
