//! Client for the generative analysis service

use async_openai::{
    config::OpenAIConfig,
    types::chat::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs, ResponseFormat, ResponseFormatJsonSchema,
    },
    Client,
};
use chrono::Utc;
use monitor_core::{AiAnalysis, MonitorError, MonitorResult, TrendReport};
use serde_json::Value;
use tokio::time::timeout;
use tracing::{debug, error};

use crate::payload::{fallback_analysis, fallback_trend_report, parse_analysis, parse_trend_report};
use crate::prompt;

/// Bounded wait on any single AI request; expiry takes the fallback path
const AI_REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(30);

/// Client for per-article analysis and trend reports
///
/// Both public operations are total: on transport failure, timeout,
/// non-JSON output, or schema mismatch they log a diagnostic and return
/// the fixed fallback value instead of erroring.
#[derive(Debug, Clone)]
pub struct OpinionAiClient {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpinionAiClient {
    /// Create a new client
    ///
    /// The API key is read from the environment by the underlying client.
    pub fn new() -> Self {
        Self {
            client: Client::with_config(OpenAIConfig::default()),
            model: "gpt-4o".to_string(),
        }
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    /// Score a single article for sentiment and reputational risk
    pub async fn analyze_article(&self, title: &str, content: &str) -> AiAnalysis {
        match self.try_analyze(title, content).await {
            Ok(analysis) => analysis,
            Err(e) => {
                error!("AI analysis failed for \"{}\": {}", title, e);
                fallback_analysis()
            }
        }
    }

    async fn try_analyze(&self, title: &str, content: &str) -> MonitorResult<AiAnalysis> {
        let text = self
            .structured_chat(
                prompt::ANALYSIS_SYSTEM_PROMPT,
                &prompt::analysis_user_prompt(title, content),
                "article_analysis",
                prompt::analysis_schema(),
            )
            .await?;

        parse_analysis(&text)
    }

    /// Generate an aggregate risk summary over recent headlines
    ///
    /// The report timestamp is stamped locally at return time.
    pub async fn generate_trend_report(&self, titles: &[String]) -> TrendReport {
        debug!("Generating trend report from {} headlines", titles.len());
        match self.try_trend_report(titles).await {
            Ok(report) => report,
            Err(e) => {
                error!("Trend report generation failed: {}", e);
                fallback_trend_report(Utc::now())
            }
        }
    }

    async fn try_trend_report(&self, titles: &[String]) -> MonitorResult<TrendReport> {
        let text = self
            .structured_chat(
                prompt::TREND_SYSTEM_PROMPT,
                &prompt::trend_user_prompt(titles),
                "trend_report",
                prompt::trend_schema(),
            )
            .await?;

        parse_trend_report(&text, Utc::now())
    }

    /// Issue a chat request constrained to a named JSON schema
    async fn structured_chat(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        schema_name: &str,
        schema: Value,
    ) -> MonitorResult<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages([
                ChatCompletionRequestSystemMessageArgs::default()
                    .content(system_prompt)
                    .build()
                    .map_err(|e| MonitorError::internal(e.to_string()))?
                    .into(),
                ChatCompletionRequestUserMessageArgs::default()
                    .content(user_prompt)
                    .build()
                    .map_err(|e| MonitorError::internal(e.to_string()))?
                    .into(),
            ])
            .temperature(0.2)
            .response_format(ResponseFormat::JsonSchema {
                json_schema: ResponseFormatJsonSchema {
                    name: schema_name.to_string(),
                    description: None,
                    schema: Some(schema),
                    strict: Some(true),
                },
            })
            .build()
            .map_err(|e| MonitorError::internal(e.to_string()))?;

        let response = timeout(AI_REQUEST_TIMEOUT, self.client.chat().create(request))
            .await
            .map_err(|_| MonitorError::network("AI request timed out"))?
            .map_err(|e| MonitorError::api(format!("AI service error: {}", e)))?;

        response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| MonitorError::parse("Empty response from AI service"))
    }
}

impl Default for OpinionAiClient {
    fn default() -> Self {
        Self::new()
    }
}
