//! AI-generated asset insights.
//!
//! The model is asked for a small JSON object. Whatever goes wrong, whether
//! no provider, a transport failure or an unusable answer, the caller still
//! gets an [`AssetInsight`] built from the current price.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::{AssetInsight, HistoryPoint};
use crate::port::outbound::llm::Llm;

/// Number of trailing history points included in the prompt.
pub const PROMPT_HISTORY_POINTS: usize = 7;

/// How long one insight request may take before it is abandoned.
pub const DEFAULT_INSIGHT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InsightResponse {
    sentiment: String,
    support_level: Level,
    resistance_level: Level,
    buying_advice: String,
    #[serde(default)]
    key_factors: Vec<String>,
}

/// Models return levels either as numbers or as strings like `"$1,234.5"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Level {
    Number(f64),
    Text(String),
}

impl Level {
    fn value(&self) -> Option<f64> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s
                .trim()
                .trim_start_matches('$')
                .replace(',', "")
                .parse()
                .ok()?,
        };
        value.is_finite().then_some(value)
    }
}

/// Build the analyst prompt for one asset.
#[must_use]
pub fn build_prompt(asset_name: &str, current_price: f64, history: &[HistoryPoint]) -> String {
    let start = history.len().saturating_sub(PROMPT_HISTORY_POINTS);
    let recent = history[start..]
        .iter()
        .map(|p| format!("{}: ${:.2}", p.time.format("%Y-%m-%d"), p.price_usd))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"As a crypto market analyst, analyze this data for {asset_name}:

Current price: ${current_price:.2}

Last {PROMPT_HISTORY_POINTS} days of price data:
{recent}

Based on this data, please provide:
1. A brief market sentiment analysis
2. Potential support and resistance levels
3. Best time to consider buying (short term)
4. Key factors affecting price movement

Format the response in JSON with these keys:
{{
  "sentiment": "string",
  "supportLevel": "number",
  "resistanceLevel": "number",
  "buyingAdvice": "string",
  "keyFactors": ["string"]
}}"#
    )
}

/// Extract an insight from raw model output.
///
/// Markdown code fences and any prose around the outermost JSON object are
/// ignored. Returns `None` when nothing usable remains.
#[must_use]
pub fn parse_insight(raw: &str) -> Option<AssetInsight> {
    let cleaned = raw.replace("```json", "").replace("```", "");
    let start = cleaned.find('{')?;
    let end = cleaned.rfind('}')?;
    if end < start {
        return None;
    }

    let response: InsightResponse = serde_json::from_str(&cleaned[start..=end]).ok()?;
    Some(AssetInsight {
        support_level: response.support_level.value()?,
        resistance_level: response.resistance_level.value()?,
        sentiment: response.sentiment,
        buying_advice: response.buying_advice,
        key_factors: response.key_factors,
    })
}

/// Produces insights through an optional language model.
#[derive(Clone)]
pub struct InsightService {
    llm: Option<Arc<dyn Llm>>,
    timeout: Duration,
}

impl Default for InsightService {
    fn default() -> Self {
        Self::new(None)
    }
}

impl InsightService {
    #[must_use]
    pub fn new(llm: Option<Arc<dyn Llm>>) -> Self {
        Self {
            llm,
            timeout: DEFAULT_INSIGHT_TIMEOUT,
        }
    }

    /// Abandon a model request that runs longer than `timeout`.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether a language model is configured.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.llm.is_some()
    }

    /// Analyze `asset_name` from its current price and recent history. Never fails.
    pub async fn insights(
        &self,
        asset_name: &str,
        current_price: f64,
        history: &[HistoryPoint],
    ) -> AssetInsight {
        let Some(llm) = &self.llm else {
            warn!(asset = asset_name, "No LLM provider configured");
            return AssetInsight::service_error(current_price);
        };

        let prompt = build_prompt(asset_name, current_price, history);
        let raw = match tokio::time::timeout(self.timeout, llm.complete(&prompt)).await {
            Ok(Ok(raw)) => raw,
            Ok(Err(err)) => {
                warn!(asset = asset_name, provider = llm.name(), error = %err, "LLM request failed");
                return AssetInsight::service_error(current_price);
            }
            Err(_) => {
                warn!(
                    asset = asset_name,
                    provider = llm.name(),
                    timeout_secs = self.timeout.as_secs(),
                    "LLM request timed out"
                );
                return AssetInsight::service_error(current_price);
            }
        };

        debug!(asset = asset_name, len = raw.len(), "Received LLM response");
        parse_insight(&raw).unwrap_or_else(|| {
            warn!(asset = asset_name, provider = llm.name(), "Unparseable LLM response");
            AssetInsight::unavailable(current_price)
        })
    }
}

impl std::fmt::Debug for InsightService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InsightService")
            .field("llm", &self.llm.as_ref().map(|llm| llm.name()))
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone, Utc};

    use crate::error::{Error, Result};

    struct ScriptedLlm(std::result::Result<String, String>);

    #[async_trait]
    impl Llm for ScriptedLlm {
        fn name(&self) -> &'static str {
            "scripted"
        }

        async fn complete(&self, _prompt: &str) -> Result<String> {
            self.0.clone().map_err(Error::Store)
        }
    }

    fn service(reply: std::result::Result<&str, &str>) -> InsightService {
        let reply = reply.map(String::from).map_err(String::from);
        InsightService::new(Some(Arc::new(ScriptedLlm(reply))))
    }

    #[test]
    fn parses_fenced_json_with_string_levels() {
        let raw = "```json\n{\"sentiment\":\"Bullish\",\"supportLevel\":\"$58,000\",\
                   \"resistanceLevel\":64000.5,\"buyingAdvice\":\"Wait for a dip\",\
                   \"keyFactors\":[\"ETF flows\"]}\n```";
        let insight = parse_insight(raw).unwrap();
        assert_eq!(insight.sentiment, "Bullish");
        assert_eq!(insight.support_level, 58_000.0);
        assert_eq!(insight.resistance_level, 64_000.5);
        assert_eq!(insight.key_factors, vec!["ETF flows".to_string()]);
    }

    #[test]
    fn rejects_empty_and_partial_answers() {
        assert!(parse_insight("").is_none());
        assert!(parse_insight("{}").is_none());
        assert!(parse_insight("I cannot help with that.").is_none());
        assert!(parse_insight(
            r#"{"sentiment":"x","supportLevel":"soon","resistanceLevel":1,"buyingAdvice":"y"}"#
        )
        .is_none());
    }

    #[test]
    fn prompt_includes_only_recent_history() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let history: Vec<HistoryPoint> = (0..10)
            .map(|day| HistoryPoint {
                time: start + Duration::days(day),
                price_usd: 100.0 + day as f64,
            })
            .collect();

        let prompt = build_prompt("Bitcoin", 109.0, &history);
        assert!(prompt.contains("analyze this data for Bitcoin"));
        assert!(prompt.contains("Current price: $109.00"));
        assert!(!prompt.contains("2024-01-03"));
        assert!(prompt.contains("2024-01-04: $103.00"));
        assert!(prompt.contains("2024-01-10: $109.00"));
    }

    #[tokio::test]
    async fn unparseable_answer_resolves_to_default() {
        let insight = service(Ok("not json at all")).insights("Bitcoin", 200.0, &[]).await;
        assert_eq!(insight, AssetInsight::unavailable(200.0));
        assert!((insight.support_level - 180.0).abs() < 1e-9);
        assert!((insight.resistance_level - 220.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn provider_failure_resolves_to_service_error() {
        let insight = service(Err("boom")).insights("Bitcoin", 10.0, &[]).await;
        assert_eq!(insight, AssetInsight::service_error(10.0));
    }

    #[tokio::test]
    async fn missing_provider_resolves_to_service_error() {
        let insight = InsightService::default().insights("Bitcoin", 10.0, &[]).await;
        assert_eq!(insight, AssetInsight::service_error(10.0));
    }
}
