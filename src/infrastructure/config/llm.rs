//! LLM provider configuration.
//!
//! Provides configuration for the Large Language Model providers used to
//! generate asset insights.

use std::time::Duration;

use serde::Deserialize;

/// LLM provider configuration.
///
/// Configures which LLM provider to use and provider-specific settings.
/// API keys are read from environment variables (`GEMINI_API_KEY` or
/// `ANTHROPIC_API_KEY`) at runtime.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Generate insights at all. When false the insight command reports the
    /// service-error fallback without calling a provider.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// LLM provider to use for insights.
    ///
    /// Defaults to Gemini.
    #[serde(default)]
    pub provider: LlmProvider,

    /// Upper bound on one insight request, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Gemini-specific settings.
    ///
    /// Used when `provider` is set to `gemini`.
    #[serde(default)]
    pub gemini: GeminiConfig,

    /// Anthropic-specific settings.
    ///
    /// Used when `provider` is set to `anthropic`.
    #[serde(default)]
    pub anthropic: AnthropicConfig,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            provider: LlmProvider::default(),
            timeout_secs: default_timeout_secs(),
            gemini: GeminiConfig::default(),
            anthropic: AnthropicConfig::default(),
        }
    }
}

impl LlmConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// LLM provider selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmProvider {
    /// Google Gemini models.
    #[default]
    Gemini,
    /// Anthropic Claude models.
    Anthropic,
}

/// Gemini-specific configuration. Requires `GEMINI_API_KEY`.
#[derive(Debug, Clone, Deserialize)]
pub struct GeminiConfig {
    /// Model identifier.
    ///
    /// Defaults to "gemini-1.5-flash".
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// Sampling temperature for generation.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Maximum tokens in the response.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: default_gemini_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

/// Anthropic-specific configuration.
///
/// Settings for Anthropic Claude API. Requires `ANTHROPIC_API_KEY`
/// environment variable.
#[derive(Debug, Clone, Deserialize)]
pub struct AnthropicConfig {
    /// Model identifier.
    ///
    /// Defaults to "claude-3-5-haiku-20241022".
    #[serde(default = "default_anthropic_model")]
    pub model: String,

    /// Sampling temperature for generation.
    ///
    /// Lower values produce more deterministic output.
    /// Defaults to 0.2.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Maximum tokens in the response.
    ///
    /// An insight is a short JSON object. Defaults to 1024.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            model: default_anthropic_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
        }
    }
}

const fn default_enabled() -> bool {
    true
}

fn default_gemini_model() -> String {
    "gemini-1.5-flash".into()
}

fn default_anthropic_model() -> String {
    "claude-3-5-haiku-20241022".into()
}

fn default_temperature() -> f64 {
    0.2
}

const fn default_timeout_secs() -> u64 {
    30
}

const fn default_max_tokens() -> usize {
    1024
}
