//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; every section is optional and
//! secrets such as `GEMINI_API_KEY` come only from the environment.
//!
//! # Example
//!
//! ```no_run
//! use coinlens::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.logging.init();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use url::Url;

use super::llm::LlmConfig;
use super::logging::LoggingConfig;
use super::service::{
    CacheConfig, EndpointsConfig, HttpConfig, MarketConfig, NewsConfig, RetryConfig,
    WatchlistConfig,
};
use crate::application::market::{MarketEndpoints, MAX_LISTING_SIZE};
use crate::error::{ConfigError, Result};

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Response cache freshness and sweeping.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Retry policy for transient upstream failures.
    #[serde(default)]
    pub retry: RetryConfig,

    /// Outbound HTTP client settings.
    #[serde(default)]
    pub http: HttpConfig,

    /// Upstream API base URLs.
    #[serde(default)]
    pub endpoints: EndpointsConfig,

    /// Market query defaults.
    #[serde(default)]
    pub market: MarketConfig,

    /// LLM provider configuration for insights.
    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub news: NewsConfig,

    #[serde(default)]
    pub watchlist: WatchlistConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Validate configuration values.
    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.cache.freshness_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "freshness_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_attempts",
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        if self.http.timeout_ms == 0 || self.http.connect_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_ms",
                reason: "timeouts must be greater than 0".to_string(),
            }
            .into());
        }
        if self.market.vs_currency.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "vs_currency",
            }
            .into());
        }
        if self.market.listing_size == 0 || self.market.listing_size > MAX_LISTING_SIZE {
            return Err(ConfigError::InvalidValue {
                field: "listing_size",
                reason: format!("must be between 1 and {MAX_LISTING_SIZE}"),
            }
            .into());
        }
        if self.market.fx_base.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "fx_base" }.into());
        }
        if self.market.fx_quote.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "fx_quote" }.into());
        }
        if !(0.0..=2.0).contains(&self.llm.gemini.temperature)
            || !(0.0..=1.0).contains(&self.llm.anthropic.temperature)
        {
            return Err(ConfigError::InvalidValue {
                field: "temperature",
                reason: "out of range for the provider".to_string(),
            }
            .into());
        }
        if self.llm.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "llm.timeout_secs",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        self.market_endpoints()?;
        self.news_url()?;
        Ok(())
    }

    /// Parsed base URLs for the market data, history and FX APIs.
    ///
    /// # Errors
    ///
    /// Returns an error if any configured URL is malformed.
    #[allow(clippy::result_large_err)]
    pub fn market_endpoints(&self) -> Result<MarketEndpoints> {
        Ok(MarketEndpoints {
            market_data: parse_url("market_data_url", &self.endpoints.market_data_url)?,
            history: parse_url("history_url", &self.endpoints.history_url)?,
            fx: parse_url("fx_url", &self.endpoints.fx_url)?,
        })
    }

    /// Parsed base URL for the news API.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured URL is malformed.
    #[allow(clippy::result_large_err)]
    pub fn news_url(&self) -> Result<Url> {
        parse_url("news_url", &self.endpoints.news_url)
    }
}

#[allow(clippy::result_large_err)]
fn parse_url(field: &'static str, value: &str) -> Result<Url> {
    let url = Url::parse(value).map_err(|e| ConfigError::InvalidValue {
        field,
        reason: e.to_string(),
    })?;
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidValue {
            field,
            reason: "must be an absolute http(s) URL".to_string(),
        }
        .into());
    }
    Ok(url)
}
