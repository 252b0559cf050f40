//! Service configuration for caching, retries, HTTP, endpoints, and storage.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::application::retry::RetryPolicy;

/// Response cache configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// How long a cached response stays fresh, in seconds (default: 60).
    #[serde(default = "default_freshness_secs")]
    pub freshness_secs: u64,
    /// Period of the background sweep that drops stale entries, in seconds.
    /// Zero disables the sweeper (default: 300).
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

impl CacheConfig {
    #[must_use]
    pub const fn freshness(&self) -> Duration {
        Duration::from_secs(self.freshness_secs)
    }

    /// Sweep period, or `None` when sweeping is disabled.
    #[must_use]
    pub const fn sweep_interval(&self) -> Option<Duration> {
        if self.sweep_interval_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.sweep_interval_secs))
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            freshness_secs: default_freshness_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

const fn default_freshness_secs() -> u64 {
    60
}

const fn default_sweep_interval_secs() -> u64 {
    300
}

/// Retry policy for transient upstream failures (429 and 5xx).
#[derive(Debug, Clone, Deserialize)]
pub struct RetryConfig {
    /// Total attempts including the first (default: 3).
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
    /// Fixed delay between attempts in milliseconds (default: 1000).
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

impl RetryConfig {
    #[must_use]
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_attempts, Duration::from_millis(self.delay_ms))
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            delay_ms: default_delay_ms(),
        }
    }
}

const fn default_max_attempts() -> u32 {
    3
}

const fn default_delay_ms() -> u64 {
    1000
}

/// Outbound HTTP client settings.
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Whole-request timeout in milliseconds (default: 10000).
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Connection timeout in milliseconds (default: 5000).
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl HttpConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            connect_timeout_ms: default_connect_timeout_ms(),
            user_agent: default_user_agent(),
        }
    }
}

const fn default_timeout_ms() -> u64 {
    10_000
}

const fn default_connect_timeout_ms() -> u64 {
    5_000
}

fn default_user_agent() -> String {
    format!("coinlens/{}", env!("CARGO_PKG_VERSION"))
}

/// Upstream API base URLs.
#[derive(Debug, Clone, Deserialize)]
pub struct EndpointsConfig {
    /// CoinGecko-compatible market data API.
    #[serde(default = "default_market_data_url")]
    pub market_data_url: String,
    /// CoinCap-compatible asset history API.
    #[serde(default = "default_history_url")]
    pub history_url: String,
    /// CryptoCompare-compatible news API.
    #[serde(default = "default_news_url")]
    pub news_url: String,
    /// exchangerate-api-compatible FX API.
    #[serde(default = "default_fx_url")]
    pub fx_url: String,
}

impl Default for EndpointsConfig {
    fn default() -> Self {
        Self {
            market_data_url: default_market_data_url(),
            history_url: default_history_url(),
            news_url: default_news_url(),
            fx_url: default_fx_url(),
        }
    }
}

fn default_market_data_url() -> String {
    "https://api.coingecko.com/api/v3".into()
}

fn default_history_url() -> String {
    "https://api.coincap.io/v2".into()
}

fn default_news_url() -> String {
    "https://min-api.cryptocompare.com/data/v2".into()
}

fn default_fx_url() -> String {
    "https://api.exchangerate-api.com/v4".into()
}

/// Market query defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct MarketConfig {
    /// Quote currency for prices (default: "usd").
    #[serde(default = "default_vs_currency")]
    pub vs_currency: String,
    /// Number of assets in a listing when none is requested (default: 50).
    #[serde(default = "default_listing_size")]
    pub listing_size: usize,
    /// Base currency for the FX rate query (default: "USD").
    #[serde(default = "default_fx_base")]
    pub fx_base: String,
    /// Quote currency for the FX rate query (default: "INR").
    #[serde(default = "default_fx_quote")]
    pub fx_quote: String,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            vs_currency: default_vs_currency(),
            listing_size: default_listing_size(),
            fx_base: default_fx_base(),
            fx_quote: default_fx_quote(),
        }
    }
}

fn default_vs_currency() -> String {
    "usd".into()
}

const fn default_listing_size() -> usize {
    50
}

fn default_fx_base() -> String {
    "USD".into()
}

fn default_fx_quote() -> String {
    "INR".into()
}

/// News integration settings.
///
/// The API key is read from `CRYPTOCOMPARE_API_KEY` at runtime.
#[derive(Debug, Clone, Deserialize)]
pub struct NewsConfig {
    #[serde(default = "default_news_enabled")]
    pub enabled: bool,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            enabled: default_news_enabled(),
        }
    }
}

const fn default_news_enabled() -> bool {
    true
}

/// Watchlist storage settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WatchlistConfig {
    /// JSON file holding the watched asset ids. Defaults to
    /// `<data dir>/coinlens/watchlist.json`.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_sweep_interval_disables_sweeper() {
        let cache = CacheConfig {
            freshness_secs: 60,
            sweep_interval_secs: 0,
        };
        assert_eq!(cache.sweep_interval(), None);
        assert_eq!(
            CacheConfig::default().sweep_interval(),
            Some(Duration::from_secs(300))
        );
    }

    #[test]
    fn retry_defaults_match_policy_defaults() {
        let policy = RetryConfig::default().policy();
        assert_eq!(policy, RetryPolicy::default());
    }
}
