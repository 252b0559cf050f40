//! Composition root: builds the services from configuration.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::adapter::outbound::http::ReqwestClient;
use crate::adapter::outbound::llm::anthropic::Anthropic;
use crate::adapter::outbound::llm::gemini::Gemini;
use crate::adapter::outbound::store::JsonFileStore;
use crate::application::fetch::Fetcher;
use crate::application::insight::InsightService;
use crate::application::market::MarketService;
use crate::application::news::NewsService;
use crate::application::watchlist::WatchlistService;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::llm::LlmProvider;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::clock::{Clock, SystemClock};
use crate::port::outbound::http::HttpClient;
use crate::port::outbound::llm::Llm;
use crate::port::outbound::watchlist::WatchlistStore;

/// Everything a front end needs to answer queries.
#[derive(Debug)]
pub struct Services {
    pub market: Arc<MarketService>,
    /// `None` when news is disabled in configuration.
    pub news: Option<Arc<NewsService>>,
    pub insight: InsightService,
    pub watchlist: WatchlistService,
}

/// Wire the services against real HTTP, LLM and file adapters.
///
/// # Errors
///
/// Returns an error if an endpoint URL is malformed, the watchlist path
/// cannot be determined, or the watchlist file cannot be read.
#[allow(clippy::result_large_err)]
pub fn build_services(config: &Config) -> Result<Services> {
    let http: Arc<dyn HttpClient> = Arc::new(ReqwestClient::with_settings(
        config.http.timeout(),
        config.http.connect_timeout(),
        &config.http.user_agent,
    ));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    build_services_with(config, http, clock)
}

/// Wire the services against the given HTTP client and clock.
///
/// # Errors
///
/// See [`build_services`].
#[allow(clippy::result_large_err)]
pub fn build_services_with(
    config: &Config,
    http: Arc<dyn HttpClient>,
    clock: Arc<dyn Clock>,
) -> Result<Services> {
    let fetcher = Fetcher::new(http, config.retry.policy());
    let freshness = config.cache.freshness();

    let market = MarketService::new(
        fetcher.clone(),
        config.market_endpoints()?,
        freshness,
        Arc::clone(&clock),
    )
    .with_vs_currency(&config.market.vs_currency)
    .with_listing_size(config.market.listing_size);

    let news = if config.news.enabled {
        let api_key = std::env::var("CRYPTOCOMPARE_API_KEY").ok();
        if api_key.is_none() {
            debug!("CRYPTOCOMPARE_API_KEY not set, news requests are unauthenticated");
        }
        Some(Arc::new(NewsService::new(
            fetcher,
            config.news_url()?,
            api_key,
            freshness,
            clock,
        )))
    } else {
        None
    };

    let store = build_watchlist_store(config)?;

    Ok(Services {
        market: Arc::new(market),
        news,
        insight: InsightService::new(build_llm_client(config)).with_timeout(config.llm.timeout()),
        watchlist: WatchlistService::load(store)?,
    })
}

/// Select the configured LLM provider. `None` when disabled or the API key
/// is missing.
pub(crate) fn build_llm_client(config: &Config) -> Option<Arc<dyn Llm>> {
    if !config.llm.enabled {
        return None;
    }

    let client: Arc<dyn Llm> = match config.llm.provider {
        LlmProvider::Gemini => {
            let settings = &config.llm.gemini;
            match Gemini::from_env(&settings.model, settings.max_tokens, settings.temperature) {
                Ok(client) => Arc::new(client.with_timeout(config.llm.timeout())),
                Err(_) => {
                    warn!("GEMINI_API_KEY not set, insights disabled");
                    return None;
                }
            }
        }
        LlmProvider::Anthropic => {
            let settings = &config.llm.anthropic;
            match Anthropic::from_env(&settings.model, settings.max_tokens, settings.temperature)
            {
                Ok(client) => Arc::new(client.with_timeout(config.llm.timeout())),
                Err(_) => {
                    warn!("ANTHROPIC_API_KEY not set, insights disabled");
                    return None;
                }
            }
        }
    };

    info!(provider = client.name(), "LLM client initialized");
    Some(client)
}

#[allow(clippy::result_large_err)]
fn build_watchlist_store(config: &Config) -> Result<Arc<dyn WatchlistStore>> {
    let path = match &config.watchlist.path {
        Some(path) => path.clone(),
        None => JsonFileStore::default_path().ok_or(ConfigError::MissingField {
            field: "watchlist.path",
        })?,
    };
    debug!(path = %path.display(), "Using watchlist file");
    Ok(Arc::new(JsonFileStore::new(path)))
}

/// Sweep stale entries from the market and news caches every `interval`
/// until the handle is aborted.
pub fn spawn_sweeper(
    market: Arc<MarketService>,
    news: Option<Arc<NewsService>>,
    interval: Duration,
) -> JoinHandle<()> {
    info!(interval_secs = interval.as_secs(), "Starting cache sweeper");
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let removed = market.sweep() + news.as_ref().map_or(0, |news| news.sweep());
            debug!(removed, "Cache sweep finished");
        }
    })
}
