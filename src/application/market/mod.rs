//! Market data queries.
//!
//! [`MarketService`] is the fetch orchestrator: each query computes a cache
//! key from its parameters, serves a fresh cached result when there is one,
//! and otherwise runs the network call under the retry policy and caches the
//! outcome.
//!
//! Concurrent callers on the same cold key are not coalesced. Each issues its
//! own request and the last successful write wins.

mod wire;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::cache::{cache_key, TtlCache};
use super::fetch::{build_request, Decoder, Fetcher};
use crate::domain::{
    Asset, ChartSeries, ChartSpan, ComparedAsset, Comparison, Conversion, ExchangeRate,
    HistoryInterval, HistoryPoint, MAX_COMPARED_ASSETS,
};
use crate::error::{FetchError, QueryError, Result};
use crate::port::outbound::clock::Clock;
use crate::port::outbound::http::HttpRequest;

/// Largest page the listing endpoint serves.
pub const MAX_LISTING_SIZE: usize = 250;

/// Listing size used for lookups when none is configured.
pub const DEFAULT_LISTING_SIZE: usize = 50;

/// Base URLs of the upstream services used by [`MarketService`].
#[derive(Debug, Clone)]
pub struct MarketEndpoints {
    /// CoinGecko-compatible market data API.
    pub market_data: Url,
    /// CoinCap-compatible asset history API.
    pub history: Url,
    /// exchangerate-api-compatible FX API.
    pub fx: Url,
}

/// Cached, retrying access to market listings, charts, history and rates.
#[derive(Debug)]
pub struct MarketService {
    fetcher: Fetcher,
    endpoints: MarketEndpoints,
    vs_currency: String,
    listing_size: usize,
    listings: TtlCache<Vec<Asset>>,
    charts: TtlCache<ChartSeries>,
    histories: TtlCache<Vec<HistoryPoint>>,
    rates: TtlCache<HashMap<String, f64>>,
    prices: TtlCache<HashMap<String, HashMap<String, f64>>>,
}

impl MarketService {
    /// Create a service whose caches share one clock and freshness window.
    pub fn new(
        fetcher: Fetcher,
        endpoints: MarketEndpoints,
        freshness: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            fetcher,
            endpoints,
            vs_currency: "usd".into(),
            listing_size: DEFAULT_LISTING_SIZE,
            listings: TtlCache::new(freshness, clock.clone()),
            charts: TtlCache::new(freshness, clock.clone()),
            histories: TtlCache::new(freshness, clock.clone()),
            rates: TtlCache::new(freshness, clock.clone()),
            prices: TtlCache::new(freshness, clock),
        }
    }

    /// Quote prices in `currency` instead of USD.
    #[must_use]
    pub fn with_vs_currency(mut self, currency: impl Into<String>) -> Self {
        self.vs_currency = currency.into().to_ascii_lowercase();
        self
    }

    /// Size of the listing that [`compare`](Self::compare) looks assets up in.
    #[must_use]
    pub fn with_listing_size(mut self, size: usize) -> Self {
        self.listing_size = size;
        self
    }

    #[must_use]
    pub fn vs_currency(&self) -> &str {
        &self.vs_currency
    }

    /// Top `limit` assets by market capitalization.
    pub async fn market_listing(&self, limit: usize) -> Result<Vec<Asset>> {
        if limit == 0 || limit > MAX_LISTING_SIZE {
            return Err(QueryError::InvalidParameter {
                name: "limit",
                reason: format!("must be between 1 and {MAX_LISTING_SIZE}"),
            }
            .into());
        }

        let limit = limit.to_string();
        let key = cache_key(wire::MARKETS, &[self.vs_currency.as_str(), limit.as_str()]);
        let request = build_request(
            &self.endpoints.market_data,
            &["coins", "markets"],
            &[
                ("vs_currency", self.vs_currency.as_str()),
                ("order", "market_cap_desc"),
                ("per_page", limit.as_str()),
                ("page", "1"),
                ("sparkline", "false"),
            ],
        );

        self.run(&self.listings, key, wire::MARKETS, request, wire::assets)
            .await
    }

    /// Look up one asset in the top `limit` listing.
    pub async fn find_asset(&self, asset_id: &str, limit: usize) -> Result<Option<Asset>> {
        let listing = self.market_listing(limit).await?;
        Ok(listing.into_iter().find(|asset| asset.id == asset_id))
    }

    /// Put up to three assets side by side: their listing rows plus one chart
    /// each over `span`.
    ///
    /// Every id must appear in the default listing. The listing and each chart
    /// go through their own caches, so a comparison shares entries with
    /// [`market_listing`](Self::market_listing) and
    /// [`chart_series`](Self::chart_series).
    pub async fn compare<S: AsRef<str>>(&self, ids: &[S], span: ChartSpan) -> Result<Comparison> {
        let mut wanted: Vec<&str> = Vec::with_capacity(ids.len());
        for id in ids {
            let id = require_id("asset id", id.as_ref())?;
            if wanted.contains(&id) {
                return Err(QueryError::InvalidParameter {
                    name: "asset ids",
                    reason: format!("'{id}' is listed more than once"),
                }
                .into());
            }
            wanted.push(id);
        }
        if wanted.is_empty() || wanted.len() > MAX_COMPARED_ASSETS {
            return Err(QueryError::InvalidParameter {
                name: "asset ids",
                reason: format!("compare between 1 and {MAX_COMPARED_ASSETS} assets"),
            }
            .into());
        }

        let listing = self.market_listing(self.listing_size).await?;
        let mut picked = Vec::with_capacity(wanted.len());
        for id in &wanted {
            let asset = listing
                .iter()
                .find(|asset| asset.id == *id)
                .cloned()
                .ok_or_else(|| QueryError::UnknownAsset((*id).to_string()))?;
            picked.push(asset);
        }

        let mut assets = Vec::with_capacity(picked.len());
        for asset in picked {
            let chart = self.chart_series(&asset.id, span).await?;
            assets.push(ComparedAsset { asset, chart });
        }
        debug!(count = assets.len(), %span, "Built comparison");

        Ok(Comparison { span, assets })
    }

    /// Price, market cap and volume series for one asset over `span`.
    pub async fn chart_series(&self, asset_id: &str, span: ChartSpan) -> Result<ChartSeries> {
        let asset_id = require_id("asset id", asset_id)?;
        let days = span.to_string();
        let key = cache_key(wire::CHART, &[asset_id, self.vs_currency.as_str(), days.as_str()]);
        let request = build_request(
            &self.endpoints.market_data,
            &["coins", asset_id, "market_chart"],
            &[("vs_currency", self.vs_currency.as_str()), ("days", days.as_str())],
        );

        self.run(&self.charts, key, wire::CHART, request, wire::chart)
            .await
    }

    /// USD price history for one asset sampled at `interval`.
    pub async fn asset_history(
        &self,
        asset_id: &str,
        interval: HistoryInterval,
    ) -> Result<Vec<HistoryPoint>> {
        let asset_id = require_id("asset id", asset_id)?;
        let key = cache_key(wire::HISTORY, &[asset_id, interval.as_str()]);
        let request = build_request(
            &self.endpoints.history,
            &["assets", asset_id, "history"],
            &[("interval", interval.as_str())],
        );

        self.run(&self.histories, key, wire::HISTORY, request, wire::history)
            .await
    }

    /// Reference rate from `base` to `quote` (e.g. USD → INR).
    ///
    /// The whole rate table for `base` is cached, so different quotes for the
    /// same base share one request.
    pub async fn exchange_rate(&self, base: &str, quote: &str) -> Result<ExchangeRate> {
        let base = require_id("base currency", base)?.to_ascii_uppercase();
        let quote = require_id("quote currency", quote)?.to_ascii_uppercase();

        let key = cache_key(wire::FX, &[base.as_str()]);
        let request = build_request(&self.endpoints.fx, &["latest", base.as_str()], &[]);
        let table = self
            .run(&self.rates, key, wire::FX, request, wire::rates)
            .await?;

        let rate = table
            .get(&quote)
            .copied()
            .ok_or_else(|| QueryError::UnknownCurrency {
                base: base.clone(),
                quote: quote.clone(),
            })?;

        Ok(ExchangeRate { base, quote, rate })
    }

    /// Convert `amount` of asset `from` into asset `to` at current prices.
    pub async fn convert(&self, from: &str, to: &str, amount: f64) -> Result<Conversion> {
        let from = require_id("source asset", from)?;
        let to = require_id("target asset", to)?;
        if !amount.is_finite() {
            return Err(QueryError::InvalidParameter {
                name: "amount",
                reason: "must be a finite number".into(),
            }
            .into());
        }

        if from == to {
            return Ok(Conversion {
                from: from.into(),
                to: to.into(),
                amount,
                rate: 1.0,
                converted: amount,
            });
        }

        let mut ids = [from, to];
        ids.sort_unstable();
        let joined = ids.join(",");
        let key = cache_key(wire::PRICE, &[joined.as_str(), self.vs_currency.as_str()]);
        let request = build_request(
            &self.endpoints.market_data,
            &["simple", "price"],
            &[("ids", joined.as_str()), ("vs_currencies", self.vs_currency.as_str())],
        );
        let prices = self
            .run(&self.prices, key, wire::PRICE, request, wire::prices)
            .await?;

        let price_of = |id: &str| {
            prices
                .get(id)
                .and_then(|by_currency| by_currency.get(&self.vs_currency))
                .copied()
                .ok_or_else(|| QueryError::UnknownAsset(id.to_string()))
        };
        let from_price = price_of(from)?;
        let to_price = price_of(to)?;

        Conversion::from_prices(from, to, amount, from_price, to_price)
            .ok_or_else(|| QueryError::UnknownAsset(to.to_string()).into())
    }

    /// Drop stale entries from every cache. Returns how many were removed.
    pub fn sweep(&self) -> usize {
        let removed = self.listings.sweep()
            + self.charts.sweep()
            + self.histories.sweep()
            + self.rates.sweep()
            + self.prices.sweep();
        if removed > 0 {
            debug!(removed, "Swept stale cache entries");
        }
        removed
    }

    async fn run<W, T>(
        &self,
        cache: &TtlCache<T>,
        key: String,
        endpoint: &'static str,
        request: std::result::Result<HttpRequest, FetchError>,
        decode: Decoder<W, T>,
    ) -> Result<T>
    where
        W: DeserializeOwned,
        T: Clone,
    {
        let request = request.map_err(|err| QueryError::from_fetch(endpoint, err))?;
        Ok(self
            .fetcher
            .cached(cache, key, endpoint, request, decode)
            .await?)
    }
}

fn require_id<'a>(name: &'static str, value: &'a str) -> std::result::Result<&'a str, QueryError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(QueryError::InvalidParameter {
            name,
            reason: "must not be empty".into(),
        });
    }
    Ok(value)
}
