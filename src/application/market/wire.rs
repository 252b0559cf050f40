//! Upstream response shapes and their conversion into domain types.
//!
//! Every conversion fails closed: a payload that deserializes but carries
//! unusable values (non-finite numbers, bad timestamps) is rejected as a
//! whole rather than partially returned.

use std::collections::HashMap;

use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;

use crate::domain::{Asset, ChartSeries, HistoryPoint, PricePoint};
use crate::error::FetchError;

pub(super) const MARKETS: &str = "markets";
pub(super) const CHART: &str = "chart";
pub(super) const HISTORY: &str = "history";
pub(super) const FX: &str = "fx";
pub(super) const PRICE: &str = "price";

/// Row of `/coins/markets`.
#[derive(Debug, Deserialize)]
pub(super) struct MarketRow {
    id: String,
    symbol: String,
    name: String,
    #[serde(default)]
    image: Option<String>,
    current_price: f64,
    market_cap: f64,
    #[serde(default)]
    market_cap_rank: Option<u32>,
    total_volume: f64,
    #[serde(default)]
    price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    high_24h: Option<f64>,
    #[serde(default)]
    low_24h: Option<f64>,
    #[serde(default)]
    circulating_supply: Option<f64>,
    #[serde(default)]
    total_supply: Option<f64>,
    #[serde(default)]
    ath: Option<f64>,
}

/// Body of `/coins/{id}/market_chart`.
#[derive(Debug, Deserialize)]
pub(super) struct MarketChart {
    prices: Vec<[f64; 2]>,
    #[serde(default)]
    market_caps: Vec<[f64; 2]>,
    #[serde(default)]
    total_volumes: Vec<[f64; 2]>,
}

/// Body of `/assets/{id}/history`.
#[derive(Debug, Deserialize)]
pub(super) struct AssetHistory {
    data: Vec<HistoryRow>,
}

#[derive(Debug, Deserialize)]
struct HistoryRow {
    #[serde(rename = "priceUsd")]
    price_usd: String,
    time: i64,
}

/// Body of `/latest/{base}`.
#[derive(Debug, Deserialize)]
pub(super) struct RateTable {
    rates: HashMap<String, f64>,
}

/// Body of `/simple/price`: asset id → currency → price.
pub(super) type SimplePrices = HashMap<String, HashMap<String, f64>>;

fn finite(endpoint: &'static str, what: &str, value: f64) -> Result<f64, FetchError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(FetchError::decode(endpoint, format!("{what} is not a finite number")))
    }
}

fn timestamp(endpoint: &'static str, millis: i64) -> Result<DateTime<Utc>, FetchError> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| FetchError::decode(endpoint, format!("invalid timestamp {millis}")))
}

pub(super) fn assets(rows: Vec<MarketRow>) -> Result<Vec<Asset>, FetchError> {
    rows.into_iter()
        .map(|row| {
            Ok(Asset {
                current_price: finite(MARKETS, "current_price", row.current_price)?,
                market_cap: finite(MARKETS, "market_cap", row.market_cap)?,
                total_volume: finite(MARKETS, "total_volume", row.total_volume)?,
                id: row.id,
                symbol: row.symbol,
                name: row.name,
                image_url: row.image.unwrap_or_default(),
                market_cap_rank: row.market_cap_rank,
                price_change_24h: row.price_change_percentage_24h,
                high_24h: row.high_24h,
                low_24h: row.low_24h,
                circulating_supply: row.circulating_supply,
                total_supply: row.total_supply,
                all_time_high: row.ath,
            })
        })
        .collect()
}

fn points(pairs: Vec<[f64; 2]>) -> Result<Vec<PricePoint>, FetchError> {
    pairs
        .into_iter()
        .map(|[ms, value]| {
            let ms = finite(CHART, "timestamp", ms)?;
            Ok(PricePoint {
                timestamp: timestamp(CHART, ms as i64)?,
                value: finite(CHART, "value", value)?,
            })
        })
        .collect()
}

pub(super) fn chart(chart: MarketChart) -> Result<ChartSeries, FetchError> {
    Ok(ChartSeries {
        prices: points(chart.prices)?,
        market_caps: points(chart.market_caps)?,
        total_volumes: points(chart.total_volumes)?,
    })
}

pub(super) fn history(history: AssetHistory) -> Result<Vec<HistoryPoint>, FetchError> {
    history
        .data
        .into_iter()
        .map(|row| {
            let price = row.price_usd.trim().parse::<f64>().map_err(|_| {
                FetchError::decode(HISTORY, format!("priceUsd '{}' is not a number", row.price_usd))
            })?;
            Ok(HistoryPoint {
                time: timestamp(HISTORY, row.time)?,
                price_usd: finite(HISTORY, "priceUsd", price)?,
            })
        })
        .collect()
}

pub(super) fn rates(table: RateTable) -> Result<HashMap<String, f64>, FetchError> {
    table
        .rates
        .into_iter()
        .map(|(currency, rate)| Ok((currency.to_ascii_uppercase(), finite(FX, "rate", rate)?)))
        .collect()
}

/// Validate every quoted price, keyed by asset id then currency.
pub(super) fn prices(
    prices: SimplePrices,
) -> Result<HashMap<String, HashMap<String, f64>>, FetchError> {
    prices
        .into_iter()
        .map(|(id, by_currency)| {
            let by_currency = by_currency
                .into_iter()
                .map(|(currency, price)| Ok((currency, finite(PRICE, "price", price)?)))
                .collect::<Result<HashMap<_, _>, FetchError>>()?;
            Ok((id, by_currency))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn market_row_requires_price() {
        let body = r#"[{"id":"x","symbol":"x","name":"X","current_price":null,
            "market_cap":1,"total_volume":1}]"#;
        assert!(serde_json::from_str::<Vec<MarketRow>>(body).is_err());
    }

    #[test]
    fn market_row_tolerates_null_optionals() {
        let body = r#"[{"id":"bitcoin","symbol":"btc","name":"Bitcoin",
            "image":"https://img/btc.png","current_price":60000.5,"market_cap":1.2e12,
            "market_cap_rank":1,"total_volume":3.1e10,"price_change_percentage_24h":null,
            "high_24h":61000,"low_24h":59000,"circulating_supply":19700000,
            "total_supply":21000000,"ath":73000,"roi":null}]"#;
        let rows: Vec<MarketRow> = serde_json::from_str(body).unwrap();
        let assets = assets(rows).unwrap();
        assert_eq!(assets[0].id, "bitcoin");
        assert_eq!(assets[0].market_cap_rank, Some(1));
        assert_eq!(assets[0].price_change_24h, None);
        assert_eq!(assets[0].all_time_high, Some(73000.0));
    }

    #[test]
    fn chart_converts_millisecond_pairs() {
        let body = r#"{"prices":[[1700000000000,100.0],[1700003600000,101.5]],
            "market_caps":[[1700000000000,5.0]],"total_volumes":[]}"#;
        let series = chart(serde_json::from_str(body).unwrap()).unwrap();
        assert_eq!(series.prices.len(), 2);
        assert_eq!(series.prices[0].timestamp.timestamp(), 1_700_000_000);
        assert_eq!(series.prices[1].value, 101.5);
        assert_eq!(series.market_caps.len(), 1);
    }

    #[test]
    fn chart_without_prices_is_rejected() {
        assert!(serde_json::from_str::<MarketChart>(r#"{"market_caps":[]}"#).is_err());
    }

    #[test]
    fn history_parses_string_prices() {
        let body = r#"{"data":[{"priceUsd":"42.125","time":1700000000000,
            "date":"2023-11-14T22:13:20.000Z"}],"timestamp":1700000000001}"#;
        let points = history(serde_json::from_str(body).unwrap()).unwrap();
        assert_eq!(points[0].price_usd, 42.125);
        assert_eq!(points[0].time.timestamp(), 1_700_000_000);
    }

    #[test]
    fn history_rejects_non_numeric_price() {
        let body = r#"{"data":[{"priceUsd":"n/a","time":1700000000000}]}"#;
        let err = history(serde_json::from_str(body).unwrap()).unwrap_err();
        assert!(matches!(err, FetchError::Decode { endpoint: HISTORY, .. }));
    }

    #[test]
    fn rates_are_keyed_upper_case() {
        let body = r#"{"base":"USD","rates":{"inr":83.2,"EUR":0.92}}"#;
        let table = rates(serde_json::from_str(body).unwrap()).unwrap();
        assert_eq!(table.get("INR"), Some(&83.2));
        assert_eq!(table.get("EUR"), Some(&0.92));
    }
}
