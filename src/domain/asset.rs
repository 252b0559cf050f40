//! Market listing records.

use serde::Serialize;

/// One row of the market listing, ranked by capitalization.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Asset {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub image_url: String,
    pub current_price: f64,
    pub market_cap: f64,
    pub market_cap_rank: Option<u32>,
    pub total_volume: f64,
    /// Percent change over the last 24 hours.
    pub price_change_24h: Option<f64>,
    pub high_24h: Option<f64>,
    pub low_24h: Option<f64>,
    pub circulating_supply: Option<f64>,
    pub total_supply: Option<f64>,
    pub all_time_high: Option<f64>,
}

/// Best and worst movers of a listing over 24 hours.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Performers {
    /// Largest gains first.
    pub top: Vec<Asset>,
    /// Largest losses first.
    pub lowest: Vec<Asset>,
}

/// Split a listing into the `count` best and `count` worst performers.
///
/// Assets without a 24h change are skipped. When the listing is shorter than
/// `2 * count` the two sides overlap, matching a plain sort-and-slice.
#[must_use]
pub fn performers(assets: &[Asset], count: usize) -> Performers {
    let mut ranked: Vec<(&Asset, f64)> = assets
        .iter()
        .filter_map(|a| a.price_change_24h.map(|c| (a, c)))
        .filter(|(_, c)| c.is_finite())
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let top = ranked.iter().take(count).map(|(a, _)| (*a).clone()).collect();
    let lowest = ranked
        .iter()
        .rev()
        .take(count)
        .map(|(a, _)| (*a).clone())
        .collect();

    Performers { top, lowest }
}

#[cfg(test)]
pub(crate) fn sample(id: &str, price: f64, change: Option<f64>) -> Asset {
    Asset {
        id: id.into(),
        symbol: id.chars().take(3).collect(),
        name: id.into(),
        image_url: String::new(),
        current_price: price,
        market_cap: price * 1_000.0,
        market_cap_rank: None,
        total_volume: 0.0,
        price_change_24h: change,
        high_24h: None,
        low_24h: None,
        circulating_supply: None,
        total_supply: None,
        all_time_high: None,
    }
}
