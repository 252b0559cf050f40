//! Canned upstream payloads.

use serde_json::json;

pub fn market_row(id: &str, price: f64, change: Option<f64>, rank: u32) -> serde_json::Value {
    json!({
        "id": id,
        "symbol": &id[..3.min(id.len())],
        "name": id,
        "image": format!("https://img.test/{id}.png"),
        "current_price": price,
        "market_cap": price * 1_000_000.0,
        "market_cap_rank": rank,
        "total_volume": price * 10_000.0,
        "price_change_percentage_24h": change,
        "high_24h": price * 1.05,
        "low_24h": price * 0.95,
        "circulating_supply": 1_000_000.0,
        "total_supply": null,
        "ath": price * 1.5,
    })
}

pub fn listing() -> String {
    json!([
        market_row("bitcoin", 64_000.0, Some(2.5), 1),
        market_row("ethereum", 3_100.0, Some(-1.2), 2),
        market_row("solana", 150.0, Some(7.9), 3),
        market_row("dogecoin", 0.15, Some(-4.4), 4),
    ])
    .to_string()
}

/// Chart whose first and last prices are `first` and `last`.
pub fn chart(first: f64, last: f64) -> String {
    json!({
        "prices": [[1_714_521_600_000_i64, first], [1_714_608_000_000_i64, last]],
        "market_caps": [[1_714_521_600_000_i64, first * 1e6], [1_714_608_000_000_i64, last * 1e6]],
        "total_volumes": [[1_714_521_600_000_i64, 1e9], [1_714_608_000_000_i64, 2e9]],
    })
    .to_string()
}

pub fn history(prices: &[f64]) -> String {
    let data: Vec<_> = prices
        .iter()
        .enumerate()
        .map(|(i, price)| {
            json!({
                "priceUsd": price.to_string(),
                "time": 1_714_521_600_000_i64 + i as i64 * 86_400_000,
            })
        })
        .collect();
    json!({ "data": data }).to_string()
}

pub fn rates() -> String {
    json!({
        "base": "USD",
        "rates": { "USD": 1.0, "INR": 83.2, "EUR": 0.92 },
    })
    .to_string()
}

pub fn news() -> String {
    json!({
        "Type": 100,
        "Data": [
            {
                "id": "9001",
                "title": "Bitcoin climbs",
                "body": "Prices rose.",
                "imageurl": "https://img.test/news.png",
                "source": "wire",
                "published_on": 1_714_560_000_i64,
                "url": "https://news.test/a",
                "tags": "BTC|Markets",
                "categories": "BTC|Trading",
            }
        ],
    })
    .to_string()
}
