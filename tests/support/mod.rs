#![allow(dead_code)]

pub mod clock;
pub mod fixtures;
pub mod http;

use std::sync::Arc;
use std::time::Duration;

use coinlens::application::fetch::Fetcher;
use coinlens::application::market::{MarketEndpoints, MarketService};
use coinlens::application::retry::RetryPolicy;
use url::Url;

use self::clock::ManualClock;
use self::http::ScriptedHttp;

pub const MARKET_DATA: &str = "https://market.test/api/v3";
pub const HISTORY: &str = "https://history.test/v2";
pub const FX: &str = "https://fx.test/v4";
pub const NEWS: &str = "https://news.test/data/v2";

pub fn endpoints() -> MarketEndpoints {
    MarketEndpoints {
        market_data: Url::parse(MARKET_DATA).expect("market data url"),
        history: Url::parse(HISTORY).expect("history url"),
        fx: Url::parse(FX).expect("fx url"),
    }
}

/// Default retry budget (3 attempts, 1 s apart). Run under a paused tokio
/// clock so the delays cost nothing.
pub fn fetcher(http: &Arc<ScriptedHttp>) -> Fetcher {
    Fetcher::new(http.clone(), RetryPolicy::default())
}

/// Market service with a 60 s freshness window over scripted HTTP.
pub fn market_service(http: &Arc<ScriptedHttp>, clock: &Arc<ManualClock>) -> MarketService {
    MarketService::new(
        fetcher(http),
        endpoints(),
        Duration::from_secs(60),
        clock.clone(),
    )
}
