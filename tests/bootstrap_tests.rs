//! Service wiring from configuration.

mod support;

use coinlens::infrastructure::bootstrap::build_services_with;
use coinlens::infrastructure::config::Config;

use support::clock::ManualClock;
use support::fixtures;
use support::http::ScriptedHttp;

fn config_for(dir: &tempfile::TempDir) -> Config {
    let toml = format!(
        r#"
[retry]
max_attempts = 2
delay_ms = 10

[endpoints]
market_data_url = "{}"
history_url = "{}"
news_url = "{}"
fx_url = "{}"

[market]
vs_currency = "EUR"

[llm]
enabled = false

[watchlist]
path = "{}"
"#,
        support::MARKET_DATA,
        support::HISTORY,
        support::NEWS,
        support::FX,
        dir.path().join("watchlist.json").display()
    );
    Config::parse_toml(&toml).unwrap()
}

#[tokio::test(start_paused = true)]
async fn services_follow_configuration() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&dir);
    let http = ScriptedHttp::new();
    http.status("coins/markets", 503);
    http.ok("news/", fixtures::news());

    let services = build_services_with(&config, http.clone(), ManualClock::new()).unwrap();

    assert_eq!(services.market.vs_currency(), "eur");
    assert!(!services.insight.is_enabled());
    assert!(services.market.market_listing(5).await.is_err());
    assert_eq!(http.calls("coins/markets"), 2);

    let news = services.news.as_ref().expect("news enabled by default");
    assert_eq!(news.news_for("BTC").await.len(), 1);
}

#[tokio::test]
async fn disabled_news_is_not_built() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config_for(&dir);
    config.news.enabled = false;

    let services =
        build_services_with(&config, ScriptedHttp::new(), ManualClock::new()).unwrap();

    assert!(services.news.is_none());
}
