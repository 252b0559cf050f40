//! News lookups degrade to an empty list instead of failing.

mod support;

use std::sync::Arc;
use std::time::Duration;

use coinlens::application::news::NewsService;
use url::Url;

use support::clock::ManualClock;
use support::fixtures;
use support::http::ScriptedHttp;

fn service(http: &Arc<ScriptedHttp>, api_key: Option<&str>) -> NewsService {
    NewsService::new(
        support::fetcher(http),
        Url::parse(support::NEWS).unwrap(),
        api_key.map(String::from),
        Duration::from_secs(60),
        ManualClock::new(),
    )
}

#[tokio::test(start_paused = true)]
async fn articles_are_decoded_and_cached() {
    let http = ScriptedHttp::new();
    http.ok("news/", fixtures::news());
    let news = service(&http, Some("secret"));

    let first = news.news_for("BTC").await;
    let second = news.news_for("btc").await;

    assert_eq!(first.len(), 1);
    assert_eq!(first, second);
    assert_eq!(first[0].id, "9001");
    assert_eq!(first[0].tags, vec!["BTC", "Markets"]);
    assert_eq!(http.calls("news/"), 1);

    let request = &http.requests()[0];
    assert!(request
        .url
        .starts_with("https://news.test/data/v2/news/?lang=EN&categories=btc"));
    assert!(request
        .headers
        .contains(&("Authorization".to_string(), "Apikey secret".to_string())));
}

#[tokio::test(start_paused = true)]
async fn missing_key_sends_no_authorization_header() {
    let http = ScriptedHttp::new();
    http.ok("news/", fixtures::news());
    let news = service(&http, None);

    assert_eq!(news.news_for("ETH").await.len(), 1);
    assert!(http.requests()[0].headers.is_empty());
}

#[tokio::test(start_paused = true)]
async fn rate_limited_news_degrades_to_empty() {
    let http = ScriptedHttp::new();
    http.status("news/", 429);
    let news = service(&http, Some("secret"));

    assert!(news.news_for("BTC").await.is_empty());
    assert_eq!(http.calls("news/"), 3);
}

#[tokio::test(start_paused = true)]
async fn malformed_news_degrades_to_empty() {
    let http = ScriptedHttp::new();
    http.ok("news/", r#"{"Message": "bad key"}"#);
    let news = service(&http, Some("secret"));

    assert!(news.news_for("BTC").await.is_empty());
    assert_eq!(http.calls("news/"), 1);
}

#[tokio::test(start_paused = true)]
async fn blank_symbol_skips_request() {
    let http = ScriptedHttp::new();
    let news = service(&http, None);

    assert!(news.news_for("  ").await.is_empty());
    assert_eq!(http.total_calls(), 0);
}
