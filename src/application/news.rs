//! News headlines per asset.
//!
//! News is decoration: any failure is logged and degrades to an empty list so
//! the rest of the output stays usable.

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use serde::Deserialize;
use tracing::warn;
use url::Url;

use super::cache::{cache_key, TtlCache};
use super::fetch::{build_request, Fetcher};
use crate::domain::NewsArticle;
use crate::error::FetchError;
use crate::port::outbound::clock::Clock;

const NEWS: &str = "news";

#[derive(Debug, Deserialize)]
struct NewsResponse {
    #[serde(rename = "Data")]
    data: Vec<ArticleRow>,
}

#[derive(Debug, Deserialize)]
struct ArticleRow {
    id: serde_json::Value,
    published_on: i64,
    title: String,
    url: String,
    #[serde(default)]
    imageurl: String,
    #[serde(default)]
    source: String,
    #[serde(default)]
    body: String,
    #[serde(default)]
    tags: String,
    #[serde(default)]
    categories: String,
}

fn split_pipes(raw: &str) -> Vec<String> {
    raw.split('|')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

fn articles(response: NewsResponse) -> Result<Vec<NewsArticle>, FetchError> {
    response
        .data
        .into_iter()
        .map(|row| {
            let id = match row.id {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            };
            let published_at = Utc
                .timestamp_opt(row.published_on, 0)
                .single()
                .ok_or_else(|| {
                    FetchError::decode(NEWS, format!("invalid published_on {}", row.published_on))
                })?;
            Ok(NewsArticle {
                id,
                title: row.title,
                body: row.body,
                image_url: row.imageurl,
                source: row.source,
                published_at,
                url: row.url,
                tags: split_pipes(&row.tags),
                categories: split_pipes(&row.categories),
            })
        })
        .collect()
}

/// Best-effort, cached news lookup.
#[derive(Debug)]
pub struct NewsService {
    fetcher: Fetcher,
    base: Url,
    api_key: Option<String>,
    cache: TtlCache<Vec<NewsArticle>>,
}

impl NewsService {
    pub fn new(
        fetcher: Fetcher,
        base: Url,
        api_key: Option<String>,
        freshness: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            fetcher,
            base,
            api_key,
            cache: TtlCache::new(freshness, clock),
        }
    }

    /// Latest English articles tagged with `symbol`. Never fails.
    pub async fn news_for(&self, symbol: &str) -> Vec<NewsArticle> {
        let category = symbol.trim().to_ascii_lowercase();
        if category.is_empty() {
            return Vec::new();
        }

        let request = match build_request(
            &self.base,
            &["news", ""],
            &[("lang", "EN"), ("categories", category.as_str())],
        ) {
            Ok(request) => request,
            Err(err) => {
                warn!(error = %err, "Failed to build news request");
                return Vec::new();
            }
        };
        let request = match &self.api_key {
            Some(key) => request.header("Authorization", format!("Apikey {key}")),
            None => request,
        };

        let key = cache_key(NEWS, &[category.as_str()]);
        match self
            .fetcher
            .cached(&self.cache, key, NEWS, request, articles)
            .await
        {
            Ok(articles) => articles,
            Err(err) => {
                warn!(symbol = %category, error = %err, "Failed to fetch news");
                Vec::new()
            }
        }
    }

    /// Drop stale entries. Returns how many were removed.
    pub fn sweep(&self) -> usize {
        self.cache.sweep()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn articles_accept_numeric_and_string_ids() {
        let body = r#"{"Type":100,"Message":"News list successfully returned","Data":[
            {"id":"39771","published_on":1700000000,"title":"BTC up","url":"https://n/1",
             "imageurl":"https://i/1","source":"coindesk","body":"...","tags":"BTC|Markets",
             "categories":"BTC|Trading"},
            {"id":39772,"published_on":1700000100,"title":"ETH flat","url":"https://n/2"}
        ]}"#;
        let parsed = articles(serde_json::from_str(body).unwrap()).unwrap();
        assert_eq!(parsed[0].id, "39771");
        assert_eq!(parsed[1].id, "39772");
        assert_eq!(parsed[0].tags, vec!["BTC", "Markets"]);
        assert_eq!(parsed[0].published_at.timestamp(), 1_700_000_000);
        assert!(parsed[1].categories.is_empty());
    }

    #[test]
    fn error_envelope_does_not_decode() {
        let body = r#"{"Response":"Error","Message":"rate limit","Data":{}}"#;
        assert!(serde_json::from_str::<NewsResponse>(body).is_err());
    }
}
