//! Cache-then-retry plumbing shared by the query services.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::cache::TtlCache;
use super::retry::RetryPolicy;
use crate::error::{FetchError, QueryError};
use crate::port::outbound::http::{HttpClient, HttpRequest};

/// Converts a decoded wire payload into its validated domain shape.
pub type Decoder<W, T> = fn(W) -> Result<T, FetchError>;

/// Build a GET request under `base`, appending encoded path segments and
/// query pairs.
pub fn build_request(
    base: &Url,
    segments: &[&str],
    query: &[(&str, &str)],
) -> Result<HttpRequest, FetchError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| FetchError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    if !query.is_empty() {
        url.query_pairs_mut().extend_pairs(query);
    }
    Ok(HttpRequest::get(url.to_string()))
}

/// HTTP client paired with the retry policy applied to every call.
#[derive(Clone)]
pub struct Fetcher {
    http: Arc<dyn HttpClient>,
    retry: RetryPolicy,
}

impl Fetcher {
    pub fn new(http: Arc<dyn HttpClient>, retry: RetryPolicy) -> Self {
        Self { http, retry }
    }

    /// Fetch and decode one payload, retrying transient failures.
    pub async fn fetch<W, T>(
        &self,
        endpoint: &'static str,
        request: &HttpRequest,
        decode: Decoder<W, T>,
    ) -> Result<T, FetchError>
    where
        W: DeserializeOwned,
    {
        let http = self.http.as_ref();
        self.retry
            .run(|| async move {
                let body = http.get(request).await?;
                let wire: W = serde_json::from_str(&body)
                    .map_err(|e| FetchError::decode(endpoint, e.to_string()))?;
                decode(wire)
            })
            .await
    }

    /// Serve `key` from `cache` when fresh, otherwise fetch, store and return.
    pub async fn cached<W, T>(
        &self,
        cache: &TtlCache<T>,
        key: String,
        endpoint: &'static str,
        request: HttpRequest,
        decode: Decoder<W, T>,
    ) -> Result<T, QueryError>
    where
        W: DeserializeOwned,
        T: Clone,
    {
        if let Some(hit) = cache.get(&key) {
            debug!(key = %key, "Cache hit");
            return Ok(hit);
        }

        debug!(key = %key, url = %request.url, "Cache miss, fetching");
        let value = self
            .fetch(endpoint, &request, decode)
            .await
            .map_err(|err| QueryError::from_fetch(endpoint, err))?;

        cache.put(key, value.clone());
        Ok(value)
    }
}

impl std::fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fetcher").field("retry", &self.retry).finish()
    }
}
