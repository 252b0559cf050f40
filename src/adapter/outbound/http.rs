//! reqwest-backed HTTP transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, warn};

use crate::error::FetchError;
use crate::port::outbound::http::{HttpClient, HttpRequest};

/// Upper bound on how much of an error body is kept for logging.
const ERROR_BODY_LIMIT: usize = 500;

/// Map a reqwest failure onto the fetch error taxonomy.
pub(crate) fn classify(err: &reqwest::Error) -> FetchError {
    if let Some(status) = err.status() {
        let url = err.url().map(ToString::to_string).unwrap_or_default();
        if let Some(classified) = FetchError::from_status(status.as_u16(), &url) {
            return classified;
        }
    }
    if err.is_builder() {
        return FetchError::InvalidUrl(err.to_string());
    }
    FetchError::Transport(err.to_string())
}

/// [`HttpClient`] over a pooled `reqwest::Client`.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    http: Client,
}

impl ReqwestClient {
    #[must_use]
    pub fn new(http: Client) -> Self {
        Self { http }
    }

    /// Build a client with request/connect timeouts and a User-Agent.
    ///
    /// Falls back to reqwest defaults if the builder rejects the settings.
    #[must_use]
    pub fn with_settings(timeout: Duration, connect_timeout: Duration, user_agent: &str) -> Self {
        let http = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .user_agent(user_agent)
            .pool_max_idle_per_host(4)
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                Client::new()
            });
        Self { http }
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, request: &HttpRequest) -> Result<String, FetchError> {
        let mut builder = self
            .http
            .get(&request.url)
            .header("Accept", "application/json");
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await.map_err(|e| classify(&e))?;
        let status = response.status().as_u16();

        if let Some(err) = FetchError::from_status(status, &request.url) {
            let body = response.text().await.unwrap_or_default();
            let cut = body
                .char_indices()
                .nth(ERROR_BODY_LIMIT)
                .map_or(body.len(), |(i, _)| i);
            debug!(status, url = %request.url, body = &body[..cut], "Request failed");
            return Err(err);
        }

        response.text().await.map_err(|e| classify(&e))
    }
}
