//! HTTP transport port.
//!
//! Query services only ever issue JSON GET requests, so the port is reduced
//! to a single operation returning the raw response body. Status handling is
//! the adapter's job: non-2xx responses come back as a classified
//! [`FetchError`].

use async_trait::async_trait;

use crate::error::FetchError;

/// A GET request with optional extra headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

impl HttpRequest {
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            headers: Vec::new(),
        }
    }

    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Client for outbound JSON GET requests.
///
/// Implementations must map HTTP 429 to [`FetchError::RateLimited`], 5xx to
/// [`FetchError::Server`], other non-success codes to [`FetchError::Client`]
/// and connection-level failures to [`FetchError::Transport`].
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform the request and return the response body on success.
    async fn get(&self, request: &HttpRequest) -> Result<String, FetchError>;
}
