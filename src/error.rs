use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Failures of a single outbound request.
///
/// Rate limiting and server faults are transient and may be retried;
/// everything else is final on the first occurrence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("rate limited by {url}")]
    RateLimited { url: String },

    #[error("server error {status} from {url}")]
    Server { status: u16, url: String },

    #[error("client error {status} from {url}")]
    Client { status: u16, url: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("unexpected response shape from {endpoint}: {reason}")]
    Decode {
        endpoint: &'static str,
        reason: String,
    },
}

impl FetchError {
    /// Classify an HTTP status code. Returns `None` for success codes.
    #[must_use]
    pub fn from_status(status: u16, url: &str) -> Option<Self> {
        match status {
            200..=299 => None,
            429 => Some(Self::RateLimited { url: url.into() }),
            500..=599 => Some(Self::Server {
                status,
                url: url.into(),
            }),
            _ => Some(Self::Client {
                status,
                url: url.into(),
            }),
        }
    }

    pub(crate) fn decode(endpoint: &'static str, reason: impl Into<String>) -> Self {
        Self::Decode {
            endpoint,
            reason: reason.into(),
        }
    }
}

/// Errors surfaced to callers of the query functions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("rate limit exceeded for {endpoint}, try again shortly")]
    RateLimitExceeded { endpoint: &'static str },

    #[error("failed to fetch {endpoint}: {source}")]
    Failed {
        endpoint: &'static str,
        #[source]
        source: FetchError,
    },

    #[error("no {base}/{quote} exchange rate available")]
    UnknownCurrency { base: String, quote: String },

    #[error("no price available for asset '{0}'")]
    UnknownAsset(String),

    #[error("invalid {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
}

impl QueryError {
    /// Translate the final failure of a fetch into a caller-facing error.
    #[must_use]
    pub fn from_fetch(endpoint: &'static str, err: FetchError) -> Self {
        match err {
            FetchError::RateLimited { .. } => Self::RateLimitExceeded { endpoint },
            source => Self::Failed { endpoint, source },
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        assert_eq!(FetchError::from_status(200, "u"), None);
        assert!(matches!(
            FetchError::from_status(429, "u"),
            Some(FetchError::RateLimited { .. })
        ));
        assert!(matches!(
            FetchError::from_status(503, "u"),
            Some(FetchError::Server { status: 503, .. })
        ));
        assert!(matches!(
            FetchError::from_status(404, "u"),
            Some(FetchError::Client { status: 404, .. })
        ));
    }

    #[test]
    fn rate_limit_maps_to_dedicated_query_error() {
        let err = QueryError::from_fetch("markets", FetchError::RateLimited { url: "u".into() });
        assert_eq!(err, QueryError::RateLimitExceeded { endpoint: "markets" });

        let err = QueryError::from_fetch(
            "markets",
            FetchError::Server {
                status: 502,
                url: "u".into(),
            },
        );
        assert!(matches!(err, QueryError::Failed { endpoint: "markets", .. }));
    }

    #[test]
    fn query_error_message_is_readable() {
        let err = QueryError::RateLimitExceeded { endpoint: "chart" };
        assert_eq!(
            err.to_string(),
            "rate limit exceeded for chart, try again shortly"
        );
    }
}
