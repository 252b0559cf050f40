//! LLM adapter modules.
//!
//! Provides implementations of the [`Llm`](crate::port::outbound::llm::Llm) trait
//! for Google Gemini and Anthropic Claude.

pub mod anthropic;
pub mod gemini;

use std::time::Duration;

use reqwest::Client;
use tracing::warn;

/// Request timeout used until a client is given an explicit one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Build an HTTP client whose requests give up after `timeout`.
///
/// Falls back to reqwest defaults if the builder rejects the settings.
pub(crate) fn http_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .build()
        .unwrap_or_else(|err| {
            warn!(error = %err, "Failed to build LLM HTTP client, using defaults");
            Client::new()
        })
}
