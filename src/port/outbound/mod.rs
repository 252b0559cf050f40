//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe infrastructure dependencies such as the wall
//! clock, HTTP transport, language models and local persistence.

pub mod clock;
pub mod http;
pub mod llm;
pub mod watchlist;
