//! Outbound adapters (driven side).

pub mod http;
pub mod llm;
pub mod store;
