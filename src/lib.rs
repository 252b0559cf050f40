//! Coinlens - cached, retrying crypto market data.
//!
//! This crate fetches market listings, price charts, asset history, FX rates
//! and news from public HTTP APIs, keeps recent responses in a TTL cache, and
//! retries transient upstream failures with a fixed delay. An optional LLM
//! integration turns price history into a short analysis.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`] - Plain data: assets, chart series, rates, news, insights, watchlist
//! - [`port`] - Traits for the outside world: clock, HTTP, LLM, watchlist storage
//! - [`application`] - Cache, retry policy, and the query services
//! - [`adapter`] - `reqwest` HTTP client, Gemini and Anthropic clients, JSON file
//!   store, and the command-line front end
//! - [`infrastructure`] - Configuration, logging, and service wiring
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use coinlens::infrastructure::bootstrap::build_services;
//! use coinlens::infrastructure::config::Config;
//!
//! # async fn run() -> coinlens::error::Result<()> {
//! let services = build_services(&Config::default())?;
//! let assets = services.market.market_listing(10).await?;
//! println!("{} is the largest asset", assets[0].name);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
