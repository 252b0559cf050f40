//! Application services (use cases).
//!
//! These services compose the response cache and retry policy around the
//! outbound ports to implement the crate's queries.

pub mod cache;
pub mod fetch;
pub mod insight;
pub mod market;
pub mod news;
pub mod retry;
pub mod watchlist;

pub use cache::{cache_key, TtlCache};
pub use fetch::Fetcher;
pub use insight::InsightService;
pub use market::{MarketEndpoints, MarketService};
pub use news::NewsService;
pub use retry::{RetryPolicy, Transient};
pub use watchlist::WatchlistService;
