//! Domain types for market data, derived views and the watchlist.
//!
//! Everything here is plain data validated at the adapter boundary; no I/O.

pub mod asset;
pub mod chart;
pub mod comparison;
pub mod insight;
pub mod news;
pub mod rate;
pub mod watchlist;

pub use asset::{performers, Asset, Performers};
pub use chart::{ChartSeries, ChartSpan, HistoryInterval, HistoryPoint, PricePoint};
pub use comparison::{ComparedAsset, Comparison, MAX_COMPARED_ASSETS};
pub use insight::AssetInsight;
pub use news::NewsArticle;
pub use rate::{Conversion, ExchangeRate};
pub use watchlist::Watchlist;
