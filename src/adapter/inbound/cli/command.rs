//! Command-line interface definitions.
//!
//! Defines the CLI structure for the coinlens application using `clap`.
//! Every subcommand is a single query against the cached market data layer.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use super::paths;
use crate::domain::{ChartSpan, HistoryInterval};

/// Cached, retrying crypto market data from the terminal
#[derive(Parser, Debug)]
#[command(name = "coinlens")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file (defaults apply when it does not exist)
    #[arg(short, long, global = true, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the coinlens CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the top assets by market capitalization
    Markets(MarketsArgs),

    /// Show the price series of an asset
    Chart(ChartArgs),

    /// Compare up to three assets side by side
    Compare(CompareArgs),

    /// Show the price history of an asset at a fixed interval
    History(HistoryArgs),

    /// Show a fiat exchange rate
    Rate(RateArgs),

    /// Convert an amount between two assets
    Convert(ConvertArgs),

    /// Show the best and worst 24h performers
    Performers(PerformersArgs),

    /// Show recent news for a symbol
    News(NewsArgs),

    /// Ask the configured LLM for a short analysis of an asset
    Insight(InsightArgs),

    /// Manage the watchlist
    #[command(subcommand)]
    Watchlist(WatchlistCommand),
}

/// Arguments for the `markets` subcommand.
#[derive(Args, Debug)]
pub struct MarketsArgs {
    /// Number of assets to list (defaults to `market.listing_size`)
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Only show assets on the watchlist
    #[arg(short, long)]
    pub watchlist: bool,
}

/// Arguments for the `chart` subcommand.
#[derive(Args, Debug)]
pub struct ChartArgs {
    /// Asset id (e.g., "bitcoin")
    pub id: String,

    /// Span in days, or "max"
    #[arg(short, long, default_value = "7")]
    pub days: ChartSpan,
}

/// Arguments for the `compare` subcommand.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Asset ids to compare (one to three, e.g., "bitcoin ethereum")
    #[arg(required = true, num_args = 1..=3)]
    pub ids: Vec<String>,

    /// Chart span in days (1, 7, 30, 365), or "max"
    #[arg(short, long, default_value = "7")]
    pub days: ChartSpan,
}

/// Arguments for the `history` subcommand.
#[derive(Args, Debug)]
pub struct HistoryArgs {
    /// Asset id (e.g., "bitcoin")
    pub id: String,

    /// Sampling interval (m1, m5, m15, m30, h1, h2, h6, h12, d1)
    #[arg(short, long, default_value = "d1")]
    pub interval: HistoryInterval,

    /// Number of most recent points to show
    #[arg(short = 'n', long, default_value = "30")]
    pub points: usize,
}

/// Arguments for the `rate` subcommand.
#[derive(Args, Debug)]
pub struct RateArgs {
    /// Base currency (defaults to `market.fx_base`)
    #[arg(short, long)]
    pub base: Option<String>,

    /// Quote currency (defaults to `market.fx_quote`)
    #[arg(short = 't', long)]
    pub quote: Option<String>,
}

/// Arguments for the `convert` subcommand.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Asset id to convert from
    pub from: String,

    /// Asset id to convert to
    pub to: String,

    /// Amount of `from` to convert
    #[arg(short, long, default_value = "1")]
    pub amount: f64,
}

/// Arguments for the `performers` subcommand.
#[derive(Args, Debug)]
pub struct PerformersArgs {
    /// Number of assets on each side
    #[arg(short = 'n', long, default_value = "5")]
    pub count: usize,
}

/// Arguments for the `news` subcommand.
#[derive(Args, Debug)]
pub struct NewsArgs {
    /// Asset symbol (e.g., "BTC")
    pub symbol: String,

    /// Maximum number of articles to show
    #[arg(short = 'n', long, default_value = "10")]
    pub limit: usize,
}

/// Arguments for the `insight` subcommand.
#[derive(Args, Debug)]
pub struct InsightArgs {
    /// Asset id (e.g., "bitcoin")
    pub id: String,
}

/// Subcommands for `coinlens watchlist`.
#[derive(Subcommand, Debug)]
pub enum WatchlistCommand {
    /// List watched asset ids
    List,
    /// Add an asset id, or remove it if already watched
    Toggle {
        /// Asset id (e.g., "bitcoin")
        id: String,
    },
}
