//! CLI module graph.

pub mod command;
pub mod insight;
pub mod market;
pub mod news;
pub mod output;
pub mod paths;
pub mod run;
pub mod watchlist;
