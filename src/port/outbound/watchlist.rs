//! Persistence port for the watchlist.

use crate::error::Result;

/// Durable storage for the flat list of watched asset ids.
pub trait WatchlistStore: Send + Sync {
    /// Load the stored ids. A store that was never written returns an empty list.
    fn load(&self) -> Result<Vec<String>>;

    /// Replace the stored ids.
    fn save(&self, ids: &[String]) -> Result<()>;
}
