//! Watchlist use cases backed by a persistent store.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::domain::{Asset, Watchlist};
use crate::error::{QueryError, Result};
use crate::port::outbound::watchlist::WatchlistStore;

/// In-memory watchlist that writes through to its store on every change.
pub struct WatchlistService {
    store: Arc<dyn WatchlistStore>,
    list: Mutex<Watchlist>,
}

impl WatchlistService {
    /// Load the current list from `store`.
    pub fn load(store: Arc<dyn WatchlistStore>) -> Result<Self> {
        let list = Watchlist::from_ids(store.load()?);
        debug!(count = list.len(), "Loaded watchlist");
        Ok(Self {
            store,
            list: Mutex::new(list),
        })
    }

    #[must_use]
    pub fn list(&self) -> Watchlist {
        self.list.lock().clone()
    }

    #[must_use]
    pub fn contains(&self, asset_id: &str) -> bool {
        self.list.lock().contains(asset_id)
    }

    /// Flip membership of `asset_id` and persist. Returns whether it is now watched.
    ///
    /// The in-memory list is left untouched when persisting fails.
    pub fn toggle(&self, asset_id: &str) -> Result<bool> {
        let asset_id = asset_id.trim();
        if asset_id.is_empty() {
            return Err(QueryError::InvalidParameter {
                name: "asset_id",
                reason: "must not be empty".into(),
            }
            .into());
        }
        let mut list = self.list.lock();
        let mut updated = list.clone();
        let watched = updated.toggle(asset_id);
        self.store.save(updated.ids())?;
        *list = updated;
        debug!(asset = asset_id, watched, "Toggled watchlist entry");
        Ok(watched)
    }

    /// Keep only the watched assets, preserving listing order.
    #[must_use]
    pub fn filter(&self, assets: Vec<Asset>) -> Vec<Asset> {
        let list = self.list.lock();
        assets.into_iter().filter(|a| list.contains(&a.id)).collect()
    }
}

impl std::fmt::Debug for WatchlistService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchlistService")
            .field("list", &*self.list.lock())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::asset::sample;
    use crate::error::Error;

    #[derive(Default)]
    struct MemoryStore {
        saved: Mutex<Vec<String>>,
        fail: bool,
    }

    impl WatchlistStore for MemoryStore {
        fn load(&self) -> Result<Vec<String>> {
            Ok(self.saved.lock().clone())
        }

        fn save(&self, ids: &[String]) -> Result<()> {
            if self.fail {
                return Err(Error::Store("disk full".into()));
            }
            *self.saved.lock() = ids.to_vec();
            Ok(())
        }
    }

    #[test]
    fn toggle_persists_each_change() {
        let store = Arc::new(MemoryStore::default());
        let service = WatchlistService::load(store.clone()).unwrap();

        assert!(service.toggle("bitcoin").unwrap());
        assert!(service.toggle("solana").unwrap());
        assert_eq!(*store.saved.lock(), vec!["bitcoin", "solana"]);

        assert!(!service.toggle("bitcoin").unwrap());
        assert_eq!(*store.saved.lock(), vec!["solana"]);
        assert!(service.contains("solana"));
    }

    #[test]
    fn failed_save_keeps_previous_state() {
        let store = Arc::new(MemoryStore {
            saved: Mutex::new(vec!["bitcoin".into()]),
            fail: true,
        });
        let service = WatchlistService::load(store).unwrap();

        assert!(service.toggle("ethereum").is_err());
        assert!(!service.contains("ethereum"));
        assert!(service.contains("bitcoin"));
    }

    #[test]
    fn blank_id_is_rejected() {
        let service = WatchlistService::load(Arc::new(MemoryStore::default())).unwrap();
        let err = service.toggle("  ").unwrap_err();
        assert!(matches!(
            err,
            Error::Query(QueryError::InvalidParameter { name: "asset_id", .. })
        ));
        assert!(service.list().is_empty());
    }

    #[test]
    fn filter_keeps_watched_assets_in_order() {
        let store = Arc::new(MemoryStore {
            saved: Mutex::new(vec!["c".into(), "a".into()]),
            fail: false,
        });
        let service = WatchlistService::load(store).unwrap();
        let assets = vec![
            sample("a", 1.0, None),
            sample("b", 1.0, None),
            sample("c", 1.0, None),
        ];

        let kept: Vec<String> = service.filter(assets).into_iter().map(|a| a.id).collect();
        assert_eq!(kept, vec!["a", "c"]);
    }
}
