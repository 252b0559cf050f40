//! Watchlist persistence through the JSON file store.

use std::sync::Arc;

use coinlens::adapter::outbound::store::JsonFileStore;
use coinlens::application::watchlist::WatchlistService;
use coinlens::port::outbound::watchlist::WatchlistStore;

#[test]
fn toggles_survive_a_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("watchlist.json");

    let service = WatchlistService::load(Arc::new(JsonFileStore::new(&path))).unwrap();
    assert!(service.list().is_empty());
    assert!(service.toggle("bitcoin").unwrap());
    assert!(service.toggle("ethereum").unwrap());
    assert!(!service.toggle("bitcoin").unwrap());

    let reloaded = WatchlistService::load(Arc::new(JsonFileStore::new(&path))).unwrap();
    assert_eq!(reloaded.list().ids(), ["ethereum".to_string()]);
}

#[test]
fn toggle_twice_restores_original_file_contents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("watchlist.json");
    let store = JsonFileStore::new(&path);
    store.save(&["solana".to_string()]).unwrap();

    let service = WatchlistService::load(Arc::new(JsonFileStore::new(&path))).unwrap();
    service.toggle("cardano").unwrap();
    service.toggle("cardano").unwrap();

    assert_eq!(store.load().unwrap(), vec!["solana".to_string()]);
}

#[test]
fn corrupt_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("watchlist.json");
    std::fs::write(&path, "not json").unwrap();

    assert!(WatchlistService::load(Arc::new(JsonFileStore::new(&path))).is_err());
}
