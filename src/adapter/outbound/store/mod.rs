//! Local persistence adapters.

pub mod file;

pub use file::JsonFileStore;
