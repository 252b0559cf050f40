//! Path utilities for coinlens.
//!
//! Configuration lives under the platform config directory:
//! - `<config dir>/coinlens/config.toml` - main configuration

use std::path::PathBuf;

/// Returns the coinlens config directory (`<config dir>/coinlens/`).
pub fn config_home() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("coinlens")
}

/// Returns the default config file path (`<config dir>/coinlens/config.toml`).
pub fn default_config() -> PathBuf {
    config_home().join("config.toml")
}
