//! Application directory paths for the dashboard.
//!
//! Uses the [`dirs`] crate for platform-appropriate resolution.
//!
//! # Environment Overrides
//!
//! - `MULLING_CONFIG_DIR`: overrides [`config_dir`]

use std::path::PathBuf;

/// Application config directory.
///
/// Resolves to `dirs::config_dir()/mulling/` by default. Override with
/// the `MULLING_CONFIG_DIR` environment variable.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("MULLING_CONFIG_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::config_dir()
        .map(|d| d.join("mulling"))
        .unwrap_or_else(|| PathBuf::from("/tmp/mulling-config"))
}

/// Path of the main config file.
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}
