//! tally-config
//!
//! Persistent settings and the tenant registry.
//! Owns the Config and TenantRegistry data structures plus disk persistence helpers.

pub mod error;
pub mod manager;
pub mod model;
pub mod registry;

use std::{env, path::PathBuf};

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::{Config, TenantRecord, TenantRegistry};
pub use registry::JsonTenantDirectory;

const DEFAULT_DIR_NAME: &str = ".tally";

/// Returns the application data directory: `TALLY_HOME` when set, otherwise `~/.tally`.
pub fn default_base_dir() -> PathBuf {
    if let Some(custom) = env::var_os("TALLY_HOME") {
        return PathBuf::from(custom);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}
