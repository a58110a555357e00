//! Configuration for `grafsync`
//!
//! A run needs a target instance (API base URL and bearer token) and, for
//! imports, a set of [`ImportOptions`]. The target comes from command-line
//! flags, environment variables or a named profile in a TOML targets file:
//!
//! ```toml
//! [targets.prod]
//! url = "https://grafana.example.com"
//! token = "glsa_..."
//! ```

mod options;
mod target;
mod targets_file;

use std::path::PathBuf;

pub use options::ImportOptions;
pub use target::{TargetConfig, TargetSettings};
pub use targets_file::{TargetProfile, TargetsFile};

/// Environment variable overriding the configuration directory
pub const CONFIG_DIR_ENV: &str = "GRAFSYNC_CONFIG_DIR";

/// File name of the targets file inside the configuration directory
pub const TARGETS_FILE_NAME: &str = "targets.toml";

/// Returns the configuration directory.
///
/// `$GRAFSYNC_CONFIG_DIR` wins; otherwise `<config dir>/grafsync`.
#[must_use]
pub fn default_config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|dir| dir.join("grafsync"))
}

/// Returns the default targets file path
#[must_use]
pub fn default_targets_path() -> Option<PathBuf> {
    default_config_dir().map(|dir| dir.join(TARGETS_FILE_NAME))
}
