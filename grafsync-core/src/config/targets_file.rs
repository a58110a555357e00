//! Named target profiles stored in `targets.toml`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use secrecy::SecretString;
use serde::{Deserialize, Deserializer};

use super::default_targets_path;
use crate::error::{ConfigError, ConfigResult};

/// Contents of the targets file
#[derive(Debug, Default, Deserialize)]
pub struct TargetsFile {
    /// Profiles keyed by name
    #[serde(default)]
    pub targets: BTreeMap<String, TargetProfile>,
}

/// One named target
#[derive(Debug, Default, Deserialize)]
pub struct TargetProfile {
    /// API base URL
    #[serde(default)]
    pub url: Option<String>,
    /// Bearer token
    #[serde(default, deserialize_with = "deserialize_secret")]
    pub token: Option<SecretString>,
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.map(SecretString::from))
}

impl TargetsFile {
    /// Parses a targets file from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::TargetsFile` if the TOML is malformed.
    pub fn parse(path: &Path, content: &str) -> ConfigResult<Self> {
        toml::from_str(content).map_err(|e| ConfigError::TargetsFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Loads a targets file from disk.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::TargetsFile` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::TargetsFile {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::parse(path, &content)
    }

    /// Loads the targets file from an explicit path or the default location.
    ///
    /// A missing default file yields an empty set of profiles; a missing
    /// explicit path is an error.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::TargetsFile` if a file that should exist cannot
    /// be read or parsed.
    pub fn load_default(explicit: Option<&Path>) -> ConfigResult<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match default_targets_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Takes the named profile out of the file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ProfileNotFound` if no profile has that name.
    pub fn into_profile(mut self, name: &str) -> ConfigResult<TargetProfile> {
        self.targets
            .remove(name)
            .ok_or_else(|| ConfigError::ProfileNotFound(name.to_string()))
    }

    /// Names of all profiles, sorted
    #[must_use]
    pub fn profile_names(&self) -> Vec<&str> {
        self.targets.keys().map(String::as_str).collect()
    }
}
