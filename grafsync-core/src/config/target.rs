//! Target instance resolution and validation.

use std::path::PathBuf;

use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};

use super::targets_file::TargetsFile;
use crate::error::{ConfigError, ConfigResult};

/// A validated target instance: API base URL plus bearer token
#[derive(Debug)]
pub struct TargetConfig {
    url: String,
    token: SecretString,
}

impl TargetConfig {
    /// Validates and creates a target.
    ///
    /// Trailing slashes are removed from the URL so endpoint paths can be
    /// appended directly. A base path (`https://host/grafana`) is kept.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if the URL does not parse,
    /// `ConfigError::UnsupportedScheme` for schemes other than http/https and
    /// `ConfigError::MissingToken` for an empty token.
    pub fn new(url: &str, token: SecretString) -> ConfigResult<Self> {
        let trimmed = url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(ConfigError::MissingUrl);
        }

        let parsed = Url::parse(trimmed).map_err(|e| ConfigError::InvalidUrl {
            url: trimmed.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme(parsed.scheme().to_string()));
        }

        if token.expose_secret().trim().is_empty() {
            return Err(ConfigError::MissingToken);
        }

        Ok(Self {
            url: trimmed.to_string(),
            token,
        })
    }

    /// API base URL without a trailing slash
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Bearer token
    #[must_use]
    pub const fn token(&self) -> &SecretString {
        &self.token
    }
}

/// Unresolved target inputs as collected from the command line
#[derive(Debug, Default)]
pub struct TargetSettings {
    /// Explicit URL (flag or environment)
    pub url: Option<String>,
    /// Explicit token (flag or environment)
    pub token: Option<SecretString>,
    /// Named profile to fall back on
    pub profile: Option<String>,
    /// Targets file location, when not the default
    pub targets_path: Option<PathBuf>,
}

impl TargetSettings {
    /// Resolves the settings into a validated target.
    ///
    /// Explicit values win over the profile; the targets file is only read
    /// when a profile is named.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` when the profile cannot be loaded, a value is
    /// missing after fallback, or validation fails.
    pub fn resolve(self) -> ConfigResult<TargetConfig> {
        let (profile_url, profile_token) = match self.profile.as_deref() {
            Some(name) => {
                let file = TargetsFile::load_default(self.targets_path.as_deref())?;
                let profile = file.into_profile(name)?;
                (profile.url, profile.token)
            }
            None => (None, None),
        };

        let url = self.url.or(profile_url).ok_or(ConfigError::MissingUrl)?;
        let token = self.token.or(profile_token).ok_or(ConfigError::MissingToken)?;

        tracing::debug!(url = %url, profile = ?self.profile, "Resolved target");

        TargetConfig::new(&url, token)
    }
}
