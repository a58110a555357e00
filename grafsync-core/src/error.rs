//! Error types for `grafsync` core operations.
//!
//! Errors are split by when they can happen. [`ConfigError`],
//! [`ConnectivityError`] and [`SourceError`] are raised before any item is
//! processed and abort the run. [`DocumentError`] and [`ApiError`] describe a
//! single item and are captured into that item's outcome instead.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while resolving the target instance
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No API base URL was supplied by flag, environment or profile
    #[error("Grafana URL is required (use --url, GRAFANA_URL or a profile)")]
    MissingUrl,

    /// No bearer token was supplied by flag, environment or profile
    #[error("API token is required (use --token, GRAFANA_TOKEN or a profile)")]
    MissingToken,

    /// The URL could not be parsed
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The rejected URL
        url: String,
        /// Parser message
        reason: String,
    },

    /// The URL uses a scheme other than http or https
    #[error("Unsupported URL scheme '{0}' (expected http or https)")]
    UnsupportedScheme(String),

    /// A named profile was requested but does not exist
    #[error("Profile '{0}' not found in targets file")]
    ProfileNotFound(String),

    /// The targets file exists but could not be read or parsed
    #[error("Failed to load targets file {path}: {reason}")]
    TargetsFile {
        /// Path of the targets file
        path: PathBuf,
        /// Underlying reason
        reason: String,
    },
}

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Pre-flight connectivity failures
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectivityError {
    /// The target did not answer at all
    #[error("Cannot reach {url}: {reason}")]
    Unreachable {
        /// Base URL of the target
        url: String,
        /// Transport error message
        reason: String,
    },

    /// The health endpoint answered with a non-success status
    #[error("Health check failed with HTTP {0}")]
    Unhealthy(u16),

    /// The bearer token was rejected
    #[error("Authentication rejected with HTTP {0}")]
    AuthenticationRejected(u16),

    /// The auth check answered with something other than 200/401/403
    #[error("Unexpected HTTP {0} while verifying credentials")]
    UnexpectedStatus(u16),
}

/// Errors from the HTTP client wrapper
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Request could not be sent or the response could not be read
    #[error("HTTP request failed: {0}")]
    Transport(String),

    /// The HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    /// A request succeeded but returned an unexpected status
    #[error("HTTP {status}: {message}")]
    UnexpectedStatus {
        /// HTTP status code
        status: u16,
        /// Message extracted from the response body
        message: String,
    },

    /// The response body was not the JSON shape we expected
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Result type alias for API operations
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Errors from parsing or editing a JSON document
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// The document is not syntactically valid JSON
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    /// The document is valid JSON but not an object
    #[error("expected a JSON object at the top level")]
    NotAnObject,

    /// The `dashboard` key of a wrapped document is not an object
    #[error("'dashboard' must be a JSON object")]
    InvalidDashboard,

    /// A field exists but has a type we cannot edit
    #[error("field '{0}' has an unexpected type")]
    UnexpectedFieldType(String),

    /// The edited document could not be serialized
    #[error("failed to serialize document: {0}")]
    Serialize(String),

    /// The source file could not be read
    #[error("cannot read file: {0}")]
    Unreadable(String),
}

/// Errors while collecting input documents
#[derive(Debug, Error)]
pub enum SourceError {
    /// The input path does not exist
    #[error("Input path not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The input directory contains no `.json` files
    #[error("No JSON files found in {}", .0.display())]
    Empty(PathBuf),

    /// A file or directory could not be read
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// Path that failed
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}

/// Fatal export errors (per-item failures are recorded in the summary)
#[derive(Debug, Error)]
pub enum ExportError {
    /// Listing resources on the source instance failed
    #[error("Failed to list {kind}s: {source}")]
    List {
        /// Resource kind being listed
        kind: String,
        /// Underlying API error
        #[source]
        source: ApiError,
    },

    /// The output directory could not be created
    #[error("Failed to create output directory {}: {source}", path.display())]
    OutputDir {
        /// Output directory
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}
