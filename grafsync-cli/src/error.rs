//! CLI error types and exit codes.

use grafsync_core::{ApiError, ConfigError, ConnectivityError, ExportError, SourceError};

/// Exit codes for CLI operations
pub mod exit_codes {
    /// General error - configuration, input, or item failures
    pub const GENERAL_ERROR: i32 = 1;
    /// Connectivity failure - target unreachable or credentials rejected
    pub const CONNECTIVITY_FAILURE: i32 = 2;
}

/// CLI error type
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Target unreachable or credentials rejected
    #[error("Connectivity error: {0}")]
    Connectivity(#[from] ConnectivityError),

    /// Input files could not be collected
    #[error("Input error: {0}")]
    Source(#[from] SourceError),

    /// Export aborted before any item was written
    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    /// HTTP client error
    #[error("HTTP client error: {0}")]
    Api(#[from] ApiError),

    /// At least one item failed; details were printed per item
    #[error("{failed} of {total} {what} failed")]
    ItemsFailed {
        /// What was processed, e.g. "datasources"
        what: &'static str,
        /// Failed items
        failed: usize,
        /// Items processed
        total: usize,
    },

    /// The async runtime could not be created
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Returns the appropriate exit code for this error type.
    ///
    /// Exit codes:
    /// - 0: Success (not an error)
    /// - 1: General error (configuration, input, item failures, IO)
    /// - 2: Connectivity failure
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Connectivity(_) => exit_codes::CONNECTIVITY_FAILURE,
            Self::Config(_)
            | Self::Source(_)
            | Self::Export(_)
            | Self::Api(_)
            | Self::ItemsFailed { .. }
            | Self::Runtime(_)
            | Self::Io(_) => exit_codes::GENERAL_ERROR,
        }
    }

    /// Returns true for errors caused by missing or invalid arguments
    #[must_use]
    pub const fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::Config(ConfigError::MissingUrl | ConfigError::MissingToken)
        )
    }
}
