//! Tracing integration for structured logging
//!
//! Diagnostics go through the `tracing` crate. This module builds the
//! subscriber from a [`TracingConfig`] and names the spans used by the
//! import, export and credential operations. Log output goes to stderr by
//! default so it never mixes with the per-item lines printed on stdout.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Global flag indicating whether tracing has been initialized
static TRACING_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Crate targets the level filter applies to
const LOG_TARGETS: &[&str] = &["grafsync", "grafsync_core"];

/// Errors that can occur during tracing initialization
#[derive(Debug, Error)]
pub enum TracingError {
    /// Failed to initialize tracing subscriber
    #[error("Failed to initialize tracing: {0}")]
    InitializationFailed(String),

    /// The custom filter does not parse
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter {
        /// The rejected filter
        filter: String,
        /// Parser message
        reason: String,
    },

    /// Tracing already initialized
    #[error("Tracing has already been initialized")]
    AlreadyInitialized,

    /// Failed to create log file
    #[error("Failed to create log file: {0}")]
    FileCreationFailed(String),
}

/// Result type for tracing operations
pub type TracingResult<T> = Result<T, TracingError>;

/// Tracing log level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum TracingLevel {
    /// Error level - only errors
    Error,
    /// Warn level - errors and warnings (default)
    #[default]
    Warn,
    /// Info level - adds one line per imported or exported item
    Info,
    /// Debug level - adds requests, responses and folder lookups
    Debug,
    /// Trace level - all messages including cache hits
    Trace,
}

impl TracingLevel {
    /// Converts to tracing crate's Level
    #[must_use]
    pub const fn to_tracing_level(self) -> Level {
        match self {
            Self::Error => Level::ERROR,
            Self::Warn => Level::WARN,
            Self::Info => Level::INFO,
            Self::Debug => Level::DEBUG,
            Self::Trace => Level::TRACE,
        }
    }

    /// Maps command-line verbosity to a level.
    ///
    /// `quiet` wins and keeps errors only; otherwise each `-v` raises the
    /// level by one step starting from warn.
    #[must_use]
    pub const fn from_verbosity(verbose: u8, quiet: bool) -> Self {
        if quiet {
            return Self::Error;
        }
        match verbose {
            0 => Self::Warn,
            1 => Self::Info,
            2 => Self::Debug,
            _ => Self::Trace,
        }
    }
}

impl std::str::FromStr for TracingLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for TracingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Output destination for tracing logs
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TracingOutput {
    /// Output to stdout
    Stdout,
    /// Output to stderr
    #[default]
    Stderr,
    /// Output to a file, truncated on start
    File {
        /// Path to the log file
        path: PathBuf,
    },
}

/// Configuration for tracing initialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingConfig {
    /// Log level
    pub level: TracingLevel,
    /// Output destination
    pub output: TracingOutput,
    /// Whether to emit ANSI colors (ignored for file output)
    pub ansi: bool,
    /// Custom filter string (overrides level if set)
    pub filter: Option<String>,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: TracingLevel::Warn,
            output: TracingOutput::Stderr,
            ansi: true,
            filter: None,
        }
    }
}

impl TracingConfig {
    /// Creates a new tracing configuration with default values
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the log level
    #[must_use]
    pub const fn with_level(mut self, level: TracingLevel) -> Self {
        self.level = level;
        self
    }

    /// Sets the output destination
    #[must_use]
    pub fn with_output(mut self, output: TracingOutput) -> Self {
        self.output = output;
        self
    }

    /// Enables or disables ANSI colors
    #[must_use]
    pub const fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    /// Sets a custom filter string
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Filter directive derived from the level, e.g. `grafsync=info,grafsync_core=info`
    #[must_use]
    pub fn level_directive(&self) -> String {
        LOG_TARGETS
            .iter()
            .map(|target| format!("{target}={}", self.level))
            .collect::<Vec<_>>()
            .join(",")
    }

    fn env_filter(&self) -> TracingResult<EnvFilter> {
        match &self.filter {
            Some(custom) => EnvFilter::try_new(custom).map_err(|e| TracingError::InvalidFilter {
                filter: custom.clone(),
                reason: e.to_string(),
            }),
            None => Ok(EnvFilter::try_new(self.level_directive())
                .unwrap_or_else(|_| EnvFilter::new(self.level.to_string()))),
        }
    }
}

/// Initializes the tracing subscriber with the given configuration
///
/// This function should be called once at startup.
/// Subsequent calls will return an error.
///
/// # Errors
///
/// Returns an error if:
/// - Tracing has already been initialized
/// - The custom filter does not parse
/// - File output is configured but the file cannot be created
/// - The subscriber fails to initialize
pub fn init_tracing(config: &TracingConfig) -> TracingResult<()> {
    if TRACING_INITIALIZED.swap(true, Ordering::SeqCst) {
        return Err(TracingError::AlreadyInitialized);
    }

    let filter = config.env_filter()?;
    let layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_level(true);

    match &config.output {
        TracingOutput::Stdout => tracing_subscriber::registry()
            .with(filter)
            .with(layer.with_ansi(config.ansi).with_writer(std::io::stdout))
            .try_init(),
        TracingOutput::Stderr => tracing_subscriber::registry()
            .with(filter)
            .with(layer.with_ansi(config.ansi).with_writer(std::io::stderr))
            .try_init(),
        TracingOutput::File { path } => {
            let file = std::fs::File::create(path)
                .map_err(|e| TracingError::FileCreationFailed(e.to_string()))?;
            tracing_subscriber::registry()
                .with(filter)
                .with(layer.with_ansi(false).with_writer(file))
                .try_init()
        }
    }
    .map_err(|e| TracingError::InitializationFailed(e.to_string()))?;

    tracing::debug!(level = %config.level, "Tracing initialized");

    Ok(())
}

/// Standard span names for `grafsync` operations
pub mod span_names {
    /// One reconciliation run
    pub const IMPORT_RECONCILE: &str = "import.reconcile";
    /// One item within a reconciliation run
    pub const IMPORT_ITEM: &str = "import.item";
    /// One export run
    pub const EXPORT_EXECUTE: &str = "export.execute";
    /// Folder lookup or creation
    pub const FOLDER_RESOLVE: &str = "folder.resolve";
    /// Password patching over a set of files
    pub const CREDENTIAL_PATCH: &str = "credential.patch";
}
