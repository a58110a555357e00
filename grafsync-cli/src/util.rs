//! Shared utility functions used across command modules.

use std::path::Path;

use grafsync_core::tracing::{TracingConfig, TracingLevel};
use grafsync_core::{
    HttpClient, InputSource, SourceDocument, TargetConfig, TargetSettings, check_connection,
    collect_sources,
};
use secrecy::SecretString;

use crate::cli::{InputArgs, TargetArgs};
use crate::error::CliError;

/// Resolves target flags into a validated target, falling back on the named
/// profile in the targets file.
pub fn resolve_target(
    target: TargetArgs,
    config_path: Option<&Path>,
) -> Result<TargetConfig, CliError> {
    let settings = TargetSettings {
        url: target.url.filter(|u| !u.trim().is_empty()),
        token: target
            .token
            .filter(|t| !t.is_empty())
            .map(SecretString::from),
        profile: target.profile,
        targets_path: config_path.map(Path::to_path_buf),
    };
    Ok(settings.resolve()?)
}

/// Turns the `--dir` / `--file` pair into an input source
pub fn input_source(input: InputArgs) -> Result<InputSource, CliError> {
    match (input.dir, input.file) {
        (Some(dir), None) => Ok(InputSource::Directory(dir)),
        (None, Some(file)) => Ok(InputSource::File(file)),
        // clap enforces exactly one of the two
        _ => Err(CliError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "exactly one of --dir or --file is required",
        ))),
    }
}

/// Reads every input document up front
pub fn load_sources(input: InputArgs) -> Result<Vec<SourceDocument>, CliError> {
    let source = input_source(input)?;
    Ok(collect_sources(&source)?)
}

/// Builds the logging setup from the verbosity flags and `RUST_LOG`.
///
/// `RUST_LOG` replaces the level filter, except under `--quiet`, which
/// always limits logs to errors.
pub fn tracing_config(verbose: u8, quiet: bool, rust_log: Option<String>) -> TracingConfig {
    let config = TracingConfig::new().with_level(TracingLevel::from_verbosity(verbose, quiet));
    match rust_log.filter(|f| !f.trim().is_empty()) {
        Some(filter) if !quiet => config.with_filter(filter),
        _ => config,
    }
}

/// Creates the single-threaded runtime every command runs on.
///
/// Requests are issued strictly one at a time, so a current-thread runtime
/// is enough.
pub fn create_runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::Runtime(format!("Failed to create runtime: {e}")))
}

/// Builds the HTTP client and verifies the target before any item is sent
pub async fn connect(target: &TargetConfig) -> Result<HttpClient, CliError> {
    let client = HttpClient::new(target)?;
    check_connection(&client).await?;
    tracing::info!(url = %target.url(), "Connected");
    Ok(client)
}
