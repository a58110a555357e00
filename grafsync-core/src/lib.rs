//! `grafsync` Core Library
//!
//! This crate provides the core functionality for `grafsync`, a tool that moves
//! Grafana datasources and dashboards between instances through the HTTP API.
//!
//! # Crate Structure
//!
//! - [`config`] - Target resolution (flags, environment, profile file) and import options
//! - [`client`] - The [`client::GrafanaApi`] seam and its `reqwest` implementation
//! - [`document`] - JSON field editing (identifier stripping, password patching, file names)
//! - [`models`] - Resource kinds, dashboard document shapes, folder references
//! - [`import`] - Source discovery and the batch import reconciler
//! - [`export`] - Datasource and dashboard export to JSON files
//! - [`credentials`] - Patching `secureJsonData.password` into exported datasources
//! - [`tracing`] - Structured logging setup

#![warn(missing_docs)]

pub mod client;
pub mod config;
pub mod credentials;
pub mod document;
pub mod error;
pub mod export;
pub mod import;
pub mod models;
pub mod tracing;

pub use client::{ApiResponse, GrafanaApi, HttpClient, check_connection};
pub use config::{ImportOptions, TargetConfig, TargetSettings, TargetsFile};
pub use credentials::{PatchOutcome, PatchReport, PatchSummary, add_password, patch_passwords};
pub use error::{
    ApiError, ApiResult, ConfigError, ConfigResult, ConnectivityError, DocumentError,
    ExportError, SourceError,
};
pub use export::{ExportSummary, Exporter};
pub use import::{
    FolderResolver, ImportItem, ImportOutcome, InputSource, ItemReport, Reconciler, RunSummary,
    SourceDocument, collect_sources,
};
pub use models::{DashboardDocument, DashboardMeta, FolderHint, FolderRef, ResourceKind};
