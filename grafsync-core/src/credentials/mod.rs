//! Patching datasource passwords into exported JSON files.
//!
//! Grafana never returns `secureJsonData` when exporting, so exported
//! datasources must have their password added back before import. The
//! password is written through `serde_json` and is never logged.

use std::fs;

use secrecy::{ExposeSecret, SecretString};
use serde_json::{Map, Value};

use crate::document::{parse_object, render_validated, set_secure_password, string_field};
use crate::error::DocumentError;
use crate::import::SourceDocument;
use crate::tracing::span_names;

/// Sets `secureJsonData.password` on a datasource document.
///
/// `secureJsonData` is created when absent; its other keys are kept.
///
/// # Errors
///
/// Returns `DocumentError::NotAnObject` for non-object documents and
/// `DocumentError::UnexpectedFieldType` when `secureJsonData` is not an
/// object.
pub fn add_password(document: Value, password: &str) -> Result<Value, DocumentError> {
    let Value::Object(mut object) = document else {
        return Err(DocumentError::NotAnObject);
    };
    set_secure_password(&mut object, password)?;
    Ok(Value::Object(object))
}

/// What happened to one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    /// The password was written
    Patched,
    /// The file was left untouched on purpose
    Skipped {
        /// Why it was skipped
        reason: String,
    },
    /// The file could not be patched and was left untouched
    Failed {
        /// Error message
        message: String,
    },
}

/// Outcome for one source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchReport {
    /// Where the document came from
    pub origin: String,
    /// Datasource name, when the document has one
    pub name: Option<String>,
    /// What happened
    pub outcome: PatchOutcome,
}

/// Tally of a patch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchSummary {
    /// Files processed
    pub total: usize,
    /// Files rewritten
    pub patched: usize,
    /// Files skipped by the name filter
    pub skipped: usize,
    /// Files that failed
    pub failed: usize,
    /// One report per file, in input order
    pub reports: Vec<PatchReport>,
}

impl PatchSummary {
    /// Adds one file's report to the tally
    pub fn record(&mut self, report: PatchReport) {
        self.total += 1;
        match report.outcome {
            PatchOutcome::Patched => self.patched += 1,
            PatchOutcome::Skipped { .. } => self.skipped += 1,
            PatchOutcome::Failed { .. } => self.failed += 1,
        }
        self.reports.push(report);
    }

    /// Returns true if any file failed
    #[must_use]
    pub const fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// Returns a one-line summary
    #[must_use]
    pub fn summary_string(&self) -> String {
        format!(
            "Total: {}, Patched: {}, Skipped: {}, Failed: {}",
            self.total, self.patched, self.skipped, self.failed
        )
    }
}

/// Adds the password to every source document and rewrites the files.
///
/// With `name_filter`, only datasources whose `name` matches exactly are
/// patched. Files are rewritten pretty-printed; files that fail are not
/// modified.
pub fn patch_passwords(
    sources: &[SourceDocument],
    password: &SecretString,
    name_filter: Option<&str>,
) -> PatchSummary {
    let span = tracing::info_span!(
        span_names::CREDENTIAL_PATCH,
        files = sources.len(),
        filter = ?name_filter,
    );
    let _guard = span.enter();

    let mut summary = PatchSummary::default();
    for source in sources {
        let report = patch_one(source, password, name_filter);
        match &report.outcome {
            PatchOutcome::Patched => tracing::info!(origin = %report.origin, "Password added"),
            PatchOutcome::Skipped { reason } => {
                tracing::debug!(origin = %report.origin, reason = %reason, "Skipped");
            }
            PatchOutcome::Failed { message } => {
                tracing::warn!(origin = %report.origin, error = %message, "Patch failed");
            }
        }
        summary.record(report);
    }
    summary
}

fn patch_one(
    source: &SourceDocument,
    password: &SecretString,
    name_filter: Option<&str>,
) -> PatchReport {
    let mut report = PatchReport {
        origin: source.origin.clone(),
        name: None,
        outcome: PatchOutcome::Patched,
    };

    let mut object: Map<String, Value> = match source.bytes().and_then(parse_object) {
        Ok(object) => object,
        Err(e) => {
            report.outcome = PatchOutcome::Failed {
                message: e.to_string(),
            };
            return report;
        }
    };
    report.name = string_field(&object, "name").map(str::to_string);

    if let Some(wanted) = name_filter
        && report.name.as_deref() != Some(wanted)
    {
        report.outcome = PatchOutcome::Skipped {
            reason: format!("name does not match '{wanted}'"),
        };
        return report;
    }

    if let Err(message) = write_patched(source, &mut object, password) {
        report.outcome = PatchOutcome::Failed { message };
    }
    report
}

fn write_patched(
    source: &SourceDocument,
    object: &mut Map<String, Value>,
    password: &SecretString,
) -> Result<(), String> {
    let Some(path) = source.path.as_deref() else {
        return Err("document has no file to write".to_string());
    };

    set_secure_password(object, password.expose_secret()).map_err(|e| e.to_string())?;
    let text =
        render_validated(&Value::Object(std::mem::take(object))).map_err(|e| e.to_string())?;

    fs::write(path, text).map_err(|e| format!("failed to write {}: {e}", path.display()))
}
