//! Per-item outcomes and the run summary.

use std::fmt;

use serde_json::Value;

use crate::client::ApiResponse;
use crate::document::error_message_from_body;
use crate::models::ResourceKind;

/// `status` value Grafana reports for a 412 caused by a plugin-owned dashboard
const PLUGIN_DASHBOARD_STATUS: &str = "plugin-dashboard";

/// Result of submitting one item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// The target accepted the item
    Created {
        /// HTTP status code
        status: u16,
    },
    /// The target already holds an item with the same identity
    AlreadyExists {
        /// HTTP status code
        status: u16,
        /// Conflict reason reported by the target
        reason: String,
    },
    /// The item was not imported
    Failed {
        /// HTTP status code, `None` when no response was received
        status: Option<u16>,
        /// Error message
        message: String,
    },
}

impl ImportOutcome {
    /// Creates a failure that never reached the target
    #[must_use]
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            status: None,
            message: message.into(),
        }
    }

    /// Classifies an HTTP response for the given resource kind.
    ///
    /// | Status | Datasource | Dashboard |
    /// |---|---|---|
    /// | 200 | Created | Created |
    /// | 201 | Created | Failed |
    /// | 409 | AlreadyExists | Failed |
    /// | 412 | Failed | AlreadyExists, unless the dashboard is plugin-owned |
    #[must_use]
    pub fn classify(kind: ResourceKind, response: &ApiResponse) -> Self {
        let status = response.status;
        match (kind, status) {
            (_, 200) | (ResourceKind::Datasource, 201) => Self::Created { status },
            (ResourceKind::Datasource, 409) => Self::AlreadyExists {
                status,
                reason: response.error_message(),
            },
            (ResourceKind::Dashboard, 412) => classify_precondition_failed(&response.body),
            _ => Self::Failed {
                status: Some(status),
                message: response.error_message(),
            },
        }
    }

    /// Short label used in logs and console output
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Created { .. } => "created",
            Self::AlreadyExists { .. } => "already exists",
            Self::Failed { .. } => "failed",
        }
    }

    /// Returns true for failures
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// HTTP status, if a response was received
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Created { status } | Self::AlreadyExists { status, .. } => Some(*status),
            Self::Failed { status, .. } => *status,
        }
    }
}

fn classify_precondition_failed(body: &str) -> ImportOutcome {
    let conflict = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.get("status").and_then(Value::as_str).map(str::to_string));
    let message = error_message_from_body(body);

    if conflict.as_deref() == Some(PLUGIN_DASHBOARD_STATUS) {
        return ImportOutcome::Failed {
            status: Some(412),
            message,
        };
    }

    let reason = match conflict {
        Some(conflict) => format!("{conflict}: {message}"),
        None => message,
    };
    ImportOutcome::AlreadyExists {
        status: 412,
        reason,
    }
}

impl fmt::Display for ImportOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created { status } => write!(f, "created (HTTP {status})"),
            Self::AlreadyExists { status, reason } => {
                write!(f, "already exists (HTTP {status}): {reason}")
            }
            Self::Failed {
                status: Some(status),
                message,
            } => write!(f, "failed (HTTP {status}): {message}"),
            Self::Failed {
                status: None,
                message,
            } => write!(f, "failed: {message}"),
        }
    }
}

/// Outcome of one item, as reported to the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemReport {
    /// Where the document came from
    pub origin: String,
    /// Display name of the item
    pub name: String,
    /// What happened
    pub outcome: ImportOutcome,
}

/// Tally of one reconciliation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Resource kind that was imported
    pub kind: ResourceKind,
    /// Items processed
    pub total: usize,
    /// Items created
    pub succeeded: usize,
    /// Items that already existed
    pub duplicates: usize,
    /// Items that failed
    pub failed: usize,
    /// Folders created on the target (dashboards only)
    pub folders_created: usize,
    /// One report per item, in input order
    pub reports: Vec<ItemReport>,
}

impl RunSummary {
    /// Creates an empty summary
    #[must_use]
    pub const fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            total: 0,
            succeeded: 0,
            duplicates: 0,
            failed: 0,
            folders_created: 0,
            reports: Vec::new(),
        }
    }

    /// Adds one item's report to the tally
    pub fn record(&mut self, report: ItemReport) {
        self.total += 1;
        match report.outcome {
            ImportOutcome::Created { .. } => self.succeeded += 1,
            ImportOutcome::AlreadyExists { .. } => self.duplicates += 1,
            ImportOutcome::Failed { .. } => self.failed += 1,
        }
        self.reports.push(report);
    }

    /// Returns true if any item failed
    #[must_use]
    pub const fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// Returns a one-line summary
    #[must_use]
    pub fn summary_string(&self) -> String {
        let mut line = format!(
            "Total: {}, Created: {}, Already existed: {}, Failed: {}",
            self.total, self.succeeded, self.duplicates, self.failed
        );
        if self.kind == ResourceKind::Dashboard {
            line.push_str(&format!(", Folders created: {}", self.folders_created));
        }
        line
    }
}
