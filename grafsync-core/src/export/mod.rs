//! Export of datasources and dashboards to JSON files.
//!
//! One file is written per resource, named
//! `<kind>_<id-or-uid>_<sanitized name>.json`. Dashboards are written in the
//! wrapped `{dashboard, meta}` shape returned by the API so a later
//! folder-preserving import can recreate their folders.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::Instrument;

use crate::client::{ApiResponse, GrafanaApi, paths};
use crate::document::{export_file_name, render_validated};
use crate::error::{ApiError, ExportError};
use crate::models::ResourceKind;
use crate::tracing::span_names;

/// Result of an export run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Resource kind exported
    pub kind: ResourceKind,
    /// Resources listed on the source instance
    pub total: usize,
    /// Resources written to disk
    pub exported: usize,
    /// Resources that could not be fetched or written
    pub failed: usize,
    /// Files written, in listing order
    pub files: Vec<PathBuf>,
    /// One message per failed resource
    pub errors: Vec<String>,
}

impl ExportSummary {
    /// Creates an empty summary
    #[must_use]
    pub const fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            total: 0,
            exported: 0,
            failed: 0,
            files: Vec::new(),
            errors: Vec::new(),
        }
    }

    fn record_file(&mut self, path: PathBuf) {
        self.exported += 1;
        self.files.push(path);
    }

    fn record_error(&mut self, message: String) {
        self.failed += 1;
        self.errors.push(message);
    }

    /// Returns true if any resource failed to export
    #[must_use]
    pub const fn has_failures(&self) -> bool {
        self.failed > 0
    }

    /// Returns a one-line summary
    #[must_use]
    pub fn summary_string(&self) -> String {
        format!(
            "Total: {}, Exported: {}, Failed: {}",
            self.total, self.exported, self.failed
        )
    }
}

/// A resource found while listing the source instance
struct Listed {
    /// `id` for datasources, `uid` for dashboards
    key: String,
    /// `name` or `title`
    name: String,
}

/// Writes resources from a source instance into a directory
pub struct Exporter<'a, A: GrafanaApi + ?Sized> {
    api: &'a A,
    output_dir: PathBuf,
}

impl<'a, A: GrafanaApi + ?Sized> Exporter<'a, A> {
    /// Creates an exporter writing into `output_dir`
    #[must_use]
    pub fn new(api: &'a A, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            api,
            output_dir: output_dir.into(),
        }
    }

    /// Output directory
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Exports every datasource.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::OutputDir` if the directory cannot be created
    /// and `ExportError::List` if the datasource list cannot be fetched.
    /// Failures on individual datasources are recorded in the summary.
    pub async fn export_datasources(&self) -> Result<ExportSummary, ExportError> {
        self.export(ResourceKind::Datasource).await
    }

    /// Exports every dashboard.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::OutputDir` if the directory cannot be created
    /// and `ExportError::List` if the dashboard search fails.
    /// Failures on individual dashboards are recorded in the summary.
    pub async fn export_dashboards(&self) -> Result<ExportSummary, ExportError> {
        self.export(ResourceKind::Dashboard).await
    }

    async fn export(&self, kind: ResourceKind) -> Result<ExportSummary, ExportError> {
        let span = tracing::info_span!(
            span_names::EXPORT_EXECUTE,
            kind = %kind,
            output_dir = %self.output_dir.display(),
        );

        async {
            fs::create_dir_all(&self.output_dir).map_err(|source| ExportError::OutputDir {
                path: self.output_dir.clone(),
                source,
            })?;

            let listed = self.list(kind).await.map_err(|source| ExportError::List {
                kind: kind.to_string(),
                source,
            })?;

            let mut summary = ExportSummary::new(kind);
            summary.total = listed.len();

            for resource in listed {
                let resource = match resource {
                    Ok(resource) => resource,
                    Err(message) => {
                        tracing::warn!(error = %message, "Skipping list entry");
                        summary.record_error(message);
                        continue;
                    }
                };
                match self.export_one(kind, &resource).await {
                    Ok(path) => {
                        tracing::debug!(name = %resource.name, path = %path.display(), "Exported");
                        summary.record_file(path);
                    }
                    Err(message) => {
                        tracing::warn!(name = %resource.name, error = %message, "Export failed");
                        summary.record_error(format!("{}: {message}", resource.name));
                    }
                }
            }

            tracing::info!(
                total = summary.total,
                exported = summary.exported,
                failed = summary.failed,
                "Export finished"
            );
            Ok(summary)
        }
        .instrument(span)
        .await
    }

    /// Lists every resource of `kind`. Entries without a usable key are
    /// returned as errors so they count against the export.
    async fn list(&self, kind: ResourceKind) -> Result<Vec<Result<Listed, String>>, ApiError> {
        let entries = match kind {
            ResourceKind::Datasource => json_array(kind, self.api.list_datasources().await?)?,
            ResourceKind::Dashboard => self.search_all_dashboards().await?,
        };
        let key_field = match kind {
            ResourceKind::Datasource => "id",
            ResourceKind::Dashboard => "uid",
        };

        Ok(entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let name = entry
                    .get(kind.name_field())
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                match entry.get(key_field).and_then(scalar_string) {
                    Some(key) => Ok(Listed { key, name }),
                    None if name.is_empty() => {
                        Err(format!("entry #{}: missing '{key_field}'", index + 1))
                    }
                    None => Err(format!("{name}: missing '{key_field}'")),
                }
            })
            .collect())
    }

    /// Walks the paged dashboard search until a short page comes back
    async fn search_all_dashboards(&self) -> Result<Vec<Value>, ApiError> {
        let mut entries = Vec::new();
        for page in 1.. {
            let batch = json_array(
                ResourceKind::Dashboard,
                self.api.search_dashboards(page).await?,
            )?;
            let last = batch.len() < paths::SEARCH_PAGE_LIMIT;
            entries.extend(batch);
            if last {
                break;
            }
        }
        Ok(entries)
    }

    async fn export_one(&self, kind: ResourceKind, resource: &Listed) -> Result<PathBuf, String> {
        let response = match kind {
            ResourceKind::Datasource => self.api.get_datasource(&resource.key).await,
            ResourceKind::Dashboard => self.api.get_dashboard(&resource.key).await,
        }
        .map_err(|e| e.to_string())?;

        let document = response.into_json().map_err(|e| e.to_string())?;
        let text = render_validated(&document).map_err(|e| e.to_string())?;

        let path = self
            .output_dir
            .join(export_file_name(kind, &resource.key, &resource.name));
        fs::write(&path, text).map_err(|e| format!("failed to write {}: {e}", path.display()))?;
        Ok(path)
    }
}

fn json_array(kind: ResourceKind, response: ApiResponse) -> Result<Vec<Value>, ApiError> {
    match response.into_json()? {
        Value::Array(entries) => Ok(entries),
        _ => Err(ApiError::InvalidResponse(format!(
            "expected a JSON array of {}",
            kind.plural()
        ))),
    }
}

/// Renders a string or number identifier
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
