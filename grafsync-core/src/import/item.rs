//! Parsed import items and payload normalization.

use serde_json::{Map, Value};

use super::source::SourceDocument;
use crate::config::ImportOptions;
use crate::document::{parse_document, parse_object, strip_datasource_identifiers, string_field};
use crate::error::DocumentError;
use crate::models::{DashboardDocument, FolderHint, ResourceKind};

/// Key of the folder ID in the dashboard import payload
pub const FOLDER_ID_KEY: &str = "folderId";

/// One validated source document, ready to be submitted
#[derive(Debug, Clone, PartialEq)]
pub enum ImportItem {
    /// A datasource with its source identifiers already removed
    Datasource {
        /// Datasource `name`, if present
        name: Option<String>,
        /// Body for `POST /api/datasources`
        payload: Map<String, Value>,
    },
    /// A dashboard in either document shape
    Dashboard {
        /// Dashboard `title`, if present
        title: Option<String>,
        /// The resolved document
        document: DashboardDocument,
    },
}

impl ImportItem {
    /// Parses and normalizes a source document.
    ///
    /// # Errors
    ///
    /// Returns a `DocumentError` when the bytes are not valid JSON or not
    /// the expected shape.
    pub fn parse(kind: ResourceKind, source: &SourceDocument) -> Result<Self, DocumentError> {
        match kind {
            ResourceKind::Datasource => {
                let mut payload = parse_object(source.bytes()?)?;
                strip_datasource_identifiers(&mut payload);
                let name = string_field(&payload, kind.name_field()).map(str::to_string);
                Ok(Self::Datasource { name, payload })
            }
            ResourceKind::Dashboard => {
                let document = DashboardDocument::from_value(parse_document(source.bytes()?)?)?;
                let title = document.title().filter(|t| !t.is_empty()).map(str::to_string);
                Ok(Self::Dashboard { title, document })
            }
        }
    }

    /// Resource kind of the item
    #[must_use]
    pub const fn kind(&self) -> ResourceKind {
        match self {
            Self::Datasource { .. } => ResourceKind::Datasource,
            Self::Dashboard { .. } => ResourceKind::Dashboard,
        }
    }

    /// Natural identifier (datasource name or dashboard title)
    #[must_use]
    pub fn natural_name(&self) -> Option<&str> {
        match self {
            Self::Datasource { name, .. } => name.as_deref(),
            Self::Dashboard { title, .. } => title.as_deref(),
        }
    }

    /// Name for reports, falling back to the document origin
    #[must_use]
    pub fn display_name(&self, origin: &str) -> String {
        self.natural_name().unwrap_or(origin).to_string()
    }

    /// Folder recorded on the source instance, for wrapped dashboards
    #[must_use]
    pub fn folder(&self) -> Option<FolderHint> {
        match self {
            Self::Datasource { .. } => None,
            Self::Dashboard { document, .. } => document.folder(),
        }
    }

    /// Builds the request body.
    ///
    /// Datasource payloads are submitted as-is. Dashboard payloads are
    /// `{dashboard, overwrite}` plus `folderId` when a folder was resolved.
    #[must_use]
    pub fn into_payload(self, options: ImportOptions, folder_id: Option<i64>) -> Value {
        match self {
            Self::Datasource { payload, .. } => Value::Object(payload),
            Self::Dashboard { document, .. } => {
                let mut payload = document.into_import_payload(options.overwrite);
                if let Some(id) = folder_id {
                    payload.insert(FOLDER_ID_KEY.to_string(), Value::from(id));
                }
                Value::Object(payload)
            }
        }
    }
}
