//! Dashboard document shapes and folder references.
//!
//! A dashboard file comes in one of two shapes. Files written by the
//! exporter (or by `GET /api/dashboards/uid/{uid}`) wrap the dashboard under a
//! `dashboard` key next to a `meta` object that records the folder. Files
//! saved from the Grafana UI ("Export > Save to file") hold the dashboard
//! fields at the top level. The shape is decided once, in
//! [`DashboardDocument::from_value`].

use serde_json::{Map, Value};

use crate::error::DocumentError;

/// Key under which wrapped documents carry the dashboard object
pub const DASHBOARD_KEY: &str = "dashboard";

/// Key under which wrapped documents carry dashboard metadata
pub const META_KEY: &str = "meta";

/// Title used when creating a folder whose source title was not recorded
pub const DEFAULT_FOLDER_TITLE: &str = "Imported Folder";

/// A dashboard source document, resolved to one of its two shapes
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardDocument {
    /// Dashboard fields at the top level, no metadata
    Raw(Map<String, Value>),
    /// Dashboard nested under `dashboard`, with `meta` alongside
    Wrapped {
        /// The dashboard object
        dashboard: Map<String, Value>,
        /// Folder metadata extracted from `meta`
        meta: DashboardMeta,
    },
}

impl DashboardDocument {
    /// Resolves the shape of a parsed JSON document.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::NotAnObject` for non-object documents and
    /// `DocumentError::InvalidDashboard` when `dashboard` is present but not
    /// an object.
    pub fn from_value(value: Value) -> Result<Self, DocumentError> {
        match value {
            Value::Object(object) => Self::from_object(object),
            _ => Err(DocumentError::NotAnObject),
        }
    }

    /// Resolves the shape of a JSON object.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::InvalidDashboard` when `dashboard` is present
    /// but not an object.
    pub fn from_object(mut object: Map<String, Value>) -> Result<Self, DocumentError> {
        match object.remove(DASHBOARD_KEY) {
            Some(Value::Object(dashboard)) => Ok(Self::Wrapped {
                dashboard,
                meta: DashboardMeta::from_value(object.get(META_KEY)),
            }),
            Some(_) => Err(DocumentError::InvalidDashboard),
            None => Ok(Self::Raw(object)),
        }
    }

    /// Returns the dashboard fields regardless of shape
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        match self {
            Self::Raw(fields) => fields,
            Self::Wrapped { dashboard, .. } => dashboard,
        }
    }

    /// Returns true for the exported (wrapped) shape
    #[must_use]
    pub const fn is_wrapped(&self) -> bool {
        matches!(self, Self::Wrapped { .. })
    }

    /// Dashboard title, if present
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.fields().get("title").and_then(Value::as_str)
    }

    /// Dashboard UID, if present
    #[must_use]
    pub fn uid(&self) -> Option<&str> {
        self.fields().get("uid").and_then(Value::as_str)
    }

    /// Folder the dashboard lived in on the source instance.
    ///
    /// Raw documents carry no metadata and never have a folder.
    #[must_use]
    pub fn folder(&self) -> Option<FolderHint> {
        match self {
            Self::Raw(_) => None,
            Self::Wrapped { meta, .. } => meta.folder(),
        }
    }

    /// Builds the `POST /api/dashboards/db` payload.
    ///
    /// The instance-specific numeric `id` is dropped; `uid` is kept so the
    /// dashboard keeps its identity on the destination.
    #[must_use]
    pub fn into_import_payload(self, overwrite: bool) -> Map<String, Value> {
        let mut dashboard = match self {
            Self::Raw(fields) => fields,
            Self::Wrapped { dashboard, .. } => dashboard,
        };
        dashboard.remove("id");

        let mut payload = Map::new();
        payload.insert(DASHBOARD_KEY.to_string(), Value::Object(dashboard));
        payload.insert("overwrite".to_string(), Value::Bool(overwrite));
        payload
    }
}

/// Folder metadata recorded in a wrapped dashboard's `meta` object
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardMeta {
    /// `meta.folderUid`; `None` when absent, null or empty (the General folder)
    pub folder_uid: Option<String>,
    /// `meta.folderTitle`
    pub folder_title: Option<String>,
}

impl DashboardMeta {
    /// Extracts folder metadata from an optional `meta` value
    #[must_use]
    pub fn from_value(meta: Option<&Value>) -> Self {
        let Some(meta) = meta.and_then(Value::as_object) else {
            return Self::default();
        };

        Self {
            folder_uid: non_empty_string(meta.get("folderUid")),
            folder_title: non_empty_string(meta.get("folderTitle")),
        }
    }

    /// Returns the folder reference when a folder UID was recorded
    #[must_use]
    pub fn folder(&self) -> Option<FolderHint> {
        self.folder_uid.as_ref().map(|uid| FolderHint {
            uid: uid.clone(),
            title: self.folder_title.clone(),
        })
    }
}

fn non_empty_string(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// A folder as recorded on the source instance
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FolderHint {
    /// Folder UID, kept identical on the destination
    pub uid: String,
    /// Folder title, if it was recorded
    pub title: Option<String>,
}

impl FolderHint {
    /// Creates a folder hint
    #[must_use]
    pub fn new(uid: impl Into<String>, title: Option<String>) -> Self {
        Self {
            uid: uid.into(),
            title,
        }
    }

    /// Title to create the folder with
    #[must_use]
    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or(DEFAULT_FOLDER_TITLE)
    }
}

/// A folder resolved on the destination instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderRef {
    /// Folder UID
    pub uid: String,
    /// Numeric folder ID used in the dashboard import payload
    pub id: i64,
}
