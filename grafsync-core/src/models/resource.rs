//! Grafana resource kinds handled by `grafsync`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of Grafana object being imported or exported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// A datasource (`/api/datasources`)
    Datasource,
    /// A dashboard (`/api/dashboards`)
    Dashboard,
}

impl ResourceKind {
    /// Prefix used for exported file names
    #[must_use]
    pub const fn file_prefix(self) -> &'static str {
        match self {
            Self::Datasource => "datasource",
            Self::Dashboard => "dashboard",
        }
    }

    /// Field holding the natural identifier of the object
    #[must_use]
    pub const fn name_field(self) -> &'static str {
        match self {
            Self::Datasource => "name",
            Self::Dashboard => "title",
        }
    }

    /// Human-readable plural, for summaries
    #[must_use]
    pub const fn plural(self) -> &'static str {
        match self {
            Self::Datasource => "datasources",
            Self::Dashboard => "dashboards",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_prefix())
    }
}
