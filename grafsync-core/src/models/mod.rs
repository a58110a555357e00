//! Core data types shared by import, export and credential patching.

mod dashboard;
mod resource;

pub use dashboard::{DashboardDocument, DashboardMeta, FolderHint, FolderRef};
pub use resource::ResourceKind;
