//! Input discovery: one file, or every `.json` file in a directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{DocumentError, SourceError};

/// Where source documents come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// A single file, used regardless of its extension
    File(PathBuf),
    /// Every `*.json` file directly inside a directory (non-recursive)
    Directory(PathBuf),
}

impl InputSource {
    /// The path this source points at
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::File(path) | Self::Directory(path) => path,
        }
    }
}

/// A raw source document, not yet parsed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// Label used in reports, usually the file name
    pub origin: String,
    /// File the document was read from, if any
    pub path: Option<PathBuf>,
    /// Raw bytes, or the reason the file could not be read
    pub contents: Result<Vec<u8>, String>,
}

impl SourceDocument {
    /// Creates an in-memory document
    #[must_use]
    pub fn new(origin: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            origin: origin.into(),
            path: None,
            contents: Ok(contents.into()),
        }
    }

    /// Reads a document from disk.
    ///
    /// A read failure is kept on the document so it is reported with the
    /// item instead of aborting the batch.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        let contents = fs::read(path).map_err(|e| {
            tracing::warn!(path = %path.display(), error = %e, "Cannot read input file");
            e.to_string()
        });

        Self {
            origin: origin_label(path),
            path: Some(path.to_path_buf()),
            contents,
        }
    }

    /// The raw bytes of the document.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Unreadable` when the file could not be read.
    pub fn bytes(&self) -> Result<&[u8], DocumentError> {
        self.contents
            .as_deref()
            .map_err(|e| DocumentError::Unreadable(e.clone()))
    }
}

fn origin_label(path: &Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}

fn has_json_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

/// Lists the `.json` files directly inside a directory, sorted by file name.
///
/// # Errors
///
/// Returns `SourceError::NotFound` for a missing directory and
/// `SourceError::Read` if the directory cannot be listed.
pub fn list_json_files(dir: &Path) -> Result<Vec<PathBuf>, SourceError> {
    if !dir.exists() {
        return Err(SourceError::NotFound(dir.to_path_buf()));
    }

    let read_err = |source| SourceError::Read {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let path = entry.map_err(read_err)?.path();
        if path.is_file() && has_json_extension(&path) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Reads every document an input source refers to, in processing order.
///
/// Files that cannot be read are still returned; see
/// [`SourceDocument::bytes`].
///
/// # Errors
///
/// Returns `SourceError::NotFound` when the path does not exist,
/// `SourceError::Empty` when a directory holds no `.json` files and
/// `SourceError::Read` when the directory cannot be listed.
pub fn collect_sources(source: &InputSource) -> Result<Vec<SourceDocument>, SourceError> {
    match source {
        InputSource::File(path) => {
            if !path.is_file() {
                return Err(SourceError::NotFound(path.clone()));
            }
            Ok(vec![SourceDocument::load(path)])
        }
        InputSource::Directory(dir) => {
            let files = list_json_files(dir)?;
            if files.is_empty() {
                return Err(SourceError::Empty(dir.clone()));
            }

            tracing::debug!(dir = %dir.display(), count = files.len(), "Collected input files");
            Ok(files.iter().map(|path| SourceDocument::load(path)).collect())
        }
    }
}
