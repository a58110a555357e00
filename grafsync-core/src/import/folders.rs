//! Folder resolution on the destination instance.

use std::collections::HashMap;

use serde_json::Value;
use tracing::Instrument;

use crate::client::{ApiResponse, GrafanaApi};
use crate::models::{FolderHint, FolderRef};
use crate::tracing::span_names;

/// Resolves source folder UIDs to destination folder IDs.
///
/// Each UID is looked up (and created if needed) at most once per resolver;
/// failures are cached too, so a folder that could not be created is not
/// attempted again in the same run.
#[derive(Debug, Default)]
pub struct FolderResolver {
    cache: HashMap<String, Option<i64>>,
    created: usize,
}

impl FolderResolver {
    /// Creates an empty resolver
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of folders created so far
    #[must_use]
    pub const fn created(&self) -> usize {
        self.created
    }

    /// Returns the cached resolution for a UID, if it was attempted
    #[must_use]
    pub fn cached(&self, uid: &str) -> Option<Option<FolderRef>> {
        self.cache.get(uid).map(|id| {
            id.map(|id| FolderRef {
                uid: uid.to_string(),
                id,
            })
        })
    }

    /// Resolves a folder, creating it when the target does not have it.
    ///
    /// Returns `None` when the folder could not be found or created; the
    /// dashboard is then imported without a folder.
    pub async fn resolve<A>(&mut self, api: &A, hint: &FolderHint) -> Option<FolderRef>
    where
        A: GrafanaApi + ?Sized,
    {
        if let Some(cached) = self.cached(&hint.uid) {
            tracing::trace!(folder_uid = %hint.uid, "Folder cache hit");
            return cached;
        }

        let span = tracing::debug_span!(span_names::FOLDER_RESOLVE, folder_uid = %hint.uid);
        let id = async {
            match lookup(api, &hint.uid).await {
                Lookup::Found(id) => id,
                Lookup::Missing => self.create(api, hint).await,
            }
        }
        .instrument(span)
        .await;

        self.cache.insert(hint.uid.clone(), id);
        id.map(|id| FolderRef {
            uid: hint.uid.clone(),
            id,
        })
    }

    async fn create<A>(&mut self, api: &A, hint: &FolderHint) -> Option<i64>
    where
        A: GrafanaApi + ?Sized,
    {
        let title = hint.title_or_default();
        match api.create_folder(&hint.uid, title).await {
            Ok(response) if response.is_success() => {
                let id = folder_id(&response);
                if id.is_some() {
                    self.created += 1;
                    tracing::info!(folder_uid = %hint.uid, title, "Created folder");
                } else {
                    tracing::warn!(folder_uid = %hint.uid, "Folder created but response has no id");
                }
                id
            }
            Ok(response) => {
                tracing::warn!(
                    folder_uid = %hint.uid,
                    status = response.status,
                    message = %response.error_message(),
                    "Failed to create folder, importing without folder"
                );
                None
            }
            Err(e) => {
                tracing::warn!(
                    folder_uid = %hint.uid,
                    error = %e,
                    "Failed to create folder, importing without folder"
                );
                None
            }
        }
    }
}

enum Lookup {
    Found(Option<i64>),
    Missing,
}

/// Any answer other than 200 means the folder has to be created
async fn lookup<A>(api: &A, uid: &str) -> Lookup
where
    A: GrafanaApi + ?Sized,
{
    match api.get_folder(uid).await {
        Ok(response) if response.status == 200 => {
            let id = folder_id(&response);
            if id.is_none() {
                tracing::warn!(folder_uid = %uid, "Folder lookup returned no id");
            }
            Lookup::Found(id)
        }
        Ok(response) => {
            tracing::debug!(folder_uid = %uid, status = response.status, "Folder not found");
            Lookup::Missing
        }
        Err(e) => {
            tracing::debug!(folder_uid = %uid, error = %e, "Folder lookup failed");
            Lookup::Missing
        }
    }
}

fn folder_id(response: &ApiResponse) -> Option<i64> {
    response
        .json()
        .ok()
        .and_then(|body| body.get("id").and_then(Value::as_i64))
}
