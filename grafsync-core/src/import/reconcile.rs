//! The batch import reconciler.

use tracing::Instrument;

use super::folders::FolderResolver;
use super::item::ImportItem;
use super::outcome::{ImportOutcome, ItemReport, RunSummary};
use super::source::SourceDocument;
use crate::client::GrafanaApi;
use crate::config::ImportOptions;
use crate::models::ResourceKind;
use crate::tracing::span_names;

/// Imports a batch of documents of one kind into a target instance.
///
/// Items are processed strictly in order, one request at a time. A failing
/// item is recorded and the batch continues; nothing is retried.
pub struct Reconciler<'a, A: GrafanaApi + ?Sized> {
    api: &'a A,
    kind: ResourceKind,
    options: ImportOptions,
}

impl<'a, A: GrafanaApi + ?Sized> Reconciler<'a, A> {
    /// Creates a reconciler for one resource kind
    #[must_use]
    pub const fn new(api: &'a A, kind: ResourceKind, options: ImportOptions) -> Self {
        Self { api, kind, options }
    }

    /// Imports every document and returns the tally
    pub async fn reconcile(&self, sources: &[SourceDocument]) -> RunSummary {
        self.reconcile_with(sources, |_| {}).await
    }

    /// Imports every document, calling `on_item` after each one
    pub async fn reconcile_with<F>(&self, sources: &[SourceDocument], mut on_item: F) -> RunSummary
    where
        F: FnMut(&ItemReport),
    {
        let span = tracing::info_span!(
            span_names::IMPORT_RECONCILE,
            kind = %self.kind,
            items = sources.len(),
            overwrite = self.options.overwrite,
            preserve_folders = self.options.preserve_folders,
        );

        async {
            let mut summary = RunSummary::new(self.kind);
            let mut folders = FolderResolver::new();

            for source in sources {
                let report = self
                    .import_one(source, &mut folders)
                    .instrument(tracing::debug_span!(span_names::IMPORT_ITEM, origin = %source.origin))
                    .await;
                on_item(&report);
                summary.record(report);
            }

            summary.folders_created = folders.created();
            tracing::info!(
                total = summary.total,
                succeeded = summary.succeeded,
                duplicates = summary.duplicates,
                failed = summary.failed,
                folders_created = summary.folders_created,
                "Import finished"
            );
            summary
        }
        .instrument(span)
        .await
    }

    async fn import_one(&self, source: &SourceDocument, folders: &mut FolderResolver) -> ItemReport {
        let item = match ImportItem::parse(self.kind, source) {
            Ok(item) => item,
            Err(e) => {
                tracing::warn!(origin = %source.origin, error = %e, "Skipping invalid document");
                return ItemReport {
                    origin: source.origin.clone(),
                    name: source.origin.clone(),
                    outcome: ImportOutcome::failed(e.to_string()),
                };
            }
        };

        let name = item.display_name(&source.origin);

        let folder_id = match item.folder() {
            Some(hint) if self.options.preserve_folders => folders
                .resolve(self.api, &hint)
                .await
                .map(|folder| folder.id),
            _ => None,
        };

        let payload = item.into_payload(self.options, folder_id);
        let response = match self.kind {
            ResourceKind::Datasource => self.api.create_datasource(&payload).await,
            ResourceKind::Dashboard => self.api.import_dashboard(&payload).await,
        };

        let outcome = match response {
            Ok(response) => ImportOutcome::classify(self.kind, &response),
            Err(e) => ImportOutcome::failed(e.to_string()),
        };

        match &outcome {
            ImportOutcome::Created { status } => {
                tracing::info!(name = %name, status, "Imported");
            }
            ImportOutcome::AlreadyExists { status, reason } => {
                tracing::info!(name = %name, status, reason = %reason, "Already exists");
            }
            ImportOutcome::Failed { status, message } => {
                tracing::warn!(name = %name, status = ?status, error = %message, "Import failed");
            }
        }

        ItemReport {
            origin: source.origin.clone(),
            name,
            outcome,
        }
    }
}
