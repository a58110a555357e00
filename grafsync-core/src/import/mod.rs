//! Batch import of datasources and dashboards.
//!
//! An import run goes through three stages:
//!
//! 1. [`collect_sources`] reads the input file, or every `.json` file in a
//!    directory, into [`SourceDocument`]s.
//! 2. [`Reconciler`] parses each document into an [`ImportItem`], resolves
//!    its folder when requested, submits it and classifies the response.
//! 3. The resulting [`RunSummary`] holds one [`ItemReport`] per document and
//!    the tally that decides the exit status.
//!
//! ```ignore
//! let sources = collect_sources(&InputSource::Directory(dir))?;
//! let reconciler = Reconciler::new(&client, ResourceKind::Dashboard, options);
//! let summary = reconciler.reconcile(&sources).await;
//! if summary.has_failures() { /* exit non-zero */ }
//! ```

mod folders;
mod item;
mod outcome;
mod reconcile;
mod source;

pub use folders::FolderResolver;
pub use item::{FOLDER_ID_KEY, ImportItem};
pub use outcome::{ImportOutcome, ItemReport, RunSummary};
pub use reconcile::Reconciler;
pub use source::{InputSource, SourceDocument, collect_sources, list_json_files};
