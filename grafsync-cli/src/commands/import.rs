//! Import commands for datasources and dashboards.

use grafsync_core::{ImportOptions, Reconciler, ResourceKind};

use super::Context;
use crate::cli::{InputArgs, TargetArgs};
use crate::error::CliError;
use crate::util::{connect, create_runtime, load_sources, resolve_target};

/// Import every input document of `kind` into the target.
///
/// Credentials and inputs are validated before any request is made, and the
/// target is checked before the first item is sent.
pub fn cmd_import(
    ctx: Context<'_>,
    kind: ResourceKind,
    target: TargetArgs,
    input: InputArgs,
    options: ImportOptions,
) -> Result<(), CliError> {
    let target = resolve_target(target, ctx.config_path)?;
    let sources = load_sources(input)?;
    let runtime = create_runtime()?;

    let summary = runtime.block_on(async {
        let client = connect(&target).await?;
        ctx.printer.heading(&format!(
            "Importing {} {} into {}",
            sources.len(),
            kind.plural(),
            target.url()
        ));
        let summary = Reconciler::new(&client, kind, options)
            .reconcile_with(&sources, |report| ctx.printer.import_item(report))
            .await;
        Ok::<_, CliError>(summary)
    })?;

    ctx.printer.import_summary(&summary);

    if summary.has_failures() {
        return Err(CliError::ItemsFailed {
            what: kind.plural(),
            failed: summary.failed,
            total: summary.total,
        });
    }
    Ok(())
}
