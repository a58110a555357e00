//! Export command: one JSON file per datasource or dashboard.

use std::path::Path;

use grafsync_core::{Exporter, ResourceKind};

use super::Context;
use crate::cli::TargetArgs;
use crate::error::CliError;
use crate::util::{connect, create_runtime, resolve_target};

/// Export every resource of `kind` from the target into `output`
pub fn cmd_export(
    ctx: Context<'_>,
    kind: ResourceKind,
    target: TargetArgs,
    output: &Path,
) -> Result<(), CliError> {
    let target = resolve_target(target, ctx.config_path)?;
    let runtime = create_runtime()?;

    let summary = runtime.block_on(async {
        let client = connect(&target).await?;
        ctx.printer.heading(&format!(
            "Exporting {} from {} to {}",
            kind.plural(),
            target.url(),
            output.display()
        ));
        let exporter = Exporter::new(&client, output);
        let summary = match kind {
            ResourceKind::Datasource => exporter.export_datasources().await?,
            ResourceKind::Dashboard => exporter.export_dashboards().await?,
        };
        Ok::<_, CliError>(summary)
    })?;

    ctx.printer.export_items(&summary);
    ctx.printer.export_summary(&summary);

    if summary.has_failures() {
        return Err(CliError::ItemsFailed {
            what: kind.plural(),
            failed: summary.failed,
            total: summary.total,
        });
    }
    Ok(())
}
