//! Command handler modules for the CLI.

mod completions;
mod export;
mod import;
mod manpage;
mod password;

use std::path::Path;

use grafsync_core::{ImportOptions, ResourceKind};

use crate::cli::Commands;
use crate::error::CliError;
use crate::output::Printer;

/// Settings shared by every command
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    /// Targets file override from `--config`
    pub config_path: Option<&'a Path>,
    /// Output writer
    pub printer: Printer,
}

/// Dispatch a CLI command to the appropriate handler.
pub fn dispatch(ctx: Context<'_>, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::ExportDatasources { target, output } => {
            export::cmd_export(ctx, ResourceKind::Datasource, target, &output)
        }
        Commands::ExportDashboards { target, output } => {
            export::cmd_export(ctx, ResourceKind::Dashboard, target, &output)
        }
        Commands::ImportDatasources { target, input } => import::cmd_import(
            ctx,
            ResourceKind::Datasource,
            target,
            input,
            ImportOptions::new(),
        ),
        Commands::ImportDashboards {
            target,
            input,
            overwrite,
            preserve_folders,
        } => import::cmd_import(
            ctx,
            ResourceKind::Dashboard,
            target,
            input,
            ImportOptions::new()
                .with_overwrite(overwrite)
                .with_preserve_folders(preserve_folders),
        ),
        Commands::AddPassword {
            input,
            password,
            name,
        } => password::cmd_add_password(ctx, input, password, name.as_deref()),
        Commands::Completions { shell } => completions::cmd_completions(shell),
        Commands::Manpage => manpage::cmd_manpage(),
    }
}
