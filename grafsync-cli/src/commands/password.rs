//! `add-password` command: patch exported datasource files in place.

use grafsync_core::patch_passwords;
use secrecy::SecretString;

use super::Context;
use crate::cli::InputArgs;
use crate::error::CliError;
use crate::util::load_sources;

/// Add `password` as `secureJsonData.password` to every input file, or only
/// to the datasource called `name`.
pub fn cmd_add_password(
    ctx: Context<'_>,
    input: InputArgs,
    password: String,
    name: Option<&str>,
) -> Result<(), CliError> {
    let password = SecretString::from(password);
    let sources = load_sources(input)?;

    let summary = patch_passwords(&sources, &password, name);
    for report in &summary.reports {
        ctx.printer.patch_item(report);
    }
    ctx.printer.patch_summary(&summary);

    if summary.has_failures() {
        return Err(CliError::ItemsFailed {
            what: "files",
            failed: summary.failed,
            total: summary.total,
        });
    }
    Ok(())
}
