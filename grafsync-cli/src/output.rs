//! Terminal output for per-item lines and run summaries.
//!
//! Item lines go to stdout. With `--quiet` only failed items are printed,
//! and those go to stderr.

use std::path::Path;

use grafsync_core::{
    ExportSummary, ImportOutcome, ItemReport, PatchOutcome, PatchReport, PatchSummary, RunSummary,
};

const GREEN: &str = "\x1b[32m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Writes item lines and summaries, honoring `--quiet` and `--no-color`
#[derive(Debug, Clone, Copy)]
pub struct Printer {
    color: bool,
    quiet: bool,
}

impl Printer {
    /// Creates a printer
    pub const fn new(color: bool, quiet: bool) -> Self {
        Self { color, quiet }
    }

    fn paint(self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn emit(self, line: &str, failed: bool) {
        if !self.quiet {
            println!("{line}");
        } else if failed {
            eprintln!("{line}");
        }
    }

    /// Prints a heading such as "Importing 3 datasources into ..."
    pub fn heading(self, text: &str) {
        if !self.quiet {
            println!("{}", self.paint(BOLD, text));
        }
    }

    /// Formats one import result
    pub fn import_line(self, report: &ItemReport) -> String {
        let symbol = match report.outcome {
            ImportOutcome::Created { .. } => self.paint(GREEN, "✓"),
            ImportOutcome::AlreadyExists { .. } => self.paint(YELLOW, "↺"),
            ImportOutcome::Failed { .. } => self.paint(RED, "✗"),
        };
        format!("{symbol} {}: {}", report.name, report.outcome)
    }

    /// Prints one import result as soon as it is known
    pub fn import_item(self, report: &ItemReport) {
        self.emit(&self.import_line(report), report.outcome.is_failure());
    }

    /// Prints the final tally of an import run
    pub fn import_summary(self, summary: &RunSummary) {
        if self.quiet {
            return;
        }
        println!();
        println!("{}", self.paint(BOLD, "Import Summary:"));
        println!("  {}", summary.summary_string());
        if summary.has_failures() {
            println!("  {}", self.paint(RED, &format!("{} failed", summary.failed)));
        } else {
            println!("  {}", self.paint(GREEN, "All items succeeded"));
        }
    }

    /// Prints every written file and every per-item error of an export
    pub fn export_items(self, summary: &ExportSummary) {
        for file in &summary.files {
            self.emit(&self.export_line(file), false);
        }
        for error in &summary.errors {
            self.emit(&format!("{} {error}", self.paint(RED, "✗")), true);
        }
    }

    fn export_line(self, file: &Path) -> String {
        format!(
            "{} {}",
            self.paint(GREEN, "✓"),
            self.paint(CYAN, &file.display().to_string())
        )
    }

    /// Prints the final tally of an export run
    pub fn export_summary(self, summary: &ExportSummary) {
        if self.quiet {
            return;
        }
        println!();
        println!("{}", self.paint(BOLD, "Export Summary:"));
        println!("  {}", summary.summary_string());
    }

    /// Formats one password patch result
    pub fn patch_line(self, report: &PatchReport) -> String {
        let name = report.name.as_deref().unwrap_or(&report.origin);
        match &report.outcome {
            PatchOutcome::Patched => {
                format!("{} {name}: password added ({})", self.paint(GREEN, "✓"), report.origin)
            }
            PatchOutcome::Skipped { reason } => {
                format!("{} {name}: skipped, {reason}", self.paint(YELLOW, "-"))
            }
            PatchOutcome::Failed { message } => {
                format!("{} {name}: {message}", self.paint(RED, "✗"))
            }
        }
    }

    /// Prints one password patch result
    pub fn patch_item(self, report: &PatchReport) {
        let failed = matches!(report.outcome, PatchOutcome::Failed { .. });
        self.emit(&self.patch_line(report), failed);
    }

    /// Prints the final tally of a password patch run
    pub fn patch_summary(self, summary: &PatchSummary) {
        if self.quiet {
            return;
        }
        println!();
        println!("{}", self.paint(BOLD, "Password Summary:"));
        println!("  {}", summary.summary_string());
    }
}
