//! `grafsync` CLI - export and import Grafana datasources and dashboards
//!
//! Provides commands for exporting every datasource or dashboard to JSON
//! files, importing them into another instance, and adding datasource
//! passwords to exported files before import.

mod cli;
mod commands;
mod error;
mod output;
mod util;

use std::io::IsTerminal;

use clap::{CommandFactory, Parser};
use cli::Cli;
use grafsync_core::tracing::init_tracing;

use crate::commands::Context;
use crate::output::Printer;

fn main() {
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        let mut cmd = Cli::command();
        if let Err(e) = cmd.print_help() {
            eprintln!("Error: {e}");
            std::process::exit(error::exit_codes::GENERAL_ERROR);
        }
        println!();
        return;
    };

    let color = !cli.no_color;
    let tracing_config = util::tracing_config(
        cli.verbose,
        cli.quiet,
        std::env::var("RUST_LOG").ok(),
    )
    .with_ansi(color && std::io::stderr().is_terminal());
    if let Err(e) = init_tracing(&tracing_config) {
        eprintln!("Warning: logging disabled: {e}");
    }

    let ctx = Context {
        config_path: cli.config.as_deref(),
        printer: Printer::new(color && std::io::stdout().is_terminal(), cli.quiet),
    };

    if let Err(e) = commands::dispatch(ctx, command) {
        eprintln!("Error: {e}");
        if e.is_usage_error() {
            eprintln!("Run 'grafsync <COMMAND> --help' for usage.");
        }
        std::process::exit(e.exit_code());
    }
}
