//! CLI argument parsing types using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

/// `grafsync` moves Grafana datasources and dashboards between instances
#[derive(Parser)]
#[command(name = "grafsync")]
#[command(
    author,
    version,
    about = "Export and import Grafana datasources and dashboards"
)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the targets file holding named profiles
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors (takes precedence over RUST_LOG)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(
        long,
        global = true,
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new()
    )]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Export every datasource to one JSON file each
    #[command(about = "Export all datasources from a Grafana instance")]
    ExportDatasources {
        #[command(flatten)]
        target: TargetArgs,

        /// Directory to write the files into (created if missing)
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,
    },

    /// Export every dashboard to one JSON file each
    #[command(about = "Export all dashboards from a Grafana instance")]
    ExportDashboards {
        #[command(flatten)]
        target: TargetArgs,

        /// Directory to write the files into (created if missing)
        #[arg(short, long, value_name = "DIR")]
        output: PathBuf,
    },

    /// Import datasources from exported JSON files
    #[command(about = "Import datasources into a Grafana instance")]
    ImportDatasources {
        #[command(flatten)]
        target: TargetArgs,

        #[command(flatten)]
        input: InputArgs,
    },

    /// Import dashboards from exported or UI-saved JSON files
    #[command(about = "Import dashboards into a Grafana instance")]
    ImportDashboards {
        #[command(flatten)]
        target: TargetArgs,

        #[command(flatten)]
        input: InputArgs,

        /// Replace dashboards that already exist with the same UID or title
        #[arg(long)]
        overwrite: bool,

        /// Recreate each dashboard's source folder and import into it
        #[arg(long)]
        preserve_folders: bool,
    },

    /// Add a datasource password to exported JSON files
    #[command(about = "Set secureJsonData.password in exported datasource files")]
    AddPassword {
        #[command(flatten)]
        input: InputArgs,

        /// Password to store
        #[arg(long, env = "GRAFANA_DS_PASSWORD", hide_env_values = true)]
        password: String,

        /// Only patch the datasource with this name
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Generate shell completions
    #[command(about = "Generate shell completion scripts")]
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Generate a man page
    #[command(about = "Print a roff man page to stdout")]
    Manpage,
}

/// Target instance selection, shared by every command that talks to Grafana
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Grafana base URL, e.g. https://grafana.example.com
    #[arg(long, env = "GRAFANA_URL")]
    pub url: Option<String>,

    /// API token (service account or API key)
    #[arg(long, env = "GRAFANA_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Named profile from the targets file
    #[arg(short, long)]
    pub profile: Option<String>,
}

/// Input selection: a directory of `.json` files or a single file
#[derive(Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct InputArgs {
    /// Directory of JSON files (non-recursive, other extensions ignored)
    #[arg(short, long, value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Single JSON file
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,
}
