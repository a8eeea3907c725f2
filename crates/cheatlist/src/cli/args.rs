//! Clap argument definitions for the `cheatlist` CLI.

use clap::{ArgAction, Args, Parser, Subcommand};

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "cheatlist", version)]
#[command(about = "Search a cheat catalog and open records by deep link")]
pub struct Cli {
    /// Catalog JSON file, or - for stdin (overrides [data] source)
    #[arg(long, global = true, value_name = "PATH")]
    pub data: Option<String>,

    /// Log verbosity (-v for info, -vv for debug); RUST_LOG takes precedence
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for `cheatlist search`.
#[derive(Args, Debug, Clone)]
pub struct SearchCommand {
    /// Text to look for in titles, ids and creators; empty lists everything
    pub query: Vec<String>,

    /// Maximum records to print (0 prints all) [default: from config]
    #[arg(short = 'n', long)]
    pub limit: Option<usize>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

impl SearchCommand {
    /// Returns the query words joined into one raw query.
    pub fn raw_query(&self) -> String {
        self.query.join(" ")
    }
}

/// Arguments for `cheatlist show`.
#[derive(Args, Debug, Clone)]
pub struct ShowCommand {
    /// Deep link: `#ID-VERSION`, `ID-VERSION`, or a full URL ending in one
    pub link: String,

    /// Only list cheats containing this text
    #[arg(short = 'f', long, default_value = "")]
    pub filter: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `cheatlist link`.
#[derive(Args, Debug, Clone)]
pub struct LinkCommand {
    /// Record id, e.g. CUSA12345
    pub id: String,

    /// Record version, e.g. 01.00
    pub version: String,

    /// Print a full URL on the configured base URL instead of the bare fragment
    #[arg(long)]
    pub url: bool,
}

/// Arguments for `cheatlist browse`.
#[derive(Args, Debug, Clone)]
pub struct BrowseCommand {
    /// Start URL, optionally with a deep-link fragment [default: [browse] base_url]
    #[arg(long)]
    pub url: Option<String>,
}

/// Arguments for `cheatlist init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.cheatlist.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `cheatlist` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// List records matching a query
    Search(SearchCommand),

    /// Open one record by deep link and print its cheats
    Show(ShowCommand),

    /// Print the deep link for an id and version
    Link(LinkCommand),

    /// Browse interactively, reading commands from stdin
    Browse(BrowseCommand),

    /// Initialize cheatlist configuration in current directory
    Init(InitCommand),

    /// Show effective configuration settings
    Config,

    /// Validate configuration and the data file
    Check,
}

impl Commands {
    /// Returns true if the command must run even when configuration fails to load.
    pub fn skips_config(&self) -> bool {
        matches!(self, Self::Init(_))
    }
}
