//! Command-line interface for `cheatlist`, a searchable cheat catalog with deep links.

mod cli;

use std::{io, process::ExitCode};

use clap::Parser;
use cli::{CommandContext, args::Cli, commands};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let context = if cli.command.skips_config() {
        CommandContext::load_cwd_only(cli.data)
    } else {
        CommandContext::load(cli.data)
    };
    let ctx = match context {
        Ok(ctx) => ctx,
        Err(code) => return code,
    };

    commands::run(cli.command, &ctx)
}

/// Installs the stderr log subscriber. `RUST_LOG` wins over `-v`.
fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
