//! Implementation of `cheatlist check`.

use std::process::ExitCode;

use cheatlist_config::{ConfigWarning, DataSource, discover_config_files};

use crate::cli::{
    context::CommandContext,
    output::{dim, subheader, warning},
};

/// Exit codes for `cheatlist check`.
mod exit_codes {
    use std::process::ExitCode;

    /// Configuration and data are usable with no warnings.
    pub const OK: ExitCode = ExitCode::SUCCESS;
    /// Something needs attention.
    pub const WARNINGS: ExitCode = ExitCode::FAILURE;
    /// The catalog cannot be loaded.
    pub const ERROR: ExitCode = ExitCode::FAILURE;
}

/// Validates configuration and the data file.
pub fn run(ctx: &CommandContext) -> ExitCode {
    println!("Checking configuration...");
    println!();

    let config_files = discover_config_files(&ctx.cwd);
    if config_files.is_empty() {
        println!("No configuration files found; using defaults.");
        println!("{}", dim("Run 'cheatlist init' to create a configuration file."));
    } else {
        println!("{}", subheader("Config files:"));
        for path in &config_files {
            println!("  {}", path.display());
        }
    }
    println!();

    let source = match ctx.data_source() {
        Ok(source) => source,
        Err(_) => return exit_codes::ERROR,
    };
    println!("{}", subheader("Data:"));
    println!("  {source}");
    let catalog_loaded = match &source {
        DataSource::Stdin => {
            println!("  {}", dim("(read from stdin at run time; not checked)"));
            true
        }
        DataSource::File(path) if path.is_file() => match ctx.load_catalog_from(&source) {
            Ok(catalog) => {
                println!("  {} records", catalog.len());
                if catalog.skipped() > 0 {
                    println!(
                        "  {}",
                        warning(&format!(
                            "{} records skipped (missing id or version)",
                            catalog.skipped()
                        ))
                    );
                }
                true
            }
            Err(_) => false,
        },
        DataSource::File(_) => {
            println!("  {}", warning("not found"));
            !ctx.has_data_override()
        }
    };
    println!();

    let mut warnings = ctx.config.validate(&ctx.cwd);
    if ctx.has_data_override() {
        warnings.retain(|w| !is_data_warning(w));
    }
    if !catalog_loaded {
        return exit_codes::ERROR;
    }
    if warnings.is_empty() {
        println!("No issues found.");
        return exit_codes::OK;
    }

    println!("{}", subheader(&format!("Warnings ({}):", warnings.len())));
    for warning in &warnings {
        println!("  - {warning}");
    }
    println!();

    print_hints(&warnings);

    exit_codes::WARNINGS
}

/// Returns true for warnings about the configured data source.
fn is_data_warning(warning: &ConfigWarning) -> bool {
    matches!(
        warning,
        ConfigWarning::DataSourceUnresolved { .. }
            | ConfigWarning::DataSourceMissing { .. }
            | ConfigWarning::DataSourceNotFile { .. }
    )
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    let mut hints = Vec::new();

    for warning in warnings {
        match warning {
            ConfigWarning::DataSourceUnresolved { .. } => {
                hints.push("Use a plain path for [data] source, or - for stdin.");
            }
            ConfigWarning::DataSourceMissing { .. } => {
                hints.push("Create the data file or point [data] source at an existing one.");
            }
            ConfigWarning::DataSourceNotFile { .. } => {
                hints.push("[data] source must name a JSON file, not a directory.");
            }
            ConfigWarning::InvalidBaseUrl { .. } => {
                hints.push("Set [browse] base_url to an absolute URL such as http://localhost/.");
            }
            ConfigWarning::BaseUrlHasFragment { .. } => {
                hints.push("Remove the #fragment from [browse] base_url.");
            }
        }
    }

    hints.sort_unstable();
    hints.dedup();

    if !hints.is_empty() {
        println!("{}", subheader("Hints:"));
        for hint in hints {
            println!("  - {hint}");
        }
    }
}
