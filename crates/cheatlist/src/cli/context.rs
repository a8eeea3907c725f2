//! Shared context for running CLI commands.

use std::{
    env,
    io::{self, IsTerminal},
    path::{Path, PathBuf},
    process::ExitCode,
};

use cheatlist_catalog::Catalog;
use cheatlist_config::{Config, DataSource, resolve_data_source};
use tracing::debug;
use url::Url;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (may be default if no config files found).
    pub config: Config,
    /// `--data` as given on the command line.
    data_override: Option<String>,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load(data_override: Option<String>) -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = load_config_or_failure(&cwd)?;
        Ok(Self {
            cwd,
            config,
            data_override,
        })
    }

    /// Loads only the current directory, skipping configuration parsing.
    ///
    /// Used for `init`, which should work even when an existing config file is invalid.
    pub fn load_cwd_only(data_override: Option<String>) -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
            data_override,
        })
    }

    /// Returns true if `--data` replaced the configured source.
    pub fn has_data_override(&self) -> bool {
        self.data_override.is_some()
    }

    /// Resolves where the catalog comes from. `--data` is relative to the working directory.
    pub fn data_source(&self) -> Result<DataSource, ExitCode> {
        let resolved = match &self.data_override {
            Some(source) => resolve_data_source(source, &self.cwd),
            None => self.config.data_source(&self.cwd),
        };
        resolved.map_err(|e| {
            eprintln!("error: could not resolve data source: {e}");
            ExitCode::FAILURE
        })
    }

    /// Loads the catalog from the resolved data source.
    pub fn load_catalog(&self) -> Result<Catalog, ExitCode> {
        let source = self.data_source()?;
        self.load_catalog_from(&source)
    }

    /// Loads the catalog from an already resolved source.
    pub fn load_catalog_from(&self, source: &DataSource) -> Result<Catalog, ExitCode> {
        debug!(%source, "loading catalog");
        let loaded = match source {
            DataSource::Stdin => {
                let stdin = io::stdin();
                if stdin.is_terminal() {
                    eprintln!("reading catalog JSON from stdin...");
                }
                Catalog::from_reader(stdin.lock(), &source.to_string())
            }
            DataSource::File(path) => Catalog::load(path),
        };
        loaded.map_err(|e| {
            eprintln!("error: failed to load catalog: {e}");
            if matches!(source, DataSource::File(path) if !path.exists()) {
                eprintln!("Pass --data PATH, or set [data] source in .cheatlist.toml.");
            }
            ExitCode::FAILURE
        })
    }

    /// Parses the configured browse base URL.
    pub fn base_url(&self) -> Result<Url, ExitCode> {
        parse_url_or_failure(&self.config.browse.base_url)
    }
}

/// Parses a URL or exits with a consistent error.
pub fn parse_url_or_failure(raw: &str) -> Result<Url, ExitCode> {
    Url::parse(raw).map_err(|e| {
        eprintln!("error: invalid URL '{raw}': {e}");
        ExitCode::FAILURE
    })
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}

/// Loads configuration from the provided directory or exits with an error.
fn load_config_or_failure(cwd: &Path) -> Result<Config, ExitCode> {
    Config::load(cwd).map_err(|e| {
        eprintln!("error: failed to load configuration: {e}");
        ExitCode::FAILURE
    })
}
