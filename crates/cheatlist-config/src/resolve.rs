//! Path resolution for the data source.
//!
//! Resolves relative and tilde-prefixed data paths to absolute ones. Paths are not
//! canonicalized and need not exist; `check` reports missing files.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use directories::BaseDirs;

use crate::ConfigError;

/// The data source value that means "read standard input".
pub const STDIN_SOURCE: &str = "-";

/// Where the catalog is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// Standard input.
    Stdin,
    /// A JSON file.
    File(PathBuf),
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stdin => f.write_str("<stdin>"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Resolves a data source setting.
///
/// Handles these cases:
/// - `-` reads standard input
/// - Tilde paths (`~/cheats.json`) expand to the home directory
/// - Relative paths resolve against `base_dir`
/// - Absolute paths are returned as-is
pub fn resolve_data_source(source: &str, base_dir: &Path) -> Result<DataSource, ConfigError> {
    let source = source.trim();
    if source == STDIN_SOURCE {
        return Ok(DataSource::Stdin);
    }

    let expanded = expand_tilde(source)?;
    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        base_dir.join(expanded)
    };
    Ok(DataSource::File(absolute))
}

/// Expands a tilde prefix to the home directory.
///
/// - `~` alone becomes the home directory
/// - `~/foo` becomes home directory joined with `foo`
/// - Paths not starting with `~` are returned unchanged
fn expand_tilde(path: &str) -> Result<PathBuf, ConfigError> {
    if path == "~" {
        return home_dir();
    }

    if let Some(rest) = path.strip_prefix("~/") {
        let home = home_dir()?;
        return Ok(home.join(rest));
    }

    Ok(PathBuf::from(path))
}

/// Returns the home directory.
fn home_dir() -> Result<PathBuf, ConfigError> {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or(ConfigError::NoHomeDirectory)
}
