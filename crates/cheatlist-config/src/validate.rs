//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::{fmt, path::Path};

use url::Url;

use crate::{Config, DataSource};

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// The data source could not be turned into a path.
    DataSourceUnresolved {
        /// The configured source.
        source: String,
        /// Why resolution failed.
        reason: String,
    },
    /// The data file does not exist.
    DataSourceMissing {
        /// Resolved path.
        path: String,
    },
    /// The data path exists but is not a file.
    DataSourceNotFile {
        /// Resolved path.
        path: String,
    },
    /// The browse base URL does not parse.
    InvalidBaseUrl {
        /// The configured URL.
        url: String,
        /// Parser message.
        reason: String,
    },
    /// The browse base URL carries a fragment, which deep links replace.
    BaseUrlHasFragment {
        /// The configured URL.
        url: String,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DataSourceUnresolved { source, reason } => {
                write!(f, "data source '{source}' cannot be resolved: {reason}")
            }
            Self::DataSourceMissing { path } => {
                write!(f, "data file does not exist: {path}")
            }
            Self::DataSourceNotFile { path } => {
                write!(f, "data source is not a file: {path}")
            }
            Self::InvalidBaseUrl { url, reason } => {
                write!(f, "browse base_url '{url}' is invalid: {reason}")
            }
            Self::BaseUrlHasFragment { url } => {
                write!(f, "browse base_url '{url}' has a fragment that links will replace")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
///
/// This checks for:
/// - A data file that does not exist or is not a file
/// - A base URL that does not parse or carries a fragment
pub fn validate_config(config: &Config, cwd: &Path) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();
    warnings.extend(validate_data_source(config, cwd));
    warnings.extend(validate_base_url(&config.browse.base_url));
    warnings
}

/// Checks that a file data source exists. Stdin is always acceptable.
fn validate_data_source(config: &Config, cwd: &Path) -> Option<ConfigWarning> {
    let path = match config.data_source(cwd) {
        Ok(DataSource::Stdin) => return None,
        Ok(DataSource::File(path)) => path,
        Err(e) => {
            return Some(ConfigWarning::DataSourceUnresolved {
                source: config.data.source.clone(),
                reason: e.to_string(),
            });
        }
    };

    if !path.exists() {
        return Some(ConfigWarning::DataSourceMissing {
            path: path.display().to_string(),
        });
    }
    if !path.is_file() {
        return Some(ConfigWarning::DataSourceNotFile {
            path: path.display().to_string(),
        });
    }
    None
}

/// Checks that the base URL parses and has no fragment.
fn validate_base_url(base_url: &str) -> Option<ConfigWarning> {
    match Url::parse(base_url) {
        Err(e) => Some(ConfigWarning::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        }),
        Ok(url) if url.fragment().is_some() => Some(ConfigWarning::BaseUrlHasFragment {
            url: base_url.to_string(),
        }),
        Ok(_) => None,
    }
}
