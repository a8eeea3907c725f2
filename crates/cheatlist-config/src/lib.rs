//! Configuration system for cheatlist.
//!
//! cheatlist uses TOML configuration files named `.cheatlist.toml`. Configuration is resolved
//! by walking up the directory tree from the current working directory, collecting any
//! `.cheatlist.toml` files found, then loading `~/.cheatlist.toml` as the global config with
//! lowest precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod resolve;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::path::{Path, PathBuf};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawBrowseSettings, RawConfig, RawDataSettings, RawListSettings, parse_config_file,
    parse_config_str,
};
pub use resolve::{DataSource, STDIN_SOURCE, resolve_data_source};
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Default catalog file name.
pub const DEFAULT_DATA_SOURCE: &str = "cheatslist.json";

/// Default page URL for deep links.
pub const DEFAULT_BASE_URL: &str = "http://localhost/";

/// Top-level merged configuration for cheatlist.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Where the catalog comes from.
    pub data: DataSettings,
    /// Listing settings.
    pub list: ListSettings,
    /// Interactive browsing settings.
    pub browse: BrowseSettings,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
    /// Config files that were merged, highest precedence first.
    pub files: Vec<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.cheatlist.toml` files.
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        if files.is_empty() {
            return Ok(Self::default());
        }

        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(merge_configs(&parsed))
    }

    /// Resolves the configured data source.
    ///
    /// A relative path is resolved against the directory of the config file that set it, or
    /// `cwd` when the default is in effect.
    pub fn data_source(&self, cwd: &Path) -> Result<DataSource, ConfigError> {
        let base = self.data.base_dir.as_deref().unwrap_or(cwd);
        resolve_data_source(&self.data.source, base)
    }

    /// Validates the configuration and returns any warnings.
    ///
    /// This checks for:
    /// - A data file that does not exist or is not a regular file
    /// - A browse base URL that does not parse, or that carries a fragment
    pub fn validate(&self, cwd: &Path) -> Vec<ConfigWarning> {
        validate_config(self, cwd)
    }

    /// Serializes the effective settings to TOML format.
    ///
    /// The output has the same shape as a `.cheatlist.toml` file.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableSettings {
            data: &self.data,
            list: &self.list,
            browse: &self.browse,
        };
        toml::to_string_pretty(&serializable).map_err(|source| ConfigError::Serialize { source })
    }
}

/// The `[data]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DataSettings {
    /// Catalog JSON path as written in config, or `-` for stdin.
    pub source: String,
    /// Directory of the config file that set `source`.
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            source: String::from(DEFAULT_DATA_SOURCE),
            base_dir: None,
        }
    }
}

/// The `[list]` section.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ListSettings {
    /// Maximum records to print; 0 prints all.
    pub limit: usize,
}

/// The `[browse]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BrowseSettings {
    /// Page URL that deep links are built on.
    pub base_url: String,
}

impl Default for BrowseSettings {
    fn default() -> Self {
        Self {
            base_url: String::from(DEFAULT_BASE_URL),
        }
    }
}

/// Internal struct for TOML serialization of settings.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// Data section.
    data: &'a DataSettings,
    /// List section.
    list: &'a ListSettings,
    /// Browse section.
    browse: &'a BrowseSettings,
}
