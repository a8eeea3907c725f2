//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single `Config`, applying precedence rules.

use std::path::PathBuf;

use crate::{
    BrowseSettings, Config, DataSettings, ListSettings,
    parse::{RawBrowseSettings, RawConfig, RawListSettings},
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single `Config`.
///
/// Configs are given highest precedence first (closest to the working directory) and the
/// global config last. For every scalar setting the first defined value wins. A relative
/// data source stays relative to the file that defined it.
pub fn merge_configs(configs: &[ParsedConfig]) -> Config {
    let config_root = configs
        .first()
        .and_then(|c| c.path.parent())
        .map(PathBuf::from);

    Config {
        data: merge_data_settings(configs),
        list: merge_list_settings(configs),
        browse: merge_browse_settings(configs),
        config_root,
        files: configs.iter().map(|c| c.path.clone()).collect(),
    }
}

/// Merges the data section.
fn merge_data_settings(configs: &[ParsedConfig]) -> DataSettings {
    let mut result = DataSettings::default();

    // Iterate in reverse (lowest precedence first) so higher precedence overwrites
    for parsed in configs.iter().rev() {
        if let Some(ref data) = parsed.config.data
            && let Some(ref source) = data.source
        {
            result.source.clone_from(source);
            result.base_dir = parsed.path.parent().map(PathBuf::from);
        }
    }

    result
}

/// Merges the list section.
fn merge_list_settings(configs: &[ParsedConfig]) -> ListSettings {
    let mut result = ListSettings::default();
    for parsed in configs.iter().rev() {
        if let Some(ref list) = parsed.config.list {
            apply_raw_list(&mut result, list);
        }
    }
    result
}

/// Applies a raw list section, overwriting present values.
fn apply_raw_list(result: &mut ListSettings, raw: &RawListSettings) {
    if let Some(v) = raw.limit {
        result.limit = v;
    }
}

/// Merges the browse section.
fn merge_browse_settings(configs: &[ParsedConfig]) -> BrowseSettings {
    let mut result = BrowseSettings::default();
    for parsed in configs.iter().rev() {
        if let Some(ref browse) = parsed.config.browse {
            apply_raw_browse(&mut result, browse);
        }
    }
    result
}

/// Applies a raw browse section, overwriting present values.
fn apply_raw_browse(result: &mut BrowseSettings, raw: &RawBrowseSettings) {
    if let Some(ref v) = raw.base_url {
        result.base_url.clone_from(v);
    }
}
