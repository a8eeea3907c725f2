//! Configuration file parsing.
//!
//! Parses individual `.cheatlist.toml` files into `RawConfig` structures whose fields are all
//! optional, so partial files can be merged.

use std::{fs, path::Path};

use serde::Deserialize;
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::ConfigError;

/// Raw configuration as parsed directly from a TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, stop discovery here and ignore parent and global configs.
    pub root: Option<bool>,
    /// Data source section.
    pub data: Option<RawDataSettings>,
    /// Listing section.
    pub list: Option<RawListSettings>,
    /// Interactive browsing section.
    pub browse: Option<RawBrowseSettings>,
}

/// Raw `[data]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawDataSettings {
    /// Path to the catalog JSON file, or `-` for stdin.
    pub source: Option<String>,
}

/// Raw `[list]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawListSettings {
    /// Maximum records to print; 0 prints all.
    pub limit: Option<usize>,
}

/// Raw `[browse]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawBrowseSettings {
    /// Page URL that deep links are built on.
    pub base_url: Option<String>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration from a TOML string.
///
/// The `path` parameter is used for error reporting.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration from a TOML string without path context.
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Checks if a config file has `root = true` set.
///
/// Returns false if the file cannot be read or parsed.
pub fn is_root_config(path: &Path) -> bool {
    let Ok(contents) = fs::read_to_string(path) else {
        return false;
    };
    let Ok(config) = toml::from_str::<RawConfig>(&contents) else {
        return false;
    };
    config.root == Some(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::Sandbox;

    #[test]
    fn test_parse_empty_config() {
        let config = parse_config_str("", Path::new("test.toml")).unwrap();
        assert!(config.root.is_none());
        assert!(config.data.is_none());
        assert!(config.list.is_none());
        assert!(config.browse.is_none());
    }

    #[test]
    fn test_parse_all_sections() {
        let toml = r#"
root = true

[data]
source = "./dumps/cheatslist.json"

[list]
limit = 25

[browse]
base_url = "https://cheats.example/ps4/"
"#;
        let config = parse_config_str(toml, Path::new("test.toml")).unwrap();
        assert_eq!(config.root, Some(true));
        assert_eq!(
            config.data.unwrap().source.as_deref(),
            Some("./dumps/cheatslist.json")
        );
        assert_eq!(config.list.unwrap().limit, Some(25));
        assert_eq!(
            config.browse.unwrap().base_url.as_deref(),
            Some("https://cheats.example/ps4/")
        );
    }

    #[test]
    fn test_parse_partial_section() {
        let config = parse_config_str("[list]\n", Path::new("test.toml")).unwrap();
        assert!(config.list.unwrap().limit.is_none());
    }

    #[test]
    fn test_parse_wrong_type_is_error() {
        let err = parse_config_str("[list]\nlimit = \"many\"\n", Path::new("bad.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn test_parse_config_file_missing() {
        let sandbox = Sandbox::new();
        let err = parse_config_file(&sandbox.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }

    #[test]
    fn test_is_root_config() {
        let sandbox = Sandbox::new();
        let root = sandbox.config("a", "root = true\n");
        let plain = sandbox.config("b", "[list]\nlimit = 3\n");
        let broken = sandbox.config("c", "root = [");
        assert!(is_root_config(&root));
        assert!(!is_root_config(&plain));
        assert!(!is_root_config(&broken));
    }

    #[test]
    fn test_parse_config_without_path() {
        assert!(parse_config("[data]\nsource = \"-\"\n").is_ok());
        assert!(parse_config("[data\n").is_err());
    }
}
