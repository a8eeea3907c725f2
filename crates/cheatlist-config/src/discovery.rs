//! Configuration file discovery.
//!
//! Walks up from a starting directory collecting `.cheatlist.toml` files, then appends the
//! global `~/.cheatlist.toml`.

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::parse::is_root_config;

/// The configuration filename.
pub const CONFIG_FILENAME: &str = ".cheatlist.toml";

/// Discovers all configuration files relevant to the given directory.
///
/// Returns paths closest to `cwd` first and the global file last. Discovery stops at a file
/// with `root = true`, and the global file is then skipped.
pub fn discover_config_files(cwd: &Path) -> Vec<PathBuf> {
    let mut configs = Vec::new();
    let mut found_root = false;

    let mut current = Some(cwd);
    while let Some(dir) = current {
        let config_path = dir.join(CONFIG_FILENAME);
        if config_path.is_file() {
            let is_root = is_root_config(&config_path);
            configs.push(config_path);
            if is_root {
                found_root = true;
                break;
            }
        }
        current = dir.parent();
    }

    if !found_root
        && let Some(global_path) = global_config_path()
        && global_path.is_file()
        && !configs.contains(&global_path)
    {
        configs.push(global_path);
    }

    configs
}

/// Returns the path to the global configuration file (`~/.cheatlist.toml`).
pub fn global_config_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_FILENAME))
}

/// Checks if a path is the global configuration file.
pub fn is_global_config(path: &Path) -> bool {
    global_config_path().is_some_and(|global| path == global)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::test_support::Sandbox;

    /// Drops the real global config, if the machine running the tests has one.
    fn local(configs: &[PathBuf]) -> Vec<&PathBuf> {
        configs.iter().filter(|p| !is_global_config(p)).collect()
    }

    #[test]
    fn test_discover_nothing() {
        let sandbox = Sandbox::new();
        let cwd = sandbox.mkdir("ps4/eu/dumps");
        assert!(local(&discover_config_files(&cwd)).is_empty());
    }

    #[test]
    fn test_discover_closest_first() {
        let sandbox = Sandbox::new();
        let far = sandbox.config("", "[list]\nlimit = 50\n");
        let near = sandbox.config("ps4", "[list]\nlimit = 5\n");
        let nearest = sandbox.config("ps4/eu", "");
        let cwd = sandbox.mkdir("ps4/eu/dumps");

        let configs = discover_config_files(&cwd);
        assert_eq!(local(&configs), vec![&nearest, &near, &far]);
    }

    #[test]
    fn test_discover_ignores_config_named_directory() {
        let sandbox = Sandbox::new();
        fs::create_dir_all(sandbox.path().join(CONFIG_FILENAME)).unwrap();
        let cwd = sandbox.mkdir("ps4");
        assert!(local(&discover_config_files(&cwd)).is_empty());
    }

    #[test]
    fn test_discover_stops_at_root_and_skips_global() {
        let sandbox = Sandbox::new();
        sandbox.config("", "[list]\nlimit = 50\n");
        let root = sandbox.config("library", "root = true\n");
        let inner = sandbox.config("library/ps4", "");
        let cwd = sandbox.mkdir("library/ps4/eu");

        assert_eq!(discover_config_files(&cwd), vec![inner, root]);
    }

    #[test]
    fn test_discover_root_false_keeps_walking() {
        let sandbox = Sandbox::new();
        let outer = sandbox.config("", "");
        let inner = sandbox.config("library", "root = false\n");
        let cwd = sandbox.mkdir("library/ps5");

        let configs = discover_config_files(&cwd);
        assert_eq!(local(&configs), vec![&inner, &outer]);
    }

    #[test]
    fn test_global_config_path() {
        let path = global_config_path().unwrap();
        assert_eq!(path.file_name().unwrap(), CONFIG_FILENAME);
        assert!(is_global_config(&path));
        assert!(!is_global_config(Path::new("/srv/dumps/.cheatlist.toml")));
    }
}
