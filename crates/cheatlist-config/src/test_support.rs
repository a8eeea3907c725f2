//! Scratch directory trees for cheatlist-config unit tests.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tempfile::TempDir;

use crate::discovery::CONFIG_FILENAME;

/// A temporary directory that config files and data files are written into.
pub struct Sandbox {
    /// Removed on drop.
    root: TempDir,
}

impl Sandbox {
    /// Creates an empty sandbox.
    pub fn new() -> Self {
        Self {
            root: tempfile::tempdir().unwrap(),
        }
    }

    /// Returns the sandbox root.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Makes `rel` (and its parents) and returns its absolute path. `""` is the root.
    pub fn mkdir(&self, rel: &str) -> PathBuf {
        let dir = self.root.path().join(rel);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Writes `.cheatlist.toml` into directory `rel` and returns the file path.
    pub fn config(&self, rel: &str, toml: &str) -> PathBuf {
        let path = self.mkdir(rel).join(CONFIG_FILENAME);
        fs::write(&path, toml).unwrap();
        path
    }

    /// Writes an empty catalog (`[]`) at `rel` and returns its path.
    pub fn catalog(&self, rel: &str) -> PathBuf {
        let path = self.root.path().join(rel);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).unwrap();
        }
        fs::write(&path, "[]").unwrap();
        path
    }
}
