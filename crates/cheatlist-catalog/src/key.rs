//! Natural keys identifying catalog records.

use std::fmt;

use serde::Serialize;

/// Separator between id and version in the textual form of a key.
pub const KEY_SEPARATOR: char = '|';

/// The `(id, version)` pair that identifies a record.
///
/// Both halves are trimmed and non-empty. The textual form is `id|version`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NaturalKey {
    /// Trimmed title identifier.
    id: String,
    /// Trimmed version.
    version: String,
}

impl NaturalKey {
    /// Builds a key from raw parts, trimming both.
    ///
    /// Returns `None` if either part is blank after trimming.
    pub fn new(id: &str, version: &str) -> Option<Self> {
        let id = id.trim();
        let version = version.trim();
        if id.is_empty() || version.is_empty() {
            return None;
        }
        Some(Self {
            id: id.to_string(),
            version: version.to_string(),
        })
    }

    /// Returns the id half.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the version half.
    pub fn version(&self) -> &str {
        &self.version
    }
}

impl fmt::Display for NaturalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{KEY_SEPARATOR}{}", self.id, self.version)
    }
}
