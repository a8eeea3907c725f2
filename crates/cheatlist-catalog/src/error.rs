//! Error types for the cheatlist-catalog crate.

use std::io;

use thiserror::Error;

/// Errors that end a catalog load.
///
/// A load either yields a complete catalog or one of these. There is no partial corpus and
/// nothing is retried.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The data source could not be read.
    #[error("failed to read catalog {origin}: {source}")]
    Read {
        /// Display name of the data source (a path, or `<stdin>`).
        origin: String,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The payload is not valid JSON.
    #[error("failed to parse catalog {origin}: {source}")]
    Parse {
        /// Display name of the data source.
        origin: String,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// The payload is JSON, but neither an array nor an object with an `entries` array.
    #[error("catalog {origin} is neither an array nor an object with an `entries` array")]
    Shape {
        /// Display name of the data source.
        origin: String,
    },
}

impl LoadError {
    /// Returns the display name of the data source that failed to load.
    pub fn origin(&self) -> &str {
        match self {
            Self::Read { origin, .. } | Self::Parse { origin, .. } | Self::Shape { origin } => {
                origin
            }
        }
    }
}
