//! Catalog loading, normalization, lookup and search for cheatlist.
//!
//! A catalog is loaded once from a JSON document that is either a bare array of records or
//! an object with an `entries` array. Loading:
//! - Coerces loosely-typed fields to their declared types with defaults
//! - Sorts records by title, id and version under a fixed collation
//! - Assigns each record its ordinal (post-sort position)
//! - Builds the natural-key lookup index
//!
//! After loading, the catalog is immutable. Search is a pure function over it.
//!
//! # Example
//!
//! ```
//! use cheatlist_catalog::Catalog;
//!
//! let catalog = Catalog::from_json(
//!     r#"{"entries": [{"id": "CUSA12345", "version": "01.00", "title": "Demo Game"}]}"#,
//!     "inline",
//! )
//! .unwrap();
//! assert_eq!(catalog.search("demo").len(), 1);
//! ```

#![warn(missing_docs)]

mod cheats;
mod collate;
mod error;
mod index;
mod key;
mod normalize;
mod raw;
mod record;
mod search;
#[cfg(test)]
mod test_support;

use std::{fs, io::Read, path::Path};

pub use cheats::{CheatListing, CheatSection, filter_cheats};
pub use collate::{COLLATION_LOCALE, compare as collation_compare};
pub use error::LoadError;
pub use index::LookupIndex;
pub use key::{KEY_SEPARATOR, NaturalKey};
pub use normalize::{Normalized, normalize};
pub use raw::{Count, Flag, RawFormat, RawFormats, RawRecord, StringOrList, Text};
pub use record::{CatalogRecord, FormatInfo, FormatTag, Led};
pub use search::{Query, filter, normalize_text};
use serde_json::Value;
use tracing::{debug, warn};

/// The loaded, immutable catalog: the sorted corpus and its lookup index.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    /// Records in corpus order; a record's ordinal is its position here.
    records: Vec<CatalogRecord>,
    /// Natural key to ordinal.
    index: LookupIndex,
    /// Number of source entries dropped during loading.
    skipped: usize,
}

impl Catalog {
    /// Loads a catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let origin = path.display().to_string();
        let text = fs::read_to_string(path).map_err(|source| LoadError::Read {
            origin: origin.clone(),
            source,
        })?;
        Self::from_json(&text, &origin)
    }

    /// Loads a catalog from a reader, such as stdin.
    ///
    /// `origin` names the source in errors.
    pub fn from_reader<R: Read>(mut reader: R, origin: &str) -> Result<Self, LoadError> {
        let mut text = String::new();
        reader
            .read_to_string(&mut text)
            .map_err(|source| LoadError::Read {
                origin: origin.to_string(),
                source,
            })?;
        Self::from_json(&text, origin)
    }

    /// Loads a catalog from JSON text.
    pub fn from_json(text: &str, origin: &str) -> Result<Self, LoadError> {
        let value: Value = serde_json::from_str(text).map_err(|source| LoadError::Parse {
            origin: origin.to_string(),
            source,
        })?;
        Self::from_value(value, origin)
    }

    /// Loads a catalog from a parsed JSON document.
    ///
    /// Fails only if the document is neither an array nor an object with an `entries`
    /// array. Entries that are not objects are skipped.
    pub fn from_value(value: Value, origin: &str) -> Result<Self, LoadError> {
        let entries = match value {
            Value::Array(entries) => entries,
            Value::Object(mut map) => match map.remove("entries") {
                Some(Value::Array(entries)) => entries,
                _ => {
                    return Err(LoadError::Shape {
                        origin: origin.to_string(),
                    });
                }
            },
            _ => {
                return Err(LoadError::Shape {
                    origin: origin.to_string(),
                });
            }
        };

        let mut skipped = 0;
        let mut raw = Vec::with_capacity(entries.len());
        for (position, entry) in entries.into_iter().enumerate() {
            if !entry.is_object() {
                warn!(position, "skipping catalog entry that is not an object");
                skipped += 1;
                continue;
            }
            match serde_json::from_value::<RawRecord>(entry) {
                Ok(record) => raw.push(record),
                Err(e) => {
                    warn!(position, error = %e, "skipping unreadable catalog entry");
                    skipped += 1;
                }
            }
        }

        let mut catalog = Self::from_raw(raw);
        catalog.skipped += skipped;
        debug!(
            origin,
            records = catalog.len(),
            keys = catalog.index.len(),
            skipped = catalog.skipped,
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Builds a catalog from raw records.
    pub fn from_raw(raw: Vec<RawRecord>) -> Self {
        let Normalized { records, skipped } = normalize(raw);
        let index = LookupIndex::build(&records);
        Self {
            records,
            index,
            skipped,
        }
    }

    /// Returns all records in corpus order.
    pub fn records(&self) -> &[CatalogRecord] {
        &self.records
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the catalog has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the number of source entries dropped during loading.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Returns the lookup index.
    pub fn index(&self) -> &LookupIndex {
        &self.index
    }

    /// Returns the record with the given ordinal.
    pub fn get(&self, ordinal: usize) -> Option<&CatalogRecord> {
        self.records.get(ordinal)
    }

    /// Returns the record with the given natural key.
    pub fn lookup(&self, key: &NaturalKey) -> Option<&CatalogRecord> {
        self.index.get(key).and_then(|ordinal| self.get(ordinal))
    }

    /// Filters the corpus by a raw query.
    pub fn search(&self, raw_query: &str) -> Vec<&CatalogRecord> {
        filter(&self.records, raw_query)
    }
}
