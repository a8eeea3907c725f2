//! Test helpers shared across cheatlist-catalog unit tests.
//!
//! Kept behind `cfg(test)` to avoid leaking into the public API surface.

use crate::{
    normalize::{normalize, normalize_record},
    raw::RawRecord,
    record::CatalogRecord,
};

/// Builds a raw record with only id, version and title set.
fn raw(id: &str, version: &str, title: &str) -> RawRecord {
    RawRecord {
        id: id.into(),
        version: version.into(),
        title: title.into(),
        ..RawRecord::default()
    }
}

/// Builds a single normalized record with ordinal zero.
pub fn record(id: &str, version: &str, title: &str) -> CatalogRecord {
    normalize_record(raw(id, version, title)).unwrap()
}

/// Builds a sorted corpus from `(id, version, title)` rows.
pub fn corpus(rows: &[(&str, &str, &str)]) -> Vec<CatalogRecord> {
    let raws = rows
        .iter()
        .map(|(id, version, title)| raw(id, version, title))
        .collect();
    normalize(raws).records
}
