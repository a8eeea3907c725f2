//! Record normalization.
//!
//! Turns raw records into the sorted corpus: coerces fields, computes the lowercase search
//! fields once, sorts by `(title, id, version)` under the catalog collation, and assigns
//! ordinals strictly after sorting so that ordinal order is display order.

use std::collections::BTreeMap;

use tracing::warn;

use crate::{
    collate::{self, SortKey},
    key::NaturalKey,
    raw::{RawFormat, RawRecord},
    record::{CatalogRecord, FormatInfo, FormatTag},
    search::normalize_text,
};

/// The result of normalizing a batch of raw records.
#[derive(Debug, Default)]
pub struct Normalized {
    /// Sorted records with ordinals assigned.
    pub records: Vec<CatalogRecord>,
    /// Number of raw records dropped for lacking a natural key.
    pub skipped: usize,
}

/// Normalizes and sorts raw records into a corpus.
pub fn normalize(raw: Vec<RawRecord>) -> Normalized {
    let mut skipped = 0;
    let mut records: Vec<CatalogRecord> = raw
        .into_iter()
        .enumerate()
        .filter_map(|(position, raw)| {
            let record = normalize_record(raw);
            if record.is_none() {
                warn!(position, "skipping record without id or version");
                skipped += 1;
            }
            record
        })
        .collect();

    records.sort_by_cached_key(corpus_order);

    for (ordinal, record) in records.iter_mut().enumerate() {
        record.ordinal = ordinal;
    }

    Normalized { records, skipped }
}

/// Sort key for corpus order: title, then id, then version.
fn corpus_order(record: &CatalogRecord) -> (SortKey, SortKey, SortKey) {
    (
        collate::sort_key(&record.title_lower),
        collate::sort_key(record.id()),
        collate::sort_key(record.version()),
    )
}

/// Normalizes one raw record. Returns `None` if it has no usable natural key.
///
/// The ordinal is left at zero; [`normalize`] assigns it after sorting.
pub(crate) fn normalize_record(raw: RawRecord) -> Option<CatalogRecord> {
    let key = NaturalKey::new(raw.id.as_deref()?, raw.version.as_deref()?)?;

    let id_lower = normalize_text(raw.id_lower.as_deref().unwrap_or(key.id()));
    let title_lower = normalize_text(
        raw.title_lower
            .as_deref()
            .or(raw.title.as_deref())
            .unwrap_or_default(),
    );
    let creators_haystack = raw
        .creators_lower
        .as_ref()
        .or(raw.creators.as_ref())
        .map(|c| normalize_text(&c.joined()))
        .unwrap_or_default();
    let creators = raw.creators.map(|c| c.entries()).unwrap_or_default();

    let mut formats = BTreeMap::new();
    for (tag, format) in [
        (FormatTag::Json, raw.formats.json),
        (FormatTag::Shn, raw.formats.shn),
        (FormatTag::Mc4, raw.formats.mc4),
    ] {
        if let Some(format) = format {
            formats.insert(tag, normalize_format(format));
        }
    }

    Some(CatalogRecord {
        key,
        title: raw.title.into_inner(),
        creators,
        cheats_total: raw.cheats_total.0,
        formats,
        ordinal: 0,
        id_lower,
        title_lower,
        creators_haystack,
    })
}

/// Normalizes one raw format, dropping non-string cheat entries.
fn normalize_format(raw: RawFormat) -> FormatInfo {
    FormatInfo {
        has_file: raw.has_file.0,
        cheats_count: raw.cheats_count.0,
        cheats: raw.cheats.into_iter().flatten().collect(),
    }
}
