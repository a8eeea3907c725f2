//! Natural-key lookup index.

use std::collections::HashMap;

use tracing::debug;

use crate::{key::NaturalKey, record::CatalogRecord};

/// Maps natural keys to record ordinals.
///
/// Built once per load and never updated. When two records share a key, the one later in
/// corpus order wins.
#[derive(Debug, Clone, Default)]
pub struct LookupIndex {
    /// Key to ordinal.
    by_key: HashMap<NaturalKey, usize>,
}

impl LookupIndex {
    /// Builds the index over a sorted corpus.
    pub fn build(records: &[CatalogRecord]) -> Self {
        let mut by_key = HashMap::with_capacity(records.len());
        for record in records {
            if let Some(shadowed) = by_key.insert(record.key().clone(), record.ordinal()) {
                debug!(
                    key = %record.key(),
                    shadowed,
                    winner = record.ordinal(),
                    "duplicate natural key"
                );
            }
        }
        Self { by_key }
    }

    /// Returns the ordinal of the record with this key.
    pub fn get(&self, key: &NaturalKey) -> Option<usize> {
        self.by_key.get(key).copied()
    }

    /// Returns true if a record with this key exists.
    pub fn contains(&self, key: &NaturalKey) -> bool {
        self.by_key.contains_key(key)
    }

    /// Returns the number of distinct keys.
    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    /// Returns true if the index is empty.
    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::corpus;

    #[test]
    fn finds_every_record() {
        let records = corpus(&[("A", "1", "a"), ("B", "1", "b"), ("B", "2", "b")]);
        let index = LookupIndex::build(&records);
        assert_eq!(index.len(), 3);
        for record in &records {
            assert_eq!(index.get(record.key()), Some(record.ordinal()));
        }
    }

    #[test]
    fn duplicate_keys_keep_the_later_record() {
        let records = corpus(&[
            ("CUSA1", "01.00", "First"),
            ("CUSA2", "01.00", "Other"),
            ("CUSA1", "01.00", "Second"),
        ]);
        let index = LookupIndex::build(&records);

        assert_eq!(index.len(), 2);
        let key = NaturalKey::new("CUSA1", "01.00").unwrap();
        let ordinal = index.get(&key).unwrap();
        let survivor = &records[ordinal];
        assert_eq!(survivor.title(), "Second");
        assert_eq!(ordinal, 2);
    }

    #[test]
    fn unknown_key_misses() {
        let index = LookupIndex::build(&corpus(&[("A", "1", "a")]));
        let key = NaturalKey::new("A", "2").unwrap();
        assert!(!index.contains(&key));
        assert!(index.get(&key).is_none());
    }
}
