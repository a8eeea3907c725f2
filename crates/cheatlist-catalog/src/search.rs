//! Free-text catalog search.
//!
//! Search is a stateless filter over the corpus. A query matches a record when its
//! normalized text is a substring of the record's lowercase id, title, or creators. There is
//! no ranking: matches keep corpus order.

use crate::record::CatalogRecord;

/// Trims and lowercases text for matching.
pub fn normalize_text(text: &str) -> String {
    text.trim().to_lowercase()
}

/// A normalized, non-empty search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    /// Normalizes raw input into a query.
    ///
    /// Returns `None` when the input is blank, which callers treat as "no filter".
    pub fn parse(raw: &str) -> Option<Self> {
        let text = normalize_text(raw);
        (!text.is_empty()).then_some(Self(text))
    }

    /// Returns the normalized query text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the query is a substring of `text` after normalizing it.
    pub fn matches_text(&self, text: &str) -> bool {
        normalize_text(text).contains(&self.0)
    }

    /// Returns true if the record's id, title, or creators contain the query.
    pub fn matches(&self, record: &CatalogRecord) -> bool {
        record.id_lower().contains(&self.0)
            || record.title_lower().contains(&self.0)
            || record.creators_haystack().contains(&self.0)
    }
}

/// Filters records by a raw query, preserving input order.
///
/// A blank query returns every input record unchanged.
pub fn filter<'a, I>(records: I, raw_query: &str) -> Vec<&'a CatalogRecord>
where
    I: IntoIterator<Item = &'a CatalogRecord>,
{
    let Some(query) = Query::parse(raw_query) else {
        return records.into_iter().collect();
    };
    records.into_iter().filter(|r| query.matches(r)).collect()
}
