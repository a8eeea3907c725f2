//! Cheat search within one record.
//!
//! Filters each format's cheat list independently with the same normalization and substring
//! rule as the catalog search.

use serde::Serialize;

use crate::{
    record::{CatalogRecord, FormatInfo, FormatTag},
    search::Query,
};

/// The cheats of one format that survived filtering.
#[derive(Debug, Clone, Serialize)]
pub struct CheatSection<'a> {
    /// Which format these cheats belong to.
    pub format: FormatTag,
    /// The format's availability, for badges.
    #[serde(skip)]
    pub info: &'a FormatInfo,
    /// Matching cheats in source order.
    pub cheats: Vec<&'a str>,
}

impl CheatSection<'_> {
    /// Returns true if this section has no cheats to list.
    pub fn is_empty(&self) -> bool {
        self.cheats.is_empty()
    }

    /// Returns the number of cheats listed.
    pub fn len(&self) -> usize {
        self.cheats.len()
    }
}

/// What the detail view should show for a record's cheats.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "state", content = "sections", rename_all = "snake_case")]
pub enum CheatListing<'a> {
    /// One section per retained format.
    ///
    /// With a blank query every format on the record is retained, so a section may be
    /// empty; that section shows as "no cheats". With a query, only formats with at least
    /// one match are retained.
    Sections(Vec<CheatSection<'a>>),
    /// Blank query, and the record has no formats at all.
    NoCheats,
    /// A query is active and nothing in any format matched.
    NoMatches,
}

impl CheatListing<'_> {
    /// Returns the total number of cheats listed across sections.
    pub fn total(&self) -> usize {
        match self {
            Self::Sections(sections) => sections.iter().map(CheatSection::len).sum(),
            Self::NoCheats | Self::NoMatches => 0,
        }
    }

    /// Returns the listed sections, if any.
    pub fn sections(&self) -> &[CheatSection<'_>] {
        match self {
            Self::Sections(sections) => sections,
            Self::NoCheats | Self::NoMatches => &[],
        }
    }
}

/// Filters a record's cheat lists by a raw query.
pub fn filter_cheats<'a>(record: &'a CatalogRecord, raw_query: &str) -> CheatListing<'a> {
    let query = Query::parse(raw_query);

    let sections: Vec<CheatSection<'a>> = record
        .formats()
        .iter()
        .map(|(tag, info)| CheatSection {
            format: *tag,
            info,
            cheats: info
                .cheats
                .iter()
                .map(String::as_str)
                .filter(|c| query.as_ref().is_none_or(|q| q.matches_text(c)))
                .collect(),
        })
        .collect();

    match query {
        None if sections.is_empty() => CheatListing::NoCheats,
        None => CheatListing::Sections(sections),
        Some(_) => {
            let matched: Vec<CheatSection<'a>> =
                sections.into_iter().filter(|s| !s.is_empty()).collect();
            if matched.is_empty() {
                CheatListing::NoMatches
            } else {
                CheatListing::Sections(matched)
            }
        }
    }
}
