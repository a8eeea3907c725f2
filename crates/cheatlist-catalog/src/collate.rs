//! Fixed-locale, base-strength collation.
//!
//! Catalog ordering must not depend on the host locale, so a single English collation is
//! used everywhere. Comparison happens at base strength: case and accents never decide an
//! ordering on their own, so `"Éclair"`, `"eclair"` and `"ECLAIR"` compare equal.
//!
//! Each string is canonically decomposed, combining marks are dropped, and the remaining
//! characters are lowercased. Characters are then weighted by class before code point, so
//! whitespace sorts before punctuation, punctuation before digits, and digits before
//! letters.

use std::cmp::Ordering;

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

/// The collation locale used for all ordering.
pub const COLLATION_LOCALE: &str = "en";

/// A primary collation weight: character class, then folded character.
type Weight = (u8, char);

/// A precomputed collation key for repeated comparisons.
pub type SortKey = Vec<Weight>;

/// Weights a folded character.
fn weight(c: char) -> Weight {
    let class = if c.is_whitespace() {
        0
    } else if c.is_alphabetic() {
        3
    } else if c.is_numeric() {
        2
    } else {
        1
    };
    (class, c)
}

/// Folds a string into its sequence of primary weights.
fn weights(s: &str) -> impl Iterator<Item = Weight> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .map(weight)
}

/// Compares two strings under the catalog collation.
pub fn compare(a: &str, b: &str) -> Ordering {
    weights(a).cmp(weights(b))
}

/// Builds a reusable collation key for `s`.
pub fn sort_key(s: &str) -> SortKey {
    weights(s).collect()
}
