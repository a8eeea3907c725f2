//! Normalized catalog records.

use std::{
    collections::{BTreeMap, HashSet},
    fmt,
    str::FromStr,
};

use serde::Serialize;

use crate::{collate, key::NaturalKey};

/// A cheat file format.
///
/// The declaration order is the display order of badges and cheat sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FormatTag {
    /// JSON cheat file.
    Json,
    /// SHN cheat file.
    Shn,
    /// MC4 cheat file.
    Mc4,
}

impl FormatTag {
    /// All formats in display order.
    pub const ALL: [Self; 3] = [Self::Json, Self::Shn, Self::Mc4];

    /// Returns the tag as it appears in the data file.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Shn => "shn",
            Self::Mc4 => "mc4",
        }
    }
}

impl fmt::Display for FormatTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormatTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "shn" => Ok(Self::Shn),
            "mc4" => Ok(Self::Mc4),
            other => Err(format!("unknown format: {other}")),
        }
    }
}

/// Availability indicator shown on a format badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Led {
    /// A downloadable file exists.
    Good,
    /// No file, but cheats are known.
    Warn,
    /// Nothing available.
    Off,
}

/// Availability of one format for one record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatInfo {
    /// Whether a downloadable file exists.
    pub has_file: bool,
    /// Number of cheats. Authoritative for badges.
    pub cheats_count: u64,
    /// Cheat names. Authoritative for the detail listing; may be empty even when
    /// `cheats_count` is not.
    pub cheats: Vec<String>,
}

impl FormatInfo {
    /// Returns the badge indicator for this format.
    pub fn led(&self) -> Led {
        if self.has_file {
            Led::Good
        } else if self.cheats_count > 0 {
            Led::Warn
        } else {
            Led::Off
        }
    }

    /// Returns true if the format should be shown as a badge.
    pub fn has_cheats(&self) -> bool {
        self.cheats_count > 0 || !self.cheats.is_empty()
    }
}

/// A normalized, immutable catalog record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogRecord {
    /// Natural key (serialized as `id` and `version`).
    #[serde(flatten)]
    pub(crate) key: NaturalKey,
    /// Display title.
    pub(crate) title: Option<String>,
    /// Cheat authors in source order.
    pub(crate) creators: Vec<String>,
    /// Total cheats across formats.
    pub(crate) cheats_total: u64,
    /// Per-format availability, in display order.
    pub(crate) formats: BTreeMap<FormatTag, FormatInfo>,
    /// Position in the sorted corpus.
    pub(crate) ordinal: usize,
    /// Lowercased id used for matching.
    #[serde(skip)]
    pub(crate) id_lower: String,
    /// Lowercased title used for matching and sorting.
    #[serde(skip)]
    pub(crate) title_lower: String,
    /// Lowercased, whitespace-joined creators used for matching.
    #[serde(skip)]
    pub(crate) creators_haystack: String,
}

impl CatalogRecord {
    /// Returns the natural key.
    pub fn key(&self) -> &NaturalKey {
        &self.key
    }

    /// Returns the trimmed id.
    pub fn id(&self) -> &str {
        self.key.id()
    }

    /// Returns the trimmed version.
    pub fn version(&self) -> &str {
        self.key.version()
    }

    /// Returns the title, or an empty string when absent.
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// Returns the creators in source order.
    pub fn creators(&self) -> &[String] {
        &self.creators
    }

    /// Returns the total cheat count.
    pub fn cheats_total(&self) -> u64 {
        self.cheats_total
    }

    /// Returns the formats present on this record, in display order.
    pub fn formats(&self) -> &BTreeMap<FormatTag, FormatInfo> {
        &self.formats
    }

    /// Returns one format, if present.
    pub fn format(&self, tag: FormatTag) -> Option<&FormatInfo> {
        self.formats.get(&tag)
    }

    /// Returns the formats that should be shown as badges.
    pub fn badges(&self) -> impl Iterator<Item = (FormatTag, &FormatInfo)> {
        self.formats
            .iter()
            .filter(|(_, info)| info.has_cheats())
            .map(|(tag, info)| (*tag, info))
    }

    /// Returns the ordinal handle of this record.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    /// Returns the lowercased id.
    pub fn id_lower(&self) -> &str {
        &self.id_lower
    }

    /// Returns the lowercased title.
    pub fn title_lower(&self) -> &str {
        &self.title_lower
    }

    /// Returns the creators search haystack.
    pub fn creators_haystack(&self) -> &str {
        &self.creators_haystack
    }

    /// Returns creators for display: deduplicated case-insensitively (first spelling wins)
    /// and sorted under the catalog collation.
    pub fn display_creators(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        let mut unique: Vec<&str> = self
            .creators
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty() && seen.insert(c.to_lowercase()))
            .collect();
        unique.sort_by(|a, b| collate::compare(a, b));
        unique
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::record;

    #[test]
    fn led_prefers_file_over_count() {
        let good = FormatInfo {
            has_file: true,
            cheats_count: 0,
            cheats: vec![],
        };
        let warn = FormatInfo {
            has_file: false,
            cheats_count: 2,
            cheats: vec![],
        };
        assert_eq!(good.led(), Led::Good);
        assert_eq!(warn.led(), Led::Warn);
        assert_eq!(FormatInfo::default().led(), Led::Off);
    }

    #[test]
    fn has_cheats_uses_count_or_list() {
        let listed = FormatInfo {
            cheats: vec!["Infinite HP".into()],
            ..FormatInfo::default()
        };
        let counted = FormatInfo {
            cheats_count: 1,
            ..FormatInfo::default()
        };
        assert!(listed.has_cheats());
        assert!(counted.has_cheats());
        assert!(!FormatInfo::default().has_cheats());
    }

    #[test]
    fn format_tag_round_trips_through_str() {
        for tag in FormatTag::ALL {
            assert_eq!(tag.as_str().parse::<FormatTag>().unwrap(), tag);
        }
        assert!("zip".parse::<FormatTag>().is_err());
    }

    #[test]
    fn display_creators_dedupes_and_sorts() {
        let mut r = record("CUSA1", "01.00", "Game");
        r.creators = vec![
            "zed".into(),
            "Alice".into(),
            " ".into(),
            "alice".into(),
            "Bob".into(),
        ];
        assert_eq!(r.display_creators(), vec!["Alice", "Bob", "zed"]);
    }

    #[test]
    fn serializes_key_inline() {
        let r = record("CUSA12345", "01.00", "Demo Game");
        let value = serde_json::to_value(&r).unwrap();
        assert_eq!(value["id"], "CUSA12345");
        assert_eq!(value["version"], "01.00");
        assert_eq!(value["title"], "Demo Game");
        assert!(value.get("idLower").is_none());
    }
}
