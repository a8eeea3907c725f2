//! Loosely-typed records as they appear in the data file.
//!
//! The data file is produced by more than one generator, so every field is optional and
//! every field tolerates the wrong JSON type. Deserializing a JSON object into a
//! [`RawRecord`] never fails: numbers stand in for strings and counts where a generator
//! wrote one, and any other field of the wrong type reads as absent.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use serde_with::{DefaultOnError, serde_as};

/// A single record exactly as read from the data file.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawRecord {
    /// Title identifier, e.g. `CUSA12345`.
    pub id: Text,
    /// Version string, e.g. `01.00`.
    pub version: Text,
    /// Display title.
    pub title: Text,
    /// Precomputed lowercase title, preferred over `title` for searching and sorting.
    pub title_lower: Text,
    /// Precomputed lowercase id, preferred over `id` for searching.
    pub id_lower: Text,
    /// Cheat authors, as a list or as one delimited string.
    #[serde_as(as = "DefaultOnError")]
    pub creators: Option<StringOrList>,
    /// Precomputed lowercase authors, preferred over `creators` for searching.
    #[serde_as(as = "DefaultOnError")]
    pub creators_lower: Option<StringOrList>,
    /// Total number of cheats across formats.
    pub cheats_total: Count,
    /// Per-format availability.
    #[serde_as(as = "DefaultOnError")]
    pub formats: RawFormats,
}

/// The known formats of a raw record. Unknown format keys are ignored.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawFormats {
    /// JSON cheat file.
    #[serde_as(as = "DefaultOnError")]
    pub json: Option<RawFormat>,
    /// SHN cheat file.
    #[serde_as(as = "DefaultOnError")]
    pub shn: Option<RawFormat>,
    /// MC4 cheat file.
    #[serde_as(as = "DefaultOnError")]
    pub mc4: Option<RawFormat>,
}

/// Availability of one format.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawFormat {
    /// Whether a downloadable file exists.
    pub has_file: Flag,
    /// Number of cheats, authoritative for badges.
    pub cheats_count: Count,
    /// Cheat names, authoritative for the detail listing. Non-string entries read as `None`.
    #[serde_as(as = "DefaultOnError<Vec<DefaultOnError>>")]
    pub cheats: Vec<Option<String>>,
}

/// A field that may hold one string or a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    /// A single, possibly delimited, string.
    One(String),
    /// A list whose `null` entries read as `None`.
    Many(Vec<Option<String>>),
}

impl StringOrList {
    /// Joins the value into a single whitespace-separated string.
    pub fn joined(&self) -> String {
        match self {
            Self::One(s) => s.clone(),
            Self::Many(items) => items
                .iter()
                .map(|item| item.as_deref().unwrap_or_default())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }

    /// Splits the value into individual trimmed, non-blank entries.
    ///
    /// A single string is split on `,` and `;`.
    pub fn entries(&self) -> Vec<String> {
        let raw: Vec<&str> = match self {
            Self::One(s) => s.split([',', ';']).collect(),
            Self::Many(items) => items.iter().flatten().map(String::as_str).collect(),
        };
        raw.into_iter()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// A string field that also accepts a JSON number, kept as the number's JSON text.
///
/// `"version": 1.5` reads as `"1.5"` and `"id": 12345` as `"12345"`. Any other type reads
/// as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Text(pub Option<String>);

impl Text {
    /// Coerces a JSON value to text.
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::String(s) => Self(Some(s)),
            Value::Number(n) => Self(Some(n.to_string())),
            _ => Self(None),
        }
    }

    /// Borrows the text, if present.
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// Returns the owned text, if present.
    pub fn into_inner(self) -> Option<String> {
        self.0
    }
}

impl From<&str> for Text {
    fn from(s: &str) -> Self {
        Self(Some(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for Text {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

/// A non-negative count coerced from any JSON value.
///
/// Integers are taken as-is, floats are truncated, numeric strings are parsed, negative
/// values clamp to zero, and everything else reads as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Count(pub u64);

impl Count {
    /// Coerces a JSON value to a count.
    pub fn from_value(value: &Value) -> Self {
        let n = match value {
            Value::Number(n) => n
                .as_u64()
                .or_else(|| n.as_i64().map(|_| 0))
                .or_else(|| n.as_f64().map(float_count)),
            Value::String(s) => parse_count(s.trim()),
            _ => None,
        };
        Self(n.unwrap_or(0))
    }
}

impl<'de> Deserialize<'de> for Count {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

/// Parses a numeric string into a count.
fn parse_count(s: &str) -> Option<u64> {
    if s.is_empty() {
        return Some(0);
    }
    s.parse::<u64>()
        .ok()
        .or_else(|| s.parse::<f64>().ok().map(float_count))
}

/// Truncates a float to a count, treating negatives and NaN as zero.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn float_count(f: f64) -> u64 {
    if f.is_finite() && f > 0.0 {
        f.trunc() as u64
    } else {
        0
    }
}

/// A boolean coerced from any JSON value by truthiness.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Flag(pub bool);

impl Flag {
    /// Coerces a JSON value to a flag.
    pub fn from_value(value: &Value) -> Self {
        let truthy = match value {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Array(_) | Value::Object(_) => true,
        };
        Self(truthy)
    }
}

impl<'de> Deserialize<'de> for Flag {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}
