//! Deep-link token codec.
//!
//! A token is the URL fragment that names one record: `#<id>-<version>`, with both halves
//! percent-encoded. Decoding never fails loudly; a malformed token simply names nothing.

use std::{error::Error, fmt};

use cheatlist_catalog::{CatalogRecord, NaturalKey};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use tracing::trace;

/// Separator between the encoded id and the encoded version.
pub const TOKEN_SEPARATOR: char = '-';

/// Bytes escaped in each half of a token.
///
/// This is the URI-component set plus `-`, so a dash inside an id or version is never
/// mistaken for the separator.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Why a token did not decode to a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// Nothing after the leading `#`.
    Empty,
    /// No separator with text on both sides.
    NoSeparator,
    /// A `%` escape is truncated, not hex, or decodes to invalid UTF-8.
    BadEscape,
    /// One half is blank after decoding and trimming.
    BlankSide,
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::Empty => "empty token",
            Self::NoSeparator => "token has no id-version separator",
            Self::BadEscape => "token has an invalid percent escape",
            Self::BlankSide => "token has a blank id or version",
        };
        f.write_str(message)
    }
}

impl Error for TokenError {}

/// Encodes a record's key as a fragment token.
pub fn encode(record: &CatalogRecord) -> String {
    encode_key(record.key())
}

/// Encodes a natural key as a fragment token, e.g. `#CUSA12345-01.00`.
pub fn encode_key(key: &NaturalKey) -> String {
    format!(
        "#{}{TOKEN_SEPARATOR}{}",
        utf8_percent_encode(key.id(), COMPONENT),
        utf8_percent_encode(key.version(), COMPONENT)
    )
}

/// Decodes a fragment token into a natural key.
///
/// The leading `#` is optional. Returns `None` for anything malformed.
pub fn decode(token: &str) -> Option<NaturalKey> {
    match try_decode(token) {
        Ok(key) => Some(key),
        Err(reason) => {
            trace!(token, %reason, "fragment names no record");
            None
        }
    }
}

/// Decodes a fragment token, reporting why it is malformed.
pub fn try_decode(token: &str) -> Result<NaturalKey, TokenError> {
    let body = token.strip_prefix('#').unwrap_or(token);
    if body.is_empty() {
        return Err(TokenError::Empty);
    }

    // The rightmost separator bounds the version.
    let split = body
        .rfind(TOKEN_SEPARATOR)
        .filter(|&idx| idx > 0 && idx < body.len() - 1)
        .ok_or(TokenError::NoSeparator)?;

    let id = decode_component(&body[..split])?;
    let version = decode_component(&body[split + 1..])?;
    NaturalKey::new(&id, &version).ok_or(TokenError::BlankSide)
}

/// Percent-decodes one half of a token strictly.
fn decode_component(encoded: &str) -> Result<String, TokenError> {
    if !escapes_are_valid(encoded) {
        return Err(TokenError::BadEscape);
    }
    percent_decode_str(encoded)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| TokenError::BadEscape)
}

/// Returns true if every `%` is followed by two hex digits.
fn escapes_are_valid(encoded: &str) -> bool {
    let bytes = encoded.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape = bytes.get(i + 1..i + 3);
            if !escape.is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit)) {
                return false;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(id: &str, version: &str) -> NaturalKey {
        NaturalKey::new(id, version).unwrap()
    }

    #[test]
    fn encodes_readable_tokens() {
        assert_eq!(encode_key(&key("CUSA12345", "01.00")), "#CUSA12345-01.00");
    }

    #[test]
    fn decodes_scenario_token() {
        let decoded = decode("#CUSA12345-01.00").unwrap();
        assert_eq!(decoded.to_string(), "CUSA12345|01.00");
    }

    #[test]
    fn hash_is_optional() {
        assert_eq!(decode("CUSA12345-01.00"), Some(key("CUSA12345", "01.00")));
    }

    #[test]
    fn escapes_reserved_characters() {
        let k = key("My Game/EU", "v1 β");
        let token = encode_key(&k);
        assert_eq!(token, "#My%20Game%2FEU-v1%20%CE%B2");
        assert_eq!(decode(&token), Some(k));
    }

    #[test]
    fn keeps_uri_component_marks() {
        let token = encode_key(&key("a_b.c!d~e*f'g(h)", "1"));
        assert_eq!(token, "#a_b.c!d~e*f'g(h)-1");
    }

    #[test]
    fn dashes_inside_halves_round_trip() {
        let k = key("CUSA-123", "1.0-beta");
        let token = encode_key(&k);
        assert_eq!(token, "#CUSA%2D123-1.0%2Dbeta");
        assert_eq!(decode(&token), Some(k));
    }

    #[test]
    fn round_trips_assorted_keys() {
        let cases = [
            ("CUSA12345", "01.00"),
            ("PPSA00001", "1.000.000"),
            ("id with spaces", "v|2"),
            ("#hash", "%percent"),
            ("日本語", "１.０"),
            ("a-b-c", "-"),
        ];
        for (id, version) in cases {
            let k = key(id, version);
            let token = encode_key(&k);
            assert_eq!(decode(&token), Some(k), "token {token}");
        }
    }

    #[test]
    fn unescaped_dash_splits_on_the_last_one() {
        assert_eq!(decode("#CUSA-1-01.00"), Some(key("CUSA-1", "01.00")));
    }

    #[test]
    fn rejects_tokens_without_separator() {
        assert_eq!(try_decode("#bogus"), Err(TokenError::NoSeparator));
        assert_eq!(try_decode("#-01.00"), Err(TokenError::NoSeparator));
        assert_eq!(try_decode("#CUSA12345-"), Err(TokenError::NoSeparator));
        assert_eq!(try_decode("#-"), Err(TokenError::NoSeparator));
    }

    #[test]
    fn rejects_empty_tokens() {
        assert_eq!(try_decode(""), Err(TokenError::Empty));
        assert_eq!(try_decode("#"), Err(TokenError::Empty));
    }

    #[test]
    fn rejects_bad_escapes() {
        assert_eq!(try_decode("#CUSA%-01"), Err(TokenError::BadEscape));
        assert_eq!(try_decode("#CUSA%2-01"), Err(TokenError::BadEscape));
        assert_eq!(try_decode("#CUSA%zz-01"), Err(TokenError::BadEscape));
        assert_eq!(try_decode("#CUSA%FF-01"), Err(TokenError::BadEscape));
    }

    #[test]
    fn rejects_blank_halves_after_decoding() {
        assert_eq!(try_decode("#%20-01.00"), Err(TokenError::BlankSide));
        assert_eq!(try_decode("#CUSA1-%20%20"), Err(TokenError::BlankSide));
    }

    #[test]
    fn trims_decoded_halves() {
        assert_eq!(decode("#%20CUSA1%20-%2001%20"), Some(key("CUSA1", "01")));
    }
}
