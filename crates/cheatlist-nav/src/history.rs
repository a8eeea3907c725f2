//! Session history.
//!
//! The session reads the current fragment and pushes entries through [`History`]. The
//! in-memory implementation behaves like a browser's joint history: a list of locations with
//! a cursor, where pushing discards anything forward of the cursor.

use url::{ParseError, Position, Url};

/// The history the navigation session writes to.
pub trait History {
    /// Returns the current fragment including its `#`, or `""` when there is none.
    fn fragment(&self) -> &str;

    /// Pushes a new entry whose fragment is `token`. Path and query are kept.
    fn push_fragment(&mut self, token: &str);

    /// Pushes a new entry with the fragment removed. Path and query are kept.
    fn push_cleared(&mut self);
}

/// A history of URLs held in memory.
#[derive(Debug, Clone)]
pub struct MemoryHistory {
    /// Every entry, oldest first. Never empty.
    entries: Vec<Url>,
    /// Index of the current entry.
    cursor: usize,
}

impl MemoryHistory {
    /// Starts a history at `url`.
    pub fn new(url: &str) -> Result<Self, ParseError> {
        Ok(Self::from_url(Url::parse(url)?))
    }

    /// Starts a history at an already parsed URL.
    pub fn from_url(url: Url) -> Self {
        Self {
            entries: vec![url],
            cursor: 0,
        }
    }

    /// Returns the current location.
    pub fn current(&self) -> &Url {
        &self.entries[self.cursor]
    }

    /// Returns the current location as a string.
    pub fn href(&self) -> &str {
        self.current().as_str()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false; a history holds at least its starting entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the index of the current entry.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Steps back one entry. Returns false at the oldest entry.
    pub fn back(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    /// Steps forward one entry. Returns false at the newest entry.
    pub fn forward(&mut self) -> bool {
        if self.cursor + 1 >= self.entries.len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Pushes an entry with an arbitrary fragment, as a manual address-bar edit would.
    ///
    /// An empty fragment (or a bare `#`) clears it.
    pub fn navigate(&mut self, fragment: &str) {
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
        if fragment.is_empty() {
            self.push_cleared();
        } else {
            self.push_with(Some(fragment));
        }
    }

    /// Pushes a copy of the current entry with its fragment replaced.
    fn push_with(&mut self, fragment: Option<&str>) {
        let mut next = self.current().clone();
        next.set_fragment(fragment);
        self.entries.truncate(self.cursor + 1);
        self.entries.push(next);
        self.cursor += 1;
    }
}

impl History for MemoryHistory {
    fn fragment(&self) -> &str {
        let fragment = &self.current()[Position::AfterQuery..];
        if fragment == "#" { "" } else { fragment }
    }

    fn push_fragment(&mut self, token: &str) {
        self.push_with(Some(token.strip_prefix('#').unwrap_or(token)));
    }

    fn push_cleared(&mut self) {
        self.push_with(None);
    }
}
