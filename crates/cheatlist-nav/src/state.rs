//! The navigation state machine as a pure transition function.
//!
//! `transition` maps the current state and one event to the next state and the history write
//! that should accompany it. It never touches a history itself, so every branch is testable
//! with nothing but a catalog.

use cheatlist_catalog::{Catalog, NaturalKey};
use tracing::debug;

use crate::codec::{decode, encode};

/// Whether the detail view is showing a record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NavState {
    /// No record open.
    #[default]
    Closed,
    /// The record with this ordinal is open.
    Open(usize),
}

impl NavState {
    /// Returns the open record's ordinal.
    pub fn ordinal(self) -> Option<usize> {
        match self {
            Self::Closed => None,
            Self::Open(ordinal) => Some(ordinal),
        }
    }

    /// Returns true if a record is open.
    pub fn is_open(self) -> bool {
        matches!(self, Self::Open(_))
    }
}

/// Something that may move the state machine.
///
/// Every event carries the fragment that was current when it happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent<'a> {
    /// Session start; resolve the initial fragment.
    Boot {
        /// Fragment at boot.
        fragment: &'a str,
    },
    /// The user selected a record.
    Open {
        /// Ordinal of the selected record.
        ordinal: usize,
        /// Fragment before the selection.
        fragment: &'a str,
    },
    /// The user dismissed the detail view.
    Close {
        /// Fragment before closing.
        fragment: &'a str,
    },
    /// The fragment changed underneath the session (back, forward, or a manual edit).
    External {
        /// The new fragment.
        fragment: &'a str,
    },
}

/// What to do to the history alongside a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryWrite {
    /// Leave history alone.
    Keep,
    /// Push a new entry carrying this token.
    Push(String),
    /// Push a new entry with the fragment cleared.
    Clear,
}

/// The outcome of one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// State after the event.
    pub next: NavState,
    /// History write to perform.
    pub write: HistoryWrite,
}

impl Transition {
    /// Leaves the state and history unchanged.
    fn stay(state: NavState) -> Self {
        Self::to(state)
    }

    /// Moves to `next` without writing history.
    fn to(next: NavState) -> Self {
        Self {
            next,
            write: HistoryWrite::Keep,
        }
    }

    /// Returns true if this transition writes history.
    pub fn writes_history(&self) -> bool {
        self.write != HistoryWrite::Keep
    }
}

/// What a fragment points at in a catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// No fragment at all.
    Absent,
    /// The fragment is not a token.
    Malformed,
    /// A well-formed token naming no record.
    Unknown(NaturalKey),
    /// The ordinal of the record the token names.
    Record(usize),
}

/// Returns true if a fragment is present. A bare `#` counts as absent.
pub fn has_fragment(fragment: &str) -> bool {
    !fragment.is_empty() && fragment != "#"
}

/// Resolves a fragment against the catalog's lookup index.
pub fn resolve(fragment: &str, catalog: &Catalog) -> Resolution {
    if !has_fragment(fragment) {
        return Resolution::Absent;
    }
    let Some(key) = decode(fragment) else {
        return Resolution::Malformed;
    };
    match catalog.index().get(&key) {
        Some(ordinal) => Resolution::Record(ordinal),
        None => Resolution::Unknown(key),
    }
}

/// Computes the next state and history write for an event.
pub fn transition(state: NavState, event: NavEvent<'_>, catalog: &Catalog) -> Transition {
    let outcome = match event {
        NavEvent::Boot { fragment } => match resolve(fragment, catalog) {
            Resolution::Record(ordinal) => Transition::to(NavState::Open(ordinal)),
            _ => Transition::stay(state),
        },
        NavEvent::Open { ordinal, fragment } => match catalog.get(ordinal) {
            None => Transition::stay(state),
            Some(record) => {
                let already_encoded = decode(fragment).is_some_and(|key| &key == record.key());
                Transition {
                    next: NavState::Open(ordinal),
                    write: if already_encoded {
                        HistoryWrite::Keep
                    } else {
                        HistoryWrite::Push(encode(record))
                    },
                }
            }
        },
        NavEvent::Close { fragment } => Transition {
            next: NavState::Closed,
            write: if has_fragment(fragment) {
                HistoryWrite::Clear
            } else {
                HistoryWrite::Keep
            },
        },
        NavEvent::External { fragment } => match resolve(fragment, catalog) {
            Resolution::Absent | Resolution::Malformed => Transition::to(NavState::Closed),
            Resolution::Unknown(_) => Transition::stay(state),
            Resolution::Record(ordinal) if opens_same_key(state, ordinal, catalog) => {
                Transition::stay(state)
            }
            Resolution::Record(ordinal) => Transition::to(NavState::Open(ordinal)),
        },
    };

    if outcome.next != state || outcome.writes_history() {
        debug!(?event, from = ?state, to = ?outcome.next, write = ?outcome.write, "navigation");
    }
    outcome
}

/// Returns true if `state` already shows a record with the same key as `ordinal`.
fn opens_same_key(state: NavState, ordinal: usize, catalog: &Catalog) -> bool {
    let Some(current) = state.ordinal().and_then(|o| catalog.get(o)) else {
        return false;
    };
    catalog
        .get(ordinal)
        .is_some_and(|target| target.key() == current.key())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_json(
            r#"[
                {"id": "CUSA12345", "version": "01.00", "title": "Demo Game"},
                {"id": "CUSA00002", "version": "01.00", "title": "Another"}
            ]"#,
            "inline",
        )
        .unwrap()
    }

    fn ordinal_of(catalog: &Catalog, id: &str) -> usize {
        let key = NaturalKey::new(id, "01.00").unwrap();
        catalog.index().get(&key).unwrap()
    }

    #[test]
    fn boot_on_known_token_opens_without_writing() {
        let catalog = catalog();
        let t = transition(
            NavState::Closed,
            NavEvent::Boot {
                fragment: "#CUSA12345-01.00",
            },
            &catalog,
        );
        assert_eq!(t.next, NavState::Open(ordinal_of(&catalog, "CUSA12345")));
        assert!(!t.writes_history());
    }

    #[test]
    fn boot_on_anything_else_stays_closed() {
        let catalog = catalog();
        for fragment in ["", "#", "#bogus", "#CUSA99999-01.00", "#CUSA%zz-1"] {
            let t = transition(NavState::Closed, NavEvent::Boot { fragment }, &catalog);
            assert_eq!(t.next, NavState::Closed, "fragment {fragment:?}");
            assert!(!t.writes_history());
        }
    }

    #[test]
    fn open_pushes_token_when_fragment_differs() {
        let catalog = catalog();
        let ordinal = ordinal_of(&catalog, "CUSA12345");
        let t = transition(
            NavState::Closed,
            NavEvent::Open {
                ordinal,
                fragment: "",
            },
            &catalog,
        );
        assert_eq!(t.next, NavState::Open(ordinal));
        assert_eq!(t.write, HistoryWrite::Push("#CUSA12345-01.00".to_string()));
    }

    #[test]
    fn open_keeps_history_when_fragment_already_names_record() {
        let catalog = catalog();
        let ordinal = ordinal_of(&catalog, "CUSA12345");
        for fragment in ["#CUSA12345-01.00", "CUSA12345-01.00", "#%43USA12345-01.00"] {
            let t = transition(NavState::Closed, NavEvent::Open { ordinal, fragment }, &catalog);
            assert_eq!(t.next, NavState::Open(ordinal));
            assert!(!t.writes_history(), "fragment {fragment:?}");
        }
    }

    #[test]
    fn open_switches_between_records() {
        let catalog = catalog();
        let first = ordinal_of(&catalog, "CUSA12345");
        let second = ordinal_of(&catalog, "CUSA00002");
        let t = transition(
            NavState::Open(first),
            NavEvent::Open {
                ordinal: second,
                fragment: "#CUSA12345-01.00",
            },
            &catalog,
        );
        assert_eq!(t.next, NavState::Open(second));
        assert_eq!(t.write, HistoryWrite::Push("#CUSA00002-01.00".to_string()));
    }

    #[test]
    fn open_unknown_ordinal_is_a_no_op() {
        let catalog = catalog();
        let t = transition(
            NavState::Closed,
            NavEvent::Open {
                ordinal: 99,
                fragment: "",
            },
            &catalog,
        );
        assert_eq!(t, Transition::stay(NavState::Closed));
    }

    #[test]
    fn close_clears_present_fragment() {
        let catalog = catalog();
        let t = transition(
            NavState::Open(0),
            NavEvent::Close {
                fragment: "#CUSA12345-01.00",
            },
            &catalog,
        );
        assert_eq!(t.next, NavState::Closed);
        assert_eq!(t.write, HistoryWrite::Clear);
    }

    #[test]
    fn close_without_fragment_writes_nothing() {
        let catalog = catalog();
        for fragment in ["", "#"] {
            let t = transition(NavState::Open(0), NavEvent::Close { fragment }, &catalog);
            assert_eq!(t.next, NavState::Closed);
            assert!(!t.writes_history());
        }
    }

    #[test]
    fn external_events_never_write_history() {
        let catalog = catalog();
        let fragments = ["", "#", "#bogus", "#CUSA12345-01.00", "#CUSA99999-01.00"];
        for state in [NavState::Closed, NavState::Open(0), NavState::Open(1)] {
            for fragment in fragments {
                let t = transition(state, NavEvent::External { fragment }, &catalog);
                assert!(!t.writes_history(), "{state:?} {fragment:?}");
            }
        }
    }

    #[test]
    fn external_malformed_or_absent_closes() {
        let catalog = catalog();
        for fragment in ["", "#bogus"] {
            let t = transition(NavState::Open(0), NavEvent::External { fragment }, &catalog);
            assert_eq!(t.next, NavState::Closed);
            let t = transition(NavState::Closed, NavEvent::External { fragment }, &catalog);
            assert_eq!(t.next, NavState::Closed);
        }
    }

    #[test]
    fn external_known_key_opens_or_switches() {
        let catalog = catalog();
        let first = ordinal_of(&catalog, "CUSA12345");
        let second = ordinal_of(&catalog, "CUSA00002");
        let fragment = "#CUSA00002-01.00";

        let t = transition(NavState::Closed, NavEvent::External { fragment }, &catalog);
        assert_eq!(t.next, NavState::Open(second));

        let t = transition(NavState::Open(first), NavEvent::External { fragment }, &catalog);
        assert_eq!(t.next, NavState::Open(second));

        let t = transition(NavState::Open(second), NavEvent::External { fragment }, &catalog);
        assert_eq!(t, Transition::stay(NavState::Open(second)));
    }

    #[test]
    fn external_unknown_key_leaves_state_alone() {
        let catalog = catalog();
        let fragment = "#CUSA99999-01.00";
        for state in [NavState::Closed, NavState::Open(1)] {
            let t = transition(state, NavEvent::External { fragment }, &catalog);
            assert_eq!(t.next, state);
        }
    }

    #[test]
    fn external_same_key_on_shadowed_duplicate_is_a_no_op() {
        let catalog = Catalog::from_json(
            r#"[
                {"id": "CUSA1", "version": "01.00", "title": "B copy"},
                {"id": "CUSA1", "version": "01.00", "title": "A copy"}
            ]"#,
            "inline",
        )
        .unwrap();
        // Ordinal 0 is "A copy", shadowed in the index by "B copy".
        let t = transition(
            NavState::Open(0),
            NavEvent::External {
                fragment: "#CUSA1-01.00",
            },
            &catalog,
        );
        assert_eq!(t.next, NavState::Open(0));
    }

    #[test]
    fn resolve_classifies_fragments() {
        let catalog = catalog();
        assert_eq!(resolve("", &catalog), Resolution::Absent);
        assert_eq!(resolve("#", &catalog), Resolution::Absent);
        assert_eq!(resolve("#bogus", &catalog), Resolution::Malformed);
        assert_eq!(
            resolve("#CUSA99999-01.00", &catalog),
            Resolution::Unknown(NaturalKey::new("CUSA99999", "01.00").unwrap())
        );
        assert!(matches!(
            resolve("#CUSA12345-01.00", &catalog),
            Resolution::Record(_)
        ));
    }
}
