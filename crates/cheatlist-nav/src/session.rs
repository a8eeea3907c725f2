//! The catalog session: one loaded catalog, one history, and the navigation state.
//!
//! Presentation code drives the session only through [`SessionCommands`] and learns about
//! changes by subscribing a [`StateListener`]. Reading views (`results`, `open_record`,
//! `cheat_listing`) never mutates anything.

use cheatlist_catalog::{Catalog, CatalogRecord, CheatListing, filter, filter_cheats};
use tracing::{debug, info};

use crate::{
    history::History,
    state::{HistoryWrite, NavEvent, NavState, transition},
};

/// A state change the presentation layer may want to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionChange {
    /// The search query changed; `results` may differ.
    SearchChanged {
        /// The raw query now in effect.
        query: String,
    },
    /// A record was opened.
    Opened {
        /// Ordinal of the open record.
        ordinal: usize,
    },
    /// The detail view was closed.
    Closed,
    /// The cheat query for the open record changed.
    CheatQueryChanged {
        /// The raw cheat query now in effect.
        query: String,
    },
}

/// Receives session changes.
pub trait StateListener {
    /// Called once per change, after the session has been updated.
    fn on_change(&mut self, change: &SessionChange);
}

impl<F> StateListener for F
where
    F: FnMut(&SessionChange),
{
    fn on_change(&mut self, change: &SessionChange) {
        self(change);
    }
}

/// The commands the presentation layer may issue.
pub trait SessionCommands {
    /// Opens the record with this ordinal. Unknown ordinals are ignored.
    fn select_record(&mut self, ordinal: usize);

    /// Closes the detail view.
    fn close_detail(&mut self);

    /// Replaces the catalog search query.
    fn set_search_query(&mut self, text: &str);

    /// Reacts to the fragment having changed outside the session.
    fn on_external_navigation(&mut self, fragment: &str);

    /// Replaces the cheat query for the open record.
    fn set_cheat_query(&mut self, text: &str);
}

/// A running catalog session.
pub struct CatalogSession<H: History> {
    /// The loaded corpus and its index.
    catalog: Catalog,
    /// Where fragments are read from and written to.
    history: H,
    /// Navigation state.
    state: NavState,
    /// Raw catalog search query.
    search_query: String,
    /// Raw cheat query for the open record.
    cheat_query: String,
    /// Subscribers, notified in subscription order.
    listeners: Vec<Box<dyn StateListener>>,
}

impl<H: History> CatalogSession<H> {
    /// Starts a session over a loaded catalog, resolving the history's current fragment.
    ///
    /// Boot never writes history: a fragment that names a record already encodes the open
    /// state.
    pub fn boot(catalog: Catalog, history: H) -> Self {
        let booted = transition(
            NavState::Closed,
            NavEvent::Boot {
                fragment: history.fragment(),
            },
            &catalog,
        );
        info!(
            records = catalog.len(),
            open = ?booted.next.ordinal(),
            "session started"
        );
        Self {
            catalog,
            history,
            state: booted.next,
            search_query: String::new(),
            cheat_query: String::new(),
            listeners: Vec::new(),
        }
    }

    /// Registers a listener for future changes.
    pub fn subscribe(&mut self, listener: impl StateListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Returns the catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns the history.
    pub fn history(&self) -> &H {
        &self.history
    }

    /// Returns the history for moving through it.
    ///
    /// Moving the cursor does not notify the session; follow it with
    /// [`SessionCommands::on_external_navigation`].
    pub fn history_mut(&mut self) -> &mut H {
        &mut self.history
    }

    /// Returns the navigation state.
    pub fn state(&self) -> NavState {
        self.state
    }

    /// Returns the raw search query.
    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    /// Returns the raw cheat query.
    pub fn cheat_query(&self) -> &str {
        &self.cheat_query
    }

    /// Returns the records matching the search query, in corpus order.
    pub fn results(&self) -> Vec<&CatalogRecord> {
        filter(self.catalog.records(), &self.search_query)
    }

    /// Returns the open record.
    pub fn open_record(&self) -> Option<&CatalogRecord> {
        self.state.ordinal().and_then(|o| self.catalog.get(o))
    }

    /// Returns the open record's cheats filtered by the cheat query.
    pub fn cheat_listing(&self) -> Option<CheatListing<'_>> {
        self.open_record()
            .map(|record| filter_cheats(record, &self.cheat_query))
    }

    /// Runs one event through the transition table and applies the outcome.
    ///
    /// A user open that lands on a record always resets the cheat query and reports
    /// [`SessionChange::Opened`], even when that record was already open.
    fn apply(&mut self, event: NavEvent<'_>) {
        let requested = if let NavEvent::Open { ordinal, .. } = event {
            Some(ordinal)
        } else {
            None
        };
        let outcome = transition(self.state, event, &self.catalog);
        match outcome.write {
            HistoryWrite::Keep => {}
            HistoryWrite::Push(token) => self.history.push_fragment(&token),
            HistoryWrite::Clear => self.history.push_cleared(),
        }
        let reopened = requested.is_some_and(|o| outcome.next == NavState::Open(o));
        if outcome.next == self.state && !reopened {
            return;
        }

        self.state = outcome.next;
        let change = match outcome.next {
            NavState::Open(ordinal) => {
                self.cheat_query.clear();
                SessionChange::Opened { ordinal }
            }
            NavState::Closed => SessionChange::Closed,
        };
        self.notify(&change);
    }

    /// Delivers a change to every listener.
    fn notify(&mut self, change: &SessionChange) {
        for listener in &mut self.listeners {
            listener.on_change(change);
        }
    }
}

impl<H: History> SessionCommands for CatalogSession<H> {
    fn select_record(&mut self, ordinal: usize) {
        let fragment = self.history.fragment().to_owned();
        self.apply(NavEvent::Open {
            ordinal,
            fragment: &fragment,
        });
    }

    fn close_detail(&mut self) {
        let fragment = self.history.fragment().to_owned();
        self.apply(NavEvent::Close {
            fragment: &fragment,
        });
    }

    fn set_search_query(&mut self, text: &str) {
        if self.search_query == text {
            return;
        }
        self.search_query = text.to_owned();
        debug!(query = text, "search query changed");
        let change = SessionChange::SearchChanged {
            query: text.to_owned(),
        };
        self.notify(&change);
    }

    fn on_external_navigation(&mut self, fragment: &str) {
        self.apply(NavEvent::External { fragment });
    }

    fn set_cheat_query(&mut self, text: &str) {
        if self.cheat_query == text {
            return;
        }
        self.cheat_query = text.to_owned();
        let change = SessionChange::CheatQueryChanged {
            query: text.to_owned(),
        };
        self.notify(&change);
    }
}
