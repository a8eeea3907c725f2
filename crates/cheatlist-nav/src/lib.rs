//! Deep links and navigation for cheatlist.
//!
//! - **Codec**: a record's natural key as a URL fragment, `#<id>-<version>`
//! - **State machine**: a pure `transition(state, event, catalog)` deciding the next state
//!   and whether history is written
//! - **History**: the trait the session writes through, plus an in-memory implementation
//! - **Session**: [`CatalogSession`], which owns a catalog and a history and exposes the
//!   command interface
//!
//! Only user-initiated open and close write history. Transitions that come from observing
//! the fragment never write it back.
//!
//! # Example
//!
//! ```
//! use cheatlist_catalog::Catalog;
//! use cheatlist_nav::{CatalogSession, History, MemoryHistory, NavState, SessionCommands};
//!
//! let catalog = Catalog::from_json(
//!     r#"[{"id": "CUSA12345", "version": "01.00", "title": "Demo Game"}]"#,
//!     "inline",
//! )
//! .unwrap();
//! let history = MemoryHistory::new("https://cheats.example/").unwrap();
//! let mut session = CatalogSession::boot(catalog, history);
//!
//! session.select_record(0);
//! assert_eq!(session.state(), NavState::Open(0));
//! assert_eq!(session.history().fragment(), "#CUSA12345-01.00");
//! ```

#![warn(missing_docs)]

mod codec;
mod history;
mod session;
mod state;

pub use codec::{TOKEN_SEPARATOR, TokenError, decode, encode, encode_key, try_decode};
pub use history::{History, MemoryHistory};
pub use session::{CatalogSession, SessionChange, SessionCommands, StateListener};
pub use state::{
    HistoryWrite, NavEvent, NavState, Resolution, Transition, has_fragment, resolve, transition,
};
