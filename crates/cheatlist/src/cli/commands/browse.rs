//! Implementation of `cheatlist browse`.
//!
//! A line-driven session over stdin. Each line is one command; commands go through the
//! session's command interface, and the changes it reports are printed after each line.

use std::{
    cell::RefCell,
    io::{self, BufRead, IsTerminal, Write},
    process::ExitCode,
    rc::Rc,
};

use cheatlist_catalog::CatalogRecord;
use cheatlist_config::DataSource;
use cheatlist_nav::{CatalogSession, History, MemoryHistory, SessionChange, SessionCommands};

use crate::cli::{
    args::BrowseCommand,
    context::{CommandContext, parse_url_or_failure},
    output::{dim, format_detail, results_footer, results_table, warning},
};

/// Help text for the `help` command.
const HELP: &str = "\
commands:
  find [TEXT]     search titles, ids and creators (empty shows all)
  list            print the current results
  open N          open the record in row N
  close           close the open record
  back, forward   move through history
  go FRAGMENT     type a fragment into the address bar, e.g. go #CUSA12345-01.00
  filter [TEXT]   filter the open record's cheats
  show            print the open record
  url             print the current location
  help            print this help
  quit            leave";

/// One parsed input line.
#[derive(Debug, PartialEq, Eq)]
enum Action {
    /// Replace the search query.
    Find(String),
    /// Print the current results.
    List,
    /// Open a record by ordinal.
    Open(usize),
    /// Close the open record.
    Close,
    /// History back.
    Back,
    /// History forward.
    Forward,
    /// Manual fragment edit.
    Go(String),
    /// Replace the cheat query.
    Filter(String),
    /// Print the open record.
    Show,
    /// Print the current location.
    Url,
    /// Print help.
    Help,
    /// Leave the session.
    Quit,
}

impl Action {
    /// Parses one input line. Returns `Ok(None)` for a blank line.
    fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let action = match word {
            "find" | "search" => Self::Find(rest.to_string()),
            "list" | "ls" => Self::List,
            "open" => {
                let ordinal = rest
                    .parse()
                    .map_err(|_| format!("open needs a row number, got '{rest}'"))?;
                Self::Open(ordinal)
            }
            "close" => Self::Close,
            "back" => Self::Back,
            "forward" => Self::Forward,
            "go" => Self::Go(rest.to_string()),
            "filter" => Self::Filter(rest.to_string()),
            "show" => Self::Show,
            "url" => Self::Url,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(format!("unknown command '{other}' (try 'help')")),
        };
        Ok(Some(action))
    }

    /// Returns true if the action may move through or write history.
    fn navigates(&self) -> bool {
        matches!(
            self,
            Self::Open(_) | Self::Close | Self::Back | Self::Forward | Self::Go(_)
        )
    }
}

/// The interactive session and the changes it has reported but not yet printed.
struct Browser {
    /// The driven session.
    session: CatalogSession<MemoryHistory>,
    /// Changes queued by the session listener.
    changes: Rc<RefCell<Vec<SessionChange>>>,
    /// Maximum rows printed per listing; 0 prints all.
    limit: usize,
}

impl Browser {
    /// Boots the session and subscribes to its changes.
    fn new(mut session: CatalogSession<MemoryHistory>, limit: usize) -> Self {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&changes);
        session.subscribe(move |change: &SessionChange| sink.borrow_mut().push(change.clone()));
        Self {
            session,
            changes,
            limit,
        }
    }

    /// Prints the opening screen.
    fn print_start(&self) {
        println!(
            "{}",
            dim(&format!(
                "{} records loaded. Type 'help' for commands.",
                self.session.catalog().len()
            ))
        );
        println!("{}", dim(&format!("at {}", self.session.history().href())));
        if self.session.state().is_open() {
            self.print_open();
        }
    }

    /// Runs one action. Returns false when the session should end.
    fn execute(&mut self, action: &Action) -> bool {
        match action {
            Action::Find(text) => {
                let before = self.changes.borrow().len();
                self.session.set_search_query(text);
                if self.changes.borrow().len() == before {
                    self.print_results();
                }
            }
            Action::List => self.print_results(),
            Action::Open(ordinal) => {
                if self.session.catalog().get(*ordinal).is_none() {
                    println!("{}", warning(&format!("no record in row {ordinal}")));
                }
                self.session.select_record(*ordinal);
            }
            Action::Close => self.session.close_detail(),
            Action::Back => {
                if self.session.history_mut().back() {
                    self.follow_history();
                } else {
                    println!("{}", dim("already at the oldest entry"));
                }
            }
            Action::Forward => {
                if self.session.history_mut().forward() {
                    self.follow_history();
                } else {
                    println!("{}", dim("already at the newest entry"));
                }
            }
            Action::Go(fragment) => {
                self.session.history_mut().navigate(fragment);
                self.follow_history();
            }
            Action::Filter(text) => {
                if self.session.state().is_open() {
                    self.session.set_cheat_query(text);
                } else {
                    println!("{}", dim("no record is open"));
                }
            }
            Action::Show => self.print_open(),
            Action::Url => println!("{}", self.session.history().href()),
            Action::Help => println!("{HELP}"),
            Action::Quit => return false,
        }
        true
    }

    /// Tells the session the location changed underneath it.
    fn follow_history(&mut self) {
        let fragment = self.session.history().fragment().to_owned();
        self.session.on_external_navigation(&fragment);
    }

    /// Prints every queued change.
    fn flush_changes(&self) {
        let changes: Vec<SessionChange> = self.changes.borrow_mut().drain(..).collect();
        for change in changes {
            match change {
                SessionChange::SearchChanged { .. } => self.print_results(),
                SessionChange::Opened { .. } | SessionChange::CheatQueryChanged { .. } => {
                    self.print_open();
                }
                SessionChange::Closed => println!("{}", dim("closed")),
            }
        }
    }

    /// Prints the current results, up to the row limit.
    fn print_results(&self) {
        let results = self.session.results();
        let shown: &[&CatalogRecord] = if self.limit > 0 && self.limit < results.len() {
            &results[..self.limit]
        } else {
            &results
        };
        if !shown.is_empty() {
            println!("{}", results_table(shown));
        }
        println!(
            "{}",
            dim(&results_footer(
                shown.len(),
                results.len(),
                self.session.catalog().len()
            ))
        );
    }

    /// Prints the open record, or a note that none is open.
    fn print_open(&self) {
        let (Some(record), Some(listing)) =
            (self.session.open_record(), self.session.cheat_listing())
        else {
            println!("{}", dim("no record is open"));
            return;
        };
        println!(
            "{}",
            format_detail(
                record,
                &listing,
                self.session.cheat_query(),
                self.session.history().href()
            )
        );
    }
}

/// Runs the interactive session until `quit` or end of input.
pub fn run(ctx: &CommandContext, cmd: &BrowseCommand) -> ExitCode {
    let source = match ctx.data_source() {
        Ok(source) => source,
        Err(code) => return code,
    };
    if matches!(source, DataSource::Stdin) {
        eprintln!("error: browse reads commands from stdin, so the catalog cannot come from it");
        eprintln!("Pass --data PATH, or set [data] source in .cheatlist.toml.");
        return ExitCode::FAILURE;
    }
    let catalog = match ctx.load_catalog_from(&source) {
        Ok(catalog) => catalog,
        Err(code) => return code,
    };
    let start = match &cmd.url {
        Some(raw) => parse_url_or_failure(raw),
        None => ctx.base_url(),
    };
    let start = match start {
        Ok(url) => url,
        Err(code) => return code,
    };

    let session = CatalogSession::boot(catalog, MemoryHistory::from_url(start));
    let mut browser = Browser::new(session, ctx.config.list.limit);
    browser.print_start();

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            print!("> ");
            if let Err(e) = io::stdout().flush() {
                eprintln!("error: {e}");
                return ExitCode::FAILURE;
            }
        }
        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                eprintln!("error: failed to read input: {e}");
                return ExitCode::FAILURE;
            }
            None => break,
        };

        let action = match Action::parse(&line) {
            Ok(Some(action)) => action,
            Ok(None) => continue,
            Err(message) => {
                println!("{}", warning(&message));
                continue;
            }
        };
        if !browser.execute(&action) {
            break;
        }
        browser.flush_changes();
        if action.navigates() {
            println!("{}", dim(&format!("at {}", browser.session.history().href())));
        }
    }

    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_with_arguments() {
        assert_eq!(
            Action::parse("find  demo game ").unwrap(),
            Some(Action::Find("demo game".into()))
        );
        assert_eq!(Action::parse("open 3").unwrap(), Some(Action::Open(3)));
        assert_eq!(
            Action::parse("go #CUSA1-01.00").unwrap(),
            Some(Action::Go("#CUSA1-01.00".into()))
        );
        assert_eq!(Action::parse("filter").unwrap(), Some(Action::Filter(String::new())));
        assert_eq!(Action::parse("exit").unwrap(), Some(Action::Quit));
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert_eq!(Action::parse("   ").unwrap(), None);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(Action::parse("open x").is_err());
        assert!(Action::parse("open").is_err());
        assert!(Action::parse("jump").unwrap_err().contains("unknown command"));
    }

    #[test]
    fn only_history_actions_navigate() {
        assert!(Action::Back.navigates());
        assert!(Action::Go(String::new()).navigates());
        assert!(!Action::Find(String::new()).navigates());
        assert!(!Action::Filter(String::new()).navigates());
    }
}
