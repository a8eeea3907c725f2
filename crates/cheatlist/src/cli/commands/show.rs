//! Implementation of `cheatlist show`.

use std::process::ExitCode;

use cheatlist_catalog::CheatListing;
use cheatlist_nav::{CatalogSession, MemoryHistory, SessionCommands, try_decode};
use serde::Serialize;
use url::{Position, Url};

use crate::cli::{
    args::ShowCommand,
    context::{CommandContext, parse_url_or_failure},
    output::{JsonRecord, format_detail, print_json},
};

/// JSON output for `show --json`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonShowOutput<'a> {
    /// The open record.
    record: JsonRecord<'a>,
    /// The cheat filter in effect.
    cheat_query: &'a str,
    /// Filtered cheats, per format.
    cheats: CheatListing<'a>,
}

/// Opens one record by deep link and prints its detail.
pub fn run(ctx: &CommandContext, cmd: &ShowCommand) -> ExitCode {
    let start = match start_url(ctx, &cmd.link) {
        Ok(url) => url,
        Err(code) => return code,
    };
    let fragment = &start[Position::AfterQuery..];
    let key = match try_decode(fragment) {
        Ok(key) => key,
        Err(reason) => {
            eprintln!("error: malformed link '{}': {reason}", cmd.link);
            return ExitCode::FAILURE;
        }
    };

    let catalog = match ctx.load_catalog() {
        Ok(catalog) => catalog,
        Err(code) => return code,
    };

    let mut session = CatalogSession::boot(catalog, MemoryHistory::from_url(start));
    session.set_cheat_query(&cmd.filter);

    let (Some(record), Some(listing)) = (session.open_record(), session.cheat_listing()) else {
        eprintln!(
            "error: no record with id '{}' and version '{}'",
            key.id(),
            key.version()
        );
        return ExitCode::FAILURE;
    };
    let link = session.history().href().to_string();

    if cmd.json {
        return print_json(&JsonShowOutput {
            record: JsonRecord { record, link },
            cheat_query: session.cheat_query(),
            cheats: listing,
        });
    }

    println!(
        "{}",
        format_detail(record, &listing, session.cheat_query(), &link)
    );
    ExitCode::SUCCESS
}

/// Builds the location the session boots at.
///
/// A full URL is used as given. A bare token lands on the configured base URL.
fn start_url(ctx: &CommandContext, link: &str) -> Result<Url, ExitCode> {
    let link = link.trim();
    if link.contains("://") {
        return parse_url_or_failure(link);
    }
    let mut url = ctx.base_url()?;
    let token = link.strip_prefix('#').unwrap_or(link);
    url.set_fragment(Some(token));
    Ok(url)
}
