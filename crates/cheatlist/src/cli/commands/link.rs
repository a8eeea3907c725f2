//! Implementation of `cheatlist link`.

use std::process::ExitCode;

use cheatlist_catalog::NaturalKey;
use cheatlist_nav::encode_key;

use crate::cli::{args::LinkCommand, context::CommandContext};

/// Prints the deep link for an id and version.
///
/// The catalog is not consulted: a link can be built before its record exists.
pub fn run(ctx: &CommandContext, cmd: &LinkCommand) -> ExitCode {
    let Some(key) = NaturalKey::new(&cmd.id, &cmd.version) else {
        eprintln!("error: id and version must not be blank");
        return ExitCode::FAILURE;
    };
    let token = encode_key(&key);

    if !cmd.url {
        println!("{token}");
        return ExitCode::SUCCESS;
    }

    let mut url = match ctx.base_url() {
        Ok(url) => url,
        Err(code) => return code,
    };
    url.set_fragment(Some(token.trim_start_matches('#')));
    println!("{url}");
    ExitCode::SUCCESS
}
