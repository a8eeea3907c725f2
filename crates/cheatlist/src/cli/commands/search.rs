//! Implementation of `cheatlist search`.

use std::process::ExitCode;

use cheatlist_catalog::CatalogRecord;
use cheatlist_nav::encode;
use serde::Serialize;

use crate::cli::{
    args::SearchCommand,
    context::CommandContext,
    output::{JsonRecord, dim, print_json, results_footer, results_table},
};

/// JSON output for `search --json`.
#[derive(Serialize)]
struct JsonSearchOutput<'a> {
    /// The raw query as typed.
    query: String,
    /// Records in the catalog.
    total: usize,
    /// Records matching the query, before the limit.
    matched: usize,
    /// Printed records, in catalog order.
    results: Vec<JsonRecord<'a>>,
}

/// Lists the records matching the query in catalog order.
pub fn run(ctx: &CommandContext, cmd: &SearchCommand) -> ExitCode {
    let catalog = match ctx.load_catalog() {
        Ok(catalog) => catalog,
        Err(code) => return code,
    };

    let query = cmd.raw_query();
    let matches = catalog.search(&query);
    let limit = cmd.limit.unwrap_or(ctx.config.list.limit);
    let shown: &[&CatalogRecord] = if limit > 0 && limit < matches.len() {
        &matches[..limit]
    } else {
        &matches
    };

    if cmd.json {
        let output = JsonSearchOutput {
            query,
            total: catalog.len(),
            matched: matches.len(),
            results: shown
                .iter()
                .map(|&record| JsonRecord {
                    record,
                    link: encode(record),
                })
                .collect(),
        };
        return print_json(&output);
    }

    if shown.is_empty() {
        println!("{}", dim("No records match."));
    } else {
        println!("{}", results_table(shown));
    }
    println!(
        "{}",
        dim(&results_footer(shown.len(), matches.len(), catalog.len()))
    );
    ExitCode::SUCCESS
}
