//! Rendering and JSON serialization for CLI output.

use std::{
    io::{self, IsTerminal},
    process::ExitCode,
};

use cheatlist_catalog::{CatalogRecord, CheatListing, CheatSection, Led};
pub use cheatlist_highlight::{dim, header, subheader, warning};
use cheatlist_highlight::{Highlighter, Tone, badge, rule};
use comfy_table::{Cell, CellAlignment, Table, presets::UTF8_FULL_CONDENSED};
use serde::Serialize;

/// Width of the rule between the record summary and its cheats.
const RULE_WIDTH: usize = 48;

/// A record as printed by `--json`, with its deep link alongside.
#[derive(Serialize)]
pub struct JsonRecord<'a> {
    /// The record's own fields.
    #[serde(flatten)]
    pub record: &'a CatalogRecord,
    /// Token or URL that reopens this record.
    pub link: String,
}

/// Prints a value as pretty JSON, highlighted when stdout is a terminal.
pub fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json_str) => {
            if io::stdout().is_terminal() {
                println!("{}", Highlighter::new().highlight_json(&json_str));
            } else {
                println!("{json_str}");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Maps a format indicator to a badge tone.
pub fn tone(led: Led) -> Tone {
    match led {
        Led::Good => Tone::Good,
        Led::Warn => Tone::Warn,
        Led::Off => Tone::Off,
    }
}

/// Plain marker for a format inside the results table.
///
/// Table cells stay free of escape codes so column widths line up.
fn table_marker(led: Led) -> &'static str {
    match led {
        Led::Good => "●",
        Led::Warn => "◐",
        Led::Off => "○",
    }
}

/// Returns the title to display, with a placeholder for untitled records.
pub fn display_title(record: &CatalogRecord) -> &str {
    match record.title() {
        "" => "(untitled)",
        title => title,
    }
}

/// Builds the results table. The first column is the ordinal `browse` opens by.
pub fn results_table(records: &[&CatalogRecord]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["#", "Title", "ID", "Version", "Cheats", "Formats"]);
    for record in records {
        let formats = record
            .badges()
            .map(|(tag, info)| format!("{} {tag}", table_marker(info.led())))
            .collect::<Vec<_>>()
            .join("  ");
        table.add_row(vec![
            Cell::new(record.ordinal()).set_alignment(CellAlignment::Right),
            Cell::new(display_title(record)),
            Cell::new(record.id()),
            Cell::new(record.version()),
            Cell::new(record.cheats_total()).set_alignment(CellAlignment::Right),
            Cell::new(formats),
        ]);
    }
    table
}

/// Formats the footer under a results listing.
pub fn results_footer(shown: usize, matched: usize, total: usize) -> String {
    let noun = if total == 1 { "record" } else { "records" };
    if shown < matched {
        format!("{matched} of {total} {noun} (showing first {shown})")
    } else {
        format!("{matched} of {total} {noun}")
    }
}

/// Formats the detail view of one record and its filtered cheats.
pub fn format_detail(
    record: &CatalogRecord,
    listing: &CheatListing<'_>,
    cheat_query: &str,
    link: &str,
) -> String {
    let mut out = Vec::new();
    out.push(header(display_title(record)));

    out.push(field("ID", record.id()));
    out.push(field("Version", record.version()));
    let creators = record.display_creators();
    if !creators.is_empty() {
        out.push(field("Creators", &creators.join(", ")));
    }
    out.push(field("Cheats", &record.cheats_total().to_string()));
    out.push(field("Link", link));
    let badges = record
        .badges()
        .map(|(tag, info)| badge(tag.as_str(), tone(info.led())))
        .collect::<Vec<_>>();
    if !badges.is_empty() {
        out.push(field("Formats", &badges.join("  ")));
    }

    out.push(rule(RULE_WIDTH));
    if !cheat_query.trim().is_empty() {
        out.push(dim(&format!("filter: {cheat_query}")));
    }

    match listing {
        CheatListing::Sections(sections) => {
            for section in sections {
                out.push(format_section(section, cheat_query));
            }
        }
        CheatListing::NoCheats => out.push(dim("No cheats listed for this record.")),
        CheatListing::NoMatches => {
            out.push(dim(&format!("No cheats match \"{}\".", cheat_query.trim())));
        }
    }

    out.join("\n")
}

/// Formats one labelled summary line.
fn field(label: &str, value: &str) -> String {
    let label = format!("{label}:");
    format!("  {label:<9}{value}")
}

/// Formats one format's cheats.
fn format_section(section: &CheatSection<'_>, cheat_query: &str) -> String {
    let tag = section.format.as_str().to_uppercase();
    let count = section.len();
    let title = if cheat_query.trim().is_empty() {
        format!("{tag} ({count})")
    } else {
        let noun = if count == 1 { "match" } else { "matches" };
        format!("{tag} ({count} {noun})")
    };

    let mut lines = vec![subheader(&title)];
    if section.is_empty() {
        let known = section.info.cheats_count;
        if known > 0 {
            lines.push(format!("  {}", dim(&format!("{known} cheats, names not listed"))));
        } else {
            lines.push(format!("  {}", dim("no cheats")));
        }
    } else {
        lines.extend(section.cheats.iter().map(|name| format!("  - {name}")));
    }
    lines.join("\n")
}
