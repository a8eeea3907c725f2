//! Implementation of `cheatlist init`.

use std::{fs, path::PathBuf, process::ExitCode};

use cheatlist_config::{CONFIG_FILENAME, global_config_path, global_template, local_template};
use cheatlist_highlight::{Highlighter, indent, subheader};

use crate::cli::{args::InitCommand, context::CommandContext};

/// Where `init` writes, and which template it writes there.
struct Target {
    /// File to create.
    path: PathBuf,
    /// True for `~/.cheatlist.toml`.
    global: bool,
}

impl Target {
    /// Picks the global file for `--global`, or when run from the home directory itself.
    fn choose(ctx: &CommandContext, cmd: &InitCommand) -> Result<Self, ExitCode> {
        let global_path = global_config_path();
        let in_home = global_path
            .as_deref()
            .and_then(|p| p.parent())
            .is_some_and(|home| home == ctx.cwd);

        if !(cmd.global || in_home) {
            return Ok(Self {
                path: ctx.cwd.join(CONFIG_FILENAME),
                global: false,
            });
        }
        match global_path {
            Some(path) => Ok(Self { path, global: true }),
            None => {
                eprintln!("error: could not determine home directory");
                Err(ExitCode::FAILURE)
            }
        }
    }

    /// Returns the commented template for this target.
    fn template(&self) -> String {
        if self.global {
            global_template()
        } else {
            local_template()
        }
    }
}

/// Writes a commented `.cheatlist.toml` template.
pub fn run(ctx: &CommandContext, cmd: &InitCommand) -> ExitCode {
    let target = match Target::choose(ctx, cmd) {
        Ok(target) => target,
        Err(code) => return code,
    };

    if target.path.exists() && !cmd.force {
        eprintln!(
            "error: configuration file already exists: {}",
            target.path.display()
        );
        eprintln!("use --force to overwrite");
        return ExitCode::FAILURE;
    }

    let template = target.template();
    if let Err(e) = fs::write(&target.path, &template) {
        eprintln!("error: failed to write {}: {e}", target.path.display());
        return ExitCode::FAILURE;
    }

    println!("Created {}", target.path.display());
    println!();
    println!("{}", subheader("Configuration written:"));
    println!(
        "{}",
        indent(&Highlighter::new().highlight_toml(&template), 2)
    );
    ExitCode::SUCCESS
}
