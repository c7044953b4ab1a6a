//! wcd - change directory without leaving the workspace
//!
//! A process cannot change its parent shell's directory, so on success wcd
//! prints `CHANGE_DIR=<path>` and the shell function installed by
//! `wsguard init` performs the actual `cd`. On any failure that line is
//! never printed.

use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use wsguard_core::cli::{finish, GuardArgs};
use wsguard_core::ops::chdir;
use wsguard_core::{format, Invocation, WsResult};

#[derive(Parser)]
#[command(name = "wcd")]
#[command(about = "Change directory, but never outside the current workspace")]
#[command(version)]
#[command(after_help = "\
WORKSPACE:
    The workspace root is the nearest directory, starting at the current
    one and walking up, that contains .vscode/, .git/, package.json or a
    *.code-workspace file.

SHELL SETUP:
    wcd only prints CHANGE_DIR=<path>; install the wrapper to really cd:
        eval \"$(wsguard init bash)\"

EXAMPLES:
    wcd src/components         Go to a directory inside the workspace
    wcd                        Go to the workspace root
    wcd --show-root            Print the workspace root
    wcd --check ../other src   Check paths without changing directory")]
struct Cli {
    #[command(flatten)]
    guard: GuardArgs,

    /// Directory to change to (default: workspace root)
    target: Option<PathBuf>,
}

fn main() -> ExitCode {
    wsguard_core::logging::init();
    let cli = Cli::parse();
    finish(run(&cli))
}

fn run(cli: &Cli) -> WsResult<ExitCode> {
    let inv = Invocation::from_current_dir()?;

    if let Some(code) = cli.guard.handle(&inv, chdir::resolve_target) {
        return Ok(code);
    }

    let change = chdir::plan(&inv, cli.target.as_deref())?;
    debug!(path = %change.target.display(), "emitting hand-off line");

    format::ok(&format!(
        "{} {}",
        "Changing to".bold(),
        format::path_with_relative(&change.target, &change.relative)
    ));
    println!("{}", change.handoff_line());

    Ok(ExitCode::SUCCESS)
}
