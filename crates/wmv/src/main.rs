//! wmv - move and rename without leaving the workspace
//!
//! Both endpoints are validated before anything moves; the move itself is a
//! single rename.

use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

use wsguard_core::cli::{finish, GuardArgs};
use wsguard_core::ops::mv;
use wsguard_core::{format, Invocation, WsResult};

#[derive(Parser)]
#[command(name = "wmv")]
#[command(about = "Move or rename files, but never into or out of the current workspace")]
#[command(version)]
#[command(after_help = "\
RULES:
    Source and destination must both resolve inside the workspace root,
    or nothing is touched. Missing destination directories are created.
    A destination that is an existing directory receives the source.

EXAMPLES:
    wmv old.rs new.rs              Rename a file
    wmv src/util.rs lib/util.rs    Move, creating lib/ if needed
    wmv notes.md docs/             Move into an existing directory
    wmv --check ../x docs          Check paths without moving")]
struct Cli {
    #[command(flatten)]
    guard: GuardArgs,

    /// Path to move
    #[arg(required_unless_present_any = ["show_root", "check"])]
    source: Option<PathBuf>,

    /// Where to move it
    #[arg(required_unless_present_any = ["show_root", "check"])]
    destination: Option<PathBuf>,
}

fn main() -> ExitCode {
    wsguard_core::logging::init();
    let cli = Cli::parse();
    finish(run(&cli))
}

fn run(cli: &Cli) -> WsResult<ExitCode> {
    let inv = Invocation::from_current_dir()?;

    if let Some(code) = cli.guard.handle(&inv, mv::resolve_endpoint) {
        return Ok(code);
    }

    // clap enforces both positionals outside inspection mode
    let (Some(source), Some(destination)) = (&cli.source, &cli.destination) else {
        return Ok(ExitCode::FAILURE);
    };

    let plan = mv::plan(&inv, source, destination)?;

    println!(
        "{}   {}",
        "From:".bold(),
        format::path_with_relative(&plan.source, &plan.source_relative)
    );
    println!(
        "{}     {}",
        "To:".bold(),
        format::path_with_relative(&plan.destination, &plan.destination_relative)
    );

    plan.execute()?;

    format::ok(&format!(
        "Moved {} -> {}",
        plan.source_relative.display(),
        plan.destination_relative.display()
    ));
    Ok(ExitCode::SUCCESS)
}
