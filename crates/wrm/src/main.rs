//! wrm - remove files without leaving the workspace
//!
//! Every target is validated before the first deletion. Deletion itself is
//! best-effort: one stuck file does not stop the others, and the summary
//! says what was left behind.

use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;

use wsguard_core::cli::{finish, GuardArgs};
use wsguard_core::ops::rm::{self, RemovalPlan, RemovalReport};
use wsguard_core::{format, Invocation, WsResult};

#[derive(Parser)]
#[command(name = "wrm")]
#[command(about = "Remove files and directories, but only inside the current workspace")]
#[command(version)]
#[command(after_help = "\
RULES:
    Every target must exist and resolve inside the workspace root, or
    nothing is removed. Directories need -r. Symlinks are removed, never
    followed.

EXAMPLES:
    wrm notes.txt                  Remove a file
    wrm -r build dist              Remove directories
    wrm -rf node_modules           Remove without listing targets first
    wrm --check ../x build         Check paths without removing")]
struct Cli {
    #[command(flatten)]
    guard: GuardArgs,

    /// Remove directories and their contents
    #[arg(short, long)]
    recursive: bool,

    /// Don't list the targets before removing
    #[arg(short, long)]
    force: bool,

    /// Paths to remove
    #[arg(required_unless_present_any = ["show_root", "check"])]
    targets: Vec<PathBuf>,
}

fn main() -> ExitCode {
    wsguard_core::logging::init();
    let cli = Cli::parse();
    finish(run(&cli))
}

fn run(cli: &Cli) -> WsResult<ExitCode> {
    let inv = Invocation::from_current_dir()?;

    if let Some(code) = cli.guard.handle(&inv, Invocation::resolve) {
        return Ok(code);
    }

    let plan = rm::plan(&inv, &cli.targets, cli.recursive)?;

    if !cli.force {
        // Display only: removal proceeds without waiting for an answer
        print_pending(&plan);
    }

    let report = plan.execute();
    print_report(&report);

    Ok(if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn print_pending(plan: &RemovalPlan) {
    println!("{}", "Will remove:".bold());
    for target in &plan.targets {
        println!(
            "    {:<10} {}",
            target.kind.as_str().dimmed(),
            format::path_with_relative(&target.path, &target.relative)
        );
    }
    println!();
}

fn print_report(report: &RemovalReport) {
    for outcome in &report.outcomes {
        if outcome.is_success() {
            println!("{} {}", "removed".green(), outcome.target.relative.display());
        } else {
            eprintln!(
                "{} {} ({} problem(s))",
                "failed".red(),
                outcome.target.relative.display(),
                outcome.failures.len()
            );
            for failure in &outcome.failures {
                eprintln!("    {}", failure);
            }
        }
    }

    let summary = format!(
        "{} removed, {} failed",
        report.removed_count(),
        report.failed_count()
    );
    if report.is_success() {
        format::ok(&summary);
    } else {
        format::warning(&summary);
    }
}
