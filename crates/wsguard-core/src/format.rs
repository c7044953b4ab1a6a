//! Console output shared by the commands
//!
//! Human-readable lines only. The hand-off line is printed by `wcd` itself,
//! uncolored.

use colored::Colorize;
use std::path::Path;

use crate::check::CheckVerdict;
use crate::error::WsError;
use crate::workspace::WorkspaceRoot;

/// Print an error to stderr
pub fn error(err: &WsError) {
    eprintln!("{} {}", "error:".red(), err);
}

pub fn warning(msg: &str) {
    eprintln!("{} {}", "warning:".yellow(), msg);
}

pub fn ok(msg: &str) {
    println!("{} {}", "ok".green(), msg);
}

/// `/abs/path (rel)`, the way both endpoints of an operation are reported
pub fn path_with_relative(path: &Path, relative: &Path) -> String {
    format!("{} {}", path.display(), format!("({})", relative.display()).dimmed())
}

pub fn root_line(root: &WorkspaceRoot) -> String {
    format!(
        "{} {}",
        root.path.display(),
        format!("[{}]", root.marker).dimmed()
    )
}

pub fn verdict_line(verdict: &CheckVerdict) -> String {
    let shown = verdict
        .resolved
        .as_deref()
        .unwrap_or(verdict.input.as_path());

    if let Some(err) = &verdict.error {
        return format!("{} {}: {}", "FAIL".red().bold(), verdict.input.display(), err);
    }

    if verdict.inside {
        let rel = verdict
            .relative
            .as_deref()
            .map(|r| r.display().to_string())
            .unwrap_or_default();
        let missing = if verdict.exists { "" } else { " (does not exist)" };
        format!(
            "{} {} {}{}",
            "PASS".green().bold(),
            shown.display(),
            format!("-> {}", rel).dimmed(),
            missing.dimmed()
        )
    } else {
        format!(
            "{} {} {}",
            "FAIL".red().bold(),
            shown.display(),
            "outside workspace".red()
        )
    }
}

/// Print every verdict followed by a one-line summary
pub fn print_verdicts(verdicts: &[CheckVerdict]) {
    for verdict in verdicts {
        println!("{}", verdict_line(verdict));
    }
    let failed = verdicts.iter().filter(|v| !v.passed()).count();
    if failed == 0 {
        println!("{} {} path(s) inside the workspace", "ok".green(), verdicts.len());
    } else {
        println!(
            "{} {} of {} path(s) outside the workspace",
            "error:".red(),
            failed,
            verdicts.len()
        );
    }
}
