//! Flags every command shares, and how a command's result becomes an exit code

use clap::Args;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::check::{all_passed, check_paths, Resolver};
use crate::error::WsResult;
use crate::format;
use crate::invocation::Invocation;

/// `--show-root` and `--check`, flattened into each command's parser
#[derive(Args, Debug, Default, Clone)]
pub struct GuardArgs {
    /// Print the detected workspace root and exit
    #[arg(long)]
    pub show_root: bool,

    /// Only check whether PATHs resolve inside the workspace; never modifies anything
    #[arg(long, value_name = "PATH", num_args = 1..)]
    pub check: Option<Vec<PathBuf>>,
}

impl GuardArgs {
    /// Run `--show-root` / `--check` if given; `None` means carry on
    ///
    /// `resolve` is the command's own argument rule, so a path `--check`
    /// passes is one the command would accept.
    pub fn handle(&self, inv: &Invocation, resolve: Resolver) -> Option<ExitCode> {
        if self.show_root {
            println!("{}", inv.root_path().display());
            return Some(ExitCode::SUCCESS);
        }

        if let Some(paths) = &self.check {
            let verdicts = check_paths(inv, paths, resolve);
            format::print_verdicts(&verdicts);
            return Some(if all_passed(&verdicts) {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            });
        }

        None
    }
}

/// Turn a command's result into the process exit code, reporting any error
pub fn finish(result: WsResult<ExitCode>) -> ExitCode {
    match result {
        Ok(code) => code,
        Err(e) => {
            format::error(&e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}
