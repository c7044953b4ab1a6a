//! `--check` mode: resolve and test containment, never mutate

use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::error::WsResult;
use crate::invocation::Invocation;
use crate::resolve::exists;

/// How a command turns an argument into the path it would act on
///
/// `--check` must judge a path the same way the command would, so each
/// command hands in its own rule (`wcd` follows symlinks, `wmv` looks
/// through existing directories, `wrm` takes the path as named).
pub type Resolver = fn(&Invocation, &Path) -> WsResult<PathBuf>;

/// Containment verdict for one argument
#[derive(Debug, Clone, Serialize)]
pub struct CheckVerdict {
    /// Argument as given
    pub input: PathBuf,
    /// Resolved absolute path, if resolution succeeded
    pub resolved: Option<PathBuf>,
    /// Path relative to the workspace root when inside
    pub relative: Option<PathBuf>,
    pub inside: bool,
    pub exists: bool,
    /// Why resolution failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<&'static str>,
}

impl CheckVerdict {
    pub fn passed(&self) -> bool {
        self.inside
    }
}

/// Verdicts for every path, in argument order
pub fn check_paths(inv: &Invocation, paths: &[PathBuf], resolve: Resolver) -> Vec<CheckVerdict> {
    paths.iter().map(|p| check_path(inv, p, resolve)).collect()
}

pub fn check_path(inv: &Invocation, input: &Path, resolve: Resolver) -> CheckVerdict {
    match resolve(inv, input) {
        Ok(resolved) => {
            let inside = inv.contains(&resolved);
            CheckVerdict {
                input: input.to_path_buf(),
                relative: inside.then(|| inv.relative(&resolved)),
                exists: exists(&resolved),
                resolved: Some(resolved),
                inside,
                error: None,
                error_kind: None,
            }
        }
        Err(e) => CheckVerdict {
            input: input.to_path_buf(),
            resolved: None,
            relative: None,
            inside: false,
            exists: false,
            error: Some(e.to_string()),
            error_kind: Some(e.kind()),
        },
    }
}

/// True iff every verdict passed
pub fn all_passed(verdicts: &[CheckVerdict]) -> bool {
    verdicts.iter().all(CheckVerdict::passed)
}
