//! Change directory
//!
//! A child process cannot move its parent shell, so a successful lookup
//! produces a hand-off line (`CHANGE_DIR=<path>`) that the shell wrapper
//! installed by `wsguard init` consumes and acts on.

use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{WsError, WsResult};
use crate::invocation::Invocation;

/// Token the shell wrapper looks for
pub const HANDOFF_PREFIX: &str = "CHANGE_DIR=";

/// A validated directory change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeDir {
    /// Absolute, fully resolved target directory
    pub target: PathBuf,
    /// Target relative to the workspace root
    pub relative: PathBuf,
}

impl ChangeDir {
    /// The exact line the shell wrapper parses
    pub fn handoff_line(&self) -> String {
        format!("{}{}", HANDOFF_PREFIX, self.target.display())
    }
}

/// Validate a directory change to `target` (the workspace root when `None`)
///
/// The target must exist, be a directory and resolve inside the workspace.
pub fn plan(inv: &Invocation, target: Option<&Path>) -> WsResult<ChangeDir> {
    let target = match target {
        Some(arg) => inv.resolve_existing(arg)?,
        None => inv.root_path().to_path_buf(),
    };

    if !target.is_dir() {
        return Err(WsError::NotADirectory(target));
    }

    inv.require_inside(&target)?;

    debug!(path = %target.display(), "directory change validated");
    Ok(ChangeDir {
        relative: inv.relative(&target),
        target,
    })
}

/// Where `arg` would take the shell, following every symlink
///
/// A path that does not exist yet falls back to plain resolution so
/// `--check` can still say whether it would be inside.
pub fn resolve_target(inv: &Invocation, arg: &Path) -> WsResult<PathBuf> {
    match inv.resolve_existing(arg) {
        Err(WsError::NotFound(_)) => inv.resolve(arg),
        other => other,
    }
}
