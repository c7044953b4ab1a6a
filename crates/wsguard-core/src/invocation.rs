//! Per-invocation context: the working directory and its workspace root

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::containment::{is_within, relative_to};
use crate::error::{WsError, WsResult};
use crate::resolve;
use crate::workspace::{find_workspace_root, WorkspaceRoot};

/// The explicit context every command runs in
///
/// Built once per process and never cached: the root is looked up fresh on
/// each invocation.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Canonical working directory the arguments are relative to
    pub cwd: PathBuf,
    /// Located workspace root (an ancestor of `cwd`, inclusive)
    pub root: WorkspaceRoot,
}

impl Invocation {
    /// Locate the workspace for `cwd`, failing if there is none
    pub fn detect(cwd: &Path) -> WsResult<Self> {
        let cwd = fs::canonicalize(cwd).map_err(|source| WsError::Resolve {
            path: cwd.to_path_buf(),
            source,
        })?;

        let root = find_workspace_root(&cwd)?.ok_or_else(|| WsError::NoWorkspace(cwd.clone()))?;
        debug!(cwd = %cwd.display(), root = %root.path.display(), "invocation ready");

        Ok(Self { cwd, root })
    }

    /// Same as [`Invocation::detect`] for the process's current directory
    pub fn from_current_dir() -> WsResult<Self> {
        let cwd = std::env::current_dir().map_err(WsError::CurrentDir)?;
        Self::detect(&cwd)
    }

    pub fn root_path(&self) -> &Path {
        &self.root.path
    }

    /// Resolve an argument, keeping a trailing symlink as-is
    pub fn resolve(&self, arg: &Path) -> WsResult<PathBuf> {
        resolve::resolve(&self.cwd, arg)
    }

    /// Resolve an argument that must exist, following symlinks
    pub fn resolve_existing(&self, arg: &Path) -> WsResult<PathBuf> {
        resolve::resolve_existing(&self.cwd, arg)
    }

    pub fn contains(&self, path: &Path) -> bool {
        is_within(path, self.root_path())
    }

    /// Fail with `OutsideWorkspace` unless `path` is inside the root
    pub fn require_inside(&self, path: &Path) -> WsResult<()> {
        if self.contains(path) {
            Ok(())
        } else {
            Err(WsError::OutsideWorkspace {
                path: path.to_path_buf(),
                root: self.root_path().to_path_buf(),
            })
        }
    }

    pub fn relative(&self, path: &Path) -> PathBuf {
        relative_to(path, self.root_path())
    }
}
