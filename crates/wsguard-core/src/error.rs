//! Error taxonomy shared by all commands

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Everything that can stop a workspace-bounded operation
#[derive(Error, Debug)]
pub enum WsError {
    #[error("No workspace found (looked for .vscode/, .git/, package.json or *.code-workspace above {})", .0.display())]
    NoWorkspace(PathBuf),

    #[error("Path does not exist: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Path is outside the workspace: {} (root: {})", .path.display(), .root.display())]
    OutsideWorkspace { path: PathBuf, root: PathBuf },

    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Is a directory (use -r to remove recursively): {}", .0.display())]
    IsADirectory(PathBuf),

    #[error("Cannot move a directory into itself: {} -> {}", .source_path.display(), .destination.display())]
    MoveIntoSelf {
        source_path: PathBuf,
        destination: PathBuf,
    },

    #[error("Source and destination are the same path: {}", .0.display())]
    SamePath(PathBuf),

    #[error("Refusing to move the workspace root itself: {}", .0.display())]
    RootTarget(PathBuf),

    #[error("Failed to {action} {}: {source}", .path.display())]
    Mutation {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot list directory {}: {source}", .path.display())]
    ListDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot resolve {}: {source}", .path.display())]
    Resolve {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not determine current directory: {0}")]
    CurrentDir(#[source] io::Error),

    #[error("Expected an absolute path: {}", .0.display())]
    RelativePath(PathBuf),
}

pub type WsResult<T> = Result<T, WsError>;

impl WsError {
    /// Process exit code for this error
    ///
    /// Every failure class maps to 1; usage errors are left to clap.
    pub fn exit_code(&self) -> i32 {
        1
    }

    /// Short machine-friendly name, used in `--json` check verdicts
    pub fn kind(&self) -> &'static str {
        match self {
            WsError::NoWorkspace(_) => "no_workspace",
            WsError::NotFound(_) => "not_found",
            WsError::OutsideWorkspace { .. } => "outside_workspace",
            WsError::NotADirectory(_) => "not_a_directory",
            WsError::IsADirectory(_) => "is_a_directory",
            WsError::MoveIntoSelf { .. } => "move_into_self",
            WsError::SamePath(_) => "same_path",
            WsError::RootTarget(_) => "root_target",
            WsError::Mutation { .. } => "mutation",
            WsError::ListDir { .. } => "list_dir",
            WsError::Resolve { .. } => "resolve",
            WsError::CurrentDir(_) => "current_dir",
            WsError::RelativePath(_) => "relative_path",
        }
    }

    pub(crate) fn mutation(action: &'static str, path: &Path, source: io::Error) -> Self {
        WsError::Mutation {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}
