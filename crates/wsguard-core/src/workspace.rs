//! Workspace root detection

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use crate::error::{WsError, WsResult};
use crate::resolve::is_missing;

/// Something whose presence marks a directory as a workspace root
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Marker {
    /// `.vscode/` directory
    Vscode,
    /// `.git/` directory
    Git,
    /// `package.json` file
    PackageJson,
    /// any `*.code-workspace` file
    CodeWorkspace,
}

impl Marker {
    /// Markers in probe order
    pub const ALL: [Marker; 4] = [
        Marker::Vscode,
        Marker::Git,
        Marker::PackageJson,
        Marker::CodeWorkspace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Marker::Vscode => ".vscode/",
            Marker::Git => ".git/",
            Marker::PackageJson => "package.json",
            Marker::CodeWorkspace => "*.code-workspace",
        }
    }

    /// Check whether `dir` carries this marker
    fn present_in(&self, dir: &Path) -> WsResult<bool> {
        match self {
            Marker::Vscode => is_kind(&dir.join(".vscode"), true),
            Marker::Git => is_kind(&dir.join(".git"), true),
            Marker::PackageJson => is_kind(&dir.join("package.json"), false),
            Marker::CodeWorkspace => has_code_workspace_file(dir),
        }
    }
}

impl std::fmt::Display for Marker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A located workspace root and the marker that identified it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkspaceRoot {
    #[serde(rename = "root")]
    pub path: PathBuf,
    pub marker: Marker,
}

/// Find the nearest ancestor of `start` (inclusive) carrying a marker
///
/// Returns `Ok(None)` when no directory up to the filesystem root matches.
/// A directory that cannot be listed is an error, not a miss.
pub fn find_workspace_root(start: &Path) -> WsResult<Option<WorkspaceRoot>> {
    if !start.is_absolute() {
        return Err(WsError::RelativePath(start.to_path_buf()));
    }

    let mut dir = start;
    loop {
        if let Some(marker) = marker_in(dir)? {
            debug!(root = %dir.display(), %marker, "workspace root found");
            return Ok(Some(WorkspaceRoot {
                path: dir.to_path_buf(),
                marker,
            }));
        }

        match dir.parent() {
            Some(parent) => dir = parent,
            None => break,
        }
    }

    debug!(start = %start.display(), "no workspace root");
    Ok(None)
}

/// First marker present in `dir`, in probe order
pub fn marker_in(dir: &Path) -> WsResult<Option<Marker>> {
    for marker in Marker::ALL {
        trace!(dir = %dir.display(), %marker, "probing");
        if marker.present_in(dir)? {
            return Ok(Some(marker));
        }
    }
    Ok(None)
}

fn has_code_workspace_file(dir: &Path) -> WsResult<bool> {
    let entries = fs::read_dir(dir).map_err(|source| WsError::ListDir {
        path: dir.to_path_buf(),
        source,
    })?;

    for entry in entries {
        let entry = entry.map_err(|source| WsError::ListDir {
            path: dir.to_path_buf(),
            source,
        })?;
        let name = entry.file_name();
        if !name.to_string_lossy().ends_with(".code-workspace") {
            continue;
        }
        if is_kind(&entry.path(), false)? {
            return Ok(true);
        }
    }

    Ok(false)
}

/// Directory (or regular file) test that only treats "nothing there" as a miss
fn is_kind(path: &Path, dir: bool) -> WsResult<bool> {
    match fs::metadata(path) {
        Ok(meta) if dir => Ok(meta.is_dir()),
        Ok(meta) => Ok(meta.is_file()),
        Err(e) if is_missing(&e) => Ok(false),
        Err(source) => Err(WsError::Resolve {
            path: path.to_path_buf(),
            source,
        }),
    }
}
