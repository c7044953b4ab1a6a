//! Remove inside the workspace
//!
//! Validation is all-or-nothing: every target must exist and sit inside the
//! workspace before the first deletion. Deletion is best-effort: a failing
//! target is reported and the remaining targets are still removed.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{WsError, WsResult};
use crate::invocation::Invocation;
use crate::resolve::is_missing;

/// What a removal target is, without following symlinks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
    Symlink,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryKind::File => "file",
            EntryKind::Directory => "directory",
            EntryKind::Symlink => "symlink",
        }
    }

    fn of(meta: &fs::Metadata) -> Self {
        let ft = meta.file_type();
        if ft.is_symlink() {
            EntryKind::Symlink
        } else if ft.is_dir() {
            EntryKind::Directory
        } else {
            EntryKind::File
        }
    }
}

/// One validated target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalTarget {
    pub path: PathBuf,
    pub relative: PathBuf,
    pub kind: EntryKind,
}

/// Targets that all passed validation
#[derive(Debug, Clone)]
pub struct RemovalPlan {
    pub targets: Vec<RemovalTarget>,
}

/// Result of removing one target
#[derive(Debug)]
pub struct RemovalOutcome {
    pub target: RemovalTarget,
    /// Filesystem entries deleted for this target
    pub entries_removed: usize,
    /// Every entry that could not be deleted
    pub failures: Vec<WsError>,
}

impl RemovalOutcome {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Per-target results of an executed plan
#[derive(Debug)]
pub struct RemovalReport {
    pub outcomes: Vec<RemovalOutcome>,
}

impl RemovalReport {
    pub fn removed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes.len() - self.removed_count()
    }

    pub fn is_success(&self) -> bool {
        self.failed_count() == 0
    }
}

/// Validate every target before anything is deleted
///
/// Fails on the first target that is missing, outside the workspace, or a
/// directory while `recursive` is off. Duplicates and targets nested under
/// another directory target are folded into the outer one.
pub fn plan(inv: &Invocation, args: &[PathBuf], recursive: bool) -> WsResult<RemovalPlan> {
    let mut targets: Vec<RemovalTarget> = Vec::with_capacity(args.len());

    for arg in args {
        let path = inv.resolve(arg)?;
        let meta = match fs::symlink_metadata(&path) {
            Ok(meta) => meta,
            Err(e) if is_missing(&e) => return Err(WsError::NotFound(path)),
            Err(source) => return Err(WsError::Resolve { path, source }),
        };
        inv.require_inside(&path)?;

        let kind = EntryKind::of(&meta);
        if kind == EntryKind::Directory && !recursive {
            return Err(WsError::IsADirectory(path));
        }

        debug!(path = %path.display(), kind = kind.as_str(), "removal validated");
        targets.push(RemovalTarget {
            relative: inv.relative(&path),
            path,
            kind,
        });
    }

    Ok(RemovalPlan {
        targets: fold_nested(targets),
    })
}

fn fold_nested(targets: Vec<RemovalTarget>) -> Vec<RemovalTarget> {
    let dirs: Vec<PathBuf> = targets
        .iter()
        .filter(|t| t.kind == EntryKind::Directory)
        .map(|t| t.path.clone())
        .collect();

    let mut kept: Vec<RemovalTarget> = Vec::with_capacity(targets.len());
    for target in targets {
        let covered = dirs
            .iter()
            .any(|d| d != &target.path && target.path.starts_with(d));
        let duplicate = kept.iter().any(|k| k.path == target.path);
        if covered || duplicate {
            debug!(path = %target.path.display(), "already covered by another target");
            continue;
        }
        kept.push(target);
    }
    kept
}

impl RemovalPlan {
    /// Delete every target, continuing past failures
    pub fn execute(&self) -> RemovalReport {
        let outcomes = self
            .targets
            .iter()
            .map(|target| {
                let mut failures = Vec::new();
                let entries_removed = remove_entry(&target.path, &mut failures);
                if failures.is_empty() {
                    info!(path = %target.path.display(), entries_removed, "removed");
                } else {
                    warn!(path = %target.path.display(), failures = failures.len(), "removal incomplete");
                }
                RemovalOutcome {
                    target: target.clone(),
                    entries_removed,
                    failures,
                }
            })
            .collect();

        RemovalReport { outcomes }
    }
}

/// Depth-first removal: children first, then the directory itself
///
/// Symlinks are unlinked, never followed. A directory whose children could
/// not all be removed is left in place; its failures are already recorded.
fn remove_entry(path: &Path, failures: &mut Vec<WsError>) -> usize {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) => {
            failures.push(WsError::mutation("inspect", path, e));
            return 0;
        }
    };

    if !meta.file_type().is_dir() {
        return match fs::remove_file(path) {
            Ok(()) => 1,
            Err(e) => {
                failures.push(WsError::mutation("remove", path, e));
                0
            }
        };
    }

    let before = failures.len();
    let mut removed = 0;

    match fs::read_dir(path) {
        Ok(entries) => {
            for entry in entries {
                match entry {
                    Ok(entry) => removed += remove_entry(&entry.path(), failures),
                    Err(e) => failures.push(WsError::mutation("list", path, e)),
                }
            }
        }
        Err(e) => {
            failures.push(WsError::mutation("list", path, e));
            return removed;
        }
    }

    if failures.len() > before {
        return removed;
    }

    match fs::remove_dir(path) {
        Ok(()) => removed + 1,
        Err(e) => {
            failures.push(WsError::mutation("remove directory", path, e));
            removed
        }
    }
}
