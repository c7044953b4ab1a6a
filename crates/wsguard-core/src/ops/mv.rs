//! Move / rename inside the workspace

use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{WsError, WsResult};
use crate::invocation::Invocation;
use crate::resolve::exists;

/// A move whose endpoints have both passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePlan {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub source_relative: PathBuf,
    pub destination_relative: PathBuf,
}

/// Validate moving `source` to `destination`
///
/// Both endpoints must resolve inside the workspace before anything is
/// touched. A destination naming an existing directory receives the source
/// under its own file name.
pub fn plan(inv: &Invocation, source: &Path, destination: &Path) -> WsResult<MovePlan> {
    let source = inv.resolve(source)?;
    if !exists(&source) {
        return Err(WsError::NotFound(source));
    }
    inv.require_inside(&source)?;
    if source == inv.root_path() {
        return Err(WsError::RootTarget(source));
    }

    let mut destination = resolve_endpoint(inv, destination)?;
    if destination.is_dir() {
        if let Some(name) = source.file_name() {
            destination.push(name);
        }
    }
    inv.require_inside(&destination)?;

    if destination == source {
        return Err(WsError::SamePath(source));
    }

    let source_is_dir = fs::symlink_metadata(&source)
        .map(|m| m.is_dir())
        .unwrap_or(false);
    if source_is_dir && destination.starts_with(&source) {
        return Err(WsError::MoveIntoSelf {
            source_path: source,
            destination,
        });
    }

    debug!(from = %source.display(), to = %destination.display(), "move validated");
    Ok(MovePlan {
        source_relative: inv.relative(&source),
        destination_relative: inv.relative(&destination),
        source,
        destination,
    })
}

/// Resolve a move endpoint; an existing directory is judged by where it points
///
/// The link itself is kept for anything else, so renaming a symlink acts on
/// the link.
pub fn resolve_endpoint(inv: &Invocation, arg: &Path) -> WsResult<PathBuf> {
    let path = inv.resolve(arg)?;
    if path.is_dir() {
        inv.resolve_existing(arg)
    } else {
        Ok(path)
    }
}

impl MovePlan {
    /// Create missing parents of the destination, then rename in one step
    ///
    /// Parents created here are removed again if the rename fails.
    pub fn execute(&self) -> WsResult<()> {
        let mut created = None;
        if let Some(parent) = self.destination.parent() {
            if !parent.is_dir() {
                created = first_missing(parent);
                fs::create_dir_all(parent)
                    .map_err(|e| WsError::mutation("create directory", parent, e))?;
                debug!(dir = %parent.display(), "created destination parents");
            }
        }

        if let Err(e) = fs::rename(&self.source, &self.destination) {
            if let Some(top) = &created {
                self.remove_created(top);
            }
            return Err(WsError::mutation("move", &self.source, e));
        }

        info!(from = %self.source.display(), to = %self.destination.display(), "moved");
        Ok(())
    }

    /// Best-effort removal of the empty parents up to and including `top`
    fn remove_created(&self, top: &Path) {
        let Some(parent) = self.destination.parent() else {
            return;
        };
        for dir in parent.ancestors() {
            if let Err(e) = fs::remove_dir(dir) {
                warn!(dir = %dir.display(), error = %e, "could not remove created directory");
                return;
            }
            if dir == top {
                return;
            }
        }
    }
}

/// Outermost ancestor of `dir` (inclusive) that does not exist yet
fn first_missing(dir: &Path) -> Option<PathBuf> {
    dir.ancestors()
        .take_while(|a| !exists(a))
        .last()
        .map(Path::to_path_buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn workspace() -> (tempfile::TempDir, Invocation) {
        let dir = tempdir().unwrap();
        let root = dir.path().join("project");
        fs::create_dir_all(root.join(".git")).unwrap();
        fs::create_dir_all(root.join("src")).unwrap();
        fs::write(root.join("src/old.rs"), "fn main() {}").unwrap();
        fs::write(dir.path().join("outside.txt"), "keep me").unwrap();
        let inv = Invocation::detect(&root).unwrap();
        (dir, inv)
    }

    #[test]
    fn test_rename_inside_workspace() {
        let (_dir, inv) = workspace();
        let plan = plan(&inv, Path::new("src/old.rs"), Path::new("src/new.rs")).unwrap();
        assert_eq!(plan.source_relative, PathBuf::from("src/old.rs"));
        assert_eq!(plan.destination_relative, PathBuf::from("src/new.rs"));

        plan.execute().unwrap();
        let root = inv.root_path();
        assert!(!root.join("src/old.rs").exists());
        assert_eq!(fs::read_to_string(root.join("src/new.rs")).unwrap(), "fn main() {}");
    }

    #[test]
    fn test_creates_missing_parents() {
        let (_dir, inv) = workspace();
        let plan = plan(&inv, Path::new("src/old.rs"), Path::new("lib/deep/moved.rs")).unwrap();
        plan.execute().unwrap();
        assert!(inv.root_path().join("lib/deep/moved.rs").is_file());
    }

    #[test]
    fn test_move_into_existing_directory() {
        let (_dir, inv) = workspace();
        fs::create_dir(inv.root_path().join("archive")).unwrap();

        let plan = plan(&inv, Path::new("src/old.rs"), Path::new("archive")).unwrap();
        assert_eq!(plan.destination, inv.root_path().join("archive/old.rs"));
        plan.execute().unwrap();
        assert!(inv.root_path().join("archive/old.rs").is_file());
    }

    #[test]
    fn test_destination_outside_leaves_filesystem_unchanged() {
        let (dir, inv) = workspace();
        let err = plan(&inv, Path::new("src/old.rs"), Path::new("../stolen.rs")).unwrap_err();
        assert!(matches!(err, WsError::OutsideWorkspace { .. }));
        assert!(inv.root_path().join("src/old.rs").is_file());
        assert!(!dir.path().join("stolen.rs").exists());
    }

    #[test]
    fn test_source_outside_is_rejected() {
        let (dir, inv) = workspace();
        let err = plan(&inv, Path::new("../outside.txt"), Path::new("src/in.txt")).unwrap_err();
        assert!(matches!(err, WsError::OutsideWorkspace { .. }));
        assert!(dir.path().join("outside.txt").is_file());
        assert!(!inv.root_path().join("src/in.txt").exists());
    }

    #[test]
    fn test_missing_source() {
        let (_dir, inv) = workspace();
        let err = plan(&inv, Path::new("ghost.rs"), Path::new("src/x.rs")).unwrap_err();
        assert!(matches!(err, WsError::NotFound(_)));
    }

    #[test]
    fn test_move_directory_into_itself() {
        let (_dir, inv) = workspace();
        let err = plan(&inv, Path::new("src"), Path::new("src/nested/src")).unwrap_err();
        assert!(matches!(err, WsError::MoveIntoSelf { .. }));
    }

    #[test]
    fn test_same_path() {
        let (_dir, inv) = workspace();
        let err = plan(&inv, Path::new("src/old.rs"), Path::new("./src/../src/old.rs")).unwrap_err();
        assert!(matches!(err, WsError::SamePath(_)));
    }

    #[test]
    fn test_root_cannot_move() {
        let (_dir, inv) = workspace();
        let err = plan(&inv, Path::new("."), Path::new("renamed")).unwrap_err();
        assert!(matches!(err, WsError::RootTarget(_)));
    }

    #[test]
    fn test_failed_rename_removes_created_parents() {
        let (_dir, inv) = workspace();
        let plan = plan(&inv, Path::new("src/old.rs"), Path::new("lib/deep/moved.rs")).unwrap();
        // source vanishes between validation and the move
        fs::remove_file(inv.root_path().join("src/old.rs")).unwrap();

        let err = plan.execute().unwrap_err();
        assert!(matches!(err, WsError::Mutation { action: "move", .. }));
        assert!(!inv.root_path().join("lib").exists());
        assert!(inv.root_path().join("src").is_dir());
    }

    #[test]
    fn test_rename_onto_non_empty_directory_fails() {
        let (_dir, inv) = workspace();
        let root = inv.root_path();
        fs::create_dir_all(root.join("archive/src")).unwrap();
        fs::write(root.join("archive/src/kept.rs"), "k").unwrap();

        let plan = plan(&inv, Path::new("src"), Path::new("archive")).unwrap();
        assert_eq!(plan.destination, root.join("archive/src"));

        let err = plan.execute().unwrap_err();
        assert!(matches!(err, WsError::Mutation { .. }));
        assert!(root.join("src/old.rs").is_file());
        assert!(root.join("archive/src/kept.rs").is_file());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_destination_is_followed() {
        let (dir, inv) = workspace();
        fs::create_dir(dir.path().join("elsewhere")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("elsewhere"), inv.root_path().join("escape"))
            .unwrap();

        let err = plan(&inv, Path::new("src/old.rs"), Path::new("escape")).unwrap_err();
        assert!(matches!(err, WsError::OutsideWorkspace { .. }));
        assert!(inv.root_path().join("src/old.rs").is_file());
    }

    #[test]
    fn test_first_missing() {
        let (_dir, inv) = workspace();
        let root = inv.root_path();
        assert_eq!(first_missing(&root.join("a/b/c")), Some(root.join("a")));
        assert_eq!(first_missing(&root.join("src")), None);
    }
}
