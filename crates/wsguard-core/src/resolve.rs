//! Turning user arguments into absolute, normalized paths
//!
//! Resolution is always relative to an explicit working directory; nothing
//! here reads the process's current directory.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::trace;

use crate::error::{WsError, WsResult};

/// Lexically normalize an absolute path
///
/// Drops `.`, applies `..` to the preceding component (never above the
/// filesystem root) and collapses repeated separators. Touches no files.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(name) => out.push(name),
        }
    }
    out
}

/// Resolve `arg` against `cwd` without following a symlink in the last component
///
/// Every existing ancestor is canonicalized so the result can be compared
/// against a canonical workspace root; the final name is kept as given, so a
/// symlink argument names the link itself. The path does not need to exist.
pub fn resolve(cwd: &Path, arg: &Path) -> WsResult<PathBuf> {
    if !cwd.is_absolute() {
        return Err(WsError::RelativePath(cwd.to_path_buf()));
    }

    let absolute = normalize(&cwd.join(arg));
    let resolved = match (absolute.parent(), absolute.file_name()) {
        (Some(parent), Some(name)) => canonicalize_existing_prefix(parent)?.join(name),
        _ => canonicalize_existing_prefix(&absolute)?,
    };

    trace!(arg = %arg.display(), resolved = %resolved.display(), "resolved");
    Ok(resolved)
}

/// Resolve `arg` against `cwd` following every symlink; the path must exist
pub fn resolve_existing(cwd: &Path, arg: &Path) -> WsResult<PathBuf> {
    if !cwd.is_absolute() {
        return Err(WsError::RelativePath(cwd.to_path_buf()));
    }

    let absolute = normalize(&cwd.join(arg));
    match fs::canonicalize(&absolute) {
        Ok(real) => Ok(real),
        Err(e) if is_missing(&e) => Err(WsError::NotFound(absolute)),
        Err(source) => Err(WsError::Resolve {
            path: absolute,
            source,
        }),
    }
}

/// True if something (file, directory or link, even dangling) sits at `path`
pub fn exists(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

fn canonicalize_existing_prefix(path: &Path) -> WsResult<PathBuf> {
    let mut existing = path;
    let mut tail = Vec::new();

    loop {
        match fs::canonicalize(existing) {
            Ok(mut real) => {
                for name in tail.iter().rev() {
                    real.push(name);
                }
                return Ok(real);
            }
            Err(e) if is_missing(&e) => match (existing.parent(), existing.file_name()) {
                (Some(parent), Some(name)) => {
                    tail.push(name.to_os_string());
                    existing = parent;
                }
                _ => return Ok(path.to_path_buf()),
            },
            Err(source) => {
                return Err(WsError::Resolve {
                    path: existing.to_path_buf(),
                    source,
                })
            }
        }
    }
}

pub(crate) fn is_missing(e: &io::Error) -> bool {
    matches!(
        e.kind(),
        io::ErrorKind::NotFound | io::ErrorKind::NotADirectory
    )
}
