//! Path containment
//!
//! Both sides must already be resolved (absolute, normalized). The check is a
//! byte-wise prefix test on the OS string with a separator guard, so
//! `/work/app` does not contain `/work/application`.

use std::path::{Path, PathBuf, MAIN_SEPARATOR};

/// True iff `candidate` is `root` or nested under it
pub fn is_within(candidate: &Path, root: &Path) -> bool {
    let candidate = candidate.as_os_str().as_encoded_bytes();
    let root = root.as_os_str().as_encoded_bytes();

    if candidate == root {
        return true;
    }

    let mut sep = [0u8; 4];
    let sep = MAIN_SEPARATOR.encode_utf8(&mut sep).as_bytes();

    // "/" already ends with the separator
    if root.ends_with(sep) {
        return candidate.starts_with(root);
    }

    candidate.starts_with(root) && candidate[root.len()..].starts_with(sep)
}

/// Workspace-relative form of `candidate`, `.` for the root itself
///
/// Falls back to the full path when `candidate` is not inside `root`.
pub fn relative_to(candidate: &Path, root: &Path) -> PathBuf {
    match candidate.strip_prefix(root) {
        Ok(rel) if rel.as_os_str().is_empty() => PathBuf::from("."),
        Ok(rel) => rel.to_path_buf(),
        Err(_) => candidate.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_root_contains_itself() {
        assert!(is_within(Path::new("/work/app"), Path::new("/work/app")));
    }

    #[test]
    fn test_child_is_within() {
        assert!(is_within(Path::new("/work/app/x"), Path::new("/work/app")));
        assert!(is_within(
            Path::new("/work/app/src/main.rs"),
            Path::new("/work/app")
        ));
    }

    #[test]
    fn test_sibling_with_shared_prefix_is_outside() {
        assert!(!is_within(Path::new("/work/app_sibling"), Path::new("/work/app")));
        assert!(!is_within(Path::new("/work/application"), Path::new("/work/app")));
    }

    #[test]
    fn test_parent_is_outside() {
        assert!(!is_within(Path::new("/work"), Path::new("/work/app")));
        assert!(!is_within(Path::new("/"), Path::new("/work/app")));
    }

    #[test]
    fn test_filesystem_root_contains_everything() {
        assert!(is_within(Path::new("/"), Path::new("/")));
        assert!(is_within(Path::new("/etc/hosts"), Path::new("/")));
    }

    #[test]
    fn test_trailing_separator_names_the_root() {
        assert!(is_within(Path::new("/work/app/"), Path::new("/work/app")));
    }

    #[test]
    fn test_relative_to() {
        let root = Path::new("/work/app");
        assert_eq!(relative_to(Path::new("/work/app"), root), PathBuf::from("."));
        assert_eq!(
            relative_to(Path::new("/work/app/src/lib.rs"), root),
            PathBuf::from("src/lib.rs")
        );
        assert_eq!(
            relative_to(Path::new("/elsewhere"), root),
            PathBuf::from("/elsewhere")
        );
    }

    proptest! {
        #[test]
        fn prop_joined_child_is_within(
            root in "(/[a-z]{1,8}){1,4}",
            child in "[a-z0-9_.]{1,8}(/[a-z0-9_]{1,8}){0,3}",
        ) {
            let root = PathBuf::from(root);
            let candidate = PathBuf::from(format!("{}/{}", root.display(), child));
            prop_assert!(is_within(&candidate, &root));
        }

        #[test]
        fn prop_suffixed_sibling_is_outside(
            root in "(/[a-z]{1,8}){1,4}",
            suffix in "[a-z0-9_]{1,8}",
        ) {
            let root = PathBuf::from(root);
            let sibling = PathBuf::from(format!("{}{}", root.display(), suffix));
            prop_assert!(!is_within(&sibling, &root));
        }

        #[test]
        fn prop_parent_is_outside(root in "(/[a-z]{1,8}){1,4}") {
            let root = PathBuf::from(root);
            let parent = root.parent().map(Path::to_path_buf).unwrap_or_default();
            prop_assert!(!is_within(&parent, &root));
        }
    }
}
