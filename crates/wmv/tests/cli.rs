use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

fn fixture() -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path().join("project");
    fs::create_dir_all(root.join(".vscode")).expect("marker");
    fs::create_dir_all(root.join("src")).expect("src");
    fs::write(root.join("src/util.rs"), "pub fn util() {}").expect("file");
    fs::write(dir.path().join("secret.txt"), "outside").expect("outside");
    let root = fs::canonicalize(root).expect("canonical");
    (dir, root)
}

fn wmv() -> Command {
    Command::cargo_bin("wmv").expect("bin")
}

#[test]
fn moves_inside_workspace() {
    let (_dir, root) = fixture();
    wmv()
        .current_dir(&root)
        .args(["src/util.rs", "lib/helpers/util.rs"])
        .assert()
        .success();

    assert!(!root.join("src/util.rs").exists());
    assert_eq!(
        fs::read_to_string(root.join("lib/helpers/util.rs")).expect("moved"),
        "pub fn util() {}"
    );
}

#[test]
fn outside_destination_changes_nothing() {
    let (dir, root) = fixture();
    let output = wmv()
        .current_dir(&root)
        .args(["src/util.rs", "../util.rs"])
        .output()
        .expect("run");

    assert_eq!(output.status.code(), Some(1));
    assert!(root.join("src/util.rs").exists());
    assert!(!dir.path().join("util.rs").exists());
}

#[test]
fn outside_source_changes_nothing() {
    let (dir, root) = fixture();
    wmv()
        .current_dir(&root)
        .args(["../secret.txt", "stolen.txt"])
        .assert()
        .code(1);

    assert!(dir.path().join("secret.txt").exists());
    assert!(!root.join("stolen.txt").exists());
}

#[test]
fn missing_source_fails() {
    let (_dir, root) = fixture();
    wmv()
        .current_dir(&root)
        .args(["ghost.rs", "src/ghost.rs"])
        .assert()
        .code(1);
}

#[test]
fn check_mode_does_not_move() {
    let (_dir, root) = fixture();
    wmv()
        .current_dir(&root)
        .args(["--check", "src/util.rs", "docs/util.rs"])
        .assert()
        .success();

    assert!(root.join("src/util.rs").exists());
    assert!(!root.join("docs").exists());
}

#[test]
fn needs_both_endpoints() {
    let (_dir, root) = fixture();
    wmv()
        .current_dir(&root)
        .arg("src/util.rs")
        .assert()
        .failure();
    assert!(root.join("src/util.rs").exists());
}

#[test]
fn failed_rename_exits_one() {
    let (_dir, root) = fixture();
    fs::create_dir_all(root.join("archive/src")).expect("archive");
    fs::write(root.join("archive/src/kept.rs"), "kept").expect("kept");

    let output = wmv()
        .current_dir(&root)
        .args(["src", "archive"])
        .output()
        .expect("run");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("error:"));
    assert!(root.join("src/util.rs").exists());
    assert!(root.join("archive/src/kept.rs").exists());
}

#[cfg(unix)]
#[test]
fn check_looks_through_symlinked_directories() {
    let (dir, root) = fixture();
    fs::create_dir(dir.path().join("elsewhere")).expect("elsewhere");
    std::os::unix::fs::symlink(dir.path().join("elsewhere"), root.join("escape")).expect("link");

    wmv()
        .current_dir(&root)
        .args(["--check", "src/util.rs", "escape"])
        .assert()
        .code(1);
    wmv()
        .current_dir(&root)
        .args(["src/util.rs", "escape"])
        .assert()
        .code(1);
    assert!(root.join("src/util.rs").exists());
    assert!(!dir.path().join("elsewhere/util.rs").exists());
}
