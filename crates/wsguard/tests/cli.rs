use std::fs;

use assert_cmd::Command;

fn wsguard() -> Command {
    Command::cargo_bin("wsguard").expect("bin")
}

#[test]
fn root_json_names_marker() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::write(dir.path().join("app.code-workspace"), "{}").expect("marker");
    fs::create_dir_all(dir.path().join("src")).expect("src");
    let root = fs::canonicalize(dir.path()).expect("canonical");

    let output = wsguard()
        .current_dir(root.join("src"))
        .args(["root", "--json"])
        .output()
        .expect("run");

    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(value["root"], root.display().to_string());
    assert_eq!(value["marker"], "code_workspace");
}

#[test]
fn check_json_reports_each_path() {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path().join("ws");
    fs::create_dir_all(root.join(".git")).expect("marker");

    let output = wsguard()
        .current_dir(&root)
        .args(["check", "--json", "inside.txt", "../ws_sibling"])
        .output()
        .expect("run");

    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    let root = fs::canonicalize(&root).expect("canonical");
    assert_eq!(value["root"], root.display().to_string());
    assert_eq!(value["marker"], "git");
    assert_eq!(value["all_inside"], false);
    assert_eq!(value["verdicts"][0]["inside"], true);
    assert_eq!(value["verdicts"][1]["inside"], false);
}

#[test]
fn init_prints_wrapper() {
    let output = wsguard().args(["init", "bash"]).output().expect("run");
    assert!(output.status.success());
    let script = String::from_utf8_lossy(&output.stdout);
    assert!(script.contains("wcd() {"));
    assert!(script.contains("CHANGE_DIR="));

    wsguard().args(["init", "powershell"]).assert().code(1);
}
