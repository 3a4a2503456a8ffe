use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;

const LAYOUT: &str = r#"
[files]
"README.md" = "demo\n"

[packages.libs.files]
"lib.go" = "package libs\n"
"#;

#[test]
fn generate_into_temp_dir_prints_location() {
    let temp = assert_fs::TempDir::new().unwrap();
    let layout = temp.child("layout.toml");
    layout.write_str(LAYOUT).unwrap();

    let mut cmd = cargo_bin_cmd!("make_fakews");
    let output = cmd
        .arg("generate")
        .arg("--layout")
        .arg(layout.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let out = String::from_utf8_lossy(&output);

    // Expect "Wrote workspace to <dir>" as the summary line
    let start = out.find("Wrote").expect("Wrote marker");
    let root = PathBuf::from(out[start..].split_whitespace().last().expect("workspace path"));

    assert!(root.join("WORKSPACE").is_file());
    assert_eq!(fs::read_to_string(root.join("libs/lib.go")).unwrap(), "package libs\n");
    assert!(root.join("libs/BUILD.bazel").is_file());

    let _ = fs::remove_dir_all(&root);
}

#[test]
fn generate_with_manifest_lists_files() {
    let temp = assert_fs::TempDir::new().unwrap();
    let layout = temp.child("layout.toml");
    layout.write_str(LAYOUT).unwrap();
    let out = temp.child("ws");

    cargo_bin_cmd!("make_fakews")
        .args(["generate", "--manifest", "--layout"])
        .arg(layout.path())
        .arg("--out")
        .arg(out.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "README.md\nWORKSPACE\nlibs/BUILD.bazel\nlibs/lib.go\n",
        ));

    out.child("README.md").assert("demo\n");
}

#[test]
fn generate_refuses_non_empty_out_dir() {
    let temp = assert_fs::TempDir::new().unwrap();
    let layout = temp.child("layout.toml");
    layout.write_str(LAYOUT).unwrap();
    temp.child("ws/stray.txt").write_str("x").unwrap();

    cargo_bin_cmd!("make_fakews")
        .arg("generate")
        .arg("--layout")
        .arg(layout.path())
        .arg("--out")
        .arg(temp.child("ws").path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty directory"));
}

#[test]
fn modify_rejects_workspace_marker_changes() {
    let temp = assert_fs::TempDir::new().unwrap();
    let ws = temp.child("ws");
    ws.child("WORKSPACE").write_str("original\n").unwrap();
    let layout = temp.child("change.toml");
    layout
        .write_str("[files]\n\"WORKSPACE\" = \"changed\\n\"\n")
        .unwrap();

    cargo_bin_cmd!("make_fakews")
        .arg("modify")
        .arg("--layout")
        .arg(layout.path())
        .arg("--root")
        .arg(ws.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("workspace marker"));

    ws.child("WORKSPACE").assert("original\n");
}

#[test]
fn modify_replaces_files() {
    let temp = assert_fs::TempDir::new().unwrap();
    let ws = temp.child("ws");
    ws.child("WORKSPACE").write_str("").unwrap();
    ws.child("app/main.go").write_str("old\n").unwrap();
    let layout = temp.child("change.toml");
    layout
        .write_str("[packages.app.files]\n\"main.go\" = \"new\\n\"\n")
        .unwrap();

    cargo_bin_cmd!("make_fakews")
        .arg("modify")
        .arg("--layout")
        .arg(layout.path())
        .arg("--root")
        .arg(ws.path())
        .assert()
        .success();

    ws.child("app/main.go").assert("new\n");
    ws.child("app/BUILD.bazel").assert(predicate::path::is_file());
}

#[test]
fn bad_layout_is_reported() {
    let temp = assert_fs::TempDir::new().unwrap();
    let layout = temp.child("bad.toml");
    layout.write_str("[files\n").unwrap();

    cargo_bin_cmd!("make_fakews")
        .arg("generate")
        .arg("--layout")
        .arg(layout.path())
        .arg("--out")
        .arg(temp.child("ws").path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load layout"));
}

#[test]
fn misspelled_layout_table_is_reported() {
    let temp = assert_fs::TempDir::new().unwrap();
    let layout = temp.child("typo.toml");
    layout.write_str("[file]\n\"a.txt\" = \"x\"\n").unwrap();
    let out = temp.child("ws");

    cargo_bin_cmd!("make_fakews")
        .arg("generate")
        .arg("--layout")
        .arg(layout.path())
        .arg("--out")
        .arg(out.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to load layout"));

    out.child("WORKSPACE").assert(predicate::path::missing());
}
