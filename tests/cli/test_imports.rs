// Tests for `json-inline imports`.

use std::process::Command;

use super::common::{fixture_project, json_inline_bin};

#[test]
fn test_imports_lists_every_site() {
    let (_dir, root) = fixture_project();
    let out = Command::new(json_inline_bin())
        .args(["imports", "test/fixture/foo.ts"])
        .current_dir(&root)
        .output()
        .unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].ends_with("package.json"));
    assert!(lines[1].contains("./foo.bar"));
    assert!(lines[1].ends_with("(not json)"));
    assert!(lines[3].contains("chai"));
    assert!(lines[3].ends_with("(not json)"));
}

#[test]
fn test_imports_json_output() {
    let (_dir, root) = fixture_project();
    let out = Command::new(json_inline_bin())
        .args(["--json", "imports", "test"])
        .current_dir(&root)
        .output()
        .unwrap();
    assert!(out.status.success());
    let entries: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let entries = entries.as_array().unwrap();
    // foo.bar.ts has no imports; foo.ts has five.
    assert_eq!(entries.len(), 5);
    assert_eq!(entries[0]["specifier"], "../../package.json");
    assert!(entries[0]["json"].is_string());
    assert!(entries[1]["json"].is_null());
    assert_eq!(entries[4]["line"], 13);
    assert_eq!(entries[4]["exported"], true);
}
