// Tests for CLI exit code behavior.

use std::process::Command;

use super::common::{create_project, json_inline_bin};

#[test]
/// Exit code 0 when every file is rewritten.
fn test_exit_code_0_on_success() {
    let (_dir, root) = create_project(&[("index.ts", "import x from 'lodash';\n")]);
    let out = Command::new(json_inline_bin())
        .args(["transform", "index.ts"])
        .current_dir(&root)
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&out.stdout), "import x from 'lodash';\n");
}

#[test]
/// Exit code 1 when a JSON document is malformed; the error names the document.
fn test_exit_code_1_on_malformed_json() {
    let (_dir, root) = create_project(&[
        ("bad.json", "{ not json"),
        ("index.ts", "import {a} from './bad.json';\n"),
    ]);
    let out = Command::new(json_inline_bin())
        .args(["transform", "index.ts"])
        .current_dir(&root)
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("malformed JSON"), "stderr: {stderr}");
    assert!(stderr.contains("bad.json"));
}

#[test]
/// --check exits 1 when something would change and writes nothing.
fn test_exit_code_check() {
    let (_dir, root) = create_project(&[
        ("data.json", "[1, 2]"),
        ("changed.ts", "import d from './data.json';\n"),
        ("clean.ts", "export const x = 1;\n"),
    ]);
    let out = Command::new(json_inline_bin())
        .args(["transform", "--check", "changed.ts"])
        .current_dir(&root)
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stdout).contains("would rewrite"));

    let out = Command::new(json_inline_bin())
        .args(["transform", "--check", "clean.ts"])
        .current_dir(&root)
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(0));
    assert!(out.stdout.is_empty());
}

#[test]
/// Exit code 2 when no source files match.
fn test_exit_code_2_no_sources() {
    let (_dir, root) = create_project(&[("notes.md", "# hi\n")]);
    let out = Command::new(json_inline_bin())
        .args(["transform", "."])
        .current_dir(&root)
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(2));
}

#[test]
/// Clap usage errors exit with code 2.
fn test_exit_code_2_usage_error() {
    let out = Command::new(json_inline_bin())
        .arg("transform")
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(2));
}
