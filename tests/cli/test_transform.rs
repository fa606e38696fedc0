// Tests for `json-inline transform` output handling.

use std::fs;
use std::process::Command;

use super::common::{create_project, fixture_project, json_inline_bin};

#[test]
/// Without --out-dir the rewritten file goes to stdout.
fn test_transform_prints_to_stdout() {
    let (_dir, root) = create_project(&[
        ("data.json", r#"{"a": 1, "b": [true, null]}"#),
        ("index.ts", "import {a, b} from './data.json';\nexport const sum = a;\n"),
    ]);
    let out = Command::new(json_inline_bin())
        .args(["transform", "index.ts"])
        .current_dir(&root)
        .output()
        .unwrap();
    assert!(out.status.success());
    assert_eq!(
        String::from_utf8_lossy(&out.stdout),
        "const a = 1, b = [true, null];\nexport const sum = a;\n"
    );
}

#[test]
/// --out-dir mirrors the walked directory layout and leaves sources alone.
fn test_transform_out_dir_mirrors_layout() {
    let (_dir, root) = create_project(&[
        ("src/data.json", r#"{"name": "x"}"#),
        ("src/lib/util.ts", "import {name} from '../data.json';\n"),
        ("src/index.ts", "import d from './data.json';\n"),
    ]);
    let out = Command::new(json_inline_bin())
        .args(["transform", "src", "--out-dir", "dist"])
        .current_dir(&root)
        .output()
        .unwrap();
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));

    assert_eq!(
        fs::read_to_string(root.join("dist/index.ts")).unwrap(),
        "const d = { \"name\": \"x\" };\n"
    );
    assert_eq!(
        fs::read_to_string(root.join("dist/lib/util.ts")).unwrap(),
        "const name = \"x\";\n"
    );
    assert_eq!(
        fs::read_to_string(root.join("src/index.ts")).unwrap(),
        "import d from './data.json';\n"
    );
    assert!(!root.join("dist/data.json").exists());
}

#[test]
fn test_transform_declaration_flag() {
    let (_dir, root) = fixture_project();
    let out = Command::new(json_inline_bin())
        .args(["transform", "--declaration", "test/fixture/foo.ts"])
        .current_dir(&root)
        .output()
        .unwrap();
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.starts_with("declare var version: string,"));
    assert!(stdout.contains("import 'chai'"));
}

#[test]
/// `outDir` and `isDeclaration` from json-inline.json apply when flags are absent.
fn test_transform_uses_project_config() {
    let (_dir, root) = create_project(&[
        ("json-inline.json", r#"{"isDeclaration": true, "outDir": "types"}"#),
        ("src/data.json", r#"{"n": 2}"#),
        ("src/index.ts", "import {n} from './data.json';\n"),
    ]);
    let out = Command::new(json_inline_bin())
        .args(["transform", "src"])
        .current_dir(&root)
        .output()
        .unwrap();
    assert!(out.status.success());
    assert_eq!(
        fs::read_to_string(root.join("types/index.ts")).unwrap(),
        "declare var n: number;\n"
    );
}

#[test]
fn test_transform_json_report() {
    let (_dir, root) = fixture_project();
    let out = Command::new(json_inline_bin())
        .args(["transform", "test/fixture/foo.ts", "--json"])
        .current_dir(&root)
        .output()
        .unwrap();
    assert!(out.status.success());
    let report: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let files = report.as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["changed"], true);
    let text = files[0]["text"].as_str().unwrap();
    assert!(text.starts_with("const version = \"1.2.0\","));
    assert!(text.contains("import 'chai'"));
    let replaced = files[0]["replaced"].as_array().unwrap();
    assert_eq!(replaced.len(), 3);
    assert_eq!(replaced[0]["line"], 1);
    assert_eq!(replaced[2]["exported"], true);
}

#[test]
/// Same-named files under sibling inputs land in separate output paths.
fn test_transform_out_dir_keeps_sibling_inputs_apart() {
    let (_dir, root) = create_project(&[
        ("a/data.json", r#"{"v": 1}"#),
        ("a/index.ts", "import {v} from './data.json';\n"),
        ("b/data.json", r#"{"v": 2}"#),
        ("b/index.ts", "import {v} from './data.json';\n"),
    ]);
    let out = Command::new(json_inline_bin())
        .args(["transform", "a", "b", "--out-dir", "dist"])
        .current_dir(&root)
        .output()
        .unwrap();
    assert!(out.status.success(), "stderr: {}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(
        fs::read_to_string(root.join("dist/a/index.ts")).unwrap(),
        "const v = 1;\n"
    );
    assert_eq!(
        fs::read_to_string(root.join("dist/b/index.ts")).unwrap(),
        "const v = 2;\n"
    );
    assert!(!root.join("dist/index.ts").exists());
}
