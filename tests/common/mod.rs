//! Shared test helpers for json-inline integration tests.
//!
//! Import from any integration test file with:
//!   `#[path = "common/mod.rs"] mod common;`

use std::fs;
use std::path::PathBuf;
use std::process::Command;

use tempfile::TempDir;

/// Create a project from a set of files.
///
/// Each entry in `files` is `(relative_path, content)`.
/// Returns (TempDir, project_root). Hold the TempDir to keep the directory alive.
#[allow(dead_code)]
pub fn create_project(files: &[(&str, &str)]) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    for (path, content) in files {
        let full_path = root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
    }

    let project_root = root.to_path_buf();
    (dir, project_root)
}

/// The package manifest the fixture source imports from.
#[allow(dead_code)]
pub const PACKAGE_JSON: &str = r#"{
  "name": "fixture",
  "version": "1.2.0",
  "description": "demo package",
  "license": "MIT",
  "dependencies": { "chai": "^4.0.0" }
}
"#;

/// A source file mixing JSON imports, ordinary imports and re-exports.
#[allow(dead_code)]
pub const FIXTURE_SOURCE: &str = "import {version, dependencies, description, license as LICENSE} from '../../package.json'
import {test} from './foo.bar'
import '../../package.json'
// Should preserve regular import
import 'chai'
export function foo () {
    return [version, dependencies, description, LICENSE]
}
export function getTest () {
    return test
}
export type foo = typeof test
export {version} from '../../package.json'";

/// Project with `package.json` at the root and the fixture at `test/fixture/foo.ts`.
#[allow(dead_code)]
pub fn fixture_project() -> (TempDir, PathBuf) {
    create_project(&[
        ("package.json", PACKAGE_JSON),
        ("test/fixture/foo.ts", FIXTURE_SOURCE),
        ("test/fixture/foo.bar.ts", "export const test = 1;\n"),
    ])
}

/// Get path to compiled json-inline binary.
///
/// Builds the binary if it doesn't exist yet.
#[allow(dead_code)]
pub fn json_inline_bin() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove 'deps'
    path.push("json-inline");
    if path.exists() {
        return path;
    }
    let workspace = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let fallback = workspace.join("target/debug/json-inline");
    if fallback.exists() {
        return fallback;
    }
    let status = Command::new("cargo")
        .args(["build", "-p", "json-inline-cli"])
        .current_dir(&workspace)
        .status()
        .expect("Failed to build json-inline");
    assert!(status.success(), "Failed to build json-inline binary");
    fallback
}
