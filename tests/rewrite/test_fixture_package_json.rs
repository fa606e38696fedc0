// Rewriting a source that imports fields of its package manifest.

use json_inline_core::config::OutputMode;
use json_inline_transform::syntax::SourceFile;
use json_inline_transform::Rewriter;

use super::common::fixture_project;

#[test]
/// Named, aliased, side-effect and re-exported JSON imports are inlined;
/// ordinary imports and all other text are untouched.
fn test_fixture_value_mode() {
    let (_dir, root) = fixture_project();
    let file = root.join("test/fixture/foo.ts");
    let text = std::fs::read_to_string(&file).unwrap();

    let out = Rewriter::new(OutputMode::Value)
        .rewrite_source(&file, &text)
        .unwrap();

    let lines: Vec<&str> = out.text.lines().collect();
    assert_eq!(
        lines[0],
        "const version = \"1.2.0\", dependencies = { \"chai\": \"^4.0.0\" }, description = \"demo package\", LICENSE = \"MIT\";"
    );
    assert_eq!(lines[1], "import {test} from './foo.bar'");
    assert_eq!(lines[2], "");
    assert_eq!(lines[3], "// Should preserve regular import");
    assert_eq!(lines[4], "import 'chai'");
    // `version` is already bound by the first import; the re-export reuses it.
    assert_eq!(lines[12], "export { version };");
    assert_eq!(out.text.matches("const version").count(), 1);
    assert_eq!(out.text.lines().count(), text.lines().count());
    assert!(!out.text.contains("package.json"));

    let reparsed = SourceFile::parse(&file, out.text.clone()).unwrap();
    assert!(!reparsed.has_syntax_errors());
}

#[test]
fn test_fixture_type_mode() {
    let (_dir, root) = fixture_project();
    let file = root.join("test/fixture/foo.ts");
    let text = std::fs::read_to_string(&file).unwrap();

    let out = Rewriter::new(OutputMode::Type)
        .rewrite_source(&file, &text)
        .unwrap();

    let lines: Vec<&str> = out.text.lines().collect();
    assert_eq!(
        lines[0],
        "declare var version: string, dependencies: { \"chai\": string; }, description: string, LICENSE: string;"
    );
    assert_eq!(lines[12], "export { version };");
    assert_eq!(out.text.matches("var version").count(), 1);
}

#[test]
/// Every replaced import is reported with its line and resolved path.
fn test_fixture_report() {
    let (_dir, root) = fixture_project();
    let file = root.join("test/fixture/foo.ts");
    let text = std::fs::read_to_string(&file).unwrap();

    let out = Rewriter::new(OutputMode::Value)
        .rewrite_source(&file, &text)
        .unwrap();

    let lines: Vec<u32> = out.replaced.iter().map(|r| r.line).collect();
    assert_eq!(lines, vec![1, 3, 13]);
    for replaced in &out.replaced {
        assert_eq!(replaced.specifier, "../../package.json");
        assert_eq!(replaced.resolved_path, root.join("package.json"));
    }
    assert_eq!(
        out.replaced[0].declared,
        vec!["version", "dependencies", "description", "LICENSE"]
    );
    assert!(out.replaced[1].declared.is_empty());
    assert!(out.replaced[2].exported);
}
