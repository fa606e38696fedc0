//! Import-shaped statement extraction from tree-sitter nodes.
//!
//! Recognizes `import ... from "x"`, `import "x"`, `import x = require("x")`,
//! and the `export ... from "x"` re-export family. Everything else is not an
//! import site.

use std::ops::Range;

use json_inline_core::types::{ImportBinding, ImportClause};
use tree_sitter::Node;

use super::{node_text, unquote};

/// A statement that pulls bindings from another module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSite {
    /// Bytes of the whole statement, including any `export` keyword.
    pub byte_range: Range<usize>,
    /// Line of the statement (1-based).
    pub line: u32,
    /// Module specifier, quotes stripped.
    pub specifier: String,
    pub clause: ImportClause,
    /// The replacement must carry `export` (re-exports, `export import`).
    pub exported: bool,
    /// `export ... from "x"`: the original statement declares no local names.
    pub reexport: bool,
    /// Inside a `declare module`/`declare namespace` body.
    pub ambient: bool,
}

/// Classify `node` as an import site. Returns `None` for any other node.
pub fn import_site(node: Node<'_>, source: &[u8]) -> Option<ImportSite> {
    match node.kind() {
        "import_statement" => {
            // `export import x = require(..)` is handled from the parent.
            if node.parent().is_some_and(|p| p.kind() == "export_statement") {
                return None;
            }
            import_statement_site(node, source)
        }
        "export_statement" => {
            if let Some(src) = node.child_by_field_name("source") {
                return Some(ImportSite {
                    byte_range: node.byte_range(),
                    line: line_of(node),
                    specifier: unquote(node_text(src, source)).to_string(),
                    clause: reexport_clause(node, source),
                    exported: true,
                    reexport: true,
                    ambient: in_ambient_context(node),
                });
            }
            let mut cursor = node.walk();
            let inner = node
                .named_children(&mut cursor)
                .find(|c| c.kind() == "import_statement")?;
            let mut site = import_statement_site(inner, source)?;
            site.byte_range = node.byte_range();
            site.line = line_of(node);
            site.exported = true;
            Some(site)
        }
        _ => None,
    }
}

/// Collect every import site in the tree rooted at `root`, in document order.
/// Nested sites (e.g. inside `declare module` blocks) are included.
pub fn collect_import_sites(root: Node<'_>, source: &[u8]) -> Vec<ImportSite> {
    let mut sites = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        if let Some(site) = import_site(node, source) {
            sites.push(site);
            continue;
        }
        let mut cursor = node.walk();
        let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
        stack.extend(children.into_iter().rev());
    }
    sites
}

fn in_ambient_context(node: Node<'_>) -> bool {
    let mut current = node.parent();
    while let Some(parent) = current {
        if parent.kind() == "ambient_declaration" {
            return true;
        }
        current = parent.parent();
    }
    false
}

fn line_of(node: Node<'_>) -> u32 {
    node.start_position().row as u32 + 1
}

fn import_statement_site(node: Node<'_>, source: &[u8]) -> Option<ImportSite> {
    let mut bindings = Vec::new();
    let mut specifier = node
        .child_by_field_name("source")
        .map(|s| unquote(node_text(s, source)).to_string());

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "import_clause" => collect_import_clause(child, source, &mut bindings),
            "import_require_clause" => {
                let mut inner = child.walk();
                if let Some(name) = child
                    .named_children(&mut inner)
                    .find(|c| c.kind() == "identifier")
                {
                    bindings.push(ImportBinding::whole(node_text(name, source)));
                }
                if let Some(src) = child.child_by_field_name("source") {
                    specifier = Some(unquote(node_text(src, source)).to_string());
                }
            }
            _ => {}
        }
    }

    Some(ImportSite {
        byte_range: node.byte_range(),
        line: line_of(node),
        specifier: specifier?,
        clause: if bindings.is_empty() {
            ImportClause::Bare
        } else {
            ImportClause::Bindings(bindings)
        },
        exported: false,
        reexport: false,
        ambient: in_ambient_context(node),
    })
}

fn collect_import_clause(clause: Node<'_>, source: &[u8], bindings: &mut Vec<ImportBinding>) {
    let mut cursor = clause.walk();
    for child in clause.named_children(&mut cursor) {
        match child.kind() {
            // default import: `import pkg from "./package.json"`
            "identifier" => bindings.push(ImportBinding::whole(node_text(child, source))),
            "namespace_import" => {
                let mut inner = child.walk();
                let name = child
                    .named_children(&mut inner)
                    .find(|c| c.kind() == "identifier");
                if let Some(name) = name {
                    bindings.push(ImportBinding::whole(node_text(name, source)));
                }
            }
            "named_imports" => {
                let mut inner = child.walk();
                for spec in child.named_children(&mut inner) {
                    if spec.kind() != "import_specifier" {
                        continue;
                    }
                    let Some(name) = spec.child_by_field_name("name") else {
                        continue;
                    };
                    let key = unquote(node_text(name, source)).to_string();
                    let alias = spec
                        .child_by_field_name("alias")
                        .map(|a| node_text(a, source).to_string());
                    bindings.push(named_or_default(key, alias));
                }
            }
            _ => {}
        }
    }
}

fn reexport_clause(node: Node<'_>, source: &[u8]) -> ImportClause {
    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "export_clause" => {
                let mut inner = child.walk();
                let bindings: Vec<ImportBinding> = child
                    .named_children(&mut inner)
                    .filter(|spec| spec.kind() == "export_specifier")
                    .filter_map(|spec| {
                        let name = spec.child_by_field_name("name")?;
                        let key = unquote(node_text(name, source)).to_string();
                        let alias = spec
                            .child_by_field_name("alias")
                            .map(|a| unquote(node_text(a, source)).to_string());
                        Some(named_or_default(key, alias))
                    })
                    .collect();
                return if bindings.is_empty() {
                    ImportClause::Bare
                } else {
                    ImportClause::Bindings(bindings)
                };
            }
            "namespace_export" => {
                let mut inner = child.walk();
                let name = child.named_children(&mut inner).next();
                if let Some(name) = name {
                    let local = unquote(node_text(name, source)).to_string();
                    return ImportClause::Bindings(vec![ImportBinding::whole(local)]);
                }
            }
            _ => {}
        }
    }
    // `export * from "./x.json"`
    ImportClause::AllKeys
}

/// The `default` export of a JSON module is the whole document.
fn named_or_default(key: String, alias: Option<String>) -> ImportBinding {
    if key == "default" {
        ImportBinding::whole(alias.unwrap_or(key))
    } else {
        ImportBinding::named(key, alias)
    }
}
