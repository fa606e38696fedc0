//! Node visitation with substitution.
//!
//! A [`Visitor`] looks at each node once and either lets the walk descend into
//! its children or replaces the node with zero or more statements. Replaced
//! nodes are not descended into. The walk produces byte-range [`Edit`]s that
//! [`apply_edits`] splices into the original text; everything outside an edit
//! is copied through untouched.

use std::ops::Range;

use tree_sitter::Node;

use crate::emit::{self, Statement};

/// What to do with a visited node.
#[derive(Debug, Clone, PartialEq)]
pub enum Visit {
    /// Keep the node and visit its children.
    Recurse,
    /// Substitute the node with these statements (possibly none).
    Replace(Vec<Statement>),
}

pub trait Visitor {
    type Error;

    fn visit(&mut self, node: Node<'_>, source: &[u8]) -> Result<Visit, Self::Error>;
}

/// A replacement of `range` in the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub range: Range<usize>,
    pub replacement: String,
}

/// Walk the tree rooted at `root` in document order. Stops at the first
/// visitor error.
pub fn walk<V: Visitor>(root: Node<'_>, source: &[u8], visitor: &mut V) -> Result<Vec<Edit>, V::Error> {
    let mut edits = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        match visitor.visit(node, source)? {
            Visit::Replace(statements) => edits.push(Edit {
                range: node.byte_range(),
                replacement: emit::render(&statements),
            }),
            Visit::Recurse => {
                let mut cursor = node.walk();
                let children: Vec<Node<'_>> = node.named_children(&mut cursor).collect();
                stack.extend(children.into_iter().rev());
            }
        }
    }
    Ok(edits)
}

/// Splice `edits` into `text`. Edits must not overlap; order does not matter.
pub fn apply_edits(text: &str, edits: &[Edit]) -> String {
    let mut sorted: Vec<&Edit> = edits.iter().collect();
    sorted.sort_by_key(|e| e.range.start);

    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for edit in sorted {
        out.push_str(&text[cursor..edit.range.start]);
        out.push_str(&edit.replacement);
        cursor = edit.range.end;
    }
    out.push_str(&text[cursor..]);
    out
}
