//! Rewrites JSON imports in TypeScript/JavaScript sources into inlined
//! declarations.
//!
//! - [`syntax`] — tree-sitter parsing and import-site extraction
//! - [`resolver`] — specifier to `.json` path resolution (`oxc_resolver`)
//! - [`loader`] — reading and parsing JSON documents
//! - [`lower`] — JSON to literal expressions or structural types
//! - [`emit`] — replacement statement AST and printer
//! - [`visit`] — node visitation with substitution
//! - [`rewriter`] — the rewrite pass tying it together

pub mod emit;
pub mod loader;
pub mod lower;
pub mod resolver;
pub mod rewriter;
pub mod syntax;
pub mod visit;

pub use rewriter::{Rewritten, Rewriter};
