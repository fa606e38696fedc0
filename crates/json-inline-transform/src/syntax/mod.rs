//! Tree-sitter frontend: parses TypeScript/JavaScript sources into a
//! [`SourceFile`] the rewriter walks.

pub mod imports;

use std::path::{Path, PathBuf};

use tree_sitter::{Language, Node, Parser, Tree};

/// One parsed source file: its path, full text, and syntax tree.
pub struct SourceFile {
    path: PathBuf,
    text: String,
    tree: Tree,
}

impl SourceFile {
    /// Parse `text` with the grammar matching `path`'s extension.
    pub fn parse(path: impl Into<PathBuf>, text: impl Into<String>) -> Result<Self, ParseError> {
        let path = path.into();
        let text = text.into();
        let lang_name = detect_language(&path).unwrap_or("typescript");
        let lang = language_for_name(lang_name)?;

        let mut parser = Parser::new();
        parser
            .set_language(&lang)
            .map_err(|e| ParseError::Language(format!("{e}")))?;
        let tree = parser
            .parse(text.as_bytes(), None)
            .ok_or(ParseError::ParseFailed)?;

        Ok(Self { path, text, tree })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// True when tree-sitter had to recover from syntax errors.
    pub fn has_syntax_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }
}

impl std::fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("path", &self.path)
            .field("len", &self.text.len())
            .finish()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),
    #[error("language error: {0}")]
    Language(String),
    #[error("parse failed")]
    ParseFailed,
}

fn language_for_name(name: &str) -> Result<Language, ParseError> {
    match name {
        "typescript" => Ok(tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()),
        // Plain JS may contain JSX, which only the TSX grammar accepts.
        "tsx" | "javascript" => Ok(tree_sitter_typescript::LANGUAGE_TSX.into()),
        other => Err(ParseError::UnsupportedLanguage(other.to_string())),
    }
}

pub(crate) fn node_text<'a>(node: Node<'a>, source: &'a [u8]) -> &'a str {
    node.utf8_text(source).unwrap_or("")
}

/// Strip one pair of matching surrounding quotes from a string literal's text.
pub fn unquote(raw: &str) -> &str {
    let raw = raw.trim();
    for quote in ['"', '\'', '`'] {
        if raw.len() >= 2 && raw.starts_with(quote) && raw.ends_with(quote) {
            return &raw[1..raw.len() - 1];
        }
    }
    raw
}

pub fn detect_language(path: &Path) -> Option<&'static str> {
    match path.extension()?.to_str()? {
        "ts" | "mts" | "cts" => Some("typescript"),
        "tsx" => Some("tsx"),
        "js" | "jsx" | "mjs" | "cjs" => Some("javascript"),
        _ => None,
    }
}
