use std::path::PathBuf;

use serde::Serialize;

/// Where a bound name takes its value from inside the loaded JSON document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "key")]
pub enum BindingSource {
    /// The whole document (`* as ns`, default import, `import x = require(..)`).
    Whole,
    /// A top-level property of the document (`{ key }` / `{ key as alias }`).
    Key(String),
}

/// One name introduced by a JSON import.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ImportBinding {
    /// Name the declaration is emitted under.
    pub local: String,
    pub source: BindingSource,
}

impl ImportBinding {
    pub fn whole(local: impl Into<String>) -> Self {
        Self {
            local: local.into(),
            source: BindingSource::Whole,
        }
    }

    /// Named binding; `alias` overrides the local name when present.
    pub fn named(key: impl Into<String>, alias: Option<String>) -> Self {
        let key = key.into();
        Self {
            local: alias.unwrap_or_else(|| key.clone()),
            source: BindingSource::Key(key),
        }
    }

    pub fn is_aliased(&self) -> bool {
        match &self.source {
            BindingSource::Whole => false,
            BindingSource::Key(key) => *key != self.local,
        }
    }
}

/// The binding clause of an import-shaped statement, as written in source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportClause {
    /// `import "./x.json"` or `import {} from "./x.json"`.
    Bare,
    /// Explicit bindings (namespace, default, named, require, re-export list).
    Bindings(Vec<ImportBinding>),
    /// `export * from "./x.json"`: one binding per identifier-safe top-level key.
    AllKeys,
}

/// Record of one import statement replaced by the rewriter.
#[derive(Debug, Clone, Serialize)]
pub struct ReplacedImport {
    /// Module specifier as written, quotes stripped.
    pub specifier: String,
    /// Absolute path of the inlined JSON document.
    pub resolved_path: PathBuf,
    /// Line of the original statement (1-based).
    pub line: u32,
    /// Names declared by the replacement, in emission order.
    pub declared: Vec<String>,
    /// Whether the replacement carries an `export` modifier.
    pub exported: bool,
}

/// Errors that abort the rewrite of a single file.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {}: {source}", path.display())]
    MalformedJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse source {}: {reason}", path.display())]
    SourceParse { path: PathBuf, reason: String },
}

impl TransformError {
    /// Path of the file the failure is attributed to.
    pub fn path(&self) -> &std::path::Path {
        match self {
            TransformError::Read { path, .. }
            | TransformError::MalformedJson { path, .. }
            | TransformError::SourceParse { path, .. } => path,
        }
    }
}
