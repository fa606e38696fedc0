//! Configuration file loading for json-inline.
//!
//! Reads `json-inline.json` from a project directory and provides typed access
//! to the transform settings. Falls back to defaults when the file is missing
//! or incomplete.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// File name looked up in the project directory.
pub const CONFIG_FILE_NAME: &str = "json-inline.json";

/// Which kind of replacement declarations the rewriter emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Executable output: `const name = <literal>;`
    #[default]
    Value,
    /// Ambient declaration output: `declare var name: <type>;`
    Type,
}

impl OutputMode {
    pub fn from_declaration_flag(is_declaration: bool) -> Self {
        if is_declaration {
            OutputMode::Type
        } else {
            OutputMode::Value
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputMode::Value => "value",
            OutputMode::Type => "type",
        }
    }
}

impl std::fmt::Display for OutputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level transform configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformConfig {
    /// Emit ambient type declarations instead of value literals.
    #[serde(default)]
    pub is_declaration: bool,
    /// Source file extensions (without the dot) the CLI picks up when walking
    /// directories.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Directory rewritten files are written to. `None` prints to stdout.
    #[serde(default)]
    pub out_dir: Option<String>,
}

fn default_extensions() -> Vec<String> {
    ["ts", "tsx", "mts", "cts", "js", "jsx", "mjs", "cjs"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            is_declaration: false,
            extensions: default_extensions(),
            out_dir: None,
        }
    }
}

impl TransformConfig {
    /// Load configuration from `json-inline.json` inside `project_dir`.
    /// Returns defaults if the file doesn't exist or can't be parsed.
    pub fn load(project_dir: &Path) -> Self {
        let config_path = project_dir.join(CONFIG_FILE_NAME);
        let content = match std::fs::read_to_string(&config_path) {
            Ok(c) => c,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&content) {
            Ok(cfg) => cfg,
            Err(e) => {
                tracing::warn!(
                    path = %config_path.display(),
                    error = %e,
                    "failed to parse config, using defaults"
                );
                Self::default()
            }
        }
    }

    pub fn output_mode(&self) -> OutputMode {
        OutputMode::from_declaration_flag(self.is_declaration)
    }

    /// Whether `path` carries one of the configured source extensions.
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|x| x == ext))
    }
}
