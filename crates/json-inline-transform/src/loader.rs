use std::path::Path;

use json_inline_core::types::TransformError;
use serde_json::Value;

/// Reads a resolved `.json` path and parses it as standard JSON.
pub trait JsonSource {
    fn load(&self, path: &Path) -> Result<Value, TransformError>;
}

/// Loads documents from the file system. Nothing is cached: the same path
/// imported twice is read and parsed twice.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsJsonSource;

impl JsonSource for FsJsonSource {
    fn load(&self, path: &Path) -> Result<Value, TransformError> {
        let content = std::fs::read_to_string(path).map_err(|source| TransformError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| TransformError::MalformedJson {
            path: path.to_path_buf(),
            source,
        })
    }
}
