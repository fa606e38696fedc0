//! Import resolution: decides whether a module specifier names a JSON
//! document and, if so, where it lives.

use std::path::{Component, Path, PathBuf};

use oxc_resolver::{ResolveOptions, Resolver};

use crate::syntax::unquote;

/// Module resolution collaborator: maps a specifier plus base directory to an
/// absolute file path, or `None` when the module cannot be found.
pub trait ModuleResolve {
    fn resolve(&self, base_dir: &Path, specifier: &str) -> Option<PathBuf>;
}

/// Node-style resolution (relative paths, `node_modules`, package `exports`)
/// backed by `oxc_resolver`.
pub struct NodeModuleResolver {
    inner: Resolver,
}

impl NodeModuleResolver {
    pub fn new() -> Self {
        Self {
            inner: Resolver::new(ResolveOptions {
                extensions: vec![".json".into()],
                ..ResolveOptions::default()
            }),
        }
    }
}

impl Default for NodeModuleResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl ModuleResolve for NodeModuleResolver {
    fn resolve(&self, base_dir: &Path, specifier: &str) -> Option<PathBuf> {
        match self.inner.resolve(base_dir, specifier) {
            Ok(resolution) => Some(resolution.path().to_path_buf()),
            Err(err) => {
                tracing::trace!(specifier, base = %base_dir.display(), error = %err, "module not found");
                None
            }
        }
    }
}

/// Classifies import specifiers as JSON imports.
pub struct ImportResolver<M = NodeModuleResolver> {
    modules: M,
}

impl ImportResolver<NodeModuleResolver> {
    pub fn new() -> Self {
        Self {
            modules: NodeModuleResolver::new(),
        }
    }
}

impl Default for ImportResolver<NodeModuleResolver> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: ModuleResolve> ImportResolver<M> {
    pub fn with_modules(modules: M) -> Self {
        Self { modules }
    }

    /// Resolve `raw_specifier` (quoted or not) imported from
    /// `containing_file` to an absolute `.json` path.
    ///
    /// Relative or absolute specifiers already ending in `.json` are joined to
    /// the containing directory without touching the file system; a missing
    /// file surfaces later when it is loaded. Anything else goes through module
    /// resolution with `.json` appended, and a miss means "not a JSON import".
    pub fn resolve(&self, raw_specifier: &str, containing_file: &Path) -> Option<PathBuf> {
        let specifier = unquote(raw_specifier);
        if specifier.is_empty() {
            return None;
        }
        let base_dir = base_dir_of(containing_file);

        if specifier.ends_with(".json") && is_path_like(specifier) {
            return Some(normalize_path(&base_dir.join(specifier)));
        }

        let candidate = if specifier.ends_with(".json") {
            specifier.to_string()
        } else {
            format!("{specifier}.json")
        };
        let resolved = self.modules.resolve(&base_dir, &candidate)?;
        if resolved.extension().is_some_and(|ext| ext == "json") {
            Some(resolved)
        } else {
            None
        }
    }
}

fn is_path_like(specifier: &str) -> bool {
    specifier.starts_with("./")
        || specifier.starts_with("../")
        || specifier == "."
        || specifier == ".."
        || Path::new(specifier).is_absolute()
}

fn base_dir_of(containing_file: &Path) -> PathBuf {
    let file = std::path::absolute(containing_file).unwrap_or_else(|_| containing_file.to_path_buf());
    match file.parent() {
        Some(dir) => normalize_path(dir),
        None => file,
    }
}

/// Lexically remove `.` and `..` components.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() && !out.has_root() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}
