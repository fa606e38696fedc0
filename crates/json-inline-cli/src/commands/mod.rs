pub mod imports;
pub mod transform;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use json_inline_core::config::TransformConfig;
use json_inline_transform::resolver::normalize_path;
use walkdir::WalkDir;

/// A source file picked up from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SourceEntry {
    pub path: PathBuf,
    /// Path relative to the deepest directory shared by all arguments; used
    /// to mirror the layout into `--out-dir` without two inputs colliding.
    pub relative: PathBuf,
}

/// Expand file and directory arguments into source files. Directories are
/// walked recursively, skipping `node_modules` and hidden entries; only
/// configured extensions are kept. Explicit file arguments are always kept.
/// A file reached twice is listed once.
pub(crate) fn collect_sources(paths: &[PathBuf], config: &TransformConfig) -> Vec<SourceEntry> {
    let base = common_base(paths);
    let mut seen = HashSet::new();
    let mut sources = Vec::new();
    for root in paths {
        if root.is_file() {
            push_source(root, &base, &mut seen, &mut sources);
            continue;
        }
        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_skipped_dir_entry(e.path()));
        for entry in walker.filter_map(Result::ok) {
            if !entry.file_type().is_file() || !config.accepts(entry.path()) {
                continue;
            }
            push_source(entry.path(), &base, &mut seen, &mut sources);
        }
    }
    sources
}

fn push_source(
    path: &Path,
    base: &Path,
    seen: &mut HashSet<PathBuf>,
    sources: &mut Vec<SourceEntry>,
) {
    let absolute = absolute_path(path);
    if !seen.insert(absolute.clone()) {
        return;
    }
    let relative = match absolute.strip_prefix(base) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.to_path_buf(),
        _ => path
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| path.to_path_buf()),
    };
    sources.push(SourceEntry {
        path: path.to_path_buf(),
        relative,
    });
}

/// Deepest directory containing every argument (a file counts as its parent).
fn common_base(paths: &[PathBuf]) -> PathBuf {
    let mut base: Option<PathBuf> = None;
    for path in paths {
        let absolute = absolute_path(path);
        let dir = if path.is_file() {
            absolute.parent().map(Path::to_path_buf).unwrap_or(absolute)
        } else {
            absolute
        };
        base = Some(match base {
            None => dir,
            Some(prev) => prev
                .components()
                .zip(dir.components())
                .take_while(|(a, b)| a == b)
                .map(|(a, _)| a)
                .collect(),
        });
    }
    base.unwrap_or_default()
}

fn absolute_path(path: &Path) -> PathBuf {
    std::path::absolute(path)
        .map(|p| normalize_path(&p))
        .unwrap_or_else(|_| path.to_path_buf())
}

fn is_skipped_dir_entry(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|name| name == "node_modules" || name.starts_with('.'))
}

/// Project directory: `--project` if given, else the current directory.
pub(crate) fn project_dir(project: Option<PathBuf>) -> Result<PathBuf, std::io::Error> {
    match project {
        Some(dir) => Ok(dir),
        None => std::env::current_dir(),
    }
}
