use std::fs;
use std::path::PathBuf;

use json_inline_core::config::TransformConfig;
use json_inline_transform::resolver::ImportResolver;
use json_inline_transform::syntax::imports::collect_import_sites;
use json_inline_transform::syntax::SourceFile;
use serde::Serialize;

use super::{collect_sources, project_dir};

#[derive(Debug, Serialize)]
struct ImportEntry {
    file: String,
    line: u32,
    specifier: String,
    exported: bool,
    /// Absolute path of the JSON document, `None` for ordinary imports.
    json: Option<PathBuf>,
}

/// Run `json-inline imports`: report every import site and its JSON resolution.
pub fn run(json: bool, project: Option<PathBuf>, paths: Vec<PathBuf>) -> i32 {
    let project = match project_dir(project) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("json-inline imports: failed to get current directory: {}", e);
            return 2;
        }
    };
    let config = TransformConfig::load(&project);
    let sources = collect_sources(&paths, &config);
    if sources.is_empty() {
        eprintln!("json-inline imports: no source files found");
        return 2;
    }

    let resolver = ImportResolver::new();
    let mut entries = Vec::new();
    for source in &sources {
        let text = match fs::read_to_string(&source.path) {
            Ok(t) => t,
            Err(e) => {
                tracing::warn!(path = %source.path.display(), error = %e, "skipping unreadable file");
                continue;
            }
        };
        let file = match SourceFile::parse(&source.path, text) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(path = %source.path.display(), error = %e, "skipping unparsable file");
                continue;
            }
        };
        for site in collect_import_sites(file.root(), file.text().as_bytes()) {
            entries.push(ImportEntry {
                file: source.path.display().to_string(),
                line: site.line,
                json: resolver.resolve(&site.specifier, file.path()),
                specifier: site.specifier,
                exported: site.exported,
            });
        }
    }

    if json {
        match serde_json::to_string_pretty(&entries) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("json-inline imports: failed to serialize report: {}", e);
                return 2;
            }
        }
        return 0;
    }

    for entry in &entries {
        match &entry.json {
            Some(path) => println!(
                "{}:{}  {}  -> {}",
                entry.file,
                entry.line,
                entry.specifier,
                path.display()
            ),
            None => println!("{}:{}  {}  (not json)", entry.file, entry.line, entry.specifier),
        }
    }
    0
}
