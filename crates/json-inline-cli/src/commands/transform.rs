use std::fs;
use std::path::PathBuf;

use json_inline_core::config::TransformConfig;
use json_inline_core::types::ReplacedImport;
use json_inline_transform::Rewriter;
use serde::Serialize;

use super::{collect_sources, project_dir};

#[derive(Debug, Serialize)]
struct FileReport {
    file: String,
    changed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    written_to: Option<String>,
    /// Rewritten source, when it is not written to `--out-dir`.
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    replaced: Vec<ReplacedImport>,
}

/// Run `json-inline transform`: rewrite JSON imports file by file, stopping at
/// the first file that fails.
pub fn run(
    json: bool,
    project: Option<PathBuf>,
    paths: Vec<PathBuf>,
    declaration: bool,
    out_dir: Option<PathBuf>,
    check: bool,
) -> i32 {
    let project = match project_dir(project) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("json-inline transform: failed to get current directory: {}", e);
            return 2;
        }
    };

    let mut config = TransformConfig::load(&project);
    if declaration {
        config.is_declaration = true;
    }
    let out_dir = if check {
        None
    } else {
        out_dir.or_else(|| config.out_dir.as_ref().map(|d| project.join(d)))
    };

    let sources = collect_sources(&paths, &config);
    if sources.is_empty() {
        eprintln!("json-inline transform: no source files found");
        return 2;
    }

    let rewriter = Rewriter::new(config.output_mode());
    let mut reports = Vec::new();
    let mut would_change = 0usize;

    for source in &sources {
        let text = match fs::read_to_string(&source.path) {
            Ok(t) => t,
            Err(e) => {
                eprintln!(
                    "json-inline transform: failed to read {}: {}",
                    source.path.display(),
                    e
                );
                return 1;
            }
        };
        let rewritten = match rewriter.rewrite_source(&source.path, &text) {
            Ok(r) => r,
            Err(e) => {
                eprintln!("json-inline transform: {}", e);
                return 1;
            }
        };

        let mut written_to = None;
        let mut report_text = None;
        if check {
            if rewritten.is_changed() {
                would_change += 1;
                if !json {
                    println!("would rewrite {}", source.path.display());
                }
            }
        } else if let Some(dir) = &out_dir {
            let target = dir.join(&source.relative);
            if let Some(parent) = target.parent() {
                if let Err(e) = fs::create_dir_all(parent) {
                    eprintln!(
                        "json-inline transform: failed to create {}: {}",
                        parent.display(),
                        e
                    );
                    return 1;
                }
            }
            if let Err(e) = fs::write(&target, &rewritten.text) {
                eprintln!(
                    "json-inline transform: failed to write {}: {}",
                    target.display(),
                    e
                );
                return 1;
            }
            tracing::info!(from = %source.path.display(), to = %target.display(), "wrote rewritten file");
            written_to = Some(target.display().to_string());
        } else if json {
            report_text = Some(rewritten.text.clone());
        } else {
            print!("{}", rewritten.text);
        }

        reports.push(FileReport {
            file: source.path.display().to_string(),
            changed: rewritten.is_changed(),
            written_to,
            text: report_text,
            replaced: rewritten.replaced,
        });
    }

    if json {
        match serde_json::to_string_pretty(&reports) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("json-inline transform: failed to serialize report: {}", e);
                return 2;
            }
        }
    }

    if check && would_change > 0 {
        1
    } else {
        0
    }
}
