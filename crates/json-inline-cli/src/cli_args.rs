use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "json-inline",
    version,
    about = "Inline JSON imports as constant declarations"
)]
pub(crate) struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as structured JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Log rewrite decisions to stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Project directory holding json-inline.json (default: current directory)
    #[arg(long, global = true, env = "JSON_INLINE_PROJECT", value_name = "DIR")]
    pub project: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Rewrite JSON imports in source files
    Transform {
        /// Files or directories to rewrite
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Emit ambient type declarations instead of value literals
        #[arg(long)]
        declaration: bool,
        /// Write rewritten files under this directory instead of stdout
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
        /// Exit non-zero if any file would change; write nothing
        #[arg(long, conflicts_with = "out_dir")]
        check: bool,
    },

    /// List import statements and whether they resolve to JSON
    Imports {
        /// Files or directories to scan
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

#[cfg(test)]
#[path = "cli_args_tests.rs"]
mod tests;
