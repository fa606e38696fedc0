//! json-inline CLI — replaces JSON imports in TypeScript/JavaScript sources
//! with inlined constant or ambient type declarations.
//!
//! This binary provides the `json-inline` command with `transform` and
//! `imports` subcommands. See `json-inline --help` for usage.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli_args;
mod commands;

use cli_args::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = match cli.command {
        Commands::Transform {
            paths,
            declaration,
            out_dir,
            check,
        } => commands::transform::run(cli.json, cli.project, paths, declaration, out_dir, check),
        Commands::Imports { paths } => commands::imports::run(cli.json, cli.project, paths),
    };

    std::process::exit(exit_code);
}

/// Logs go to stderr so rewritten sources on stdout stay clean. `RUST_LOG`
/// wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}
