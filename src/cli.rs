//! CLI argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Top-level CLI parser for `taskfile-lint`.
#[derive(Debug, Parser)]
#[command(name = "taskfile-lint", version, about = "Lints the given taskfile.")]
pub struct Cli {
    /// Taskfile to lint.
    #[arg(long, value_name = "PATH")]
    pub file: PathBuf,
}
