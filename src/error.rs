//! Fatal errors that abort a lint run.
//!
//! Policy violations (misordered attributes, wrong extension) are not errors;
//! they are collected as findings in the validation report.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that stop the run before a pass/fail decision can be made.
#[derive(Debug, Error)]
pub enum LintError {
    /// Command-line arguments could not be parsed.
    #[error(transparent)]
    Cli(#[from] clap::Error),

    /// The Taskfile could not be read.
    #[error("{}: failed to read taskfile: {source}", path.display())]
    Read {
        /// Path that was read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The Taskfile is not well-formed YAML.
    #[error("{}: failed to parse taskfile: {source}", path.display())]
    Parse {
        /// Path that was parsed.
        path: PathBuf,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },

    /// A merge key (`<<`) refers to something other than mappings.
    #[error("{}: invalid merge key: {reason}", path.display())]
    Merge {
        /// Path of the offending document.
        path: PathBuf,
        /// What the merge key pointed at.
        reason: String,
    },

    /// The Taskfile's top level is not a mapping.
    #[error("{}: taskfile must be a mapping at the top level", path.display())]
    NotAMapping {
        /// Path of the offending document.
        path: PathBuf,
    },

    /// An attribute order lists the same name more than once.
    #[error("attribute '{0}' appears more than once in the attribute order")]
    DuplicateAttribute(String),
}
