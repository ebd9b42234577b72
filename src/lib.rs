//! Core library entry for the `taskfile-lint` CLI.
//!
//! Loads one Taskfile, checks its extension and the attribute order of each
//! task, and reports problems on stderr.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod error;
pub mod ports;
pub mod taskfile;
pub mod validate;

use std::io::IsTerminal;
use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::adapters::live::filesystem::LiveFileSystem;
use crate::config::LintConfig;
use crate::error::LintError;
use crate::ports::FileSystem;
use crate::taskfile::Taskfile;

/// Result of a completed lint run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every check passed.
    Passed,
    /// At least one check reported a problem.
    Failed,
}

impl From<Outcome> for ExitCode {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Passed => ExitCode::SUCCESS,
            Outcome::Failed => ExitCode::FAILURE,
        }
    }
}

/// Installs the stderr log subscriber, filtered by `RUST_LOG` (default `warn`).
///
/// Log lines carry no timestamps so repeated runs print identical output.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error when argument parsing fails or the Taskfile cannot be
/// read or parsed.
pub fn run<I, T>(args: I) -> Result<Outcome, LintError>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = cli::Cli::try_parse_from(args)?;
    lint(&LintConfig::default(), &LiveFileSystem, &cli.file)
}

/// Lints the Taskfile at `path`, printing findings to stderr in document order.
///
/// Entries the linter cannot interpret are logged at error level instead.
///
/// The extension check and the ordering check are independent; both run and
/// either one failing fails the run.
///
/// # Errors
///
/// Returns an error if the Taskfile cannot be read or parsed.
pub fn lint(config: &LintConfig, fs: &dyn FileSystem, path: &Path) -> Result<Outcome, LintError> {
    let mut failed = false;

    if let Some(finding) = validate::check_extension(config, path) {
        eprintln!("{finding}");
        failed = true;
    }

    let taskfile = Taskfile::load(fs, path)?;
    let report = validate::validate_taskfile(config, &taskfile);
    tracing::debug!(
        tasks_checked = report.tasks_checked,
        anomalies = report.anomalies(),
        findings = report.findings.len(),
        "validated {}",
        path.display()
    );
    for finding in &report.findings {
        if finding.is_failure() {
            eprintln!("{finding}");
        } else {
            tracing::error!("{finding}");
        }
    }
    if !report.passed() {
        failed = true;
    }

    Ok(if failed { Outcome::Failed } else { Outcome::Passed })
}
