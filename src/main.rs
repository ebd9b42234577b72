//! Binary entrypoint for the `taskfile-lint` CLI.

use std::process::ExitCode;

use taskfile_lint::error::LintError;

fn main() -> ExitCode {
    taskfile_lint::init_tracing();
    match taskfile_lint::run(std::env::args_os()) {
        Ok(outcome) => outcome.into(),
        // clap picks its own status: 0 for --help/--version, 2 for usage errors.
        Err(LintError::Cli(err)) => err.exit(),
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
