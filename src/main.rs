//! Entry point for the `check-submodule-branch` pre-commit hook.
//!
//! Parses arguments, initializes logging, runs the check and turns the
//! result into an exit code: the number of violations on a completed run,
//! or the error's code on a fatal failure.

use check_submodule_branch::cli::Cli;
use check_submodule_branch::{commands, exit_codes};
use std::process::ExitCode;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    init_logging(cli.log_directive());

    match commands::cmd_check(cli) {
        Ok(violations) => ExitCode::from(exit_codes::from_violation_count(violations) as u8),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::from(err.exit_code() as u8)
        }
    }
}

fn init_logging(default_directive: &str) {
    let filter = EnvFilter::builder()
        .with_default_directive(
            default_directive
                .parse()
                .unwrap_or_else(|_| LevelFilter::WARN.into()),
        )
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}
