//! Application startup and utilities.
//!
//! This module contains exit codes, tracing setup, and error hints
//! that support the main entry point.

use data_go_kr::config::{ConfigError, ValidationErrors};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Application exit codes.
pub mod exit_code {
    use std::process::ExitCode;

    /// Success (exit code 0).
    pub const SUCCESS: ExitCode = ExitCode::SUCCESS;

    /// Configuration error (exit code 1) - invalid args, missing required fields, etc.
    pub const CONFIG_ERROR: ExitCode = ExitCode::FAILURE;

    /// Runtime error (exit code 2) - retries exhausted, rejected request, etc.
    ///
    /// Note: This is a function rather than a constant because `ExitCode::from()` is not `const fn`.
    pub fn runtime_error() -> ExitCode {
        ExitCode::from(2)
    }
}

/// Prints helpful hints for common configuration errors.
pub fn print_config_hint(errors: &ValidationErrors) {
    let mut suggest_init = false;

    for error in errors.errors() {
        match error {
            ConfigError::MissingRequired { hint, .. } => {
                eprintln!("  hint: {hint}");
                suggest_init = true;
            }
            ConfigError::FileRead { .. } => suggest_init = true,
            _ => {}
        }
    }

    if suggest_init {
        eprintln!("\nRun 'data-go-kr init' to generate a configuration template.");
    }
}

/// Sets up the tracing subscriber for logging.
///
/// Logs go to stderr so that stdout carries only the response body.
pub fn setup_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };

    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
