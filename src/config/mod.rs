//! Configuration layer for data-go-kr.
//!
//! This module provides:
//! - CLI argument parsing ([`Cli`], [`Command`])
//! - Configuration file parsing ([`ConfigFile`])
//! - Natural-number validation ([`natural_number`])
//! - Validated configuration ([`ValidatedConfig`])
//! - Configuration file generation ([`write_default_config`])
//! - Default values ([`defaults`])
//!
//! # Priority
//!
//! Configuration values are resolved with the following priority (highest to lowest):
//!
//! 1. **Explicit CLI arguments** - Values explicitly passed via command line
//! 2. **Config file** - Values from the JSON (or TOML) configuration file
//! 3. **Built-in defaults** - Only for `max-retries`, `delay`, `num-of-rows`, `page-no`
//!
//! Blank strings count as absent, so an empty `--service-key ""` falls back
//! to the config file. Numeric values are never coerced: an explicit `0`
//! wins and is then rejected by validation.
//!
//! # Pagination
//!
//! `--no-num-of-rows` and `--no-page-no` drop the corresponding query
//! parameter entirely, whatever the config file or defaults say.
//!
//! # Error Reporting
//!
//! Fields are validated in a fixed order (max-retries, delay, num-of-rows,
//! page-no, pretty, service-key, service-name, auth-type, endpoint) and every
//! problem is collected into one [`ValidationErrors`].
//!
//! # Pass-through Parameters
//!
//! Config file keys that are not recognized are forwarded as query
//! parameters, in file order, after `numOfRows` and `pageNo`.

mod cli;
pub mod defaults;
mod error;
mod file;
mod validate;
mod validated;

#[cfg(test)]
mod validated_tests;

pub use cli::{AuthTypeArg, Cli, Command};
pub use error::{ConfigError, ValidationErrors, field};
pub use file::{ConfigFile, default_config_template};
pub use validate::natural_number;
pub use validated::{NUM_OF_ROWS_PARAM, PAGE_NO_PARAM, ValidatedConfig, write_default_config};
