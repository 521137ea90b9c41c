//! Default values for configuration options.
//!
//! Centralized constants to avoid magic numbers scattered across the codebase.

/// Default number of retries after the initial attempt.
pub const MAX_RETRIES: u64 = 5;

/// Default delay between attempts in milliseconds.
pub const DELAY_MS: u64 = 1000;

/// Default rows per page.
pub const NUM_OF_ROWS: u64 = 10;

/// Default page number.
pub const PAGE_NO: u64 = 1;

/// Default output path for `init`.
pub const CONFIG_FILE_NAME: &str = "data-go-kr.json";

