//! Error types for configuration parsing and validation.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Error type for a single configuration problem.
///
/// Covers errors from parsing, validation, and file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("Failed to read config file '{}': {source}", path.display())]
    FileRead {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a JSON configuration file.
    #[error("Failed to parse JSON config: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Failed to parse a TOML configuration file.
    #[error("Failed to parse TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Failed to write configuration file (for init command).
    #[error("Failed to write config file '{}': {source}", path.display())]
    FileWrite {
        /// Path to the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Missing required field that must be provided by CLI or config file.
    #[error("{field} must be defined")]
    MissingRequired {
        /// Name of the missing field
        field: &'static str,
        /// Hint for how to provide the value
        hint: &'static str,
    },

    /// A numeric value is not a positive integer.
    #[error("{field} should be integer and greater than 0")]
    NotNaturalNumber {
        /// Name of the field
        field: &'static str,
    },

    /// A numeric value exceeds what the field can hold.
    #[error("{field} should not be greater than {max}")]
    OutOfRange {
        /// Name of the field
        field: &'static str,
        /// Largest accepted value
        max: u64,
    },

    /// A text field holds a value of another type.
    #[error("{field} should be a string")]
    NotString {
        /// Name of the field
        field: &'static str,
    },

    /// Invalid auth type value.
    #[error("auth-type should be in [\"header\",\"query\"], got '{value}'")]
    InvalidAuthType {
        /// The invalid value provided
        value: String,
    },

    /// Invalid endpoint URL.
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl {
        /// The invalid URL string
        url: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Well-known field names used in configuration errors.
///
/// These are the CLI spellings (without the leading `--`).
pub mod field {
    /// Retry budget.
    pub const MAX_RETRIES: &str = "max-retries";
    /// Delay between attempts in milliseconds.
    pub const DELAY: &str = "delay";
    /// Rows per page.
    pub const NUM_OF_ROWS: &str = "num-of-rows";
    /// Page number.
    pub const PAGE_NO: &str = "page-no";
    /// Pretty-print indent width.
    pub const PRETTY: &str = "pretty";
    /// API credential.
    pub const SERVICE_KEY: &str = "service-key";
    /// Path segment appended to the endpoint.
    pub const SERVICE_NAME: &str = "service-name";
    /// Credential transmission scheme.
    pub const AUTH_TYPE: &str = "auth-type";
    /// Base URL.
    pub const ENDPOINT: &str = "endpoint";
}

impl ConfigError {
    /// Creates a `MissingRequired` error for a required field.
    #[must_use]
    pub const fn missing(field: &'static str, hint: &'static str) -> Self {
        Self::MissingRequired { field, hint }
    }
}

/// A non-empty, ordered list of configuration problems.
///
/// Validation collects every problem it finds instead of stopping at the
/// first one, so the operator can fix them all in one pass.
#[derive(Debug)]
pub struct ValidationErrors {
    errors: Vec<ConfigError>,
}

impl ValidationErrors {
    /// Wraps the collected errors.
    ///
    /// Returns `None` if `errors` is empty.
    #[must_use]
    pub fn new(errors: Vec<ConfigError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    /// Returns the individual errors in the order they were found.
    #[must_use]
    pub fn errors(&self) -> &[ConfigError] {
        &self.errors
    }

    /// Number of collected errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if no errors were collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl From<ConfigError> for ValidationErrors {
    fn from(error: ConfigError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}
