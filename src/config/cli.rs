//! CLI argument parsing using clap.
//!
//! Defines the command-line interface with all options and subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::fetch::AuthType;

/// data-go-kr: public data API client
///
/// Queries a public data REST endpoint with parameters from a config file
/// and command-line overrides, retries on failure, and prints the response.
#[derive(Debug, Parser)]
#[command(name = "data-go-kr")]
#[command(version, about, long_about = None)]
#[command(subcommand_negates_reqs = true)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the configuration file (JSON, or TOML with a .toml extension)
    #[arg(long, short, required = true)]
    pub config: Option<PathBuf>,

    /// Service name appended to the endpoint path
    #[arg(long = "service-name", short = 'm')]
    pub service_name: Option<String>,

    /// Service key for the API
    #[arg(long = "service-key", short = 's')]
    pub service_key: Option<String>,

    /// How the service key is sent
    #[arg(long = "auth-type", short = 'a', value_enum)]
    pub auth_type: Option<AuthTypeArg>,

    /// Endpoint base URL
    #[arg(long, short = 'e')]
    pub endpoint: Option<String>,

    /// Maximum number of retries after a failed request [default: 5]
    #[arg(long = "max-retries", short = 'r', allow_negative_numbers = true)]
    pub max_retries: Option<i64>,

    /// Delay before each retry in milliseconds [default: 1000]
    #[arg(long, short = 'd', allow_negative_numbers = true)]
    pub delay: Option<i64>,

    /// Rows per page [default: 10]
    #[arg(
        long = "num-of-rows",
        short = 'n',
        allow_negative_numbers = true,
        conflicts_with = "no_num_of_rows"
    )]
    pub num_of_rows: Option<i64>,

    /// Page number [default: 1]
    #[arg(
        long = "page-no",
        short = 'p',
        allow_negative_numbers = true,
        conflicts_with = "no_page_no"
    )]
    pub page_no: Option<i64>,

    /// Pretty-print the response with the given indent width
    #[arg(long, value_name = "INDENT", allow_negative_numbers = true)]
    pub pretty: Option<i64>,

    /// Do not send the default pagination parameter numOfRows
    #[arg(long = "no-num-of-rows")]
    pub no_num_of_rows: bool,

    /// Do not send the default pagination parameter pageNo
    #[arg(long = "no-page-no")]
    pub no_page_no: bool,

    /// Enable verbose logging
    #[arg(long, short)]
    pub verbose: bool,
}

/// Subcommands for data-go-kr
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Generate a configuration file template
    Init {
        /// Output path for the configuration file
        #[arg(long, short, default_value = super::defaults::CONFIG_FILE_NAME)]
        output: PathBuf,
    },
}

/// Auth type argument for CLI parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AuthTypeArg {
    /// Send the service key in the Authorization header
    #[value(name = "header")]
    Header,
    /// Send the service key as the serviceKey query parameter
    #[value(name = "query")]
    Query,
}

impl From<AuthTypeArg> for AuthType {
    fn from(arg: AuthTypeArg) -> Self {
        match arg {
            AuthTypeArg::Header => Self::Header,
            AuthTypeArg::Query => Self::Query,
        }
    }
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
