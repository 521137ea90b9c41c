//! Validated configuration after merging CLI and config-file sources.
//!
//! This module contains the final, validated configuration that is used
//! by the application. All validation is performed during construction.

use std::fmt;
use std::path::Path;
use std::time::Duration;

use serde_json::Value;
use url::Url;

use crate::fetch::{AuthType, RequestParams, RetryPolicy};

use super::cli::Cli;
use super::defaults;
use super::error::{ConfigError, ValidationErrors, field};
use super::file::ConfigFile;
use super::validate::{natural_number, to_u32};

/// Query parameter name for rows per page.
pub const NUM_OF_ROWS_PARAM: &str = "numOfRows";

/// Query parameter name for the page number.
pub const PAGE_NO_PARAM: &str = "pageNo";

/// Fully validated configuration ready for use by the application.
///
/// # Construction
///
/// Use [`ValidatedConfig::from_raw`] to create from CLI args and an optional
/// config file. Every field is resolved and validated, and all problems are
/// returned together.
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Parameters for the API request
    pub params: RequestParams,

    /// Retry budget and delay
    pub retry_policy: RetryPolicy,

    /// Indent width for pretty-printing; `None` prints the body unchanged
    pub pretty: Option<usize>,

    /// Verbose logging enabled
    pub verbose: bool,
}

impl fmt::Display for ValidatedConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let pretty_str = self
            .pretty
            .map_or_else(|| "off".to_string(), |n| n.to_string());

        write!(
            f,
            "Config {{ endpoint: {}, service_name: {}, auth_type: {}, service_key: {}, \
             retry: {}x/{}ms, pretty: {}, query_params: {} }}",
            self.params.endpoint,
            self.params.service_name,
            self.params.auth_type,
            mask(&self.params.service_key),
            self.retry_policy.max_retries,
            self.retry_policy.delay.as_millis(),
            pretty_str,
            self.params.query.len(),
        )
    }
}

impl ValidatedConfig {
    /// Creates a validated configuration from CLI arguments and an optional config file.
    ///
    /// For every field an explicit CLI value wins, then the config file,
    /// then the built-in default (numeric fields only). Fields are checked
    /// in a fixed order and every problem is collected.
    ///
    /// # Errors
    ///
    /// Returns all problems found if:
    /// - Required fields are missing (`service-key`, `service-name`, `auth-type`, `endpoint`)
    /// - A numeric value is not a positive integer
    /// - The auth type is not `header` or `query`
    /// - The endpoint is not an absolute URL
    pub fn from_raw(cli: &Cli, file: Option<&ConfigFile>) -> Result<Self, ValidationErrors> {
        let mut errors = Vec::new();

        let max_retries = record(&mut errors, Self::resolve_max_retries(cli, file));
        let delay = record(&mut errors, Self::resolve_delay(cli, file));
        let num_of_rows = record(&mut errors, Self::resolve_num_of_rows(cli, file));
        let page_no = record(&mut errors, Self::resolve_page_no(cli, file));
        let pretty = record(&mut errors, Self::resolve_pretty(cli, file));
        let service_key = record(&mut errors, Self::resolve_service_key(cli, file));
        let service_name = record(&mut errors, Self::resolve_service_name(cli, file));
        let auth_type = record(&mut errors, Self::resolve_auth_type(cli, file));
        let endpoint = record(&mut errors, Self::resolve_endpoint(cli, file));

        let (
            Some(max_retries),
            Some(delay),
            Some(num_of_rows),
            Some(page_no),
            Some(pretty),
            Some(service_key),
            Some(service_name),
            Some(auth_type),
            Some(endpoint),
        ) = (
            max_retries,
            delay,
            num_of_rows,
            page_no,
            pretty,
            service_key,
            service_name,
            auth_type,
            endpoint,
        )
        else {
            return Err(ValidationErrors::new(errors)
                .expect("every unresolved field records its error"));
        };

        let query = build_query(num_of_rows, page_no, file);

        Ok(Self {
            params: RequestParams {
                endpoint,
                service_name,
                auth_type,
                service_key,
                query,
            },
            retry_policy: RetryPolicy::new()
                .with_max_retries(max_retries)
                .with_delay(delay),
            pretty,
            verbose: cli.verbose,
        })
    }

    /// Loads and merges configuration from CLI and the config file.
    ///
    /// If `cli.config` is set, loads the file from that path.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed, or if
    /// the merged configuration is invalid.
    pub fn load(cli: &Cli) -> Result<Self, ValidationErrors> {
        let file = if let Some(ref path) = cli.config {
            Some(ConfigFile::load(path)?)
        } else {
            None
        };

        Self::from_raw(cli, file.as_ref())
    }

    fn resolve_max_retries(cli: &Cli, file: Option<&ConfigFile>) -> Result<u32, ConfigError> {
        let n = resolve_natural(
            field::MAX_RETRIES,
            cli.max_retries,
            file.and_then(|f| f.max_retries.as_ref()),
        )?
        .unwrap_or(defaults::MAX_RETRIES);

        to_u32(field::MAX_RETRIES, n)
    }

    fn resolve_delay(cli: &Cli, file: Option<&ConfigFile>) -> Result<Duration, ConfigError> {
        let ms = resolve_natural(
            field::DELAY,
            cli.delay,
            file.and_then(|f| f.delay.as_ref()),
        )?
        .unwrap_or(defaults::DELAY_MS);

        Ok(Duration::from_millis(ms))
    }

    fn resolve_num_of_rows(
        cli: &Cli,
        file: Option<&ConfigFile>,
    ) -> Result<Option<u64>, ConfigError> {
        if cli.no_num_of_rows {
            return Ok(None);
        }

        let n = resolve_natural(
            field::NUM_OF_ROWS,
            cli.num_of_rows,
            file.and_then(|f| f.num_of_rows.as_ref()),
        )?
        .unwrap_or(defaults::NUM_OF_ROWS);

        Ok(Some(n))
    }

    fn resolve_page_no(cli: &Cli, file: Option<&ConfigFile>) -> Result<Option<u64>, ConfigError> {
        if cli.no_page_no {
            return Ok(None);
        }

        let n = resolve_natural(
            field::PAGE_NO,
            cli.page_no,
            file.and_then(|f| f.page_no.as_ref()),
        )?
        .unwrap_or(defaults::PAGE_NO);

        Ok(Some(n))
    }

    fn resolve_pretty(cli: &Cli, file: Option<&ConfigFile>) -> Result<Option<usize>, ConfigError> {
        let Some(n) = resolve_natural(
            field::PRETTY,
            cli.pretty,
            file.and_then(|f| f.pretty.as_ref()),
        )?
        else {
            return Ok(None);
        };

        usize::try_from(n)
            .map(Some)
            .map_err(|_| ConfigError::OutOfRange {
                field: field::PRETTY,
                max: usize::MAX as u64,
            })
    }

    fn resolve_service_key(cli: &Cli, file: Option<&ConfigFile>) -> Result<String, ConfigError> {
        resolve_text(
            field::SERVICE_KEY,
            cli.service_key.as_deref(),
            file.and_then(|f| f.service_key.as_ref()),
        )?
        .map(ToString::to_string)
        .ok_or_else(|| {
            ConfigError::missing(
                field::SERVICE_KEY,
                "Use --service-key or set serviceKey in the config file",
            )
        })
    }

    fn resolve_service_name(cli: &Cli, file: Option<&ConfigFile>) -> Result<String, ConfigError> {
        resolve_text(
            field::SERVICE_NAME,
            cli.service_name.as_deref(),
            file.and_then(|f| f.service_name.as_ref()),
        )?
        .map(ToString::to_string)
        .ok_or_else(|| {
            ConfigError::missing(
                field::SERVICE_NAME,
                "Use --service-name or set serviceName in the config file",
            )
        })
    }

    fn resolve_auth_type(cli: &Cli, file: Option<&ConfigFile>) -> Result<AuthType, ConfigError> {
        // CLI takes precedence
        if let Some(auth_type) = cli.auth_type {
            return Ok(auth_type.into());
        }

        // Fall back to the config file
        let value = resolve_text(
            field::AUTH_TYPE,
            None,
            file.and_then(|f| f.auth_type.as_ref()),
        )?
        .ok_or_else(|| {
            ConfigError::missing(
                field::AUTH_TYPE,
                "Use --auth-type or set authType in the config file",
            )
        })?;

        parse_auth_type(value)
    }

    fn resolve_endpoint(cli: &Cli, file: Option<&ConfigFile>) -> Result<Url, ConfigError> {
        let url_str = resolve_text(
            field::ENDPOINT,
            cli.endpoint.as_deref(),
            file.and_then(|f| f.endpoint.as_ref()),
        )?
        .ok_or_else(|| {
            ConfigError::missing(
                field::ENDPOINT,
                "Use --endpoint or set endpoint in the config file",
            )
        })?;

        let url = Url::parse(url_str).map_err(|e| ConfigError::InvalidUrl {
            url: url_str.to_string(),
            reason: e.to_string(),
        })?;

        if url.cannot_be_a_base() {
            return Err(ConfigError::InvalidUrl {
                url: url_str.to_string(),
                reason: "endpoint must be a hierarchical URL such as https://host/path"
                    .to_string(),
            });
        }

        Ok(url)
    }
}

/// Stores the error, if any, and returns the value.
fn record<T>(errors: &mut Vec<ConfigError>, result: Result<T, ConfigError>) -> Option<T> {
    result.map_err(|e| errors.push(e)).ok()
}

/// Resolves an optional numeric field: CLI, then config file.
///
/// Returns `Ok(None)` if neither source has a value; a present value must
/// be a natural number.
fn resolve_natural(
    field: &'static str,
    cli: Option<i64>,
    file: Option<&Value>,
) -> Result<Option<u64>, ConfigError> {
    if let Some(n) = cli {
        return natural_number(field, &Value::from(n)).map(Some);
    }

    file.filter(|v| !v.is_null())
        .map(|v| natural_number(field, v))
        .transpose()
}

/// Picks the CLI value, then the config-file value.
///
/// Blank strings and `null` count as absent. A present config-file value
/// that is not a string is rejected.
fn resolve_text<'a>(
    field: &'static str,
    cli: Option<&'a str>,
    file: Option<&'a Value>,
) -> Result<Option<&'a str>, ConfigError> {
    let present = |s: &&str| !s.trim().is_empty();

    if let Some(value) = cli.filter(present) {
        return Ok(Some(value));
    }

    match file {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str()).filter(present)),
        Some(_) => Err(ConfigError::NotString { field }),
    }
}

/// Builds the pass-through query: pagination first, then unrecognized file keys.
fn build_query(
    num_of_rows: Option<u64>,
    page_no: Option<u64>,
    file: Option<&ConfigFile>,
) -> Vec<(String, String)> {
    let mut query = Vec::new();

    if let Some(n) = num_of_rows {
        query.push((NUM_OF_ROWS_PARAM.to_string(), n.to_string()));
    }
    if let Some(n) = page_no {
        query.push((PAGE_NO_PARAM.to_string(), n.to_string()));
    }

    if let Some(file) = file {
        query.extend(
            file.extra
                .iter()
                .filter_map(|(key, value)| query_value(value).map(|v| (key.clone(), v))),
        );
    }

    query
}

/// Renders a config value as a query string value.
///
/// Strings are used as-is, `null` is skipped, other values use their JSON form.
fn query_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn parse_auth_type(s: &str) -> Result<AuthType, ConfigError> {
    match s.trim().to_lowercase().as_str() {
        "header" => Ok(AuthType::Header),
        "query" => Ok(AuthType::Query),
        _ => Err(ConfigError::InvalidAuthType {
            value: s.to_string(),
        }),
    }
}

/// Masks all but the first four characters of a secret.
fn mask(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{visible}****")
    }
}

/// Writes the configuration template to a file.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    let template = super::file::default_config_template();
    std::fs::write(path, template).map_err(|e| ConfigError::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })
}
