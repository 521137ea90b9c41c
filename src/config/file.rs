//! Configuration file parsing.
//!
//! The file is a JSON object; a path with a `.toml` extension is read as
//! TOML with the same keys.

use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use super::ConfigError;

/// Contents of the configuration file.
///
/// All fields are optional so that any of them can come from the command
/// line instead. Values are kept raw and type-checked during validation,
/// so a wrongly typed field is reported alongside every other problem
/// instead of failing the whole parse.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigFile {
    /// API credential
    pub service_key: Option<Value>,

    /// "header" or "query"
    pub auth_type: Option<Value>,

    /// Endpoint base URL
    pub endpoint: Option<Value>,

    /// Path segment appended to the endpoint
    pub service_name: Option<Value>,

    /// Retries after the initial attempt
    pub max_retries: Option<Value>,

    /// Delay before each retry in milliseconds
    pub delay: Option<Value>,

    /// Rows per page
    pub num_of_rows: Option<Value>,

    /// Page number
    pub page_no: Option<Value>,

    /// Pretty-print indent width
    pub pretty: Option<Value>,

    /// Unrecognized keys, forwarded as query parameters in file order
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ConfigFile {
    /// Loads configuration from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let is_toml = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        if is_toml {
            Self::parse_toml(&content)
        } else {
            Self::parse_json(&content)
        }
    }

    /// Parses configuration from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is invalid or not an object.
    pub fn parse_json(content: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(content).map_err(ConfigError::from)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::from)
    }
}

/// Generates a configuration file template.
#[must_use]
pub fn default_config_template() -> String {
    r#"{
  "serviceKey": "YOUR_SERVICE_KEY",
  "authType": "query",
  "endpoint": "https://apis.data.go.kr/B552584/ArpltnInforInqireSvc",
  "serviceName": "getMsrstnAcctoRltmMesureDnsty",
  "maxRetries": 5,
  "delay": 1000,
  "numOfRows": 10,
  "pageNo": 1,
  "returnType": "json",
  "stationName": "종로구",
  "dataTerm": "DAILY"
}
"#
    .to_string()
}
