//! Request building from resolved parameters.

use std::fmt;

use http::HeaderValue;
use http::header::AUTHORIZATION;
use url::Url;

use super::{HttpRequest, RequestError};

/// Query parameter carrying the service key for [`AuthType::Query`].
pub const SERVICE_KEY_PARAM: &str = "serviceKey";

/// How the service key is sent to the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthType {
    /// `Authorization: <service key>` request header
    Header,
    /// `serviceKey=<service key>` query parameter
    Query,
}

impl AuthType {
    /// Returns the configuration name of this auth type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Header => "header",
            Self::Query => "query",
        }
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters for a single API request.
///
/// The reserved parts (`endpoint`, `service_name`, `auth_type`,
/// `service_key`) shape the URL and headers; everything in `query` is
/// forwarded verbatim as query parameters, in order.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestParams {
    /// Base URL of the API
    pub endpoint: Url,
    /// Path segment appended to the endpoint
    pub service_name: String,
    /// How the service key is sent
    pub auth_type: AuthType,
    /// The API credential
    pub service_key: String,
    /// Pass-through query parameters
    pub query: Vec<(String, String)>,
}

impl RequestParams {
    /// Builds the GET request for these parameters.
    ///
    /// The service name is appended to the endpoint path with a single `/`
    /// separator. Query parameters replace same-named parameters already
    /// present on the endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`RequestError::InvalidRequest`] if the endpoint cannot carry
    /// a path or the service key is not a valid header value.
    pub fn build(&self) -> Result<HttpRequest, RequestError> {
        let mut url = self.url()?;

        if self.auth_type == AuthType::Query {
            set_query_param(&mut url, SERVICE_KEY_PARAM, &self.service_key);
        }

        for (key, value) in &self.query {
            set_query_param(&mut url, key, value);
        }

        let request = HttpRequest::get(url);

        if self.auth_type == AuthType::Header {
            let mut value = HeaderValue::from_str(&self.service_key).map_err(|e| {
                RequestError::InvalidRequest(format!("service key is not a valid header value: {e}"))
            })?;
            value.set_sensitive(true);
            return Ok(request.with_header(AUTHORIZATION, value));
        }

        Ok(request)
    }

    fn url(&self) -> Result<Url, RequestError> {
        if self.endpoint.cannot_be_a_base() {
            return Err(RequestError::InvalidRequest(format!(
                "endpoint '{}' cannot carry a path",
                self.endpoint
            )));
        }

        let mut url = self.endpoint.clone();
        let path = if url.path().ends_with('/') {
            format!("{}{}", url.path(), self.service_name)
        } else {
            format!("{}/{}", url.path(), self.service_name)
        };
        url.set_path(&path);

        Ok(url)
    }
}

/// Sets `key` to `value`, dropping any existing values for `key`.
fn set_query_param(url: &mut Url, key: &str, value: &str) {
    let retained: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != key)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    let mut pairs = url.query_pairs_mut();
    pairs.clear();
    pairs.extend_pairs(retained);
    pairs.append_pair(key, value);
}
