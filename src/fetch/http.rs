//! Transport-level request and response values, and the client seam.

use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use url::Url;

use super::HttpError;

/// A GET request ready to be sent.
///
/// The API is read-only, so there is no method or body; everything the
/// server needs is in the URL and, for header auth, the headers.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    /// Full URL including the query string
    pub url: Url,
    /// Extra headers to send
    pub headers: HeaderMap,
}

impl HttpRequest {
    /// Creates a GET request for `url` with no extra headers.
    #[must_use]
    pub fn get(url: Url) -> Self {
        Self {
            url,
            headers: HeaderMap::new(),
        }
    }

    /// Adds a header, keeping any earlier values under the same name.
    #[must_use]
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// The URL without its query string.
    ///
    /// Query auth puts the service key in the query, so this is the form
    /// that may be logged.
    #[must_use]
    pub fn loggable_url(&self) -> String {
        let mut url = self.url.clone();
        url.set_query(None);
        url.to_string()
    }
}

/// A fully buffered response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body bytes
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Creates a response from its parts.
    #[must_use]
    pub const fn new(status: StatusCode, headers: HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// True for 2xx statuses.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns the `Content-Type` token with any `;` parameters stripped.
    ///
    /// The token is trimmed and lowercased. Returns `None` if the header is
    /// missing or not valid text.
    #[must_use]
    pub fn content_type(&self) -> Option<String> {
        let value = self.headers.get(CONTENT_TYPE)?.to_str().ok()?;
        let token = value.split(';').next().unwrap_or_default().trim();
        Some(token.to_ascii_lowercase())
    }

    /// Returns the body as text, replacing invalid UTF-8 sequences.
    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Sends requests to the API server.
///
/// [`ReqwestClient`](super::ReqwestClient) is the production implementation;
/// tests substitute clients that replay canned responses.
pub trait HttpClient: Send + Sync {
    /// Sends `req` and buffers the whole response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if the server cannot be reached, the request
    /// times out, or the URL is rejected by the transport.
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, HttpError>> + Send;
}
