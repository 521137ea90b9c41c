//! Production HTTP client implementation using reqwest.

use http::{HeaderValue, header::USER_AGENT};

use super::{HttpClient, HttpError, HttpRequest, HttpResponse};

/// `User-Agent` sent with every request.
pub const USER_AGENT_VALUE: &str = concat!("data-go-kr/", env!("CARGO_PKG_VERSION"));

/// [`HttpClient`] backed by `reqwest`.
///
/// Each request carries a `User-Agent`. Timeouts are left to reqwest's
/// defaults.
///
/// # Example
///
/// ```no_run
/// use data_go_kr::fetch::{HttpClient, HttpRequest, ReqwestClient};
/// use url::Url;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ReqwestClient::new();
/// let url = Url::parse("https://apis.data.go.kr/B552584/ArpltnInforInqireSvc")?;
/// let response = client.request(HttpRequest::get(url)).await?;
/// println!("Status: {}", response.status);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a client with a fresh connection pool.
    #[must_use]
    pub fn new() -> Self {
        Self::from_client(reqwest::Client::new())
    }

    /// Wraps an existing reqwest client.
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { inner: client }
    }
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClient for ReqwestClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let response = self
            .inner
            .get(req.url.as_str())
            .headers(req.headers)
            .header(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE))
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(transport_error)?.to_vec();

        tracing::trace!(%status, bytes = body.len(), "Response buffered");

        Ok(HttpResponse::new(status, headers, body))
    }
}

fn transport_error(e: reqwest::Error) -> HttpError {
    if e.is_timeout() {
        HttpError::Timeout
    } else if e.is_builder() {
        HttpError::InvalidUrl(e.to_string())
    } else {
        HttpError::Connection(Box::new(e))
    }
}
