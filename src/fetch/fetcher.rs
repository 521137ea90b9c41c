//! Fetcher: response classification and the retry loop.

use crate::format;
use crate::time::{Sleeper, TokioSleeper};

use super::{
    FetchError, HttpClient, HttpError, HttpRequest, RequestError, RequestParams, RetryPolicy,
    RetryReporter,
};

/// Body prefix the upstream API uses to report errors inside a 200 response.
pub const SERVICE_ERROR_PREFIX: &str = "<OpenAPI_ServiceResponse>";

/// A successfully fetched response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    /// MIME type without parameters, e.g. `application/json`
    pub content_type: String,
    /// Raw response body
    pub body: String,
}

/// Fetches API responses with fixed-delay retries.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation
/// - `S`: The sleeper implementation for retry delays (defaults to [`TokioSleeper`])
///
/// # Example
///
/// ```
/// use data_go_kr::fetch::{Fetcher, ReqwestClient, RetryPolicy};
///
/// let fetcher = Fetcher::new(ReqwestClient::new())
///     .with_retry_policy(RetryPolicy::new().with_max_retries(3));
///
/// assert_eq!(fetcher.retry_policy().max_retries, 3);
/// ```
#[derive(Debug)]
pub struct Fetcher<H, S = TokioSleeper> {
    client: H,
    sleeper: S,
    retry_policy: RetryPolicy,
}

impl<H> Fetcher<H, TokioSleeper> {
    /// Creates a fetcher with the default retry policy and [`TokioSleeper`].
    #[must_use]
    pub fn new(client: H) -> Self {
        Self {
            client,
            sleeper: TokioSleeper,
            retry_policy: RetryPolicy::default(),
        }
    }
}

impl<H, S> Fetcher<H, S> {
    /// Sets a custom sleeper for retry delays.
    ///
    /// This is primarily useful for testing to avoid actual delays.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> Fetcher<H, S2> {
        Fetcher {
            client: self.client,
            sleeper,
            retry_policy: self.retry_policy,
        }
    }

    /// Sets the retry policy.
    #[must_use]
    pub const fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Returns the configured retry policy.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry_policy
    }
}

impl<H: HttpClient, S: Sleeper> Fetcher<H, S> {
    /// Performs one GET request and classifies the response.
    ///
    /// # Errors
    ///
    /// - [`RequestError::Http`] if the transport fails
    /// - [`RequestError::MissingContentType`] / [`RequestError::UnsupportedContentType`]
    ///   if the response format has no formatter
    /// - [`RequestError::ServiceError`] if the body starts with [`SERVICE_ERROR_PREFIX`]
    pub async fn fetch_once(&self, request: &HttpRequest) -> Result<FetchResult, RequestError> {
        tracing::debug!(url = %request.loggable_url(), "Sending request");

        let response = self.client.request(request.clone()).await?;

        let content_type = response
            .content_type()
            .ok_or(RequestError::MissingContentType)?;

        if !format::is_supported(&content_type) {
            return Err(RequestError::UnsupportedContentType(content_type));
        }

        if !response.is_success() {
            tracing::warn!(status = %response.status, "Non-success status with a supported body");
        }

        let body = response.body_text();

        if body.starts_with(SERVICE_ERROR_PREFIX) {
            return Err(RequestError::ServiceError(body));
        }

        tracing::debug!(%content_type, bytes = body.len(), "Received response");

        Ok(FetchResult { content_type, body })
    }

    /// Builds and sends the request, retrying failed attempts.
    ///
    /// Attempts are strictly sequential. After a retryable failure the loop
    /// waits `retry_policy.delay` and tries again, up to
    /// `retry_policy.max_retries` times. Every failure and every retry is
    /// passed to `reporter`.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Rejected`] on the first non-retryable failure
    /// - [`FetchError::MaxRetriesExceeded`] when the retry budget is spent
    pub async fn fetch<R: RetryReporter>(
        &self,
        params: &RequestParams,
        reporter: &mut R,
    ) -> Result<FetchResult, FetchError> {
        let max_retries = self.retry_policy.max_retries;
        let mut remaining = max_retries;
        let mut attempt: u32 = 0;

        tracing::debug!(
            max_attempts = self.retry_policy.max_attempts(),
            delay = ?self.retry_policy.delay,
            service = %params.service_name,
            "Fetching"
        );

        loop {
            attempt += 1;

            let error = match self.attempt(params).await {
                Ok(result) => return Ok(result),
                Err(e) => e,
            };

            tracing::debug!(attempt, error = %error, "Attempt failed");
            reporter.attempt_failed(attempt, &error);

            if !error.is_retryable() {
                return Err(FetchError::Rejected(error));
            }

            if remaining == 0 {
                return Err(FetchError::MaxRetriesExceeded {
                    attempts: attempt,
                    last_error: error,
                });
            }
            remaining -= 1;

            self.sleeper.sleep(self.retry_policy.delay).await;
            reporter.retrying(max_retries - remaining, max_retries);
        }
    }

    async fn attempt(&self, params: &RequestParams) -> Result<FetchResult, RequestError> {
        let request = params.build()?;
        self.fetch_once(&request).await
    }
}

/// Extension trait for checking if an error is retryable.
///
/// Determines whether an error represents a transient failure that
/// warrants a retry attempt.
pub trait IsRetryable {
    /// Returns true if the error is potentially transient and should be retried.
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for HttpError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Connection(_) | Self::Timeout => true,
            // URL errors are configuration issues, not transient
            Self::InvalidUrl(_) => false,
        }
    }
}

impl IsRetryable for RequestError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Http(e) => e.is_retryable(),
            Self::MissingContentType | Self::UnsupportedContentType(_) | Self::ServiceError(_) => {
                true
            }
            Self::InvalidRequest(_) => false,
        }
    }
}
