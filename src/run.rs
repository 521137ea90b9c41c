//! Application execution logic.
//!
//! Fetches the configured API once (with retries) and renders the response
//! body for printing.

use thiserror::Error;

use data_go_kr::config::ValidatedConfig;
use data_go_kr::fetch::{
    FetchError, FetchResult, Fetcher, HttpClient, ReqwestClient, RetryReporter, StderrReporter,
};
use data_go_kr::format;
use data_go_kr::time::{Sleeper, TokioSleeper};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The request could not be completed.
    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Executes the request described by `config` and returns the text to print.
///
/// Retry progress is written to stderr as it happens.
///
/// # Errors
///
/// Returns an error if the request is rejected or every attempt fails.
///
/// Excluded from coverage - performs real network I/O.
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig) -> Result<String, RunError> {
    execute_with(
        &config,
        ReqwestClient::new(),
        TokioSleeper,
        &mut StderrReporter,
    )
    .await
}

/// Executes the request with the given client, sleeper and reporter.
///
/// # Errors
///
/// Returns an error if the request is rejected or every attempt fails.
pub async fn execute_with<H, S, R>(
    config: &ValidatedConfig,
    client: H,
    sleeper: S,
    reporter: &mut R,
) -> Result<String, RunError>
where
    H: HttpClient,
    S: Sleeper,
    R: RetryReporter,
{
    let fetcher = Fetcher::new(client)
        .with_sleeper(sleeper)
        .with_retry_policy(config.retry_policy.clone());

    let result = fetcher.fetch(&config.params, reporter).await?;

    Ok(render(&result, config.pretty))
}

/// Formats the fetched body, falling back to the raw body if it cannot be parsed.
fn render(result: &FetchResult, pretty: Option<usize>) -> String {
    match format::render(&result.content_type, &result.body, pretty) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!("Printing raw response: {e}");
            result.body.clone()
        }
    }
}
