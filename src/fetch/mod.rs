//! Fetch layer for querying the REST endpoint.
//!
//! This module provides types and traits for:
//! - Building requests from resolved parameters ([`RequestParams`], [`AuthType`])
//! - HTTP request/response values ([`HttpRequest`], [`HttpResponse`])
//! - Abstracting HTTP clients ([`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//! - Response classification and fixed-delay retries ([`Fetcher`], [`RetryPolicy`])

mod client;
mod error;
mod fetcher;
mod http;
mod request;
mod retry;


pub use client::ReqwestClient;
pub use error::{FetchError, HttpError, RequestError};
pub use fetcher::{FetchResult, Fetcher, IsRetryable, SERVICE_ERROR_PREFIX};
pub use self::http::{HttpClient, HttpRequest, HttpResponse};
pub use request::{AuthType, RequestParams, SERVICE_KEY_PARAM};
pub use retry::{RetryPolicy, RetryReporter, StderrReporter};
