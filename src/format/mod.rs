//! Response body formatting.
//!
//! This module provides:
//! - The formatter table keyed by content-type token ([`formatter_for`])
//! - The supported content-type check used by the fetcher ([`is_supported`])
//! - Pretty-print dispatch with passthrough when no indent is requested ([`render`])
//!
//! The table is the single source of truth for which response formats the
//! client accepts: a response is only returned by the fetcher when a
//! formatter exists for its content type, so [`render`] never meets an
//! unknown token for a body that came through the fetcher.

mod json;
mod xml;


use thiserror::Error;

/// A pretty-printing transform: `(body, indent width) -> formatted body`.
pub type FormatFn = fn(&str, usize) -> Result<String, FormatError>;

/// Content-type token to formatter mapping.
static FORMATTERS: [(&str, FormatFn); 3] = [
    ("application/json", json::pretty),
    ("text/xml", xml::pretty),
    ("application/xml", xml::pretty),
];

/// Error type for formatting operations.
#[derive(Debug, Error)]
pub enum FormatError {
    /// No formatter is registered for the content type.
    #[error("Unsupported response format {0}")]
    Unsupported(String),

    /// The body is not valid JSON.
    #[error("Invalid JSON body: {0}")]
    Json(#[from] serde_json::Error),

    /// The body is not well-formed XML.
    #[error("Invalid XML body: {0}")]
    Xml(String),
}

/// Returns the formatter registered for a content-type token.
#[must_use]
pub fn formatter_for(content_type: &str) -> Option<FormatFn> {
    FORMATTERS
        .iter()
        .find(|(token, _)| *token == content_type)
        .map(|(_, format)| *format)
}

/// Returns true if a formatter is registered for the content-type token.
#[must_use]
pub fn is_supported(content_type: &str) -> bool {
    formatter_for(content_type).is_some()
}

/// Renders a response body for output.
///
/// Without an indent the body is returned unchanged. Otherwise the
/// formatter registered for `content_type` is applied with the given
/// indent width.
///
/// # Errors
///
/// Returns [`FormatError::Unsupported`] if pretty-printing was requested
/// for a content type without a formatter, or a parse error if the body
/// does not match its declared format.
pub fn render(
    content_type: &str,
    body: &str,
    indent: Option<usize>,
) -> Result<String, FormatError> {
    let Some(indent) = indent else {
        return Ok(body.to_string());
    };

    let format = formatter_for(content_type)
        .ok_or_else(|| FormatError::Unsupported(content_type.to_string()))?;

    format(body, indent)
}
