//! data-go-kr: Public Data API Client
//!
//! A library for querying public data REST endpoints: configuration
//! merging, request building, fixed-delay retries and response
//! pretty-printing.

pub mod config;
pub mod fetch;
pub mod format;
pub mod time;
