//! Error types for dashboard operations.
//!
//! This module defines [`DashboardError`] which covers the failures that can
//! occur while reading input, fetching remote data or parsing responses.
//! Missing or non-numeric metric values are not errors; they resolve to
//! `None` at the data layer.

use thiserror::Error;

/// Message shown when no ticker was supplied.
pub const MISSING_TICKER_MESSAGE: &str =
    "Please provide a ticker symbol in the URL (e.g., ?ticker=AAPL)";

/// Errors that can occur during dashboard operations.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Network-related errors (connection failures, timeouts, non-2xx status).
    #[error("Network error: {0}")]
    Network(String),

    /// Error parsing a response body.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The response parsed but did not have the expected shape.
    #[error("Unexpected response from {provider}: {detail}")]
    UnexpectedResponse {
        /// The provider that returned the response.
        provider: String,
        /// What was wrong with it.
        detail: String,
    },

    /// No ticker symbol was supplied.
    #[error("Please provide a ticker symbol in the URL (e.g., ?ticker=AAPL)")]
    MissingTicker,

    /// An invalid parameter was provided.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// There is no data to operate on.
    #[error("No data available: {0}")]
    NoData(String),

    /// Any other error.
    #[error("{0}")]
    Other(String),
}

/// Result type alias using [`DashboardError`].
pub type Result<T> = std::result::Result<T, DashboardError>;
