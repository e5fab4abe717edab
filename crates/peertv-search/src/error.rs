//! # Design
//!
//! - Constant display messages; the request URL travels in fields.
//! - Transport, status and decode failures stay distinguishable so the CLI
//!   can report which side of the exchange broke.

use thiserror::Error;

/// Convenience alias for search operation results.
pub type SearchResult<T> = Result<T, SearchError>;

/// Primary error type for aggregator operations.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The aggregator could not be reached at the transport level.
    #[error("aggregator request failed")]
    Unreachable {
        /// Request URL with query parameters applied.
        url: String,
        /// Underlying transport failure.
        #[source]
        source: reqwest::Error,
    },
    /// The aggregator answered with a non-success HTTP status.
    #[error("aggregator returned a failure status")]
    Status {
        /// Request URL with query parameters applied.
        url: String,
        /// HTTP status code returned by the aggregator.
        status: u16,
    },
    /// The aggregator's response body could not be decoded.
    #[error("aggregator response could not be decoded")]
    MalformedResponse {
        /// Request URL with query parameters applied.
        url: String,
        /// Underlying decode failure.
        #[source]
        source: reqwest::Error,
    },
}
