//! Stateless HTTP client for a SearX-compatible aggregator.

use reqwest::Client;
use tracing::debug;
use url::Url;

use crate::error::{SearchError, SearchResult};
use crate::model::{AggregatorResponse, SearchRecord};

/// Engines queried when the caller does not supply an explicit list.
pub const DEFAULT_ENGINES: [&str; 4] = ["1337x", "nyaa", "kickass", "piratebay"];

/// Client for one aggregator endpoint and one engine selection.
#[derive(Debug, Clone)]
pub struct AggregatorClient {
    http: Client,
    base_url: Url,
    engines: Vec<String>,
}

impl AggregatorClient {
    /// Build a client for the given endpoint.
    ///
    /// An empty engine list falls back to [`DEFAULT_ENGINES`]; the selection
    /// is threaded through explicitly rather than held in any global state.
    #[must_use]
    pub fn new(base_url: Url, engines: Vec<String>) -> Self {
        let engines = if engines.is_empty() {
            DEFAULT_ENGINES.iter().map(ToString::to_string).collect()
        } else {
            engines
        };
        Self {
            http: Client::new(),
            base_url,
            engines,
        }
    }

    /// The engine selection this client queries.
    #[must_use]
    pub fn engines(&self) -> &[String] {
        &self.engines
    }

    /// Query the aggregator for `term` and return the raw result records.
    ///
    /// One GET request, no retries, no caching. Callers rank and shape the
    /// records afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Unreachable`] for transport failures,
    /// [`SearchError::Status`] for non-success responses and
    /// [`SearchError::MalformedResponse`] when the body does not decode.
    pub async fn search(&self, term: &str) -> SearchResult<Vec<SearchRecord>> {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("q", term)
            .append_pair("engines", &self.engines.join(","))
            .append_pair("format", "json")
            .append_pair("categories", "files");

        debug!(%url, "querying aggregator");

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| SearchError::Unreachable {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let envelope: AggregatorResponse =
            response
                .json()
                .await
                .map_err(|source| SearchError::MalformedResponse {
                    url: url.to_string(),
                    source,
                })?;
        Ok(envelope.results)
    }
}
