#![forbid(unsafe_code)]
#![deny(
    dead_code,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    rustdoc::broken_intra_doc_links,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]

//! SearX aggregator client: descriptor search ranked by swarm health.
//!
//! A stateless request/response call plus result shaping; no retries and no
//! caching by design.

/// Aggregator HTTP client.
pub mod client;
/// Search error taxonomy.
pub mod error;
/// Result records and ranking.
pub mod model;
/// Output shaping for the two emission modes.
pub mod output;

pub use client::{AggregatorClient, DEFAULT_ENGINES};
pub use error::{SearchError, SearchResult};
pub use model::{SearchRecord, rank_by_seeders};
pub use output::{magnet_lines, render_json};
