//! Aggregator result records and swarm-health ranking.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// One aggregator result, reduced to the fields this tool emits.
///
/// Deserialization is tolerant: aggregators disagree on which fields they
/// populate, so everything defaults. Serialization emits exactly these
/// fields, which is what the flattened JSON output mode relies on.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SearchRecord {
    /// Page URL of the result.
    #[serde(default)]
    pub url: String,
    /// Result title.
    #[serde(default)]
    pub title: String,
    /// Seeder count as reported by the source engine; kept as text because
    /// engines emit non-numeric placeholders.
    #[serde(default)]
    pub seed: String,
    /// Leecher count as reported by the source engine.
    #[serde(default)]
    pub leech: String,
    /// Magnet descriptor when the engine supplied one.
    #[serde(default)]
    pub magnetlink: String,
    /// Payload size in bytes when known.
    #[serde(default)]
    pub filesize: u64,
    /// Source engine name.
    #[serde(default)]
    pub engine: String,
    /// Aggregator relevance score.
    #[serde(default)]
    pub score: f64,
}

/// Envelope the aggregator wraps its results in.
#[derive(Debug, Deserialize)]
pub(crate) struct AggregatorResponse {
    #[serde(default)]
    pub(crate) results: Vec<SearchRecord>,
}

/// Rank results by swarm health: descending seeder count.
///
/// Seeds are parsed as integers; a record whose seed does not parse compares
/// as equal to everything, so the sort stays stable and non-numeric input
/// never reorders unpredictably.
pub fn rank_by_seeders(records: &mut [SearchRecord]) {
    records.sort_by(|left, right| {
        match (left.seed.parse::<i64>(), right.seed.parse::<i64>()) {
            (Ok(a), Ok(b)) => b.cmp(&a),
            _ => Ordering::Equal,
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(seed: &str, title: &str) -> SearchRecord {
        SearchRecord {
            seed: seed.to_string(),
            title: title.to_string(),
            ..SearchRecord::default()
        }
    }

    #[test]
    fn ranking_orders_numeric_seeds_descending() {
        let mut records = vec![record("10", "ten"), record("abc", "junk"), record("5", "five")];
        rank_by_seeders(&mut records);

        let ten = records.iter().position(|r| r.title == "ten").expect("ten");
        let five = records.iter().position(|r| r.title == "five").expect("five");
        assert!(ten < five, "higher seed count must rank first");
    }

    #[test]
    fn ranking_is_stable_for_non_numeric_seeds() {
        let mut records = vec![record("abc", "first"), record("xyz", "second")];
        rank_by_seeders(&mut records);
        assert_eq!(records[0].title, "first");
        assert_eq!(records[1].title, "second");
    }

    #[test]
    fn records_tolerate_sparse_payloads() {
        let record: SearchRecord =
            serde_json::from_str(r#"{"title": "Sparse", "seed": "3"}"#).expect("decode");
        assert_eq!(record.title, "Sparse");
        assert_eq!(record.seed, "3");
        assert!(record.magnetlink.is_empty());
        assert_eq!(record.filesize, 0);
    }

    #[test]
    fn envelope_defaults_missing_results() {
        let response: AggregatorResponse = serde_json::from_str(r#"{"query": "demo"}"#)
            .expect("decode");
        assert!(response.results.is_empty());
    }
}
