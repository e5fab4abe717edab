//! Output shaping for the two emission modes.

use crate::model::SearchRecord;

/// Render magnet-bearing records as a flattened JSON array.
///
/// Records without a magnet link are dropped; the remaining records are
/// emitted with exactly the fields [`SearchRecord`] carries.
///
/// # Errors
///
/// Returns a serialization error if the records cannot be encoded.
pub fn render_json(records: &[SearchRecord]) -> serde_json::Result<String> {
    let magnet_bearing: Vec<&SearchRecord> = records
        .iter()
        .filter(|record| !record.magnetlink.is_empty())
        .collect();
    serde_json::to_string(&magnet_bearing)
}

/// Extract one magnet link per magnet-bearing record, in ranked order.
#[must_use]
pub fn magnet_lines(records: &[SearchRecord]) -> Vec<&str> {
    records
        .iter()
        .filter(|record| !record.magnetlink.is_empty())
        .map(|record| record.magnetlink.as_str())
        .collect()
}
