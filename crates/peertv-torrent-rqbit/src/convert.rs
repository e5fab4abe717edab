//! Translate engine detail payloads into core transfer DTOs.

use std::path::PathBuf;

use librqbit::api::TorrentDetailsResponse;
use peertv_torrent_core::{ManifestEntry, TransferManifest};

/// Build the resolved manifest from the engine's torrent details.
///
/// The engine reports each file as a component list relative to the session
/// root; single-file torrents carry an empty component list and only a name.
pub(crate) fn manifest_from_details(details: &TorrentDetailsResponse) -> TransferManifest {
    let name = details
        .name
        .clone()
        .unwrap_or_else(|| details.info_hash.clone());
    let entries = details
        .files
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|file| ManifestEntry {
            path: entry_path(&file.components, &file.name),
            length: file.length,
        })
        .collect();
    TransferManifest::new(name, entries)
}

fn entry_path(components: &[String], name: &str) -> PathBuf {
    if components.is_empty() {
        PathBuf::from(name)
    } else {
        components.iter().collect()
    }
}
