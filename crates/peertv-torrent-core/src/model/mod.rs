//! Core transfer domain types shared across the workspace.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{TransferError, TransferResult};

const MAGNET_SCHEME: &str = "magnet";
const CONTENT_TOKEN_PARAM: &str = "xt";
const DISPLAY_NAME_PARAM: &str = "dn";
const URN_BTIH_PREFIX: &str = "urn:btih:";

/// A validated magnet descriptor identifying one content swarm.
///
/// Immutable once parsed; consumed by a transfer session exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MagnetLink {
    uri: String,
    info_hash: String,
    display_name: Option<String>,
}

impl MagnetLink {
    /// Parse and validate a raw descriptor string.
    ///
    /// The descriptor must be a well-formed URL with the `magnet` scheme and
    /// at least one `xt` content token. The token, stripped of its
    /// `urn:btih:` prefix, becomes the stable identifying key for the
    /// transfer and must be safe to use as a path component.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::InvalidDescriptor`] for malformed syntax,
    /// a wrong scheme, or a missing or unusable content token.
    pub fn parse(input: &str) -> TransferResult<Self> {
        let trimmed = input.trim();
        let uri = Url::parse(trimmed).map_err(|_| {
            TransferError::invalid_descriptor("descriptor is not a well-formed URL", trimmed)
        })?;

        if uri.scheme() != MAGNET_SCHEME {
            return Err(TransferError::invalid_descriptor(
                "descriptor scheme is not magnet",
                trimmed,
            ));
        }

        let token = uri
            .query_pairs()
            .find(|(key, _)| key == CONTENT_TOKEN_PARAM)
            .map(|(_, value)| value.into_owned())
            .ok_or_else(|| {
                TransferError::invalid_descriptor("descriptor carries no content token", trimmed)
            })?;

        let info_hash = token
            .strip_prefix(URN_BTIH_PREFIX)
            .unwrap_or(token.as_str())
            .to_string();
        if info_hash.is_empty() || !info_hash.chars().all(|ch| ch.is_ascii_alphanumeric()) {
            return Err(TransferError::invalid_descriptor(
                "content token is not a bare info-hash",
                trimmed,
            ));
        }

        let display_name = uri
            .query_pairs()
            .find(|(key, _)| key == DISPLAY_NAME_PARAM)
            .map(|(_, value)| value.into_owned())
            .filter(|name| !name.is_empty());

        Ok(Self {
            uri: uri.to_string(),
            info_hash,
            display_name,
        })
    }

    /// The full descriptor, suitable for submission to an engine.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.uri
    }

    /// The identifying content token with any `urn:btih:` prefix stripped.
    #[must_use]
    pub fn info_hash(&self) -> &str {
        &self.info_hash
    }

    /// Display-name hint carried in the descriptor, when present.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }
}

/// One file within a resolved transfer manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Path of the file relative to the transfer workspace.
    pub path: PathBuf,
    /// Total size of the file in bytes.
    pub length: u64,
}

/// The resolved manifest: the ordered file listing of one transfer.
///
/// Read-only once obtained from the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferManifest {
    name: String,
    entries: Vec<ManifestEntry>,
}

impl TransferManifest {
    /// Construct a manifest from a transfer name and its file entries.
    #[must_use]
    pub fn new(name: impl Into<String>, entries: Vec<ManifestEntry>) -> Self {
        Self {
            name: name.into(),
            entries,
        }
    }

    /// Human-readable name of the transfer.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The ordered file entries.
    #[must_use]
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    /// Sum of all entry lengths in bytes.
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.entries.iter().map(|entry| entry.length).sum()
    }

    /// Select the playback target: the largest entry in the manifest.
    ///
    /// The first entry among equal maxima wins, so selection is stable for
    /// manifests with duplicate sizes.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::EmptyManifest`] when the manifest has no
    /// entries.
    pub fn largest_entry(&self) -> TransferResult<&ManifestEntry> {
        let mut target: Option<&ManifestEntry> = None;
        for entry in &self.entries {
            if target.is_none_or(|current| entry.length > current.length) {
                target = Some(entry);
            }
        }
        target.ok_or(TransferError::EmptyManifest)
    }
}

/// Point-in-time transfer progress observed from the engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TransferSnapshot {
    /// Bytes acquired so far across all files.
    pub bytes_completed: u64,
    /// Total bytes expected; zero until the manifest is known.
    pub total_bytes: u64,
    /// Peers currently connected to the swarm.
    pub peer_count: u64,
    /// Exact completion flag reported by the engine.
    ///
    /// Termination decisions use this flag, never a floating-point
    /// comparison against 100.
    pub all_complete: bool,
}

impl TransferSnapshot {
    /// Completion percentage (0-100), defined as `0.0` while the total is
    /// still unknown.
    #[must_use]
    pub fn percent_complete(&self) -> f64 {
        if self.total_bytes == 0 {
            0.0
        } else {
            (to_f64(self.bytes_completed) / to_f64(self.total_bytes)) * 100.0
        }
    }
}

const fn to_f64(value: u64) -> f64 {
    #[expect(
        clippy::cast_precision_loss,
        reason = "u64 to f64 conversion is required for user-facing percentage reporting"
    )]
    {
        value as f64
    }
}

/// Join a relative manifest path onto a workspace root.
#[must_use]
pub fn resolve_entry_path(workspace: &Path, entry: &ManifestEntry) -> PathBuf {
    workspace.join(&entry.path)
}
