//! Content-addressed staging directories for transfer data.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use peertv_torrent_core::ManifestEntry;
use peertv_torrent_core::model::resolve_entry_path;
use tracing::debug;

use crate::error::{PlayError, PlayResult};

const WORKSPACE_PREFIX: &str = "peertv-";

/// Staging directory for one transfer, keyed by the descriptor's token.
///
/// Two distinct descriptors never collide, and re-running the same
/// descriptor reuses prior partial data.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Allocate the staging directory for `token` under the system
    /// temporary root. Idempotent: an existing directory is reused.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError::WorkspaceNotDirectory`] when the path exists as
    /// a non-directory and [`PlayError::Workspace`] when creation fails.
    pub fn allocate(token: &str) -> PlayResult<Self> {
        Self::allocate_in(&env::temp_dir(), token)
    }

    /// Allocate the staging directory under an explicit parent.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`Workspace::allocate`].
    pub fn allocate_in(parent: &Path, token: &str) -> PlayResult<Self> {
        let root = parent.join(format!("{WORKSPACE_PREFIX}{token}"));
        if root.exists() && !root.is_dir() {
            return Err(PlayError::WorkspaceNotDirectory { path: root });
        }
        fs::create_dir_all(&root).map_err(|source| PlayError::Workspace {
            path: root.clone(),
            source,
        })?;
        debug!(workspace = %root.display(), "staging directory ready");
        Ok(Self { root })
    }

    /// Absolute root of the staging directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a manifest entry to its absolute on-disk path.
    #[must_use]
    pub fn resolve(&self, entry: &ManifestEntry) -> PathBuf {
        resolve_entry_path(&self.root, entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocation_is_idempotent_for_the_same_token() -> PlayResult<()> {
        let parent = tempfile::tempdir().expect("tempdir");

        let first = Workspace::allocate_in(parent.path(), "ABCD1234")?;
        let second = Workspace::allocate_in(parent.path(), "ABCD1234")?;

        assert_eq!(first.root(), second.root());
        assert!(first.root().is_dir());
        Ok(())
    }

    #[test]
    fn distinct_tokens_never_collide() -> PlayResult<()> {
        let parent = tempfile::tempdir().expect("tempdir");

        let first = Workspace::allocate_in(parent.path(), "AAAA")?;
        let second = Workspace::allocate_in(parent.path(), "BBBB")?;

        assert_ne!(first.root(), second.root());
        Ok(())
    }

    #[test]
    fn allocation_rejects_paths_occupied_by_files() {
        let parent = tempfile::tempdir().expect("tempdir");
        let occupied = parent.path().join(format!("{WORKSPACE_PREFIX}CCCC"));
        fs::write(&occupied, b"in the way").expect("write blocker");

        let err = Workspace::allocate_in(parent.path(), "CCCC")
            .expect_err("file in the way should fail allocation");
        assert!(matches!(err, PlayError::WorkspaceNotDirectory { path } if path == occupied));
    }

    #[test]
    fn resolve_joins_entries_under_the_root() -> PlayResult<()> {
        let parent = tempfile::tempdir().expect("tempdir");
        let workspace = Workspace::allocate_in(parent.path(), "DDDD")?;

        let entry = ManifestEntry {
            path: PathBuf::from("Demo/movie.mkv"),
            length: 1,
        };
        assert_eq!(
            workspace.resolve(&entry),
            workspace.root().join("Demo/movie.mkv")
        );
        Ok(())
    }
}
