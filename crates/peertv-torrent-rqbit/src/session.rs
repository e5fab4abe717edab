//! Live transfer session bound to one workspace and one descriptor.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use librqbit::api::Api;
use librqbit::{AddTorrent, AddTorrentOptions, AddTorrentResponse, ManagedTorrent, Session};
use tracing::{debug, info};

use peertv_torrent_core::{
    MagnetLink, TransferError, TransferManifest, TransferResult, TransferSession, TransferSnapshot,
};

use crate::convert;
use crate::error::op_failed;

/// A `librqbit` session driving one transfer into a workspace directory.
///
/// Dropping the session without calling [`TransferSession::close`] leaks
/// engine connections; the orchestrator closes it as its final act.
pub struct RqbitSession {
    session: Arc<Session>,
    handle: Arc<ManagedTorrent>,
    api: Api,
    id: usize,
    closed: AtomicBool,
}

impl RqbitSession {
    /// Start the engine rooted at `workspace` and submit the descriptor.
    ///
    /// The workspace must already exist; partial data from a previous run
    /// of the same descriptor is reused rather than re-fetched.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::EngineInit`] when the engine cannot start
    /// and [`TransferError::DescriptorRejected`] when admission fails.
    pub async fn open(descriptor: &MagnetLink, workspace: &Path) -> TransferResult<Self> {
        let session = Session::new(workspace.to_path_buf())
            .await
            .map_err(|source| TransferError::EngineInit {
                source: source.into(),
            })?;

        let options = AddTorrentOptions {
            overwrite: true,
            ..AddTorrentOptions::default()
        };
        let response = session
            .add_torrent(AddTorrent::from_url(descriptor.as_str()), Some(options))
            .await
            .map_err(|source| TransferError::DescriptorRejected {
                source: source.into(),
            })?;

        let (id, handle) = match response {
            AddTorrentResponse::Added(id, handle)
            | AddTorrentResponse::AlreadyManaged(id, handle) => (id, handle),
            AddTorrentResponse::ListOnly(_) => {
                return Err(TransferError::DescriptorRejected {
                    source: "engine returned a list-only response for a live add".into(),
                });
            }
        };

        info!(
            info_hash = descriptor.info_hash(),
            workspace = %workspace.display(),
            "transfer session opened"
        );

        let api = Api::new(Arc::clone(&session), None);
        Ok(Self {
            session,
            handle,
            api,
            id,
            closed: AtomicBool::new(false),
        })
    }
}

#[async_trait]
impl TransferSession for RqbitSession {
    async fn await_metadata(&self) -> TransferResult<TransferManifest> {
        self.handle
            .wait_until_initialized()
            .await
            .map_err(|source| op_failed("await_metadata", source))?;

        let details = self
            .api
            .api_torrent_details(self.id.into())
            .map_err(|source| op_failed("torrent_details", source))?;
        let manifest = convert::manifest_from_details(&details);
        debug!(
            name = manifest.name(),
            files = manifest.entries().len(),
            total_bytes = manifest.total_bytes(),
            "swarm metadata resolved"
        );
        Ok(manifest)
    }

    async fn begin_full_acquisition(&self) -> TransferResult<()> {
        self.api
            .api_torrent_action_start(self.id.into())
            .await
            .map_err(|source| op_failed("begin_full_acquisition", source))?;
        Ok(())
    }

    fn snapshot(&self) -> TransferSnapshot {
        let stats = self.handle.stats();
        let peer_count = stats.live.as_ref().map_or(0, |live| {
            u64::try_from(live.snapshot.peer_stats.live).unwrap_or(u64::MAX)
        });
        TransferSnapshot {
            bytes_completed: stats.progress_bytes,
            total_bytes: stats.total_bytes,
            peer_count,
            all_complete: stats.finished,
        }
    }

    async fn await_all_complete(&self) -> TransferResult<()> {
        self.handle
            .wait_until_completed()
            .await
            .map_err(|source| op_failed("await_all_complete", source))?;
        Ok(())
    }

    async fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        debug!("stopping transfer engine");
        self.session.stop().await;
    }
}
