//! Play session wiring: one descriptor driven from admission to shutdown.
//!
//! The completion protocol is strict: the transfer finishes first, then the
//! player join returns, then the reporter is joined, and only then are
//! engine resources released. The ordering keeps the player supplied with
//! data and keeps the workspace readable until playback has ended.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use peertv_torrent_core::{
    MagnetLink, TransferError, TransferManifest, TransferSession,
};
use peertv_torrent_rqbit::RqbitSession;
use tokio::time::timeout;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{PlayError, PlayResult};
use crate::player::{PlaybackSupervisor, PlayerConfig};
use crate::reporter::{DEFAULT_TICK, ProgressReporter};
use crate::workspace::Workspace;

/// Configuration threaded through one play run.
#[derive(Debug, Clone)]
pub struct PlayOptions {
    /// External player invocation.
    pub player: PlayerConfig,
    /// Progress reporter poll interval.
    pub tick: Duration,
    /// Optional bound on the swarm metadata wait; unbounded when `None`.
    pub metadata_timeout: Option<Duration>,
}

impl Default for PlayOptions {
    fn default() -> Self {
        Self {
            player: PlayerConfig::default(),
            tick: DEFAULT_TICK,
            metadata_timeout: None,
        }
    }
}

/// Summary of a completed play run.
#[derive(Debug, Clone)]
pub struct PlayReport {
    /// Resolved path of the file that was played.
    pub target: PathBuf,
    /// Human-readable transfer name.
    pub name: String,
    /// Total bytes acquired across the manifest.
    pub total_bytes: u64,
}

/// Aggregate root binding one descriptor, workspace and live session to the
/// lifetimes of the playback supervisor and progress reporter tasks.
pub struct PlaySession<S> {
    id: Uuid,
    workspace: Workspace,
    session: Arc<S>,
    options: PlayOptions,
}

impl<S> PlaySession<S>
where
    S: TransferSession + 'static,
{
    /// Bind a live transfer session to its workspace.
    #[must_use]
    pub fn new(workspace: Workspace, session: Arc<S>, options: PlayOptions) -> Self {
        Self {
            id: Uuid::new_v4(),
            workspace,
            session,
            options,
        }
    }

    /// Drive the session to completion and release the engine.
    ///
    /// Engine resources are released exactly once, after the concurrent
    /// tasks have been joined on success or abandoned on error; errors
    /// discovered mid-run still close the session before propagating.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered while resolving metadata,
    /// selecting the target, starting acquisition, launching the player or
    /// finishing the transfer.
    pub async fn run(self) -> PlayResult<PlayReport> {
        let outcome = self.drive().await;
        self.session.close().await;
        outcome
    }

    async fn drive(&self) -> PlayResult<PlayReport> {
        let manifest = self.resolve_manifest().await?;
        let entry = manifest
            .largest_entry()
            .map_err(|source| PlayError::transfer("select_target", source))?;
        let target = self.workspace.resolve(entry);
        info!(
            session = %self.id,
            name = manifest.name(),
            target = %target.display(),
            "playback target selected"
        );

        self.session
            .begin_full_acquisition()
            .await
            .map_err(|source| PlayError::transfer("begin_full_acquisition", source))?;

        let supervisor = PlaybackSupervisor::launch(&self.options.player, &target)?;
        let reporter = ProgressReporter::new(self.options.tick);
        let reporter_task = tokio::spawn({
            let session = Arc::clone(&self.session);
            let target = target.clone();
            let name = manifest.name().to_string();
            async move { reporter.run(session, target, name).await }
        });

        let transfer = self.session.await_all_complete().await;
        supervisor.join().await;
        if transfer.is_err() {
            // The reporter will never observe completion now.
            reporter_task.abort();
            warn!(session = %self.id, "transfer failed; progress reporting abandoned");
        }
        let _ = reporter_task.await;

        transfer.map_err(|source| PlayError::transfer("await_all_complete", source))?;
        info!(session = %self.id, "transfer and playback complete");

        Ok(PlayReport {
            target,
            name: manifest.name().to_string(),
            total_bytes: manifest.total_bytes(),
        })
    }

    async fn resolve_manifest(&self) -> PlayResult<TransferManifest> {
        let resolved = match self.options.metadata_timeout {
            Some(limit) => timeout(limit, self.session.await_metadata())
                .await
                .unwrap_or(Err(TransferError::MetadataTimeout { waited: limit })),
            None => self.session.await_metadata().await,
        };
        resolved.map_err(|source| PlayError::transfer("await_metadata", source))
    }
}

/// Resolve, download and play a validated descriptor end to end.
///
/// Allocates the workspace, opens an engine session against it and runs the
/// full completion protocol.
///
/// # Errors
///
/// Returns workspace, engine and playback failures; see [`PlayError`].
pub async fn play(descriptor: &MagnetLink, options: PlayOptions) -> PlayResult<PlayReport> {
    let workspace = Workspace::allocate(descriptor.info_hash())?;
    let session = RqbitSession::open(descriptor, workspace.root())
        .await
        .map_err(|source| PlayError::transfer("open_session", source))?;
    PlaySession::new(workspace, Arc::new(session), options).run().await
}
