//! In-memory transfer session test double.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use peertv_torrent_core::{
    TransferError, TransferManifest, TransferResult, TransferSession, TransferSnapshot,
};
use tokio::time::sleep;

/// Scriptable stand-in for an engine-backed session.
///
/// Snapshots are consumed in order, the last one staying sticky; lifecycle
/// calls append to an event log so tests can assert sequencing.
pub(crate) struct StubTransferSession {
    manifest: TransferManifest,
    snapshots: Vec<TransferSnapshot>,
    cursor: AtomicUsize,
    metadata_delay: Duration,
    completion_delay: Duration,
    fail_acquisition: bool,
    events: Mutex<Vec<&'static str>>,
}

impl StubTransferSession {
    pub(crate) fn new(manifest: TransferManifest) -> Self {
        Self {
            manifest,
            snapshots: vec![TransferSnapshot {
                bytes_completed: 0,
                total_bytes: 0,
                peer_count: 0,
                all_complete: true,
            }],
            cursor: AtomicUsize::new(0),
            metadata_delay: Duration::ZERO,
            completion_delay: Duration::ZERO,
            fail_acquisition: false,
            events: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_snapshots(mut self, snapshots: Vec<TransferSnapshot>) -> Self {
        assert!(!snapshots.is_empty(), "stub needs at least one snapshot");
        self.snapshots = snapshots;
        self
    }

    pub(crate) const fn with_metadata_delay(mut self, delay: Duration) -> Self {
        self.metadata_delay = delay;
        self
    }

    pub(crate) const fn with_completion_delay(mut self, delay: Duration) -> Self {
        self.completion_delay = delay;
        self
    }

    pub(crate) const fn failing_acquisition(mut self) -> Self {
        self.fail_acquisition = true;
        self
    }

    pub(crate) fn events(&self) -> Vec<&'static str> {
        self.events.lock().expect("event log poisoned").clone()
    }

    fn record(&self, event: &'static str) {
        self.events.lock().expect("event log poisoned").push(event);
    }
}

#[async_trait]
impl TransferSession for StubTransferSession {
    async fn await_metadata(&self) -> TransferResult<TransferManifest> {
        sleep(self.metadata_delay).await;
        self.record("metadata_resolved");
        Ok(self.manifest.clone())
    }

    async fn begin_full_acquisition(&self) -> TransferResult<()> {
        self.record("acquisition_started");
        if self.fail_acquisition {
            return Err(TransferError::OperationFailed {
                operation: "begin_full_acquisition",
                source: "stub refused acquisition".into(),
            });
        }
        Ok(())
    }

    fn snapshot(&self) -> TransferSnapshot {
        let index = self.cursor.fetch_add(1, Ordering::SeqCst);
        let capped = index.min(self.snapshots.len() - 1);
        self.snapshots[capped].clone()
    }

    async fn await_all_complete(&self) -> TransferResult<()> {
        sleep(self.completion_delay).await;
        self.record("transfer_complete");
        Ok(())
    }

    async fn close(&self) {
        self.record("close");
    }
}
