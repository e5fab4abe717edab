//! Session trait implemented by transfer engine adapters.

use async_trait::async_trait;

use crate::error::TransferResult;
use crate::model::{TransferManifest, TransferSnapshot};

/// One live transfer bound to a workspace, driven by an engine adapter.
///
/// The session owns all synchronization around the engine's mutable state;
/// callers only ever observe it through point-in-time [`snapshot`] queries.
///
/// [`snapshot`]: TransferSession::snapshot
#[async_trait]
pub trait TransferSession: Send + Sync {
    /// Suspend until the manifest is known, then return it.
    ///
    /// Unbounded by design; callers that need a limit wrap this in a
    /// timeout and surface [`TransferError::MetadataTimeout`].
    ///
    /// # Errors
    ///
    /// Returns an error when the engine fails while resolving metadata.
    ///
    /// [`TransferError::MetadataTimeout`]: crate::error::TransferError::MetadataTimeout
    async fn await_metadata(&self) -> TransferResult<TransferManifest>;

    /// Instruct the engine to fetch every file in the manifest.
    ///
    /// Returns promptly; acquisition proceeds in the background.
    ///
    /// # Errors
    ///
    /// Returns an error when the engine refuses to start acquisition.
    async fn begin_full_acquisition(&self) -> TransferResult<()>;

    /// Non-blocking snapshot of the current transfer progress.
    fn snapshot(&self) -> TransferSnapshot;

    /// Suspend until every file in the manifest is fully acquired.
    ///
    /// # Errors
    ///
    /// Returns an error when the engine aborts the transfer.
    async fn await_all_complete(&self) -> TransferResult<()>;

    /// Release engine resources. Idempotent; must be the last operation.
    async fn close(&self);
}
