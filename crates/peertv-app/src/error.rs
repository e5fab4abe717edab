//! # Design
//!
//! - Centralize application-level errors for the play orchestration.
//! - Keep error messages constant while carrying context fields.
//! - Preserve source errors without re-logging at call sites.

use std::io;
use std::path::PathBuf;

use peertv_torrent_core::TransferError;
use thiserror::Error;

/// Result alias for play operations.
pub type PlayResult<T> = Result<T, PlayError>;

/// Application-level error type for the play orchestration.
#[derive(Debug, Error)]
pub enum PlayError {
    /// The staging path exists but is not a directory.
    #[error("workspace path is not a directory")]
    WorkspaceNotDirectory {
        /// Conflicting path.
        path: PathBuf,
    },
    /// The staging directory could not be created.
    #[error("workspace unavailable")]
    Workspace {
        /// Path that failed to materialize.
        path: PathBuf,
        /// Underlying IO failure.
        #[source]
        source: io::Error,
    },
    /// The external player process could not be started.
    #[error("player launch failed")]
    PlayerLaunch {
        /// Player command that failed to spawn.
        command: String,
        /// Underlying spawn failure.
        #[source]
        source: io::Error,
    },
    /// A transfer-layer operation failed.
    #[error("transfer operation failed")]
    Transfer {
        /// Operation identifier.
        operation: &'static str,
        /// Source transfer error.
        #[source]
        source: TransferError,
    },
}

impl PlayError {
    pub(crate) const fn transfer(operation: &'static str, source: TransferError) -> Self {
        Self::Transfer { operation, source }
    }
}
