//! # Design
//!
//! - Centralize transfer-layer errors without using `anyhow`.
//! - Keep error messages constant; store operational context in fields.
//! - Box foreign engine failures so adapters stay behind one source type.

use std::error::Error;
use std::time::Duration;

use thiserror::Error;

/// Convenience alias for transfer operation results.
pub type TransferResult<T> = Result<T, TransferError>;

/// Primary error type for transfer operations.
#[derive(Debug, Error)]
pub enum TransferError {
    /// The supplied content descriptor failed validation.
    #[error("invalid content descriptor")]
    InvalidDescriptor {
        /// Static reason describing the validation failure.
        reason: &'static str,
        /// Offending input value when available.
        value: Option<String>,
    },
    /// The underlying transfer engine could not be started.
    #[error("transfer engine failed to start")]
    EngineInit {
        /// Underlying engine failure.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// The engine refused to admit the descriptor.
    #[error("content descriptor rejected by the transfer engine")]
    DescriptorRejected {
        /// Underlying engine failure.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// Swarm metadata did not arrive within the configured limit.
    #[error("timed out waiting for swarm metadata")]
    MetadataTimeout {
        /// How long the caller waited before giving up.
        waited: Duration,
    },
    /// The resolved manifest carries no files.
    #[error("transfer manifest contains no files")]
    EmptyManifest,
    /// A transfer operation failed in the underlying engine.
    #[error("transfer operation failed")]
    OperationFailed {
        /// Operation identifier.
        operation: &'static str,
        /// Underlying failure.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

impl TransferError {
    /// Build a descriptor validation error.
    #[must_use]
    pub fn invalid_descriptor(reason: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidDescriptor {
            reason,
            value: Some(value.into()),
        }
    }
}
