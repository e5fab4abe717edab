//! # Design
//!
//! - Keep the adapter behind the core error taxonomy; no adapter-local enum.
//! - Wrap engine failures with structured operation context.

use std::error::Error;

use peertv_torrent_core::TransferError;

/// Build a transfer error with structured operation context.
pub(crate) fn op_failed(
    operation: &'static str,
    source: impl Into<Box<dyn Error + Send + Sync>>,
) -> TransferError {
    TransferError::OperationFailed {
        operation,
        source: source.into(),
    }
}
