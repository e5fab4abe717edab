#![forbid(unsafe_code)]
#![deny(
    dead_code,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    rustdoc::broken_intra_doc_links,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]

//! Engine-agnostic transfer interfaces and DTOs.
//!
//! Layout: `model` (descriptors, manifests, snapshots), `service` (the
//! session trait adapters implement), `error` (the transfer error taxonomy).

/// Transfer error taxonomy shared across adapters.
pub mod error;
/// Descriptor, manifest and snapshot types.
pub mod model;
/// Session trait implemented by transfer engine adapters.
pub mod service;

pub use error::{TransferError, TransferResult};
pub use model::{MagnetLink, ManifestEntry, TransferManifest, TransferSnapshot};
pub use service::TransferSession;
