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

//! The download-and-playback orchestrator.
//!
//! Layout: `workspace` (content-addressed staging), `player` (external
//! process supervision), `reporter` (poll/redraw progress loop),
//! `orchestrator` (the play session and its completion protocol).

/// Application-level error taxonomy.
pub mod error;
/// Play session wiring and the completion coordinator.
pub mod orchestrator;
/// External player process supervision.
pub mod player;
/// Terminal progress reporting.
pub mod reporter;
/// Staging directory allocation.
pub mod workspace;

#[cfg(test)]
mod testing;

pub use error::{PlayError, PlayResult};
pub use orchestrator::{PlayOptions, PlayReport, PlaySession, play};
pub use player::{DEFAULT_PLAYER, PlaybackSupervisor, PlayerConfig};
pub use reporter::{DEFAULT_TICK, ProgressReporter};
pub use workspace::Workspace;
