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

//! `librqbit`-backed implementation of the transfer session boundary.
//!
//! The engine is treated as an opaque collaborator: this crate only opens a
//! session rooted at a workspace, submits the descriptor, and translates the
//! engine's readiness signals and statistics into the core DTOs.

mod convert;
mod error;
mod session;

pub use session::RqbitSession;
