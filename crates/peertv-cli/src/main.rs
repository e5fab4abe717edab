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

//! Binary entrypoint for the PeerTV command-line interface.

use std::process;

#[tokio::main]
async fn main() {
    let exit_code = peertv_cli::run().await;
    process::exit(exit_code);
}
