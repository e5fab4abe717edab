//! Fixed-tick terminal progress reporting.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use peertv_torrent_core::{TransferSession, TransferSnapshot};
use tokio::time::sleep;

/// Poll interval used when the caller does not configure one.
pub const DEFAULT_TICK: Duration = Duration::from_millis(200);

const CLEAR_SCREEN: &str = "\x1b[H\x1b[2J";

/// Polling loop that redraws a full-screen status view until completion.
///
/// Termination is observation-driven: the loop stops itself once a sampled
/// snapshot reports exact completion. It never cancels other tasks.
#[derive(Debug, Clone, Copy)]
pub struct ProgressReporter {
    tick: Duration,
}

impl ProgressReporter {
    /// Build a reporter with the given poll interval.
    #[must_use]
    pub const fn new(tick: Duration) -> Self {
        Self { tick }
    }

    /// Run the poll/redraw loop against a live session.
    ///
    /// The sample-render-then-check shape guarantees at least one full
    /// iteration even when the very first sample already reports
    /// completion. Returns the number of iterations performed.
    pub async fn run<S>(&self, session: Arc<S>, target: PathBuf, name: String) -> u64
    where
        S: TransferSession,
    {
        let mut iterations: u64 = 0;
        loop {
            sleep(self.tick).await;
            let snapshot = session.snapshot();
            let frame = render_frame(&target, &name, &snapshot);
            let mut stdout = io::stdout().lock();
            let _ = stdout.write_all(frame.as_bytes());
            let _ = stdout.flush();
            iterations += 1;
            if snapshot.all_complete {
                break;
            }
        }
        iterations
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new(DEFAULT_TICK)
    }
}

fn render_frame(target: &Path, name: &str, snapshot: &TransferSnapshot) -> String {
    format!(
        "{CLEAR_SCREEN}File location: {}\nTransfer name: {}\nDownload progress: {:.1}%\nPeers: {}\n",
        target.display(),
        name,
        snapshot.percent_complete(),
        snapshot.peer_count
    )
}
