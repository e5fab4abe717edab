//! External player process supervision.

use std::path::Path;

use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::error::{PlayError, PlayResult};

/// Player command used when the caller does not configure one.
pub const DEFAULT_PLAYER: &str = "mpv";

/// External player invocation settings.
#[derive(Debug, Clone)]
pub struct PlayerConfig {
    /// Player executable to spawn.
    pub command: String,
    /// Arguments placed before the target path.
    pub args: Vec<String>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            command: DEFAULT_PLAYER.to_string(),
            args: Vec::new(),
        }
    }
}

/// Supervises one external player process as an independent task.
///
/// The player's internal outcome is opaque: a non-zero exit is logged and
/// otherwise ignored. Only spawn failure is an error.
#[derive(Debug)]
pub struct PlaybackSupervisor {
    waiter: JoinHandle<()>,
}

impl PlaybackSupervisor {
    /// Spawn the player against the resolved target path.
    ///
    /// The process wait runs as its own task, so launching never blocks the
    /// progress reporter from starting.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError::PlayerLaunch`] when the process cannot be
    /// spawned.
    pub fn launch(config: &PlayerConfig, target: &Path) -> PlayResult<Self> {
        let mut command = Command::new(&config.command);
        command.args(&config.args).arg(target);

        let mut child = command.spawn().map_err(|source| PlayError::PlayerLaunch {
            command: config.command.clone(),
            source,
        })?;
        info!(
            player = config.command.as_str(),
            target = %target.display(),
            "player launched"
        );

        let player = config.command.clone();
        let waiter = tokio::spawn(async move {
            match child.wait().await {
                Ok(status) => info!(player = player.as_str(), %status, "player exited"),
                Err(err) => warn!(
                    player = player.as_str(),
                    error = %err,
                    "failed to observe player exit"
                ),
            }
        });

        Ok(Self { waiter })
    }

    /// Suspend until the player process has exited, regardless of its exit
    /// code.
    pub async fn join(self) {
        let _ = self.waiter.await;
    }
}
