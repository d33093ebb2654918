//! Shutdown signal for background tasks.
//!
//! [`Running`](crate::lifecycle::Running) owns one and fires it from
//! `stop()`. The batcher subscribes at startup and stops mid-window when it
//! fires, without publishing what it collected.

use tokio::sync::broadcast;

/// Broadcast stop signal. Clones share the same channel.
#[derive(Clone)]
pub struct Shutdown {
    tx: broadcast::Sender<()>,
}

impl Shutdown {
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(1);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.tx.subscribe()
    }

    /// Fire the signal. Returns how many subscribers were listening.
    pub fn trigger(&self) -> usize {
        let notified = self.tx.send(()).unwrap_or(0);
        tracing::debug!(notified, "Shutdown signalled");
        notified
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}
