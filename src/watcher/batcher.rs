//! Debounced publishing of change notifications.
//!
//! Editors often write several files, or one file several times, for a
//! single save. Changes arriving within the debounce window of the first one
//! are merged into a single [`ChangeEvent`].

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, mpsc};

use crate::trigger::{ChangeEvent, PluginBus, Trigger};

/// Append `files` to `pending`, skipping identifiers already present.
pub fn merge_changes(pending: &mut Vec<String>, files: Vec<String>) {
    for file in files {
        if !pending.contains(&file) {
            pending.push(file);
        }
    }
}

/// How a debounce window ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WindowEnd {
    Elapsed,
    /// The watcher side is gone. Publish what was collected, then stop.
    Closed,
    /// Stop without publishing.
    Shutdown,
}

/// Collects changed identifiers and publishes them on both trigger paths.
pub struct Batcher {
    window: Duration,
    trigger: Trigger,
    bus: Arc<PluginBus>,
}

impl Batcher {
    pub fn new(window: Duration, trigger: Trigger, bus: Arc<PluginBus>) -> Self {
        Self {
            window,
            trigger,
            bus,
        }
    }

    pub async fn run(
        self,
        mut changes: mpsc::UnboundedReceiver<Vec<String>>,
        mut shutdown: broadcast::Receiver<()>,
    ) {
        loop {
            tokio::select! {
                first = changes.recv() => {
                    let Some(first) = first else { break };
                    let (pending, end) = self.collect(first, &mut changes, &mut shutdown).await;
                    if end == WindowEnd::Shutdown {
                        tracing::info!(
                            dropped = pending.len(),
                            "Batcher received shutdown signal during debounce window"
                        );
                        break;
                    }
                    self.publish(pending);
                    if end == WindowEnd::Closed {
                        break;
                    }
                }
                _ = shutdown.recv() => {
                    tracing::info!("Batcher received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    /// Gather changes until the window closes.
    async fn collect(
        &self,
        first: Vec<String>,
        changes: &mut mpsc::UnboundedReceiver<Vec<String>>,
        shutdown: &mut broadcast::Receiver<()>,
    ) -> (Vec<String>, WindowEnd) {
        let mut pending = Vec::new();
        merge_changes(&mut pending, first);

        let deadline = tokio::time::sleep(self.window);
        tokio::pin!(deadline);

        loop {
            tokio::select! {
                _ = &mut deadline => return (pending, WindowEnd::Elapsed),
                more = changes.recv() => match more {
                    Some(files) => merge_changes(&mut pending, files),
                    None => return (pending, WindowEnd::Closed),
                },
                _ = shutdown.recv() => return (pending, WindowEnd::Shutdown),
            }
        }
    }

    fn publish(&self, changed_files: Vec<String>) {
        let event = ChangeEvent { changed_files };
        tracing::debug!(files = ?event.changed_files, "Publishing change notification");

        self.trigger.publish(event.clone());
        self.bus.emit(&event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_merge_keeps_first_seen_order() {
        let mut pending = vec!["en/a".to_string()];
        merge_changes(
            &mut pending,
            vec!["de/a".into(), "en/a".into(), "en/b".into()],
        );
        assert_eq!(pending, vec!["en/a", "de/a", "en/b"]);
    }

    #[tokio::test]
    async fn test_changes_within_window_are_merged() {
        let bus = Arc::new(PluginBus::new());
        let seen = Arc::new(Mutex::new(Vec::new()));
        {
            let seen = seen.clone();
            bus.add_listener(move |event| seen.lock().unwrap().push(event.clone()));
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let (_shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let batcher = Batcher::new(Duration::from_millis(50), Trigger::new(), bus);

        tx.send(vec!["en/a".to_string()]).unwrap();
        tx.send(vec!["en/a".to_string(), "de/a".to_string()]).unwrap();
        drop(tx);

        batcher.run(rx, shutdown_rx).await;

        assert_eq!(
            *seen.lock().unwrap(),
            vec![ChangeEvent::new(["en/a", "de/a"])]
        );
    }

    #[tokio::test]
    async fn test_shutdown_stops_batcher() {
        let (_tx, rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let batcher = Batcher::new(
            Duration::from_millis(10),
            Trigger::new(),
            Arc::new(PluginBus::new()),
        );

        let task = tokio::spawn(batcher.run(rx, shutdown_rx));
        shutdown_tx.send(()).unwrap();
        task.await.unwrap();
    }

    #[tokio::test]
    async fn test_shutdown_during_window_skips_publish() {
        let bus = Arc::new(PluginBus::new());
        let seen = Arc::new(Mutex::new(Vec::new()));
        {
            let seen = seen.clone();
            bus.add_listener(move |event| seen.lock().unwrap().push(event.clone()));
        }

        let (tx, rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
        let batcher = Batcher::new(Duration::from_secs(30), Trigger::new(), bus);

        let task = tokio::spawn(batcher.run(rx, shutdown_rx));
        tx.send(vec!["en/a".to_string()]).unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        shutdown_tx.send(()).unwrap();

        tokio::time::timeout(Duration::from_secs(2), task)
            .await
            .expect("batcher kept waiting for the window")
            .unwrap();
        assert!(seen.lock().unwrap().is_empty());
    }
}
