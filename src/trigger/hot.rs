//! Native hot module path.
//!
//! The trigger fans every published event out to one unbounded queue per
//! hot module. Each listener task drains its queue in publish order, so
//! back-to-back notifications are all delivered.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::trigger::{ChangeEvent, TriggerError};

/// Well-known id of the trigger dependency.
pub const TRIGGER_MODULE_ID: &str = "locale-hmr/trigger";

type Subscribers = Mutex<Vec<mpsc::UnboundedSender<ChangeEvent>>>;

/// Publishing side of the native trigger.
#[derive(Clone, Default)]
pub struct Trigger {
    subscribers: Arc<Subscribers>,
}

impl Trigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `event` for every live hot module. Returns how many received it.
    pub fn publish(&self, event: ChangeEvent) -> usize {
        let mut subscribers = self.subscribers.lock().unwrap_or_else(|e| e.into_inner());
        subscribers.retain(|tx| tx.send(event.clone()).is_ok());
        subscribers.len()
    }

    /// The hot module capability exposed to the host.
    ///
    /// Events published after this call are queued even before
    /// [`HotModule::accept`] starts the listener.
    pub fn hot_module(&self) -> HotModule {
        let (tx, events) = mpsc::unbounded_channel();
        self.subscribers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(tx);

        HotModule {
            dependency: TRIGGER_MODULE_ID,
            events,
        }
    }

    /// Hot modules whose listener side is still alive.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .map(|subscribers| subscribers.iter().filter(|tx| !tx.is_closed()).count())
            .unwrap_or(0)
    }
}

/// Hot module replacement capability bound to the trigger.
pub struct HotModule {
    dependency: &'static str,
    events: mpsc::UnboundedReceiver<ChangeEvent>,
}

impl HotModule {
    /// Run `callback` once for every event published on the trigger.
    ///
    /// The listener task ends when every [`Trigger`] handle is dropped.
    pub fn accept<F>(self, dependency: &str, mut callback: F) -> Result<JoinHandle<()>, TriggerError>
    where
        F: FnMut(ChangeEvent) + Send + 'static,
    {
        if dependency != self.dependency {
            return Err(TriggerError::UnknownDependency(dependency.to_string()));
        }
        let handle = tokio::runtime::Handle::try_current().map_err(|_| TriggerError::NoRuntime)?;

        let mut events = self.events;
        let task = handle.spawn(async move {
            while let Some(event) = events.recv().await {
                callback(event);
            }
            tracing::debug!("Trigger closed, hot module listener exiting");
        });

        tracing::debug!(dependency, "Hot module accepted");
        Ok(task)
    }

    pub fn dependency(&self) -> &'static str {
        self.dependency
    }
}
