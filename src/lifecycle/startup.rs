//! Startup orchestration.
//!
//! # Responsibilities
//! - Load the initial resources
//! - Register the configured adapter on the chosen trigger
//! - Start the locales watcher and the batcher task

use std::sync::Arc;
use std::time::Duration;

use notify::RecommendedWatcher;
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::config::{Adapter, HmrConfig};
use crate::hmr::{ChangeHandler, ClientHmr, ServerHmr};
use crate::i18n::{Localizer, ReloadError, ResourceStore};
use crate::lifecycle::Shutdown;
use crate::trigger::{Host, PluginBus, Registration, Trigger, TriggerError, TriggerSource};
use crate::watcher::{Batcher, LocalesWatcher, WatchError};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("no locales directory configured")]
    NoLocalesDir,

    #[error("initial resource load failed: {0}")]
    Resources(#[from] ReloadError),

    #[error(transparent)]
    Trigger(#[from] TriggerError),

    #[error(transparent)]
    Watch(#[from] WatchError),
}

/// Handles of a running hot-reload service.
pub struct Running {
    pub store: ResourceStore,
    pub registration: Registration,
    shutdown: Shutdown,
    batcher: JoinHandle<()>,
    _watcher: RecommendedWatcher,
}

impl Running {
    /// Stop watching, drain the batcher and drop the listener registration.
    pub async fn stop(self) {
        let notified = self.shutdown.trigger();
        tracing::info!(tasks = notified, "Stopping hot reload");

        if let Err(e) = self.batcher.await {
            tracing::error!("Batcher task failed: {}", e);
        }
        self.registration.cancel();
    }
}

/// Start the service. Must be called from within a Tokio runtime.
pub fn start(config: &HmrConfig) -> Result<Running, StartupError> {
    let locales_dirs = &config.watcher.locales_dirs;
    if locales_dirs.is_empty() {
        return Err(StartupError::NoLocalesDir);
    }

    let store = ResourceStore::new(
        locales_dirs.iter().cloned(),
        config.localization.namespaces.clone(),
        Some(config.localization.language.clone()),
    );
    store.load(&config.localization.preload_languages())?;
    tracing::info!(
        resources = store.resource_count(),
        paths = ?locales_dirs,
        "Initial resources loaded"
    );

    let trigger = Trigger::new();
    let bus = Arc::new(PluginBus::new());
    let host = Host {
        hot: Some(trigger.hot_module()),
        plugin: bus.clone(),
    };

    let localizer: Arc<dyn Localizer> = Arc::new(store.clone());
    let handler: Arc<dyn ChangeHandler> = match config.trigger.adapter {
        Adapter::Server => Arc::new(ServerHmr::new(localizer)),
        Adapter::Client => Arc::new(ClientHmr::new(localizer)),
    };
    let registration = TriggerSource::select(host, config.trigger.mode)?.register(handler)?;

    let (watcher, changes) = LocalesWatcher::new(
        locales_dirs,
        &config.watcher.extensions,
        Duration::from_millis(config.watcher.poll_interval_ms),
    )?;
    let watcher = watcher.run()?;

    let batcher = Batcher::new(
        Duration::from_millis(config.watcher.debounce_ms),
        trigger,
        bus,
    );
    let shutdown = Shutdown::new();
    let batcher = tokio::spawn(batcher.run(changes, shutdown.subscribe()));

    Ok(Running {
        store,
        registration,
        shutdown,
        batcher,
        _watcher: watcher,
    })
}
