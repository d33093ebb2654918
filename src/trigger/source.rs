//! Listener registration.
//!
//! Both trigger conventions are normalized to [`ChangeHandler::on_change`]:
//! the native hot module hands over the event read from the trigger, the
//! plugin bus passes its payload directly.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::config::schema::TriggerMode;
use crate::hmr::ChangeHandler;
use crate::trigger::{HotModule, ListenerId, PluginBus, TriggerError, TRIGGER_MODULE_ID};

/// Change-notification capabilities offered by the host.
pub struct Host {
    /// Native hot module replacement, if supported.
    pub hot: Option<HotModule>,

    /// Plugin listener bus, always available.
    pub plugin: Arc<PluginBus>,
}

/// Where change notifications come from.
pub enum TriggerSource {
    Native(HotModule),
    Plugin(Arc<PluginBus>),
}

/// A live listener registration.
#[derive(Debug)]
pub enum Registration {
    Native {
        dependency: &'static str,
        task: JoinHandle<()>,
    },
    Plugin {
        bus: Arc<PluginBus>,
        listener: ListenerId,
    },
}

impl TriggerSource {
    /// Prefer the native hot module, fall back to the plugin bus.
    pub fn detect(host: Host) -> Self {
        match host.hot {
            Some(hot) => TriggerSource::Native(hot),
            None => TriggerSource::Plugin(host.plugin),
        }
    }

    /// Choose a source according to the configured mode.
    pub fn select(host: Host, mode: TriggerMode) -> Result<Self, TriggerError> {
        match mode {
            TriggerMode::Auto => Ok(Self::detect(host)),
            TriggerMode::Native => host
                .hot
                .map(TriggerSource::Native)
                .ok_or(TriggerError::NativeUnavailable),
            TriggerMode::Plugin => Ok(TriggerSource::Plugin(host.plugin)),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            TriggerSource::Native(_) => "native",
            TriggerSource::Plugin(_) => "plugin",
        }
    }

    /// Register `handler` as the entry point for change notifications.
    pub fn register(self, handler: Arc<dyn ChangeHandler>) -> Result<Registration, TriggerError> {
        let kind = self.kind();
        let registration = match self {
            TriggerSource::Native(hot) => {
                let task = hot.accept(TRIGGER_MODULE_ID, move |event| {
                    handler.on_change(&event.changed_files);
                })?;
                Registration::Native {
                    dependency: TRIGGER_MODULE_ID,
                    task,
                }
            }
            TriggerSource::Plugin(bus) => {
                let listener = bus.add_listener(move |event| {
                    handler.on_change(&event.changed_files);
                });
                Registration::Plugin { bus, listener }
            }
        };

        tracing::info!(source = kind, "Hot reload listener registered");
        Ok(registration)
    }
}

impl Registration {
    pub fn kind(&self) -> &'static str {
        match self {
            Registration::Native { .. } => "native",
            Registration::Plugin { .. } => "plugin",
        }
    }

    /// Stop receiving change notifications.
    pub fn cancel(self) {
        match self {
            Registration::Native { task, .. } => task.abort(),
            Registration::Plugin { bus, listener } => {
                bus.remove_listener(listener);
            }
        }
    }
}
