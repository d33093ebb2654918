//! Change-notification sources.
//!
//! # Data Flow
//! ```text
//! watcher batcher
//!     → hot.rs Trigger::publish (one queue per hot module)
//!           → HotModule::accept callback (native path)
//!     → bus.rs PluginBus::emit (explicit payload)
//!           → listener callback (fallback path)
//!     → source.rs converges both on ChangeHandler::on_change
//! ```
//!
//! # Design Decisions
//! - Source chosen once at setup: native if the host offers it, else plugin bus
//! - Every native hot module gets its own queue, so no notification is lost
//! - Overlapping notifications are not queued; each one dispatches

pub mod bus;
pub mod hot;
pub mod source;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use bus::{ListenerId, PluginBus};
pub use hot::{HotModule, Trigger, TRIGGER_MODULE_ID};
pub use source::{Host, Registration, TriggerSource};

/// Payload of one change notification.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeEvent {
    /// Locale-relative identifiers such as `en/common`.
    pub changed_files: Vec<String>,
}

impl ChangeEvent {
    pub fn new<I, S>(changed_files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            changed_files: changed_files.into_iter().map(Into::into).collect(),
        }
    }
}

/// Errors raised while registering a change listener.
#[derive(Debug, Error)]
pub enum TriggerError {
    /// The hot module only accepts its own trigger dependency.
    #[error("unknown hot dependency '{0}', expected '{expected}'", expected = TRIGGER_MODULE_ID)]
    UnknownDependency(String),

    /// Native registration was forced but the host has no hot module.
    #[error("native hot module replacement is not available on this host")]
    NativeUnavailable,

    /// The native path needs a Tokio runtime to run its listener task.
    #[error("native hot module replacement requires a running Tokio runtime")]
    NoRuntime,
}
