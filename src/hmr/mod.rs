//! Hot-reload adapters.
//!
//! # Data Flow
//! ```text
//! trigger (native hot module or plugin bus)
//!     → ChangeHandler::on_change(changed files)
//!     → change::aggregate (parse, filter, dedupe)
//!     → dispatcher.rs (one reload per relevant notification)
//!     → client.rs / server.rs (react to the reload outcome)
//! ```
//!
//! # Design Decisions
//! - One entry point for both trigger conventions
//! - Client adapter busts the backend cache and re-applies the active language
//! - Server adapter only reports, failures are logged at info level
//! - Nothing propagates out of `on_change`; failures end in a log line

pub mod client;
pub mod dispatcher;
pub mod server;

use std::sync::Arc;

use crate::i18n::Localizer;
use crate::trigger::{Host, Registration, TriggerError, TriggerSource};

pub use client::ClientHmr;
pub use dispatcher::ReloadDispatcher;
pub use server::ServerHmr;

/// Entry point invoked with the changed files of one notification.
pub trait ChangeHandler: Send + Sync {
    fn on_change(&self, changed_files: &[String]);
}

/// Wire the client adapter to whichever trigger the host offers.
pub fn apply_client_hmr(
    localizer: Arc<dyn Localizer>,
    host: Host,
) -> Result<Registration, TriggerError> {
    TriggerSource::detect(host).register(Arc::new(ClientHmr::new(localizer)))
}

/// Wire the server adapter to whichever trigger the host offers.
pub fn apply_server_hmr(
    localizer: Arc<dyn Localizer>,
    host: Host,
) -> Result<Registration, TriggerError> {
    TriggerSource::detect(host).register(Arc::new(ServerHmr::new(localizer)))
}
