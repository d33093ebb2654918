//! Locale directory watching.
//!
//! # Data Flow
//! ```text
//! notify events (create/modify/remove)
//!     → locales.rs (absolute path → `<lng>/<ns>` identifier)
//!     → mpsc channel
//!     → batcher.rs (debounce window, dedupe)
//!     → Trigger::publish + PluginBus::emit
//! ```
//!
//! # Design Decisions
//! - Identifiers keep native separators; parsing normalizes them later
//! - Simultaneous saves are collapsed into one notification

pub mod batcher;
pub mod locales;

use std::path::PathBuf;

use thiserror::Error;

pub use batcher::Batcher;
pub use locales::{changed_file_identifier, LocalesWatcher};

#[derive(Debug, Error)]
pub enum WatchError {
    #[error("locales directory {0} is not accessible: {1}")]
    Directory(PathBuf, std::io::Error),

    #[error("watch error: {0}")]
    Notify(#[from] notify::Error),
}
