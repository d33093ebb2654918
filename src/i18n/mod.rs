//! Localization instance abstraction.
//!
//! # Data Flow
//! ```text
//! hmr adapters
//!     → Localizer::namespaces / language (read configuration)
//!     → Localizer::edit_backend (cache-busting, client adapter only)
//!     → Localizer::reload_resources (one call per relevant change)
//!     → completion callback → Localizer::change_language
//! ```
//!
//! # Design Decisions
//! - Localizer is shared behind `Arc`, implementations use interior mutability
//! - Reload outcome is delivered through a one-shot callback, never returned
//! - Backend options live in one of two places, resolved by ordered lookups

pub mod backend;
pub mod store;

use thiserror::Error;

pub use backend::{BackendLayout, BackendOptions, CACHE_BUST_PARAM};
pub use store::ResourceStore;

/// Errors reported by a resource reload.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReloadError {
    /// A resource file could not be read.
    #[error("failed to read {language}/{namespace}: {reason}")]
    Read {
        language: String,
        namespace: String,
        reason: String,
    },

    /// A resource file did not contain valid JSON.
    #[error("failed to parse {language}/{namespace}: {reason}")]
    Parse {
        language: String,
        namespace: String,
        reason: String,
    },

    /// Opaque failure reported by a localization backend.
    #[error("{0}")]
    Backend(String),
}

/// One-shot completion callback for a resource reload.
pub type ReloadCallback = Box<dyn FnOnce(Option<ReloadError>) + Send + 'static>;

/// The localization instance driven by hot reload.
pub trait Localizer: Send + Sync {
    /// Namespaces currently loaded, in configuration order.
    fn namespaces(&self) -> Vec<String>;

    /// The active language, if one is set.
    fn language(&self) -> Option<String>;

    /// Re-fetch resources for the given languages and namespaces.
    ///
    /// `on_complete` must be called exactly once when the reload finishes.
    fn reload_resources(
        &self,
        languages: Vec<String>,
        namespaces: Vec<String>,
        on_complete: ReloadCallback,
    );

    /// Switch the active language so consumers pick up fresh resources.
    fn change_language(&self, language: &str);

    /// Give `edit` mutable access to the backend option locations.
    fn edit_backend(&self, edit: &mut dyn FnMut(&mut BackendLayout));
}
