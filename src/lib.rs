//! Hot reload of translation resources.
//!
//! Watches locale directories, works out which languages and namespaces a
//! change touched, and asks the localization instance to reload exactly
//! those, once per change notification.

pub mod change;
pub mod config;
pub mod hmr;
pub mod i18n;
pub mod lifecycle;
pub mod observability;
pub mod trigger;
pub mod watcher;

pub use config::schema::HmrConfig;
pub use hmr::{apply_client_hmr, apply_server_hmr, ChangeHandler};
pub use i18n::{Localizer, ResourceStore};
pub use lifecycle::Shutdown;
