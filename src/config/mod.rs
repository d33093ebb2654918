//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML) + CLI overrides
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → HmrConfig (validated, immutable)
//!     → lifecycle::startup wires the subsystems from it
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Validation reports every problem, not just the first

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::{
    Adapter, HmrConfig, LocalizationConfig, ObservabilityConfig, TriggerConfig, TriggerMode,
    WatcherConfig,
};
