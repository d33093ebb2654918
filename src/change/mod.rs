//! Change-event processing subsystem.
//!
//! # Data Flow
//! ```text
//! ChangeEvent (changed file identifiers)
//!     → path.rs (split into language + namespace)
//!     → filter.rs (keep loaded namespaces only)
//!     → aggregator.rs (dedupe, first-seen order)
//!     → Return: AggregatedBatch or None
//! ```
//!
//! # Design Decisions
//! - Both `/` and `\` separators are accepted, never mixed
//! - Namespace matching is exact, never prefix based
//! - Malformed or irrelevant identifiers are dropped silently
//! - Output order is deterministic for a fixed input order

pub mod aggregator;
pub mod filter;
pub mod path;

pub use aggregator::{aggregate, AggregatedBatch};
pub use filter::NamespaceFilter;
pub use path::{parse_changed_file, ParsedChange};
