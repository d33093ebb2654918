//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check value ranges and non-empty lists
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: HmrConfig → Result<(), Vec<ValidationError>>

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::HmrConfig;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("at least one locales directory is required")]
    NoLocalesDirs,

    #[error("at least one translation file extension is required")]
    NoExtensions,

    #[error("debounce_ms must be greater than zero")]
    ZeroDebounce,

    #[error("at least one namespace is required")]
    NoNamespaces,

    #[error("namespace '{0}' is configured more than once")]
    DuplicateNamespace(String),

    #[error("namespace '{0}' must not be empty or start/end with a separator")]
    InvalidNamespace(String),

    #[error("language must not be empty")]
    EmptyLanguage,

    #[error("invalid metrics address '{0}'")]
    InvalidMetricsAddress(String),
}

pub fn validate_config(config: &HmrConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.watcher.locales_dirs.is_empty() {
        errors.push(ValidationError::NoLocalesDirs);
    }
    if config.watcher.extensions.iter().all(|ext| ext.trim().is_empty()) {
        errors.push(ValidationError::NoExtensions);
    }
    if config.watcher.debounce_ms == 0 {
        errors.push(ValidationError::ZeroDebounce);
    }

    let namespaces = &config.localization.namespaces;
    if namespaces.is_empty() {
        errors.push(ValidationError::NoNamespaces);
    }
    for (i, ns) in namespaces.iter().enumerate() {
        if ns.is_empty() || ns.starts_with('/') || ns.ends_with('/') {
            errors.push(ValidationError::InvalidNamespace(ns.clone()));
        }
        if namespaces[..i].contains(ns) {
            errors.push(ValidationError::DuplicateNamespace(ns.clone()));
        }
    }

    if config.localization.language.trim().is_empty() {
        errors.push(ValidationError::EmptyLanguage);
    }

    let observability = &config.observability;
    if observability.metrics_enabled && observability.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidMetricsAddress(
            observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
