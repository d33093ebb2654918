//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct HmrConfig {
    /// Locale directory watching.
    pub watcher: WatcherConfig,

    /// Localization instance settings.
    pub localization: LocalizationConfig,

    /// Trigger selection and adapter.
    pub trigger: TriggerConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Locale directory watcher configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WatcherConfig {
    /// Directories laid out as `<lng>/<ns>.<ext>`.
    pub locales_dirs: Vec<PathBuf>,

    /// Translation file extensions, without the dot.
    pub extensions: Vec<String>,

    /// Window for collecting simultaneous changes into one notification.
    pub debounce_ms: u64,

    /// Poll interval for platforms without native file events.
    pub poll_interval_ms: u64,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            locales_dirs: vec![PathBuf::from("locales")],
            extensions: vec!["json".to_string()],
            debounce_ms: 100,
            poll_interval_ms: 2000,
        }
    }
}

/// Localization instance configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LocalizationConfig {
    /// Loaded namespaces, possibly nested (`pages/home`).
    pub namespaces: Vec<String>,

    /// Active language.
    pub language: String,

    /// Language loaded alongside the active one.
    pub fallback_language: Option<String>,
}

impl Default for LocalizationConfig {
    fn default() -> Self {
        Self {
            namespaces: vec!["translation".to_string()],
            language: "en".to_string(),
            fallback_language: None,
        }
    }
}

impl LocalizationConfig {
    /// Languages loaded at startup, active language first.
    pub fn preload_languages(&self) -> Vec<String> {
        let mut languages = vec![self.language.clone()];
        if let Some(fallback) = &self.fallback_language {
            if fallback != &self.language {
                languages.push(fallback.clone());
            }
        }
        languages
    }
}

/// How change notifications reach the adapter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TriggerMode {
    /// Native hot module if available, plugin bus otherwise.
    #[default]
    Auto,
    Native,
    Plugin,
}

/// Which adapter reacts to reloads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Adapter {
    #[default]
    Server,
    Client,
}

/// Trigger configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TriggerConfig {
    pub mode: TriggerMode,
    pub adapter: Adapter,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: HmrConfig = toml::from_str("").unwrap();
        assert_eq!(config.watcher.extensions, vec!["json"]);
        assert_eq!(config.localization.language, "en");
        assert_eq!(config.trigger.mode, TriggerMode::Auto);
        assert_eq!(config.trigger.adapter, Adapter::Server);
    }

    #[test]
    fn test_full_config() {
        let config: HmrConfig = toml::from_str(
            r#"
            [watcher]
            locales_dirs = ["public/locales"]
            debounce_ms = 250

            [localization]
            namespaces = ["common", "pages/home"]
            language = "de"
            fallback_language = "en"

            [trigger]
            mode = "plugin"
            adapter = "client"
            "#,
        )
        .unwrap();

        assert_eq!(config.watcher.locales_dirs, vec![PathBuf::from("public/locales")]);
        assert_eq!(config.watcher.debounce_ms, 250);
        assert_eq!(config.localization.namespaces, vec!["common", "pages/home"]);
        assert_eq!(config.localization.preload_languages(), vec!["de", "en"]);
        assert_eq!(config.trigger.mode, TriggerMode::Plugin);
        assert_eq!(config.trigger.adapter, Adapter::Client);
    }

    #[test]
    fn test_fallback_same_as_language_not_duplicated() {
        let config = LocalizationConfig {
            fallback_language: Some("en".into()),
            ..Default::default()
        };
        assert_eq!(config.preload_languages(), vec!["en"]);
    }
}
