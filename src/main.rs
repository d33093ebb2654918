//! locale-hmr
//!
//! Reloads translation resources when locale files change on disk.
//!
//! # Architecture Overview
//!
//! ```text
//!   locales/<lng>/<ns>.json
//!            │ notify
//!            ▼
//!   ┌─────────────────┐    ┌──────────┐    ┌──────────────────────────┐
//!   │ watcher         │───▶│ batcher  │───▶│ trigger                  │
//!   │ path → <lng/ns> │    │ debounce │    │ native hot module │ bus  │
//!   └─────────────────┘    └──────────┘    └────────────┬─────────────┘
//!                                                       │ on_change
//!                                                       ▼
//!   ┌──────────────────┐    ┌────────────┐    ┌──────────────────┐
//!   │ change           │───▶│ dispatcher │───▶│ client / server  │
//!   │ parse/filter/agg │    │ reload     │    │ post-processing  │
//!   └──────────────────┘    └────────────┘    └──────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use locale_hmr::config::loader::load_config;
use locale_hmr::config::validation::validate_config;
use locale_hmr::config::{Adapter, HmrConfig, TriggerMode};
use locale_hmr::lifecycle::{self, signals};
use locale_hmr::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "locale-hmr")]
#[command(about = "Reload translation resources when locale files change", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Locales directory, laid out as <lng>/<ns>.json (repeatable).
    #[arg(long = "locales-dir")]
    locales_dirs: Vec<PathBuf>,

    /// Loaded namespaces, comma separated.
    #[arg(long, value_delimiter = ',')]
    ns: Vec<String>,

    /// Active language.
    #[arg(long)]
    lng: Option<String>,

    #[arg(long, value_enum)]
    adapter: Option<Adapter>,

    #[arg(long, value_enum)]
    trigger: Option<TriggerMode>,
}

impl Cli {
    fn into_config(self) -> Result<HmrConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => HmrConfig::default(),
        };

        if !self.locales_dirs.is_empty() {
            config.watcher.locales_dirs = self.locales_dirs;
        }
        if !self.ns.is_empty() {
            config.localization.namespaces = self.ns;
        }
        if let Some(lng) = self.lng {
            config.localization.language = lng;
        }
        if let Some(adapter) = self.adapter {
            config.trigger.adapter = adapter;
        }
        if let Some(mode) = self.trigger {
            config.trigger.mode = mode;
        }

        if let Err(errors) = validate_config(&config) {
            let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
            return Err(format!("invalid configuration: {}", messages.join(", ")).into());
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().into_config()?;

    logging::init_logging(&config.observability)?;
    tracing::info!("locale-hmr v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        locales_dirs = ?config.watcher.locales_dirs,
        namespaces = ?config.localization.namespaces,
        language = %config.localization.language,
        adapter = ?config.trigger.adapter,
        trigger = ?config.trigger.mode,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => {
                if let Err(e) = metrics::init_metrics(addr) {
                    tracing::error!("Failed to start metrics exporter: {}", e);
                }
            }
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let running = lifecycle::start(&config)?;
    tracing::info!(source = running.registration.kind(), "Watching for translation changes");

    signals::wait_for_shutdown_signal().await;
    running.stop().await;

    tracing::info!("Shutdown complete");
    Ok(())
}
