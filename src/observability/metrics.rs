//! Metrics collection and exposition.
//!
//! # Metrics
//! - `locale_hmr_changes_total` (counter): notifications by `relevant`
//! - `locale_hmr_reloads_total` (counter): reloads by `adapter`, `outcome`
//! - `locale_hmr_language_switches_total` (counter): active-language re-applies

use std::net::SocketAddr;

use metrics::counter;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_change(relevant: bool) {
    let relevant = if relevant { "true" } else { "false" };
    counter!("locale_hmr_changes_total", "relevant" => relevant).increment(1);
}

pub fn record_reload(adapter: &'static str, success: bool) {
    let outcome = if success { "success" } else { "failure" };
    counter!("locale_hmr_reloads_total", "adapter" => adapter, "outcome" => outcome).increment(1);
}

pub fn record_language_switch() {
    counter!("locale_hmr_language_switches_total").increment(1);
}
