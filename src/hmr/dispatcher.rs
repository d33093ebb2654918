//! Reload dispatch.

use std::sync::Arc;

use crate::change::AggregatedBatch;
use crate::i18n::{Localizer, ReloadError};
use crate::observability::metrics;

/// Issues the resource reload for an aggregated batch.
#[derive(Clone)]
pub struct ReloadDispatcher {
    localizer: Arc<dyn Localizer>,
    adapter: &'static str,
}

impl ReloadDispatcher {
    pub fn new(localizer: Arc<dyn Localizer>, adapter: &'static str) -> Self {
        Self { localizer, adapter }
    }

    /// Reload the batch's languages and namespaces.
    ///
    /// `on_outcome` runs once, whenever the localizer completes the reload.
    pub fn dispatch<F>(&self, batch: &AggregatedBatch, on_outcome: F)
    where
        F: FnOnce(Result<(), ReloadError>) + Send + 'static,
    {
        let adapter = self.adapter;
        tracing::debug!(
            adapter,
            languages = ?batch.languages,
            namespaces = ?batch.namespaces,
            "Dispatching resource reload"
        );

        self.localizer.reload_resources(
            batch.languages.clone(),
            batch.namespaces.clone(),
            Box::new(move |error| {
                metrics::record_reload(adapter, error.is_none());
                on_outcome(error.map_or(Ok(()), Err));
            }),
        );
    }
}
