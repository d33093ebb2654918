//! Client-side adapter.
//!
//! # Responsibilities
//! - Bust the backend's HTTP cache before each reload
//! - Re-apply the active language when its resources were reloaded
//! - Report reload failures at error level

use std::sync::Arc;

use crate::change::{aggregate, NamespaceFilter};
use crate::hmr::{ChangeHandler, ReloadDispatcher};
use crate::i18n::backend::{cache_bust_token, BACKEND_LOOKUPS};
use crate::i18n::Localizer;
use crate::observability::metrics;

pub struct ClientHmr {
    localizer: Arc<dyn Localizer>,
    dispatcher: ReloadDispatcher,
}

impl ClientHmr {
    /// Create the adapter, warning if no backend options can be found.
    pub fn new(localizer: Arc<dyn Localizer>) -> Self {
        let mut found = None;
        localizer.edit_backend(&mut |layout| {
            found = layout.resolve().map(|(name, _)| name);
        });

        match found {
            Some(location) => {
                tracing::debug!(location, "Backend options found for cache busting");
            }
            None => {
                let searched: Vec<&str> = BACKEND_LOOKUPS.iter().map(|l| l.name).collect();
                tracing::warn!(
                    searched = ?searched,
                    "Backend options not found, reloaded resources may be served from HTTP cache"
                );
            }
        }

        Self {
            dispatcher: ReloadDispatcher::new(localizer.clone(), "client"),
            localizer,
        }
    }

    fn bust_cache(&self) {
        let token = cache_bust_token();
        self.localizer.edit_backend(&mut |layout| {
            if let Some((location, options)) = layout.resolve() {
                options.bust_cache(token);
                tracing::trace!(location, token = %token, "Cache-busting parameter set");
            }
        });
    }
}

impl ChangeHandler for ClientHmr {
    fn on_change(&self, changed_files: &[String]) {
        let filter = NamespaceFilter::new(self.localizer.namespaces());
        let Some(batch) = aggregate(changed_files, &filter) else {
            metrics::record_change(false);
            return;
        };
        metrics::record_change(true);

        self.bust_cache();

        tracing::info!(
            languages = ?batch.languages,
            namespaces = ?batch.namespaces,
            "Got an update with changed translations"
        );

        let localizer = self.localizer.clone();
        let reloaded = batch.clone();
        self.dispatcher.dispatch(&batch, move |outcome| match outcome {
            Ok(()) => {
                let Some(active) = localizer.language() else {
                    return;
                };
                if reloaded.contains_language(&active) {
                    localizer.change_language(&active);
                    metrics::record_language_switch();
                }
            }
            Err(error) => {
                tracing::error!(
                    error = %error,
                    languages = ?reloaded.languages,
                    namespaces = ?reloaded.namespaces,
                    "Reload of translations failed"
                );
            }
        });
    }
}
