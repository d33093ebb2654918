//! Server-side adapter.
//!
//! Reports reload outcomes only. Success and failure both go to the info
//! channel.

use std::sync::Arc;

use crate::change::{aggregate, NamespaceFilter};
use crate::hmr::{ChangeHandler, ReloadDispatcher};
use crate::i18n::Localizer;
use crate::observability::metrics;

pub struct ServerHmr {
    localizer: Arc<dyn Localizer>,
    dispatcher: ReloadDispatcher,
}

impl ServerHmr {
    pub fn new(localizer: Arc<dyn Localizer>) -> Self {
        Self {
            dispatcher: ReloadDispatcher::new(localizer.clone(), "server"),
            localizer,
        }
    }
}

impl ChangeHandler for ServerHmr {
    fn on_change(&self, changed_files: &[String]) {
        let filter = NamespaceFilter::new(self.localizer.namespaces());
        let Some(batch) = aggregate(changed_files, &filter) else {
            metrics::record_change(false);
            return;
        };
        metrics::record_change(true);

        tracing::info!(
            languages = ?batch.languages,
            namespaces = ?batch.namespaces,
            "Got an update with changed translations"
        );

        let reloaded = batch.clone();
        self.dispatcher.dispatch(&batch, move |outcome| match outcome {
            Ok(()) => tracing::info!(
                languages = ?reloaded.languages,
                namespaces = ?reloaded.namespaces,
                "Server reloaded locale"
            ),
            Err(error) => tracing::info!(
                error = %error,
                languages = ?reloaded.languages,
                namespaces = ?reloaded.namespaces,
                "Server failed to reload locale"
            ),
        });
    }
}
