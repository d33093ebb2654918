//! File-backed resource store.
//!
//! Resources live at `<locales_dir>/<lng>/<ns>.json`, spread over one or more
//! locales directories. Each (language, namespace) is read from the first
//! directory holding its file. The store keeps the parsed JSON per
//! (language, namespace) and re-reads files on reload.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use arc_swap::ArcSwapOption;
use dashmap::DashMap;
use serde_json::Value;

use crate::i18n::backend::{BackendLayout, BackendOptions};
use crate::i18n::{Localizer, ReloadCallback, ReloadError};

struct StoreInner {
    locales_dirs: Vec<PathBuf>,
    namespaces: Vec<String>,
    language: ArcSwapOption<String>,
    resources: DashMap<(String, String), Value>,
    backend: Mutex<BackendLayout>,
}

/// A [`Localizer`] reading JSON resources from locales directories.
#[derive(Clone)]
pub struct ResourceStore {
    inner: Arc<StoreInner>,
}

impl ResourceStore {
    /// Create an empty store. Call [`ResourceStore::load`] to read resources.
    pub fn new<I, P>(locales_dirs: I, namespaces: Vec<String>, language: Option<String>) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let locales_dirs: Vec<PathBuf> = locales_dirs.into_iter().map(Into::into).collect();
        let load_path = locales_dirs
            .first()
            .map(|dir| format!("{}/{{{{lng}}}}/{{{{ns}}}}.json", dir.display()));
        let backend = BackendLayout {
            direct: Some(BackendOptions {
                load_path,
                ..Default::default()
            }),
            connector: None,
        };

        Self {
            inner: Arc::new(StoreInner {
                locales_dirs,
                namespaces,
                language: ArcSwapOption::from(language.map(Arc::new)),
                resources: DashMap::new(),
                backend: Mutex::new(backend),
            }),
        }
    }

    pub fn locales_dirs(&self) -> &[PathBuf] {
        &self.inner.locales_dirs
    }

    /// Synchronously load every configured namespace for `languages`.
    pub fn load(&self, languages: &[String]) -> Result<(), ReloadError> {
        for language in languages {
            for namespace in &self.inner.namespaces {
                let value = self.inner.read(language, namespace)?;
                self.inner
                    .resources
                    .insert((language.clone(), namespace.clone()), value);
            }
        }
        tracing::debug!(
            languages = ?languages,
            namespaces = ?self.inner.namespaces,
            "Resources loaded"
        );
        Ok(())
    }

    /// Look up a dotted `key` such as `home.title`.
    pub fn translate(&self, language: &str, namespace: &str, key: &str) -> Option<String> {
        let entry = self
            .inner
            .resources
            .get(&(language.to_string(), namespace.to_string()))?;

        let mut node = entry.value();
        for part in key.split('.') {
            node = node.get(part)?;
        }
        node.as_str().map(str::to_string)
    }

    /// Number of loaded (language, namespace) resources.
    pub fn resource_count(&self) -> usize {
        self.inner.resources.len()
    }

    /// Current backend options, as seen by resource fetches.
    pub fn backend_layout(&self) -> BackendLayout {
        self.inner
            .backend
            .lock()
            .map(|layout| layout.clone())
            .unwrap_or_default()
    }
}

impl StoreInner {
    /// The file for (`language`, `namespace`) in the first directory that
    /// has one. Falls back to the first directory so a missing file is
    /// reported against it.
    fn resource_path(&self, language: &str, namespace: &str) -> Option<PathBuf> {
        let candidates = self
            .locales_dirs
            .iter()
            .map(|dir| dir.join(language).join(format!("{namespace}.json")));

        let mut first = None;
        for path in candidates {
            if path.is_file() {
                return Some(path);
            }
            first.get_or_insert(path);
        }
        first
    }

    fn read(&self, language: &str, namespace: &str) -> Result<Value, ReloadError> {
        let path = self
            .resource_path(language, namespace)
            .ok_or_else(|| ReloadError::Read {
                language: language.to_string(),
                namespace: namespace.to_string(),
                reason: "no locales directory configured".to_string(),
            })?;
        read_resource(&path, language, namespace)
    }

    fn reload(&self, languages: &[String], namespaces: &[String]) -> Result<(), ReloadError> {
        for language in languages {
            for namespace in namespaces {
                let value = self.read(language, namespace)?;
                self.resources
                    .insert((language.clone(), namespace.clone()), value);
            }
        }
        Ok(())
    }
}

fn read_resource(path: &Path, language: &str, namespace: &str) -> Result<Value, ReloadError> {
    let content = std::fs::read_to_string(path).map_err(|e| ReloadError::Read {
        language: language.to_string(),
        namespace: namespace.to_string(),
        reason: e.to_string(),
    })?;

    serde_json::from_str(&content).map_err(|e| ReloadError::Parse {
        language: language.to_string(),
        namespace: namespace.to_string(),
        reason: e.to_string(),
    })
}

impl Localizer for ResourceStore {
    fn namespaces(&self) -> Vec<String> {
        self.inner.namespaces.clone()
    }

    fn language(&self) -> Option<String> {
        self.inner.language.load_full().map(|lng| lng.as_ref().clone())
    }

    fn reload_resources(
        &self,
        languages: Vec<String>,
        namespaces: Vec<String>,
        on_complete: ReloadCallback,
    ) {
        let inner = self.inner.clone();
        let task = move || {
            let outcome = inner.reload(&languages, &namespaces);
            on_complete(outcome.err());
        };

        // Off the runtime (plain threads, sync tests) the reload runs inline.
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn_blocking(task);
            }
            Err(_) => task(),
        }
    }

    fn change_language(&self, language: &str) {
        self.inner
            .language
            .store(Some(Arc::new(language.to_string())));
        tracing::info!(language = %language, "Language changed");
    }

    fn edit_backend(&self, edit: &mut dyn FnMut(&mut BackendLayout)) {
        match self.inner.backend.lock() {
            Ok(mut layout) => edit(&mut *layout),
            Err(poisoned) => edit(&mut *poisoned.into_inner()),
        }
    }
}
