//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::io::Write;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use locale_hmr::i18n::backend::{BackendConnector, BackendLayout, BackendOptions, ConnectedBackend};
use locale_hmr::i18n::{Localizer, ReloadCallback, ReloadError};
use tracing_subscriber::fmt::MakeWriter;

/// A localizer recording every call, completing reloads synchronously.
#[derive(Default)]
pub struct MockLocalizer {
    pub namespaces: Mutex<Vec<String>>,
    pub language: Mutex<Option<String>>,
    pub reload_error: Mutex<Option<ReloadError>>,
    pub backend: Mutex<BackendLayout>,
    pub reload_calls: Mutex<Vec<(Vec<String>, Vec<String>)>>,
    pub language_changes: Mutex<Vec<String>>,
}

impl MockLocalizer {
    pub fn new(namespaces: &[&str], language: Option<&str>) -> Arc<Self> {
        Arc::new(Self {
            namespaces: Mutex::new(namespaces.iter().map(|ns| ns.to_string()).collect()),
            language: Mutex::new(language.map(str::to_string)),
            ..Default::default()
        })
    }

    pub fn with_direct_backend(self: Arc<Self>) -> Arc<Self> {
        self.backend.lock().unwrap().direct = Some(BackendOptions::default());
        self
    }

    pub fn with_connector_backend(self: Arc<Self>) -> Arc<Self> {
        self.backend.lock().unwrap().connector = Some(BackendConnector {
            backend: Some(ConnectedBackend::default()),
        });
        self
    }

    pub fn fail_reloads_with(&self, reason: &str) {
        *self.reload_error.lock().unwrap() = Some(ReloadError::Backend(reason.to_string()));
    }

    pub fn reload_calls(&self) -> Vec<(Vec<String>, Vec<String>)> {
        self.reload_calls.lock().unwrap().clone()
    }

    pub fn language_changes(&self) -> Vec<String> {
        self.language_changes.lock().unwrap().clone()
    }
}

impl Localizer for MockLocalizer {
    fn namespaces(&self) -> Vec<String> {
        self.namespaces.lock().unwrap().clone()
    }

    fn language(&self) -> Option<String> {
        self.language.lock().unwrap().clone()
    }

    fn reload_resources(
        &self,
        languages: Vec<String>,
        namespaces: Vec<String>,
        on_complete: ReloadCallback,
    ) {
        self.reload_calls.lock().unwrap().push((languages, namespaces));
        let error = self.reload_error.lock().unwrap().clone();
        on_complete(error);
    }

    fn change_language(&self, language: &str) {
        self.language_changes.lock().unwrap().push(language.to_string());
    }

    fn edit_backend(&self, edit: &mut dyn FnMut(&mut BackendLayout)) {
        let mut layout = self.backend.lock().unwrap();
        edit(&mut *layout);
    }
}

/// Log output captured from the thread-local subscriber.
#[derive(Clone, Default)]
pub struct LogCapture(Arc<Mutex<Vec<u8>>>);

impl LogCapture {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    /// True if a line at `level` (e.g. "ERROR") contains `needle`.
    pub fn has(&self, level: &str, needle: &str) -> bool {
        self.contents()
            .lines()
            .any(|line| line.contains(level) && line.contains(needle))
    }

    pub fn mentions(&self, needle: &str) -> bool {
        self.contents().contains(needle)
    }
}

impl Write for LogCapture {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogCapture {
    type Writer = LogCapture;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Capture logs emitted on this thread until the guard is dropped.
pub fn capture_logs() -> (LogCapture, tracing::subscriber::DefaultGuard) {
    let capture = LogCapture::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(capture.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();
    let guard = tracing::subscriber::set_default(subscriber);
    (capture, guard)
}

/// Poll `condition` until it holds or two seconds pass.
pub async fn eventually<F: Fn() -> bool>(condition: F) -> bool {
    for _ in 0..200 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}

/// Give spawned listener tasks a chance to run.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}
