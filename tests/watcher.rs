//! End-to-end: file edits on disk reach the resource store.

use std::fs;
use std::path::Path;

use locale_hmr::config::{Adapter, HmrConfig, TriggerMode};
use locale_hmr::lifecycle;
use locale_hmr::Localizer;

mod common;
use common::eventually;

fn write(dir: &Path, language: &str, namespace: &str, content: &str) {
    let path = dir.join(language).join(format!("{namespace}.json"));
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn config(dir: &Path, mode: TriggerMode, adapter: Adapter) -> HmrConfig {
    let mut config = HmrConfig::default();
    config.watcher.locales_dirs = vec![dir.to_path_buf()];
    config.watcher.debounce_ms = 50;
    config.watcher.poll_interval_ms = 100;
    config.localization.namespaces = vec!["common".into(), "pages/home".into()];
    config.localization.language = "en".into();
    config.trigger.mode = mode;
    config.trigger.adapter = adapter;
    config
}

fn seed(dir: &Path) {
    write(dir, "en", "common", r#"{"greeting":"Hello"}"#);
    write(dir, "en", "pages/home", r#"{"title":"Home"}"#);
}

#[tokio::test]
async fn test_edit_reloads_through_native_trigger() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path());

    let running = lifecycle::start(&config(dir.path(), TriggerMode::Auto, Adapter::Server)).unwrap();
    assert_eq!(running.registration.kind(), "native");
    assert_eq!(running.store.translate("en", "common", "greeting").as_deref(), Some("Hello"));

    write(dir.path(), "en", "common", r#"{"greeting":"Howdy"}"#);

    let store = running.store.clone();
    assert!(
        eventually(|| store.translate("en", "common", "greeting").as_deref() == Some("Howdy")).await,
        "edited translation was not reloaded"
    );

    running.stop().await;
}

#[tokio::test]
async fn test_nested_edit_reloads_through_plugin_bus() {
    let dir = tempfile::tempdir().unwrap();
    seed(dir.path());

    let running = lifecycle::start(&config(dir.path(), TriggerMode::Plugin, Adapter::Client)).unwrap();
    assert_eq!(running.registration.kind(), "plugin");

    write(dir.path(), "en", "pages/home", r#"{"title":"Start"}"#);

    let store = running.store.clone();
    assert!(
        eventually(|| store.translate("en", "pages/home", "title").as_deref() == Some("Start")).await,
        "nested namespace was not reloaded"
    );
    assert_eq!(store.language().as_deref(), Some("en"));

    let layout = store.backend_layout();
    assert!(layout.direct.unwrap().query_string_params.contains_key("_"));

    running.stop().await;
}

#[tokio::test]
async fn test_startup_fails_without_resources() {
    let dir = tempfile::tempdir().unwrap();

    let result = lifecycle::start(&config(dir.path(), TriggerMode::Auto, Adapter::Server));

    assert!(matches!(result, Err(lifecycle::StartupError::Resources(_))));
}

#[tokio::test]
async fn test_second_locales_dir_is_loaded_and_reloaded() {
    let shared = tempfile::tempdir().unwrap();
    let admin = tempfile::tempdir().unwrap();
    write(shared.path(), "en", "common", r#"{"greeting":"Hello"}"#);
    write(admin.path(), "en", "admin", r#"{"title":"Dashboard"}"#);

    let mut config = config(shared.path(), TriggerMode::Auto, Adapter::Server);
    config.watcher.locales_dirs.push(admin.path().to_path_buf());
    config.localization.namespaces = vec!["common".into(), "admin".into()];

    let running = lifecycle::start(&config).unwrap();
    assert_eq!(running.store.translate("en", "admin", "title").as_deref(), Some("Dashboard"));

    write(admin.path(), "en", "admin", r#"{"title":"Control panel"}"#);

    let store = running.store.clone();
    assert!(
        eventually(|| store.translate("en", "admin", "title").as_deref() == Some("Control panel")).await,
        "edit in the second locales directory was not reloaded"
    );
    assert_eq!(store.translate("en", "common", "greeting").as_deref(), Some("Hello"));

    running.stop().await;
}
