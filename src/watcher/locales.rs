//! Watcher over translation directories.

use std::path::{Path, PathBuf};
use std::time::Duration;

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::watcher::WatchError;

/// Map a changed path to its `<lng>/<ns>` identifier.
///
/// The identifier is the path relative to `locales_dir` with its extension
/// removed. Returns `None` for paths outside the directory or with an
/// extension not listed in `extensions`.
pub fn changed_file_identifier(
    locales_dir: &Path,
    path: &Path,
    extensions: &[String],
) -> Option<String> {
    let extension = path.extension()?.to_str()?;
    if !extensions
        .iter()
        .any(|ext| ext.trim_start_matches('.') == extension)
    {
        return None;
    }

    let relative = path.strip_prefix(locales_dir).ok()?;
    let identifier = relative.with_extension("");
    let identifier = identifier.to_str()?;
    if identifier.is_empty() {
        return None;
    }
    Some(identifier.to_string())
}

/// A watcher that reports changed translation files.
pub struct LocalesWatcher {
    dirs: Vec<PathBuf>,
    extensions: Vec<String>,
    poll_interval: Duration,
    changes_tx: mpsc::UnboundedSender<Vec<String>>,
}

impl LocalesWatcher {
    /// Create a new LocalesWatcher.
    ///
    /// Returns the watcher and a receiver for batches of changed identifiers.
    /// Directories are canonicalized so they match the paths notify reports.
    pub fn new(
        dirs: &[PathBuf],
        extensions: &[String],
        poll_interval: Duration,
    ) -> Result<(Self, mpsc::UnboundedReceiver<Vec<String>>), WatchError> {
        let dirs = dirs
            .iter()
            .map(|dir| dir.canonicalize().map_err(|e| WatchError::Directory(dir.clone(), e)))
            .collect::<Result<Vec<_>, _>>()?;
        let (changes_tx, changes_rx) = mpsc::unbounded_channel();

        Ok((
            Self {
                dirs,
                extensions: extensions.to_vec(),
                poll_interval,
                changes_tx,
            },
            changes_rx,
        ))
    }

    /// Start watching in a background thread.
    ///
    /// Watching stops when the returned watcher is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, WatchError> {
        let tx = self.changes_tx.clone();
        let dirs = self.dirs.clone();
        let extensions = self.extensions.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if !(event.kind.is_modify() || event.kind.is_create() || event.kind.is_remove()) {
                        return;
                    }
                    let changed: Vec<String> = event
                        .paths
                        .iter()
                        .filter_map(|path| {
                            dirs.iter()
                                .find_map(|dir| changed_file_identifier(dir, path, &extensions))
                        })
                        .collect();
                    if !changed.is_empty() {
                        tracing::debug!(files = ?changed, "Translation files changed");
                        let _ = tx.send(changed);
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(self.poll_interval),
        )?;

        for dir in &self.dirs {
            watcher.watch(dir, RecursiveMode::Recursive)?;
            tracing::info!(path = ?dir, "Locales watcher started");
        }
        Ok(watcher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json() -> Vec<String> {
        vec!["json".to_string()]
    }

    #[test]
    fn test_identifier_from_path() {
        let dir = Path::new("/app/locales");
        assert_eq!(
            changed_file_identifier(dir, &dir.join("en").join("common.json"), &json()).as_deref(),
            Some(Path::new("en").join("common").to_str().unwrap())
        );
    }

    #[test]
    fn test_nested_identifier() {
        let dir = Path::new("/app/locales");
        let path = dir.join("en").join("nested").join("name-space.json");
        let expected = Path::new("en").join("nested").join("name-space");
        assert_eq!(
            changed_file_identifier(dir, &path, &json()).as_deref(),
            expected.to_str()
        );
    }

    #[test]
    fn test_extension_filtering() {
        let dir = Path::new("/app/locales");
        let path = dir.join("en").join("common.yaml");
        assert_eq!(changed_file_identifier(dir, &path, &json()), None);
        assert!(changed_file_identifier(dir, &path, &[".yaml".to_string()]).is_some());
        assert_eq!(changed_file_identifier(dir, &dir.join("en").join("README"), &json()), None);
    }

    #[test]
    fn test_outside_locales_dir() {
        let dir = Path::new("/app/locales");
        let path = Path::new("/app/src/en/common.json");
        assert_eq!(changed_file_identifier(dir, path, &json()), None);
    }

    #[test]
    fn test_missing_directory() {
        let result = LocalesWatcher::new(
            &[PathBuf::from("definitely/not/here")],
            &json(),
            Duration::from_secs(1),
        );
        assert!(matches!(result, Err(WatchError::Directory(..))));
    }
}
