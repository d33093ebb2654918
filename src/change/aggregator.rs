//! Batch aggregation of changed files.

use crate::change::filter::NamespaceFilter;
use crate::change::path::parse_changed_file;

/// Languages and namespaces affected by one change notification.
///
/// Both lists are non-empty and keep first-seen order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatedBatch {
    pub languages: Vec<String>,
    pub namespaces: Vec<String>,
}

impl AggregatedBatch {
    pub fn contains_language(&self, language: &str) -> bool {
        self.languages.iter().any(|lng| lng == language)
    }
}

/// Aggregate the changed files of one notification.
///
/// Identifiers that fail to parse, or whose namespace is not loaded, are
/// skipped. Returns `None` when nothing relevant is left.
pub fn aggregate<S: AsRef<str>>(
    changed_files: &[S],
    filter: &NamespaceFilter,
) -> Option<AggregatedBatch> {
    let mut languages: Vec<String> = Vec::new();
    let mut namespaces: Vec<String> = Vec::new();

    for change in changed_files
        .iter()
        .filter_map(|file| parse_changed_file(file.as_ref()))
        .filter(|change| filter.is_loaded(&change.namespace))
    {
        if !languages.contains(&change.language) {
            languages.push(change.language);
        }
        if !namespaces.contains(&change.namespace) {
            namespaces.push(change.namespace);
        }
    }

    if languages.is_empty() || namespaces.is_empty() {
        return None;
    }

    Some(AggregatedBatch {
        languages,
        namespaces,
    })
}
