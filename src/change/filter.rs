//! Loaded-namespace filtering.

/// Decides whether a namespace is currently loaded.
///
/// Holds the configured namespaces in their original order. Matching is exact
/// string equality on the full, possibly nested, namespace.
#[derive(Debug, Clone, Default)]
pub struct NamespaceFilter {
    namespaces: Vec<String>,
}

impl NamespaceFilter {
    /// Build a filter from the configured namespace list.
    pub fn new<I, S>(namespaces: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut unique: Vec<String> = Vec::new();
        for ns in namespaces {
            let ns = ns.into();
            if !unique.contains(&ns) {
                unique.push(ns);
            }
        }
        Self { namespaces: unique }
    }

    /// Returns true if `namespace` is one of the loaded namespaces.
    pub fn is_loaded(&self, namespace: &str) -> bool {
        self.namespaces.iter().any(|ns| ns == namespace)
    }

    pub fn namespaces(&self) -> &[String] {
        &self.namespaces
    }
}
