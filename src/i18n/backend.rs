//! Backend option locations and cache-busting.
//!
//! Backend options are configured either directly on the instance options
//! or on the backend held by the backend connector. Lookups run in order and
//! the first one that resolves wins.

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

/// Query parameter carrying the cache-busting token.
pub const CACHE_BUST_PARAM: &str = "_";

/// Options of a resource-fetching backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendOptions {
    /// Template of the resource location, e.g. `/locales/{{lng}}/{{ns}}.json`.
    pub load_path: Option<String>,

    /// Extra query parameters appended to each resource request.
    pub query_string_params: BTreeMap<String, String>,
}

impl BackendOptions {
    /// Set the cache-busting parameter to `token`.
    pub fn bust_cache(&mut self, token: u128) {
        self.query_string_params
            .insert(CACHE_BUST_PARAM.to_string(), token.to_string());
    }
}

/// Backend instance owned by the connector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectedBackend {
    pub options: BackendOptions,
}

/// Connector that owns the loaded backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendConnector {
    pub backend: Option<ConnectedBackend>,
}

/// Every place backend options can be configured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendLayout {
    /// Options passed directly to the instance.
    pub direct: Option<BackendOptions>,

    /// Options of the backend owned by the connector.
    pub connector: Option<BackendConnector>,
}

/// A single strategy for finding backend options.
pub struct BackendLookup {
    pub name: &'static str,
    pub find: fn(&mut BackendLayout) -> Option<&mut BackendOptions>,
}

fn direct_options(layout: &mut BackendLayout) -> Option<&mut BackendOptions> {
    layout.direct.as_mut()
}

fn connector_options(layout: &mut BackendLayout) -> Option<&mut BackendOptions> {
    layout
        .connector
        .as_mut()
        .and_then(|c| c.backend.as_mut())
        .map(|b| &mut b.options)
}

/// Lookups in priority order.
pub const BACKEND_LOOKUPS: &[BackendLookup] = &[
    BackendLookup {
        name: "direct",
        find: direct_options,
    },
    BackendLookup {
        name: "connector.backend.options",
        find: connector_options,
    },
];

impl BackendLayout {
    /// Resolve the backend options, returning the matching lookup name.
    pub fn resolve(&mut self) -> Option<(&'static str, &mut BackendOptions)> {
        let lookup = BACKEND_LOOKUPS
            .iter()
            .find(|lookup| (lookup.find)(self).is_some())?;
        (lookup.find)(self).map(|options| (lookup.name, options))
    }
}

/// Milliseconds since the UNIX epoch, used as cache-busting token.
pub fn cache_bust_token() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_options_win() {
        let mut layout = BackendLayout {
            direct: Some(BackendOptions::default()),
            connector: Some(BackendConnector {
                backend: Some(ConnectedBackend::default()),
            }),
        };

        let (name, options) = layout.resolve().unwrap();
        assert_eq!(name, "direct");
        options.bust_cache(42);

        assert_eq!(
            layout.direct.unwrap().query_string_params.get(CACHE_BUST_PARAM),
            Some(&"42".to_string())
        );
    }

    #[test]
    fn test_connector_fallback() {
        let mut layout = BackendLayout {
            direct: None,
            connector: Some(BackendConnector {
                backend: Some(ConnectedBackend::default()),
            }),
        };

        let (name, _) = layout.resolve().unwrap();
        assert_eq!(name, "connector.backend.options");
    }

    #[test]
    fn test_nothing_resolves() {
        let mut layout = BackendLayout {
            direct: None,
            connector: Some(BackendConnector { backend: None }),
        };
        assert!(layout.resolve().is_none());
        assert!(BackendLayout::default().resolve().is_none());
    }

    #[test]
    fn test_token_is_monotonic_enough() {
        let first = cache_bust_token();
        let second = cache_bust_token();
        assert!(first > 0);
        assert!(second >= first);
    }
}
