//! Changed-file identifier parsing.
//!
//! An identifier is a locale-relative path without extension, e.g.
//! `en/common` or `en\nested\common` on Windows hosts. The first segment is
//! the language, everything after it is the namespace.

/// A changed file split into its language and namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedChange {
    pub language: String,
    pub namespace: String,
}

/// Parse a changed file identifier.
///
/// Backslashes are normalized to `/` before splitting on the first `/`, so
/// nested namespaces keep their inner separators. Returns `None` when the
/// identifier has no separator or an empty segment on either side.
pub fn parse_changed_file(identifier: &str) -> Option<ParsedChange> {
    let normalized = identifier.replace('\\', "/");
    let (language, namespace) = normalized.split_once('/')?;

    if language.is_empty() || namespace.is_empty() {
        return None;
    }

    Some(ParsedChange {
        language: language.to_string(),
        namespace: namespace.to_string(),
    })
}
