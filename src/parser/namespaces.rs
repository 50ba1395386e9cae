//! Namespace URI to prefix table.
//!
//! Prefixes here are the parser's own, not the document's: a feed that
//! binds Atom to `a:` still has its elements dispatched under `atom`.

use std::collections::HashMap;
use thiserror::Error;

use super::diagnostics::Diagnostic;
use super::events::ExpandedName;

/// Prefix given to elements whose namespace is not registered.
pub const UNKNOWN_PREFIX: &str = "unknown";

/// Well-known namespace URIs.
pub mod uri {
    pub const ATOM: &str = "http://www.w3.org/2005/Atom";
    pub const DC: &str = "http://purl.org/dc/elements/1.1/";
    pub const FEEDBURNER: &str = "http://rssnamespace.org/feedburner/ext/1.0";
    pub const MEDIA: &str = "http://search.yahoo.com/mrss/";
    pub const MEDIA_NO_SLASH: &str = "http://search.yahoo.com/mrss";
    pub const ITUNES: &str = "http://www.itunes.com/dtds/podcast-1.0.dtd";
    pub const ITUNES_UPPER: &str = "http://www.itunes.com/DTDs/Podcast-1.0.dtd";
    pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
    pub const RSS10: &str = "http://purl.org/rss/1.0/";
    pub const SYN: &str = "http://purl.org/rss/1.0/modules/syndication/";
    pub const CONTENT: &str = "http://purl.org/rss/1.0/modules/content/";
    pub const XHTML: &str = "http://www.w3.org/1999/xhtml";
}

/// Seed mappings. The empty URI stands for "unqualified RSS 2.0/0.9x".
const DEFAULT_NAMESPACES: &[(&str, &str)] = &[
    (uri::ATOM, "atom"),
    (uri::DC, "dc"),
    (uri::FEEDBURNER, "feedburner"),
    (uri::MEDIA, "media"),
    (uri::MEDIA_NO_SLASH, "media"),
    (uri::ITUNES, "itunes"),
    (uri::ITUNES_UPPER, "itunes"),
    (uri::RDF, "rdf"),
    (uri::RSS10, "rss10"),
    (uri::SYN, "syn"),
    (uri::CONTENT, "content"),
    (uri::XHTML, "xhtml"),
    ("", "rss20"),
];

/// Errors from [`NamespaceTable::register`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegisterError {
    /// The URI already has a prefix; existing mappings are never replaced.
    #[error("{uri} already added as {prefix}")]
    AlreadyRegistered { uri: String, prefix: String },

    /// Prefixes must be non-empty and usable in extension keys.
    #[error("invalid prefix {0:?}")]
    InvalidPrefix(String),
}

/// How an element name resolved against the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedName {
    pub prefix: String,
    pub local_name: String,
}

/// Process-wide URI to prefix mapping, seeded with the built-in namespaces.
///
/// Several URIs may share one prefix (Media RSS with and without the
/// trailing slash). A URI, once mapped, keeps its prefix.
#[derive(Debug, Clone)]
pub struct NamespaceTable {
    prefixes: HashMap<String, String>,
}

impl Default for NamespaceTable {
    fn default() -> Self {
        Self::new()
    }
}

impl NamespaceTable {
    pub fn new() -> Self {
        let prefixes = DEFAULT_NAMESPACES
            .iter()
            .map(|(uri, prefix)| (uri.to_string(), prefix.to_string()))
            .collect();
        Self { prefixes }
    }

    pub fn prefix_for(&self, uri: &str) -> Option<&str> {
        self.prefixes.get(uri).map(String::as_str)
    }

    /// Whether any URI already maps to `prefix`.
    pub fn is_prefix_claimed(&self, prefix: &str) -> bool {
        self.prefixes.values().any(|p| p == prefix)
    }

    /// Maps `uri` to `prefix`.
    pub fn register(&mut self, uri: &str, prefix: &str) -> Result<(), RegisterError> {
        if !is_valid_prefix(prefix) {
            return Err(RegisterError::InvalidPrefix(prefix.to_string()));
        }
        if let Some(existing) = self.prefixes.get(uri) {
            return Err(RegisterError::AlreadyRegistered {
                uri: uri.to_string(),
                prefix: existing.clone(),
            });
        }
        self.prefixes.insert(uri.to_string(), prefix.to_string());
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.prefixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prefixes.is_empty()
    }

    /// Resolves an element name to its prefix.
    ///
    /// Unqualified names take `default_prefix`, the document's dialect as
    /// decided from its root element, or [`UNKNOWN_PREFIX`] when the root
    /// named no dialect. Unregistered namespaces resolve to
    /// [`UNKNOWN_PREFIX`] together with a diagnostic.
    pub fn resolve(
        &self,
        name: &ExpandedName,
        default_prefix: Option<&str>,
    ) -> (ResolvedName, Option<Diagnostic>) {
        let (prefix, diagnostic) = match name.namespace.as_deref() {
            Some(ns) => match self.prefix_for(ns) {
                Some(prefix) => (prefix.to_string(), None),
                None => (
                    UNKNOWN_PREFIX.to_string(),
                    Some(Diagnostic::UnknownNamespace {
                        uri: ns.to_string(),
                    }),
                ),
            },
            None => (default_prefix.unwrap_or(UNKNOWN_PREFIX).to_string(), None),
        };

        (
            ResolvedName {
                prefix,
                local_name: name.local_name.clone(),
            },
            diagnostic,
        )
    }
}

/// Prefixes end up in `{prefix}-{localName}` keys, so keep them simple.
/// The sentinel is reserved for unresolved names.
fn is_valid_prefix(prefix: &str) -> bool {
    !prefix.is_empty()
        && prefix != UNKNOWN_PREFIX
        && prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}
