use thiserror::Error;

/// A tolerated, non-fatal condition observed while normalizing a feed.
///
/// Diagnostics never change control flow: the parse keeps going and the
/// offending field write (if any) is skipped. They are logged through
/// `tracing` as they happen and collected in order on the parse result.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    /// An element or declaration used a namespace URI the table does not know.
    #[error("namespace {uri} not defined")]
    UnknownNamespace { uri: String },

    /// The namespace is known but no handler exists for its prefix.
    #[error("no namespace handler for prefix {prefix}")]
    NoHandler {
        prefix: String,
        element: Option<String>,
    },

    /// An element inside a handled namespace that the handler does not know.
    #[error("{prefix}:{element} not handled")]
    UnhandledElement { prefix: String, element: String },

    /// A known element appeared outside the container or level it belongs to.
    #[error("{element} ignored: {reason}")]
    UnexpectedNesting {
        element: String,
        reason: &'static str,
    },

    /// A date that could not be normalized; the raw value is still kept.
    #[error("{element}: unparseable date {value:?}")]
    UnparseableDate { element: String, value: String },

    /// A required attribute was missing or empty; the write was skipped.
    #[error("{element}: missing attribute {attribute}")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },

    /// A namespace URI was registered twice; the first mapping is kept.
    #[error("{uri} already added as {prefix}")]
    NamespaceAlreadyRegistered { uri: String, prefix: String },

    /// A prefix could not be used for a namespace registration.
    #[error("invalid prefix {prefix:?} for namespace {uri}")]
    InvalidPrefix { uri: String, prefix: String },

    /// The root `rss` element declared a version treated as unsupported.
    #[error("unsupported RSS variant {version}")]
    UnsupportedRssVersion { version: String },

    /// Atom text construct of type `xhtml`; the raw text is passed through.
    #[error("{element} contains real XHTML content")]
    XhtmlContent { element: String },

    /// A `media:content` inside a group had no URL and one was borrowed.
    #[error("guessing the media:content href as {url}")]
    GuessedMediaUrl { url: String },
}

impl Diagnostic {
    /// Whether this points at questionable content rather than merely
    /// vocabulary the parser does not cover.
    pub fn is_warning(&self) -> bool {
        !matches!(
            self,
            Self::UnknownNamespace { .. } | Self::NoHandler { .. } | Self::UnhandledElement { .. }
        )
    }

    pub(crate) fn emit(&self) {
        if self.is_warning() {
            tracing::warn!(diagnostic = %self, "Feed normalization warning");
        } else {
            tracing::debug!(diagnostic = %self, "Feed vocabulary skipped");
        }
    }
}
