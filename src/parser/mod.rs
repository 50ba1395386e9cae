//! Streaming, namespace-dispatching feed parser.
//!
//! The document is read as a stream of namespace-resolved events. Each
//! element is routed by its namespace prefix to a [`NamespaceHandler`],
//! which writes into the shared [`FeedContext`]. No tree is built.
//!
//! [`NamespaceHandler`]: crate::handlers::NamespaceHandler

mod context;
mod diagnostics;
mod dispatcher;
mod element;
mod events;
pub mod namespaces;
mod registry;

use std::collections::HashMap;
use std::io::BufRead;
use thiserror::Error;

use crate::config::Config;
use crate::handlers::HandlerFactory;
use crate::model::Feed;

pub use context::{FeedContext, Placement};
pub use diagnostics::Diagnostic;
pub use dispatcher::Dispatcher;
pub use element::{Attribute, Attributes, Element, ElementStack};
pub use events::{EventSource, ExpandedName, XmlEvent};
pub use namespaces::{NamespaceTable, RegisterError, UNKNOWN_PREFIX};
pub use registry::HandlerRegistry;

/// Default cap on element nesting.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Fatal parse failures.
///
/// Everything content-related (unknown elements, bad dates, missing
/// attributes) is a [`Diagnostic`] instead; only a document that cannot be
/// read as XML ends the parse.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The XML was malformed or could not be read.
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// The input contained no element at all.
    #[error("document has no root element")]
    NoRootElement,

    /// The input ended while elements were still open.
    #[error("document ended with {0} unclosed element(s)")]
    UnclosedElements(usize),

    /// A closing tag did not match the innermost open element.
    #[error("closing tag {found} does not match open element {expected}")]
    MismatchedEnd { expected: String, found: String },

    /// A closing tag arrived with no element open.
    #[error("closing tag {0} without a matching open element")]
    UnbalancedEnd(String),

    /// Nesting exceeded the configured limit.
    #[error("element nesting exceeds maximum of {0} levels")]
    MaxDepthExceeded(usize),
}

/// A finished parse together with everything that was tolerated on the way.
#[derive(Debug, Clone)]
pub struct Parsed {
    pub feed: Feed,
    pub diagnostics: Vec<Diagnostic>,
}

/// Reusable parser configuration: namespace table, extra handlers and
/// limits. Each parse gets fresh handler instances and context.
#[derive(Debug, Clone)]
pub struct FeedParser {
    namespaces: NamespaceTable,
    handlers: HashMap<String, HandlerFactory>,
    max_depth: usize,
}

impl Default for FeedParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedParser {
    pub fn new() -> Self {
        Self {
            namespaces: NamespaceTable::new(),
            handlers: HashMap::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Applies `max_depth` and the extra namespace mappings from a config.
    /// Mappings that cannot be registered are skipped with a warning.
    pub fn from_config(config: &Config) -> Self {
        let mut parser = Self::new().with_max_depth(config.max_depth);
        for (uri, prefix) in &config.namespaces {
            parser.register_namespace(uri, prefix);
        }
        parser
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    pub fn namespaces(&self) -> &NamespaceTable {
        &self.namespaces
    }

    /// Maps a namespace URI to a prefix for future parses.
    ///
    /// Returns `false` (and logs) if the URI already has a prefix or the
    /// prefix is unusable; existing mappings are never replaced.
    pub fn register_namespace(&mut self, uri: &str, prefix: &str) -> bool {
        let diagnostic = match self.namespaces.register(uri, prefix) {
            Ok(()) => return true,
            Err(RegisterError::AlreadyRegistered { uri, prefix }) => {
                Diagnostic::NamespaceAlreadyRegistered { uri, prefix }
            }
            Err(RegisterError::InvalidPrefix(prefix)) => Diagnostic::InvalidPrefix {
                uri: uri.to_string(),
                prefix,
            },
        };
        diagnostic.emit();
        false
    }

    /// Adds support for a namespace: maps `uri` to `prefix` and routes that
    /// prefix to handlers built by `factory`.
    ///
    /// The factory is installed even when the URI was already mapped, so a
    /// built-in handler can be replaced. The return value reports whether
    /// the URI mapping was added.
    pub fn register_handler(&mut self, uri: &str, prefix: &str, factory: HandlerFactory) -> bool {
        let registered = self.register_namespace(uri, prefix);
        self.handlers.insert(prefix.to_string(), factory);
        registered
    }

    /// A fresh dispatcher for driving a parse event by event.
    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::new(self.namespaces.clone(), self.handlers.clone(), self.max_depth)
    }

    pub fn parse(&self, bytes: &[u8]) -> Result<Feed, ParseError> {
        self.parse_reader(bytes)
    }

    pub fn parse_str(&self, xml: &str) -> Result<Feed, ParseError> {
        self.parse(xml.as_bytes())
    }

    pub fn parse_reader<R: BufRead>(&self, reader: R) -> Result<Feed, ParseError> {
        self.parse_with_diagnostics(reader).map(|parsed| parsed.feed)
    }

    /// Parses a document, keeping the diagnostics alongside the feed.
    pub fn parse_with_diagnostics<R: BufRead>(&self, reader: R) -> Result<Parsed, ParseError> {
        let mut source = EventSource::new(reader);
        let mut dispatcher = self.dispatcher();
        while let Some(event) = source.next_event()? {
            dispatcher.handle(event)?;
        }
        let parsed = dispatcher.finish()?;
        tracing::debug!(
            entries = parsed.feed.entries().len(),
            diagnostics = parsed.diagnostics.len(),
            "Parsed feed"
        );
        Ok(parsed)
    }
}

/// Parses a feed document with the default configuration.
///
/// ```
/// let feed = feednorm::parse(br#"<rss version="2.0"><channel><title>T</title></channel></rss>"#)?;
/// assert_eq!(feed.title.as_deref(), Some("T"));
/// # Ok::<(), feednorm::ParseError>(())
/// ```
pub fn parse(bytes: &[u8]) -> Result<Feed, ParseError> {
    FeedParser::new().parse(bytes)
}
