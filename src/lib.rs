//! Normalizes RSS 0.9x/2.0, RSS 1.0 (RDF) and Atom feeds into one
//! Atom-shaped model.
//!
//! Parsing is a single streaming pass. Every element is routed by its
//! namespace to a handler that knows that vocabulary, so extension
//! namespaces (Dublin Core, Yahoo Media RSS, iTunes, FeedBurner, ...) are
//! understood wherever they appear, and new ones can be plugged in with
//! [`FeedParser::register_handler`].
//!
//! ```
//! let xml = br#"<?xml version="1.0"?>
//! <rss version="2.0">
//!   <channel>
//!     <title>Example</title>
//!     <item><title>First</title><guid>urn:1</guid></item>
//!   </channel>
//! </rss>"#;
//!
//! let feed = feednorm::parse(xml)?;
//! assert_eq!(feed.title.as_deref(), Some("Example"));
//! assert_eq!(feed.entries()[0].id.as_deref(), Some("urn:1"));
//! # Ok::<(), feednorm::ParseError>(())
//! ```

pub mod config;
pub mod handlers;
pub mod model;
pub mod parser;
pub mod util;

pub use config::{Config, ConfigError};
pub use handlers::{HandlerFactory, NamespaceHandler};
pub use model::{
    Author, Category, Content, Entry, ExtensionValue, Extensions, Feed, Generator, Link, Metadata,
};
pub use parser::{parse, Diagnostic, FeedParser, ParseError, Parsed};
