//! Namespace handlers: one per supported vocabulary.
//!
//! A handler sees every element of its namespace at both edges and decides
//! where the data goes. Handlers are instantiated lazily, once per parse,
//! so any state they carry (open containers, person constructs) lives
//! exactly as long as one document.

mod atom;
mod content;
mod dc;
mod feedburner;
mod itunes;
mod media;
mod rdf;
mod rss10;
mod rss20;
mod syn;

pub use atom::AtomHandler;
pub use content::ContentHandler;
pub use dc::DublinCoreHandler;
pub use feedburner::FeedburnerHandler;
pub use itunes::ItunesHandler;
pub use media::MediaHandler;
pub use rdf::RdfHandler;
pub use rss10::Rss10Handler;
pub use rss20::Rss20Handler;
pub use syn::SyndicationHandler;

use crate::model::ExtensionValue;
use crate::parser::{Diagnostic, Element, FeedContext};
use crate::util::normalize_date;

/// Reacts to the start and end of elements in one namespace.
///
/// `start` sees the element's attributes; `end` additionally sees its
/// trimmed text. Neither edge may fail: problems are recorded with
/// [`FeedContext::diagnose`] and the element is skipped.
pub trait NamespaceHandler {
    fn start(&mut self, element: &Element, ctx: &mut FeedContext);
    fn end(&mut self, element: &Element, ctx: &mut FeedContext);
}

/// Builds a fresh handler for one parse.
pub type HandlerFactory = fn() -> Box<dyn NamespaceHandler>;

fn boxed<H: NamespaceHandler + Default + 'static>() -> Box<dyn NamespaceHandler> {
    Box::new(H::default())
}

/// Prefixes with a built-in handler.
pub const BUILTIN_PREFIXES: &[&str] = &[
    "atom",
    "content",
    "dc",
    "feedburner",
    "itunes",
    "media",
    "rdf",
    "rss10",
    "rss20",
    "syn",
];

/// Factory for a built-in prefix.
pub fn builtin(prefix: &str) -> Option<HandlerFactory> {
    let factory: HandlerFactory = match prefix {
        "atom" => boxed::<AtomHandler>,
        "content" => boxed::<ContentHandler>,
        "dc" => boxed::<DublinCoreHandler>,
        "feedburner" => boxed::<FeedburnerHandler>,
        "itunes" => boxed::<ItunesHandler>,
        "media" => boxed::<MediaHandler>,
        "rdf" => boxed::<RdfHandler>,
        "rss10" => boxed::<Rss10Handler>,
        "rss20" => boxed::<Rss20Handler>,
        "syn" => boxed::<SyndicationHandler>,
        _ => return None,
    };
    Some(factory)
}

// ============================================================================
// Shared Helpers
// ============================================================================

/// Reports elements outside a handler's vocabulary at their start edge.
pub(crate) fn check_vocabulary(vocabulary: &[&str], element: &Element, ctx: &mut FeedContext) {
    if !vocabulary.contains(&element.local_name.as_str()) {
        ctx.diagnose(Diagnostic::UnhandledElement {
            prefix: element.prefix.clone(),
            element: element.local_name.clone(),
        });
    }
}

pub(crate) fn unexpected(element: &Element, ctx: &mut FeedContext, reason: &'static str) {
    ctx.diagnose(Diagnostic::UnexpectedNesting {
        element: element.key.clone(),
        reason,
    });
}

pub(crate) fn missing_attribute(element: &Element, ctx: &mut FeedContext, attribute: &'static str) {
    ctx.diagnose(Diagnostic::MissingAttribute {
        element: element.key.clone(),
        attribute,
    });
}

/// Stores the element's text under its key on the current entry or feed.
pub(crate) fn store_text(element: &Element, ctx: &mut FeedContext) {
    match ctx.current() {
        Some(target) => target
            .extensions
            .insert(element.key.clone(), ExtensionValue::from(element.text.as_str())),
        None => unexpected(element, ctx, "outside feed"),
    }
}

/// Normalizes a date, reporting it when it cannot be parsed.
pub(crate) fn parse_date_text(element: &Element, ctx: &mut FeedContext) -> Option<String> {
    let normalized = normalize_date(&element.text);
    if normalized.is_none() {
        ctx.diagnose(Diagnostic::UnparseableDate {
            element: element.key.clone(),
            value: element.text.clone(),
        });
    }
    normalized
}
