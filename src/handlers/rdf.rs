//! RDF structural elements of RSS 1.0 documents.
//!
//! Only enough RDF to walk an RSS 1.0 feed: the structure carries no data
//! of its own, so every known element is accepted without a write.

use crate::parser::{Element, FeedContext};

use super::{check_vocabulary, NamespaceHandler};

const VOCABULARY: &[&str] = &["RDF", "Seq", "Bag", "Alt", "li"];

#[derive(Debug, Default)]
pub struct RdfHandler;

impl NamespaceHandler for RdfHandler {
    fn start(&mut self, element: &Element, ctx: &mut FeedContext) {
        check_vocabulary(VOCABULARY, element, ctx);
    }

    fn end(&mut self, _element: &Element, _ctx: &mut FeedContext) {}
}
