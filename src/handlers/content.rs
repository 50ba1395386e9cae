//! RSS content module (`content:encoded`).

use crate::model::Content;
use crate::parser::{Element, FeedContext, Placement};

use super::{check_vocabulary, unexpected, NamespaceHandler};

const VOCABULARY: &[&str] = &["encoded"];

#[derive(Debug, Default)]
pub struct ContentHandler;

impl NamespaceHandler for ContentHandler {
    fn start(&mut self, element: &Element, ctx: &mut FeedContext) {
        check_vocabulary(VOCABULARY, element, ctx);
    }

    fn end(&mut self, element: &Element, ctx: &mut FeedContext) {
        if element.local_name != "encoded" {
            return;
        }
        match ctx.placement() {
            // Already HTML; stored as is.
            Placement::Entry => {
                ctx.entry.content = Some(Content {
                    text: Some(element.text.clone()),
                    ..Content::default()
                })
            }
            _ => unexpected(element, ctx, "content outside item"),
        }
    }
}
