//! RSS 1.0 Syndication module: update schedule hints.

use crate::model::ExtensionValue;
use crate::parser::{Element, FeedContext};

use super::{check_vocabulary, unexpected, NamespaceHandler};

const VOCABULARY: &[&str] = &["updateBase", "updateFrequency", "updatePeriod"];

#[derive(Debug, Default)]
pub struct SyndicationHandler;

impl NamespaceHandler for SyndicationHandler {
    fn start(&mut self, element: &Element, ctx: &mut FeedContext) {
        check_vocabulary(VOCABULARY, element, ctx);
    }

    fn end(&mut self, element: &Element, ctx: &mut FeedContext) {
        if !VOCABULARY.contains(&element.local_name.as_str()) {
            return;
        }
        // Schedule hints describe the feed, wherever they appear.
        if ctx.in_feed {
            ctx.feed
                .extensions
                .insert(element.key.clone(), ExtensionValue::from(element.text.as_str()));
        } else {
            unexpected(element, ctx, "outside feed");
        }
    }
}
