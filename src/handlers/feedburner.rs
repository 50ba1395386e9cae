//! FeedBurner extensions.

use crate::model::{ExtensionValue, FeedFlare};
use crate::parser::{Element, FeedContext, Placement};

use super::{check_vocabulary, missing_attribute, NamespaceHandler};

const VOCABULARY: &[&str] = &[
    "browserFriendly",
    "feedFlare",
    "info",
    "origEnclosureLink",
    "origLink",
];

#[derive(Debug, Default)]
pub struct FeedburnerHandler;

impl NamespaceHandler for FeedburnerHandler {
    fn start(&mut self, element: &Element, ctx: &mut FeedContext) {
        check_vocabulary(VOCABULARY, element, ctx);
    }

    fn end(&mut self, element: &Element, ctx: &mut FeedContext) {
        let placement = ctx.placement();
        match (element.local_name.as_str(), placement) {
            ("origLink" | "origEnclosureLink", Placement::Entry) => {
                ctx.entry.extensions.insert(
                    element.key.clone(),
                    ExtensionValue::from(element.text.as_str()),
                );
            }
            ("browserFriendly", Placement::Feed) => {
                ctx.feed.extensions.insert(
                    element.key.clone(),
                    ExtensionValue::from(element.text.as_str()),
                );
            }
            ("feedFlare", Placement::Feed) => {
                let flare = FeedFlare {
                    href: element.attr("href"),
                    src: element.attr("src"),
                    text: element.text.clone(),
                };
                ctx.feed
                    .extensions
                    .push("feedburner-feedFlares", ExtensionValue::FeedFlare(flare));
            }
            ("info", Placement::Feed) => match element.attr("uri") {
                Some(uri) => ctx
                    .feed
                    .extensions
                    .insert(element.key.clone(), ExtensionValue::Text(uri)),
                None => missing_attribute(element, ctx, "uri"),
            },
            _ => {}
        }
    }
}
