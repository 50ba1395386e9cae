//! RSS 1.0 (RDF Site Summary) core vocabulary.

use crate::model::{ExtensionValue, Image, Link, TextInput};
use crate::parser::namespaces::uri;
use crate::parser::{Element, FeedContext, Placement};

use super::{check_vocabulary, unexpected, NamespaceHandler};

const VOCABULARY: &[&str] = &[
    "channel",
    "item",
    "image",
    "textinput",
    "description",
    "items",
    "link",
    "name",
    "title",
    "url",
];

/// In RSS 1.0 the channel only references its image and text input; the
/// blocks themselves are siblings of the channel.
#[derive(Debug, Default)]
enum Container {
    #[default]
    Closed,
    Image(Image),
    TextInput(TextInput),
}

#[derive(Debug, Default)]
pub struct Rss10Handler {
    container: Container,
}

impl NamespaceHandler for Rss10Handler {
    fn start(&mut self, element: &Element, ctx: &mut FeedContext) {
        let about = || element.attributes.get_ns(uri::RDF, "about").filter(|a| !a.is_empty());
        match element.local_name.as_str() {
            "channel" => {
                if let Some(about) = about() {
                    ctx.feed.id = Some(about.to_string());
                }
                ctx.in_feed = true;
            }
            "item" => {
                if let Some(about) = about() {
                    ctx.entry.id = Some(about.to_string());
                }
                ctx.in_entry = true;
            }
            // Inside the channel these are `rdf:resource` references only.
            "image" if ctx.placement() == Placement::Outside => {
                self.container = Container::Image(Image::default())
            }
            "textinput" if ctx.placement() == Placement::Outside => {
                self.container = Container::TextInput(TextInput::default())
            }
            _ => check_vocabulary(VOCABULARY, element, ctx),
        }
    }

    fn end(&mut self, element: &Element, ctx: &mut FeedContext) {
        let text = || Some(element.text.clone());
        let closes_block = matches!(
            (&self.container, element.local_name.as_str()),
            (Container::Image(_), "image") | (Container::TextInput(_), "textinput")
        );
        if closes_block {
            let value = match std::mem::take(&mut self.container) {
                Container::Image(image) => ExtensionValue::Image(image),
                Container::TextInput(input) => ExtensionValue::TextInput(input),
                Container::Closed => return,
            };
            ctx.container_target()
                .extensions
                .insert(element.key.clone(), value);
            return;
        }

        match (&mut self.container, element.local_name.as_str()) {
            (_, "channel") => ctx.in_feed = false,
            (_, "item") => ctx.in_entry = false,
            (_, "items") => {}

            (Container::Image(image), "title") => image.title = text(),
            (Container::Image(image), "link") => image.link = text(),
            (Container::Image(image), "url") => image.url = text(),
            (Container::TextInput(input), "title") => input.title = text(),
            (Container::TextInput(input), "link") => input.link = text(),
            (Container::TextInput(input), "description") => input.description = text(),
            (Container::TextInput(input), "name") => input.name = text(),

            (_, "image" | "textinput") => {}
            (_, "url" | "name") => unexpected(element, ctx, "outside its block"),

            (_, "title") => match ctx.current() {
                Some(target) => target.title = text(),
                None => unexpected(element, ctx, "outside channel or item"),
            },
            (_, "link") => match ctx.current() {
                Some(target) => target.push_link(Link::alternate(element.text.clone())),
                None => unexpected(element, ctx, "outside channel or item"),
            },
            (_, "description") => match ctx.placement() {
                Placement::Entry => ctx.entry.summary = text(),
                Placement::Feed => ctx.feed.subtitle = text(),
                Placement::Outside => unexpected(element, ctx, "outside channel or item"),
            },
            _ => {}
        }
    }
}
