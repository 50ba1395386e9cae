//! Unqualified RSS 2.0 and 0.9x elements.

use crate::model::{Author, Category, ExtensionValue, Generator, Image, Link, Source, TextInput};
use crate::parser::{Element, FeedContext, Placement};
use crate::util::split_rss_person;

use super::{
    check_vocabulary, missing_attribute, parse_date_text, store_text, unexpected,
    NamespaceHandler,
};

const VOCABULARY: &[&str] = &[
    "rss",
    "channel",
    "item",
    "image",
    "textInput",
    "textinput",
    "skipHours",
    "skipDays",
    "hour",
    "day",
    "author",
    "category",
    "cloud",
    "comments",
    "copyright",
    "description",
    "docs",
    "enclosure",
    "generator",
    "guid",
    "height",
    "language",
    "lastBuildDate",
    "link",
    "managingEditor",
    "name",
    "pubDate",
    "rating",
    "source",
    "title",
    "ttl",
    "url",
    "webMaster",
    "width",
];

/// The one channel-level block that may be open at a time.
#[derive(Debug, Default)]
enum Container {
    #[default]
    Closed,
    Image(Image),
    TextInput(TextInput),
    SkipHours(Vec<String>),
    SkipDays(Vec<String>),
}

#[derive(Debug, Default)]
pub struct Rss20Handler {
    container: Container,
    /// Blocks opened inside the open block; skipped along with their children.
    ignored: usize,
}

impl Rss20Handler {
    fn open(&mut self, container: Container, element: &Element, ctx: &mut FeedContext) {
        if matches!(self.container, Container::Closed) {
            self.container = container;
        } else {
            unexpected(element, ctx, "nested inside another block");
            self.ignored += 1;
        }
    }

    /// Attaches the closed block under the element's key.
    fn close(&mut self, element: &Element, ctx: &mut FeedContext) {
        if self.ignored > 0 {
            self.ignored -= 1;
            return;
        }
        let value = match std::mem::take(&mut self.container) {
            Container::Image(image) => ExtensionValue::Image(image),
            Container::TextInput(input) => ExtensionValue::TextInput(input),
            Container::SkipHours(hours) => ExtensionValue::Keywords(hours),
            Container::SkipDays(days) => ExtensionValue::Keywords(days),
            Container::Closed => {
                unexpected(element, ctx, "close without open block");
                return;
            }
        };
        ctx.container_target()
            .extensions
            .insert(element.key.clone(), value);
    }

    /// Sets an `image` / `textInput` child. Returns `false` if no block
    /// claims the element.
    fn set_block_field(&mut self, element: &Element) -> bool {
        if self.ignored > 0 {
            return !matches!(self.container, Container::Closed);
        }
        let text = Some(element.text.clone());
        match (&mut self.container, element.local_name.as_str()) {
            (Container::Image(image), "title") => image.title = text,
            (Container::Image(image), "link") => image.link = text,
            (Container::Image(image), "url") => image.url = text,
            (Container::Image(image), "width") => image.width = text,
            (Container::Image(image), "height") => image.height = text,
            (Container::Image(image), "description") => image.description = text,
            (Container::TextInput(input), "title") => input.title = text,
            (Container::TextInput(input), "description") => input.description = text,
            (Container::TextInput(input), "name") => input.name = text,
            (Container::TextInput(input), "link") => input.link = text,
            (Container::SkipHours(hours), "hour") => hours.push(element.text.clone()),
            (Container::SkipDays(days), "day") => days.push(element.text.clone()),
            _ => return false,
        }
        true
    }
}

impl NamespaceHandler for Rss20Handler {
    fn start(&mut self, element: &Element, ctx: &mut FeedContext) {
        match element.local_name.as_str() {
            "rss" => ctx.in_feed = true,
            "item" => ctx.in_entry = true,
            "image" => self.open(Container::Image(Image::default()), element, ctx),
            "textInput" | "textinput" => {
                self.open(Container::TextInput(TextInput::default()), element, ctx)
            }
            "skipHours" => self.open(Container::SkipHours(Vec::new()), element, ctx),
            "skipDays" => self.open(Container::SkipDays(Vec::new()), element, ctx),
            _ => check_vocabulary(VOCABULARY, element, ctx),
        }
    }

    fn end(&mut self, element: &Element, ctx: &mut FeedContext) {
        let name = element.local_name.as_str();
        match name {
            "rss" => ctx.in_feed = false,
            "item" => ctx.in_entry = false,
            "image" | "textInput" | "textinput" | "skipHours" | "skipDays" => {
                self.close(element, ctx)
            }
            "channel" => {}
            _ if self.set_block_field(element) => {}
            "url" | "width" | "height" | "name" | "hour" | "day" => {
                unexpected(element, ctx, "outside its block")
            }

            "title" => match ctx.current() {
                Some(target) if target.title.is_none() => target.title = Some(element.text.clone()),
                Some(_) => {}
                None => unexpected(element, ctx, "outside feed"),
            },
            "description" => match ctx.placement() {
                Placement::Entry => ctx.entry.summary = Some(element.text.clone()),
                Placement::Feed => ctx.feed.subtitle = Some(element.text.clone()),
                Placement::Outside => unexpected(element, ctx, "outside feed"),
            },
            "link" => match ctx.current() {
                Some(target) => target.push_link(Link::alternate(element.text.clone())),
                None => unexpected(element, ctx, "outside feed"),
            },
            "pubDate" => self.pub_date(element, ctx),
            "lastBuildDate" => {
                if ctx.placement() == Placement::Feed {
                    let updated = parse_date_text(element, ctx);
                    ctx.feed.updated = updated;
                    store_text(element, ctx);
                }
            }
            "category" => {
                let category = Category {
                    term: element.text.clone(),
                    scheme: element.attr("domain"),
                    label: None,
                };
                match ctx.current() {
                    Some(target) => target.push_category(category),
                    None => unexpected(element, ctx, "outside feed"),
                }
            }
            "enclosure" => self.enclosure(element, ctx),
            "comments" => {
                if ctx.placement() == Placement::Entry && !element.text.is_empty() {
                    ctx.entry.push_link(Link {
                        href: element.text.clone(),
                        rel: Some("comments".to_string()),
                        media_type: Some("text/html".to_string()),
                        ..Link::default()
                    });
                }
            }
            "copyright" => {
                if ctx.placement() == Placement::Feed {
                    ctx.feed.rights = Some(element.text.clone());
                }
            }
            "generator" => {
                if ctx.placement() == Placement::Feed {
                    ctx.feed.generator = Some(Generator {
                        name: element.text.clone(),
                        ..Generator::default()
                    });
                }
            }
            "author" | "managingEditor" => {
                let (name, email) = split_rss_person(&element.text);
                let author = Author {
                    name,
                    email,
                    uri: None,
                };
                match ctx.current() {
                    Some(target) => target.push_author(author),
                    None => unexpected(element, ctx, "outside feed"),
                }
            }
            "source" => {
                if ctx.placement() == Placement::Entry {
                    let source = Source {
                        url: element.attr("url"),
                        source: element.text.clone(),
                    };
                    ctx.entry
                        .extensions
                        .insert(element.key.clone(), ExtensionValue::Source(source));
                }
            }
            "cloud" => {
                if ctx.placement() == Placement::Feed {
                    ctx.feed.extensions.insert(
                        element.key.clone(),
                        ExtensionValue::Attributes(element.attributes.to_map()),
                    );
                }
            }
            "guid" => {
                if let Some(target) = ctx.current() {
                    target.id = Some(element.text.clone());
                }
                store_text(element, ctx);
            }
            "docs" | "language" | "rating" | "ttl" | "webMaster" => store_text(element, ctx),
            _ => {}
        }
    }
}

impl Rss20Handler {
    /// Item `pubDate` becomes `published`; the channel-level one only keeps
    /// its raw text.
    fn pub_date(&mut self, element: &Element, ctx: &mut FeedContext) {
        match ctx.placement() {
            Placement::Entry => {
                let published = parse_date_text(element, ctx);
                ctx.entry.published = published;
                store_text(element, ctx);
            }
            Placement::Feed => store_text(element, ctx),
            Placement::Outside => unexpected(element, ctx, "outside feed"),
        }
    }

    fn enclosure(&mut self, element: &Element, ctx: &mut FeedContext) {
        if ctx.placement() != Placement::Entry {
            unexpected(element, ctx, "enclosure outside item");
            return;
        }
        let Some(url) = element.attr("url") else {
            missing_attribute(element, ctx, "url");
            return;
        };
        ctx.entry.push_link(Link {
            media_type: element.attr("type"),
            length: element.attr("length"),
            ..Link::enclosure(url)
        });
    }
}
