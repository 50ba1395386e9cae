//! Apple podcast (`itunes:`) extensions.

use crate::model::{ExtensionValue, ItunesCategory, ItunesOwner, Link};
use crate::parser::{Element, FeedContext, Placement};
use crate::util::split_keywords;

use super::{check_vocabulary, missing_attribute, store_text, unexpected, NamespaceHandler};

/// Simple text elements, stored under their key when non-empty.
const TEXT_ELEMENTS: &[&str] = &[
    "author",
    "block",
    "duration",
    "episode",
    "episodeType",
    "explicit",
    "new-feed-url",
    "pubDate",
    "season",
    "subtitle",
    "summary",
    "title",
    "type",
];

/// Elements beyond the text fields.
const VOCABULARY: &[&str] = &["owner", "category", "email", "name", "image", "keywords"];

/// Where we are inside `itunes:category` nesting.
#[derive(Debug, Default)]
enum CategoryState {
    #[default]
    Closed,
    Open(ItunesCategory),
    /// Inside a subcategory; `ignored` counts deeper levels, which iTunes
    /// does not define.
    Subcategory {
        category: ItunesCategory,
        ignored: usize,
    },
}

#[derive(Debug, Default)]
pub struct ItunesHandler {
    owner: Option<ItunesOwner>,
    category: CategoryState,
}

impl ItunesHandler {
    fn open_category(&mut self, element: &Element, ctx: &mut FeedContext) {
        let text = element.attr("text");
        self.category = match std::mem::take(&mut self.category) {
            CategoryState::Closed => CategoryState::Open(ItunesCategory {
                text,
                subcategory: None,
            }),
            CategoryState::Open(mut category) => {
                if text.is_some() {
                    category.subcategory = text;
                }
                CategoryState::Subcategory {
                    category,
                    ignored: 0,
                }
            }
            CategoryState::Subcategory { category, ignored } => {
                unexpected(element, ctx, "subcategory of a subcategory");
                CategoryState::Subcategory {
                    category,
                    ignored: ignored + 1,
                }
            }
        };
    }

    fn close_category(&mut self, element: &Element, ctx: &mut FeedContext) {
        self.category = match std::mem::take(&mut self.category) {
            CategoryState::Subcategory {
                category,
                ignored: 0,
            } => CategoryState::Open(category),
            CategoryState::Subcategory { category, ignored } => CategoryState::Subcategory {
                category,
                ignored: ignored - 1,
            },
            CategoryState::Open(category) => {
                if !category.is_empty() {
                    if ctx.in_entry {
                        unexpected(element, ctx, "category at entry level");
                    } else {
                        ctx.container_target()
                            .extensions
                            .push("itunes-categories", ExtensionValue::ItunesCategory(category));
                    }
                }
                CategoryState::Closed
            }
            CategoryState::Closed => {
                unexpected(element, ctx, "close without open category");
                CategoryState::Closed
            }
        };
    }

    fn image(&mut self, element: &Element, ctx: &mut FeedContext) {
        let Some(href) = element.attr("href") else {
            missing_attribute(element, ctx, "href");
            return;
        };
        match ctx.placement() {
            Placement::Entry => ctx
                .entry
                .extensions
                .insert(element.key.clone(), ExtensionValue::Text(href)),
            Placement::Feed => {
                ctx.feed.push_link(Link {
                    media_type: Some(image_type(&href).to_string()),
                    ..Link::enclosure(href.clone())
                });
                ctx.feed
                    .extensions
                    .insert(element.key.clone(), ExtensionValue::Text(href));
            }
            Placement::Outside => unexpected(element, ctx, "outside feed"),
        }
    }
}

/// Guesses an image MIME type from the URL's file extension.
fn image_type(href: &str) -> &'static str {
    let path = href.split(['?', '#']).next().unwrap_or(href);
    let extension = path
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "image/*",
    }
}

impl NamespaceHandler for ItunesHandler {
    fn start(&mut self, element: &Element, ctx: &mut FeedContext) {
        match element.local_name.as_str() {
            "owner" => self.owner = Some(ItunesOwner::default()),
            "category" => self.open_category(element, ctx),
            name if TEXT_ELEMENTS.contains(&name) => {}
            _ => check_vocabulary(VOCABULARY, element, ctx),
        }
    }

    fn end(&mut self, element: &Element, ctx: &mut FeedContext) {
        match element.local_name.as_str() {
            "owner" => {
                let Some(owner) = self.owner.take() else {
                    unexpected(element, ctx, "close without open owner");
                    return;
                };
                if ctx.in_entry {
                    unexpected(element, ctx, "owner at entry level");
                } else {
                    ctx.container_target()
                        .extensions
                        .insert(element.key.clone(), ExtensionValue::ItunesOwner(owner));
                }
            }
            "name" | "email" => {
                let Some(owner) = self.owner.as_mut() else {
                    unexpected(element, ctx, "outside owner");
                    return;
                };
                let value = Some(element.text.clone());
                if element.local_name == "name" {
                    owner.name = value;
                } else {
                    owner.email = value;
                }
            }
            "category" => self.close_category(element, ctx),
            "image" => self.image(element, ctx),
            "keywords" => {
                let keywords = split_keywords(&element.text);
                if keywords.is_empty() {
                    return;
                }
                match ctx.current() {
                    Some(target) => target
                        .extensions
                        .insert(element.key.clone(), ExtensionValue::Keywords(keywords)),
                    None => unexpected(element, ctx, "outside feed"),
                }
            }
            name if TEXT_ELEMENTS.contains(&name) && !element.text.is_empty() => {
                store_text(element, ctx)
            }
            _ => {}
        }
    }
}
