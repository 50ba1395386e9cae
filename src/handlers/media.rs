//! Yahoo Media RSS (`media:`).
//!
//! Metadata elements attach to the innermost open container: the current
//! `media:content`, else the current `media:group`, else the entry or the
//! feed. On entries and feeds they are stored as `media-*` extensions,
//! with repeatable elements collected into lists.

use crate::model::{
    Category, ExtensionValue, Link, MediaContent, MediaCopyright, MediaCredit, MediaGroup,
    MediaHash, MediaMetadata, MediaPlayer, MediaRating, MediaRestriction, MediaText,
    MediaTextTrack, MediaThumbnail,
};
use crate::parser::{Attributes, Diagnostic, Element, FeedContext};
use crate::util::split_keywords;

use super::{check_vocabulary, missing_attribute, unexpected, NamespaceHandler};

const VOCABULARY: &[&str] = &[
    "group",
    "content",
    "category",
    "copyright",
    "credit",
    "description",
    "hash",
    "keywords",
    "player",
    "rating",
    "restriction",
    "text",
    "thumbnail",
    "title",
    // Child-element forms of `content` attributes, as published by some
    // newspapers.
    "url",
    "medium",
    "height",
    "width",
];

const DEFAULT_HASH_ALGO: &str = "md5";
const DEFAULT_RATING_SCHEME: &str = "urn:simple";

#[derive(Debug, Default)]
pub struct MediaHandler {
    group: Option<MediaGroup>,
    content: Option<MediaContent>,
}

/// One metadata element, ready to be placed.
#[derive(Debug)]
enum MediaItem {
    Title(MediaText),
    Description(MediaText),
    Keywords(Vec<String>),
    Thumbnail(MediaThumbnail),
    Player(MediaPlayer),
    Copyright(MediaCopyright),
    Text(MediaTextTrack),
    Restriction(MediaRestriction),
    Credit(MediaCredit),
    Category(Category),
    Hash(MediaHash),
    Rating(MediaRating),
}

impl MediaItem {
    fn apply_to(self, metadata: &mut MediaMetadata) {
        match self {
            Self::Title(title) => metadata.title = Some(title),
            Self::Description(description) => metadata.description = Some(description),
            Self::Keywords(keywords) => metadata.keywords = Some(keywords),
            Self::Player(player) => metadata.player = Some(player),
            Self::Copyright(copyright) => metadata.copyright = Some(copyright),
            Self::Thumbnail(t) => metadata.thumbnails.get_or_insert_with(Vec::new).push(t),
            Self::Text(t) => metadata.texts.get_or_insert_with(Vec::new).push(t),
            Self::Restriction(r) => metadata.restrictions.get_or_insert_with(Vec::new).push(r),
            Self::Credit(c) => metadata.credits.get_or_insert_with(Vec::new).push(c),
            Self::Category(c) => metadata.categories.get_or_insert_with(Vec::new).push(c),
            Self::Hash(h) => metadata.hashes.get_or_insert_with(Vec::new).push(h),
            Self::Rating(r) => metadata.ratings.get_or_insert_with(Vec::new).push(r),
        }
    }

    /// Extension key, value, and whether the key holds a list.
    fn into_extension(self) -> (&'static str, ExtensionValue, bool) {
        match self {
            Self::Title(t) => ("media-title", ExtensionValue::MediaText(t), false),
            Self::Description(d) => ("media-description", ExtensionValue::MediaText(d), false),
            Self::Keywords(k) => ("media-keywords", ExtensionValue::Keywords(k), false),
            Self::Player(p) => ("media-player", ExtensionValue::MediaPlayer(p), false),
            Self::Copyright(c) => ("media-copyright", ExtensionValue::MediaCopyright(c), false),
            Self::Thumbnail(t) => ("media-thumbnails", ExtensionValue::MediaThumbnail(t), true),
            Self::Text(t) => ("media-texts", ExtensionValue::MediaTextTrack(t), true),
            Self::Restriction(r) => ("media-restrictions", ExtensionValue::MediaRestriction(r), true),
            Self::Credit(c) => ("media-credits", ExtensionValue::MediaCredit(c), true),
            Self::Category(c) => ("media-categories", ExtensionValue::MediaCategory(c), true),
            Self::Hash(h) => ("media-hashes", ExtensionValue::MediaHash(h), true),
            Self::Rating(r) => ("media-ratings", ExtensionValue::MediaRating(r), true),
        }
    }
}

impl MediaHandler {
    fn place(&mut self, item: MediaItem, element: &Element, ctx: &mut FeedContext) {
        if let Some(content) = self.content.as_mut() {
            item.apply_to(&mut content.metadata);
        } else if let Some(group) = self.group.as_mut() {
            item.apply_to(&mut group.metadata);
        } else if let Some(target) = ctx.current() {
            let (key, value, list) = item.into_extension();
            if list {
                target.extensions.push(key, value);
            } else {
                target.extensions.insert(key, value);
            }
        } else {
            unexpected(element, ctx, "outside feed");
        }
    }

    fn close_content(&mut self, element: &Element, ctx: &mut FeedContext) {
        let Some(mut content) = self.content.take() else {
            unexpected(element, ctx, "close without open content");
            return;
        };

        if let Some(group) = self.group.as_mut() {
            if content.url.is_none() {
                // Groups often describe renditions of the item's own link.
                if let Some(href) = ctx.entry.links().first().map(|l| l.href.clone()) {
                    ctx.diagnose(Diagnostic::GuessedMediaUrl { url: href.clone() });
                    content.url = Some(href);
                }
            }
            group.contents.get_or_insert_with(Vec::new).push(content);
            return;
        }

        let target = ctx.container_target();
        if let Some(link) = enclosure_link(&content) {
            target.push_link(link);
        }
        if content.url.is_some() {
            target
                .extensions
                .push("media-contents", ExtensionValue::MediaContent(content));
        }
    }
}

/// The `rel="enclosure"` link a standalone `media:content` stands for.
fn enclosure_link(content: &MediaContent) -> Option<Link> {
    let href = content
        .url
        .clone()
        .or_else(|| content.metadata.player.as_ref().map(|p| p.url.clone()))?;
    let media_type = content
        .media_type
        .clone()
        .or_else(|| content.medium.as_ref().map(|m| format!("{}/*", m)));
    Some(Link {
        media_type,
        length: content.file_size.clone(),
        ..Link::enclosure(href)
    })
}

fn content_from(attributes: &Attributes) -> MediaContent {
    let attr = |name: &str| attributes.non_empty(name).map(str::to_string);
    MediaContent {
        url: attr("url"),
        file_size: attr("fileSize").or_else(|| attr("filesize")),
        media_type: attr("type"),
        medium: attr("medium"),
        is_default: attr("isDefault"),
        expression: attr("expression"),
        bitrate: attr("bitrate"),
        duration: attr("duration"),
        height: attr("height"),
        width: attr("width"),
        lang: attr("lang"),
        metadata: MediaMetadata::default(),
    }
}

/// Builds the item for a metadata element, or `None` when the element
/// lacks what it needs (a diagnostic has then been recorded).
fn media_item(element: &Element, ctx: &mut FeedContext) -> Option<MediaItem> {
    let text = || element.text.clone();
    let item = match element.local_name.as_str() {
        "title" | "description" => {
            let value = MediaText {
                text: text(),
                text_type: element.attr("type"),
            };
            if element.local_name == "title" {
                MediaItem::Title(value)
            } else {
                MediaItem::Description(value)
            }
        }
        "keywords" => {
            let keywords = split_keywords(&element.text);
            if keywords.is_empty() {
                return None;
            }
            MediaItem::Keywords(keywords)
        }
        "thumbnail" => {
            let Some(url) = element.attr("url") else {
                missing_attribute(element, ctx, "url");
                return None;
            };
            MediaItem::Thumbnail(MediaThumbnail {
                url,
                width: element.attr("width"),
                height: element.attr("height"),
                time: element.attr("time"),
            })
        }
        "player" => {
            let Some(url) = element.attr("url") else {
                missing_attribute(element, ctx, "url");
                return None;
            };
            MediaItem::Player(MediaPlayer {
                url,
                width: element.attr("width"),
                height: element.attr("height"),
            })
        }
        "copyright" => MediaItem::Copyright(MediaCopyright {
            text: text(),
            url: element.attr("url"),
        }),
        "text" => MediaItem::Text(MediaTextTrack {
            text: text(),
            text_type: element.attr("type"),
            lang: element.attr("lang"),
            start: element.attr("start"),
            end: element.attr("end"),
        }),
        "restriction" => MediaItem::Restriction(MediaRestriction {
            relationship: element.attr("relationship"),
            restriction_type: element.attr("type"),
            countries: element.text.split_whitespace().map(str::to_string).collect(),
        }),
        "credit" => MediaItem::Credit(MediaCredit {
            credit: text(),
            role: element.attr("role"),
            scheme: element.attr("scheme"),
        }),
        "category" => MediaItem::Category(Category {
            term: text(),
            scheme: element.attr("scheme"),
            label: element.attr("label"),
        }),
        "hash" => MediaItem::Hash(MediaHash {
            algo: element
                .attr("algo")
                .unwrap_or_else(|| DEFAULT_HASH_ALGO.to_string()),
            text: text(),
        }),
        "rating" => MediaItem::Rating(MediaRating {
            scheme: element
                .attr("scheme")
                .unwrap_or_else(|| DEFAULT_RATING_SCHEME.to_string()),
            term: text(),
        }),
        _ => return None,
    };
    Some(item)
}

impl NamespaceHandler for MediaHandler {
    fn start(&mut self, element: &Element, ctx: &mut FeedContext) {
        match element.local_name.as_str() {
            "group" => {
                if self.group.is_some() {
                    unexpected(element, ctx, "group inside group");
                }
                self.group = Some(MediaGroup::default());
            }
            "content" => {
                if self.content.is_some() {
                    unexpected(element, ctx, "content inside content");
                }
                self.content = Some(content_from(&element.attributes));
            }
            _ => check_vocabulary(VOCABULARY, element, ctx),
        }
    }

    fn end(&mut self, element: &Element, ctx: &mut FeedContext) {
        match element.local_name.as_str() {
            "content" => self.close_content(element, ctx),
            "group" => {
                let Some(group) = self.group.take() else {
                    unexpected(element, ctx, "close without open group");
                    return;
                };
                ctx.container_target()
                    .extensions
                    .insert(element.key.clone(), ExtensionValue::MediaGroup(group));
            }
            "url" | "medium" | "height" | "width" => {
                let Some(content) = self.content.as_mut() else {
                    unexpected(element, ctx, "outside media:content");
                    return;
                };
                let value = Some(element.text.clone());
                match element.local_name.as_str() {
                    "url" => content.url = value,
                    "medium" => content.medium = value,
                    "height" => content.height = value,
                    _ => content.width = value,
                }
            }
            _ => {
                if let Some(item) = media_item(element, ctx) {
                    self.place(item, element, ctx);
                }
            }
        }
    }
}
