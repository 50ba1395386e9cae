//! The normalized, Atom-shaped feed model.
//!
//! Every dialect the parser understands is mapped onto these types. Fields
//! that have an Atom equivalent get a typed home on [`Metadata`], [`Feed`] or
//! [`Entry`]; everything else is kept losslessly in the [`Extensions`] map
//! under a `{prefix}-{localName}` key.
//!
//! Sequence fields are `Option<Vec<_>>`: they stay `None` until the first
//! element that populates them is seen. Readers should treat `None` and an
//! empty vector the same way; the accessor methods do that for you.

mod extension;
mod media;

use serde::Serialize;
use std::ops::{Deref, DerefMut};

pub use extension::{
    ExtensionValue, Extensions, FeedFlare, Image, ItunesCategory, ItunesOwner, Source, TextInput,
};
pub use media::{
    MediaContent, MediaCopyright, MediaCredit, MediaGroup, MediaHash, MediaMetadata, MediaPlayer,
    MediaRating, MediaRestriction, MediaText, MediaTextTrack, MediaThumbnail,
};

// ============================================================================
// Shared Metadata
// ============================================================================

/// Fields common to a feed and an entry.
///
/// [`Feed`] and [`Entry`] deref to this, so namespace handlers can write
/// "wherever we currently are" without caring which of the two it is.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// ISO-8601 when the source date could be parsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rights: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generator: Option<Generator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<Author>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contributors: Option<Vec<Author>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<Link>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<Category>>,
    #[serde(flatten)]
    pub extensions: Extensions,
}

impl Metadata {
    pub fn push_author(&mut self, author: Author) {
        self.authors.get_or_insert_with(Vec::new).push(author);
    }

    pub fn push_contributor(&mut self, contributor: Author) {
        self.contributors.get_or_insert_with(Vec::new).push(contributor);
    }

    pub fn push_link(&mut self, link: Link) {
        self.links.get_or_insert_with(Vec::new).push(link);
    }

    pub fn push_category(&mut self, category: Category) {
        self.categories.get_or_insert_with(Vec::new).push(category);
    }

    pub fn authors(&self) -> &[Author] {
        self.authors.as_deref().unwrap_or_default()
    }

    pub fn contributors(&self) -> &[Author] {
        self.contributors.as_deref().unwrap_or_default()
    }

    pub fn links(&self) -> &[Link] {
        self.links.as_deref().unwrap_or_default()
    }

    pub fn categories(&self) -> &[Category] {
        self.categories.as_deref().unwrap_or_default()
    }

    /// Looks up a namespace-qualified extension field, e.g. `"rss20-guid"`.
    pub fn extension(&self, key: &str) -> Option<&ExtensionValue> {
        self.extensions.get(key)
    }
}

// ============================================================================
// Feed / Entry
// ============================================================================

/// The result of a parse. Exactly one exists per document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Feed {
    #[serde(flatten)]
    pub metadata: Metadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<Entry>>,
}

impl Feed {
    /// Entries in document order.
    pub fn entries(&self) -> &[Entry] {
        self.entries.as_deref().unwrap_or_default()
    }

    pub(crate) fn push_entry(&mut self, entry: Entry) {
        self.entries.get_or_insert_with(Vec::new).push(entry);
    }
}

impl Deref for Feed {
    type Target = Metadata;
    fn deref(&self) -> &Metadata {
        &self.metadata
    }
}

impl DerefMut for Feed {
    fn deref_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}

/// A single item of a feed (`item` in RSS, `entry` in Atom).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Entry {
    #[serde(flatten)]
    pub metadata: Metadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    /// ISO-8601 when the source date could be parsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published: Option<String>,
}

impl Deref for Entry {
    type Target = Metadata;
    fn deref(&self) -> &Metadata {
        &self.metadata
    }
}

impl DerefMut for Entry {
    fn deref_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}

// ============================================================================
// Constructs
// ============================================================================

/// A link in the unified link sequence.
///
/// Alternate, enclosure and comments links are separate values in the same
/// sequence; they are never merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Link {
    pub href: String,
    /// `None` only for Atom links that carried no `rel` attribute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rel: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hreflang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Link {
    /// An HTML page link, as synthesized for RSS-style `<link>` text.
    pub fn alternate(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            rel: Some("alternate".to_string()),
            media_type: Some("text/html".to_string()),
            ..Self::default()
        }
    }

    pub fn enclosure(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            rel: Some("enclosure".to_string()),
            ..Self::default()
        }
    }

    /// The link relation, with Atom's implied `"alternate"` default.
    pub fn rel(&self) -> &str {
        self.rel.as_deref().unwrap_or("alternate")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Author {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

impl Author {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Category {
    pub term: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Generator {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Entry content. Either inline `text` (HTML-ready) or an out-of-line `src`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}
