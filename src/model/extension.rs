use serde::Serialize;
use std::collections::BTreeMap;

use super::media::{
    MediaContent, MediaCopyright, MediaCredit, MediaGroup, MediaHash, MediaPlayer, MediaRating,
    MediaRestriction, MediaText, MediaTextTrack, MediaThumbnail,
};
use super::Category;

/// Namespace-qualified fields that have no home in the Atom-shaped schema.
///
/// Keys follow the `{prefix}-{localName}` convention (`rss20-guid`,
/// `itunes-owner`); a few list-valued keys use a plural local name
/// (`media-credits`, `itunes-categories`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Extensions(BTreeMap<String, ExtensionValue>);

impl Extensions {
    pub fn get(&self, key: &str) -> Option<&ExtensionValue> {
        self.0.get(key)
    }

    /// Sets a single-valued field, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: ExtensionValue) {
        self.0.insert(key.into(), value);
    }

    /// Appends to a list-valued field, creating the list on first use.
    ///
    /// A scalar already stored under `key` is folded into the new list so
    /// nothing is lost.
    pub fn push(&mut self, key: impl Into<String>, value: ExtensionValue) {
        let slot = self
            .0
            .entry(key.into())
            .or_insert_with(|| ExtensionValue::List(Vec::new()));
        match slot {
            ExtensionValue::List(items) => items.push(value),
            scalar => {
                let previous = std::mem::replace(scalar, ExtensionValue::List(Vec::new()));
                *scalar = ExtensionValue::List(vec![previous, value]);
            }
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ExtensionValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// A handler-defined value stored under an extension key.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExtensionValue {
    Text(String),
    Keywords(Vec<String>),
    Attributes(BTreeMap<String, String>),
    Image(Image),
    TextInput(TextInput),
    Source(Source),
    FeedFlare(FeedFlare),
    ItunesOwner(ItunesOwner),
    ItunesCategory(ItunesCategory),
    MediaContent(MediaContent),
    MediaGroup(MediaGroup),
    MediaThumbnail(MediaThumbnail),
    MediaPlayer(MediaPlayer),
    MediaCopyright(MediaCopyright),
    MediaText(MediaText),
    MediaTextTrack(MediaTextTrack),
    MediaRestriction(MediaRestriction),
    MediaCredit(MediaCredit),
    MediaCategory(Category),
    MediaHash(MediaHash),
    MediaRating(MediaRating),
    List(Vec<ExtensionValue>),
}

impl ExtensionValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[ExtensionValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<String> for ExtensionValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for ExtensionValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

// ============================================================================
// Dialect Containers
// ============================================================================

/// RSS 2.0 / RSS 1.0 channel image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Image {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// RSS `textInput` / RSS 1.0 `textinput` block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TextInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// RSS 2.0 item `source`: the channel the item came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Source {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub source: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeedFlare {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ItunesOwner {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ItunesCategory {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
}

impl ItunesCategory {
    pub fn is_empty(&self) -> bool {
        self.text.is_none() && self.subcategory.is_none()
    }
}
