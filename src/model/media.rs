//! Yahoo Media RSS (`media:`) structures.

use serde::Serialize;

use super::Category;

/// Metadata that can hang off a `media:content`, a `media:group`, an entry
/// or a feed. Inside containers it lives here; on entries and feeds it is
/// spread across `media-*` extension keys instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MediaMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<MediaText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<MediaText>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnails: Option<Vec<MediaThumbnail>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<MediaPlayer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<MediaCopyright>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub texts: Option<Vec<MediaTextTrack>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restrictions: Option<Vec<MediaRestriction>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits: Option<Vec<MediaCredit>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categories: Option<Vec<Category>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hashes: Option<Vec<MediaHash>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ratings: Option<Vec<MediaRating>>,
}

/// A `media:content` element: its attributes plus any nested metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MediaContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(rename = "fileSize", skip_serializing_if = "Option::is_none")]
    pub file_size: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    #[serde(rename = "isDefault", skip_serializing_if = "Option::is_none")]
    pub is_default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expression: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(flatten)]
    pub metadata: MediaMetadata,
}

/// A `media:group`: alternative renditions of the same media object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MediaGroup {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contents: Option<Vec<MediaContent>>,
    #[serde(flatten)]
    pub metadata: MediaMetadata,
}

impl MediaGroup {
    pub fn contents(&self) -> &[MediaContent] {
        self.contents.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MediaThumbnail {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MediaPlayer {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MediaCopyright {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// `media:title` / `media:description`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MediaText {
    pub text: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub text_type: Option<String>,
}

/// `media:text`: a timed transcript fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MediaTextTrack {
    pub text: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub text_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MediaRestriction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationship: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub restriction_type: Option<String>,
    pub countries: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MediaCredit {
    pub credit: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MediaHash {
    pub algo: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MediaRating {
    pub scheme: String,
    pub term: String,
}
