//! Media side tables and article input, as delivered by the legacy parser.
//!
//! The legacy JSON is loose: numeric fields arrive as numbers, numeric
//! strings or junk, and optional maps may be `null`. Everything here
//! deserializes leniently and leaves validation to the parser.

use std::collections::HashMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::Result;

/// Video hosting kind, from the legacy numeric type code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VideoType {
    Youtube,
    VimeoLink,
    VimeoMoogaloop,
    VimeoIframe,
    Html5,
    Flash,
    Iframe,
    Brightcove,
    Dailymotion,
}

impl VideoType {
    /// Map a legacy type code; unknown codes have no type.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(Self::Youtube),
            2 => Some(Self::VimeoLink),
            3 => Some(Self::VimeoMoogaloop),
            4 => Some(Self::VimeoIframe),
            5 => Some(Self::Html5),
            6 => Some(Self::Flash),
            7 => Some(Self::Iframe),
            8 => Some(Self::Brightcove),
            9 => Some(Self::Dailymotion),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSource {
    #[serde(default)]
    pub src: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub width: Option<u32>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub height: Option<u32>,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub credit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSource {
    #[serde(default)]
    pub src: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub width: Option<u32>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub height: Option<u32>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub vid: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub length: Option<u32>,
    /// Legacy type code, see [`VideoType::from_code`].
    #[serde(rename = "type", default, deserialize_with = "lenient_number")]
    pub type_code: Option<u32>,
}

/// Image and video records keyed by the id used in placeholder comments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaMaps {
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: HashMap<String, ImageSource>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub videos: HashMap<String, VideoSource>,
}

impl MediaMaps {
    pub fn image(&self, id: u32) -> Option<&ImageSource> {
        self.images.get(&id.to_string())
    }

    pub fn video(&self, id: u32) -> Option<&VideoSource> {
        self.videos.get(&id.to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty() && self.videos.is_empty()
    }
}

/// A parsed article as returned by the legacy parsing service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleData {
    /// Article body markup.
    #[serde(alias = "article", default)]
    pub html: String,
    #[serde(flatten)]
    pub media: MediaMaps,
    /// URL the article was fetched from; base for relative media sources.
    #[serde(rename = "givenUrl", default)]
    pub given_url: Option<String>,
}

impl ArticleData {
    pub fn new(html: impl Into<String>) -> Self {
        Self {
            html: html.into(),
            ..Default::default()
        }
    }

    pub fn with_media(mut self, media: MediaMaps) -> Self {
        self.media = media;
        self
    }

    pub fn with_given_url(mut self, url: impl Into<String>) -> Self {
        self.given_url = Some(url.into());
        self
    }

    /// Deserialize the legacy parser's JSON document.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Accept `300`, `"300"` or `" 300 "`; anything else is `None`.
fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Accept a string or a number, keeping its textual form.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
