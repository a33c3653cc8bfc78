//! Article components: the parser's output.

use serde::{Deserialize, Serialize};

use super::media::VideoType;

/// Markup emitted in place of an image placeholder that cannot be resolved.
pub const IMAGE_FALLBACK_HTML: &str = r#"<div class="marticle-unsupported">Image unavailable</div>"#;

/// Markup emitted in place of a video placeholder that cannot be resolved.
pub const VIDEO_FALLBACK_HTML: &str = r#"<div class="marticle-unsupported">Video unavailable</div>"#;

/// One renderable unit of article content.
///
/// Serialized with a `__typename` tag carrying the API union member name, so
/// a JSON consumer can map each value to its schema type directly:
///
/// ```
/// use marticle::MarticleComponent;
///
/// let json = serde_json::to_string(&MarticleComponent::text("Hello")).unwrap();
/// assert_eq!(json, r#"{"__typename":"MarticleText","content":"Hello"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "__typename")]
pub enum MarticleComponent {
    #[serde(rename = "MarticleText")]
    Text { content: String },

    /// `content` includes the heading marker (`## Title`).
    #[serde(rename = "MarticleHeading")]
    Heading { content: String, level: u8 },

    #[serde(rename = "MarticleDivider")]
    Divider { content: String },

    /// Verbatim `<table>` markup.
    #[serde(rename = "MarticleTable")]
    Table { html: String },

    #[serde(rename = "MarticleCodeBlock")]
    CodeBlock { text: String },

    #[serde(rename = "MarticleBlockquote")]
    Blockquote { content: String },

    #[serde(rename = "MarticleBulletedList")]
    BulletedList { rows: Vec<ListRow> },

    #[serde(rename = "MarticleNumberedList")]
    NumberedList { rows: Vec<NumberedListRow> },

    #[serde(rename = "Image", rename_all = "camelCase")]
    Image {
        image_id: u32,
        width: Option<u32>,
        height: Option<u32>,
        src: String,
        /// `href` of the link wrapping the image, if any.
        target_url: Option<String>,
        caption: Option<String>,
        credit: Option<String>,
    },

    #[serde(rename = "Video", rename_all = "camelCase")]
    Video {
        video_id: u32,
        width: Option<u32>,
        height: Option<u32>,
        src: String,
        vid: Option<String>,
        length: Option<u32>,
        /// `None` when the legacy type code is missing or unknown.
        #[serde(rename = "type")]
        video_type: Option<VideoType>,
    },

    /// Content that has no faithful component representation, kept as markup.
    #[serde(rename = "UnMarseable")]
    Unsupported { html: String },
}

impl MarticleComponent {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    pub fn heading(content: impl Into<String>, level: u8) -> Self {
        Self::Heading {
            content: content.into(),
            level,
        }
    }

    pub fn divider() -> Self {
        Self::Divider {
            content: "---".to_string(),
        }
    }

    pub fn blockquote(content: impl Into<String>) -> Self {
        Self::Blockquote {
            content: content.into(),
        }
    }

    pub fn unsupported(html: impl Into<String>) -> Self {
        Self::Unsupported { html: html.into() }
    }

    /// The `__typename` this component serializes with.
    pub fn typename(&self) -> &'static str {
        match self {
            Self::Text { .. } => "MarticleText",
            Self::Heading { .. } => "MarticleHeading",
            Self::Divider { .. } => "MarticleDivider",
            Self::Table { .. } => "MarticleTable",
            Self::CodeBlock { .. } => "MarticleCodeBlock",
            Self::Blockquote { .. } => "MarticleBlockquote",
            Self::BulletedList { .. } => "MarticleBulletedList",
            Self::NumberedList { .. } => "MarticleNumberedList",
            Self::Image { .. } => "Image",
            Self::Video { .. } => "Video",
            Self::Unsupported { .. } => "UnMarseable",
        }
    }
}

/// A row of a bulleted list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRow {
    /// Nesting depth, 0 for the outermost list.
    pub level: u32,
    pub content: String,
}

/// A row of a numbered list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberedListRow {
    pub level: u32,
    pub content: String,
    /// Position among the `<li>` siblings of the source list.
    pub index: u32,
}
