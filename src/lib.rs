//! # marticle
//!
//! Turns article HTML, as produced by a legacy content-parsing service, into
//! a flat, ordered list of typed article components that API clients can
//! render natively.
//!
//! ## Quick Start
//!
//! ```
//! use marticle::MarticleComponent;
//!
//! let components = marticle::parse("<p>A</p><h1>B</h1><p>C</p>");
//! assert_eq!(
//!     components,
//!     vec![
//!         MarticleComponent::text("A"),
//!         MarticleComponent::heading("# B", 1),
//!         MarticleComponent::text("C"),
//!     ]
//! );
//! ```
//!
//! ## Media
//!
//! The legacy parser replaces images and videos with placeholder comments
//! (`<!--IMG_1-->`) and returns their metadata in side tables. Pass the whole
//! article to resolve them:
//!
//! ```
//! use marticle::ArticleData;
//!
//! let article = ArticleData::from_json(r#"{
//!     "article": "<p>Look:</p><!--IMG_1-->",
//!     "images": {"1": {"src": "https://example.com/cat.jpg", "width": "640"}},
//!     "givenUrl": "https://example.com/post"
//! }"#).unwrap();
//!
//! let components = marticle::parse_article(&article);
//! assert_eq!(components[1].typename(), "Image");
//! ```
//!
//! Parsing never fails. Content that cannot be represented comes back as
//! [`MarticleComponent::Unsupported`] carrying its markup (or fixed fallback
//! markup for unresolvable media), and empty text produces no component.

pub mod dom;
mod error;
pub mod markdown;
pub mod model;
pub mod parser;
pub(crate) mod util;

#[cfg(feature = "wasm")]
pub mod wasm;

use std::sync::LazyLock;

pub use error::{Error, Result};
pub use markdown::{HeadingStyle, MarkdownOptions};
pub use model::{
    ArticleData, ImageSource, ListRow, MarticleComponent, MediaMaps, NumberedListRow,
    VideoSource, VideoType,
};
pub use parser::ArticleParser;
pub use util::decode_text;

static DEFAULT_PARSER: LazyLock<ArticleParser> = LazyLock::new(ArticleParser::default);

/// Parse article markup with the default options and no media context.
pub fn parse(html: &str) -> Vec<MarticleComponent> {
    DEFAULT_PARSER.parse(html)
}

/// Parse a legacy parser article with the default options.
pub fn parse_article(article: &ArticleData) -> Vec<MarticleComponent> {
    DEFAULT_PARSER.parse_article(article)
}
