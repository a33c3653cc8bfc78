//! Article HTML → ordered [`MarticleComponent`]s.
//!
//! The parser walks the fragment depth-first. Every node falls into one of
//! three [`Class`]es:
//!
//! - **Immediate** nodes (headings, `pre`, `hr`, tables, lists, media
//!   placeholder comments, unsupported elements) become components the
//!   moment they are reached.
//! - **Eventual** nodes (`p`, `div`, `blockquote`, `li`) accumulate inline
//!   content and become a text component when an immediate sibling splits
//!   them or when their subtree has been fully visited.
//! - Everything else is **transparent**: its content bubbles into whichever
//!   eventual container encloses it.
//!
//! Consumed content is tracked in a [`ConsumedSet`](crate::dom::ConsumedSet)
//! beside the arena rather than by removing nodes from the tree.

mod container;
mod list;
mod media;
mod transform;
mod visitor;

use url::Url;

use crate::dom::{ArenaDom, NodeData, NodeId, Tag, parse_fragment};
use crate::markdown::MarkdownOptions;
use crate::model::{ArticleData, MarticleComponent, MediaMaps};

use visitor::Traversal;

/// How the traversal treats a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Class {
    Immediate,
    Eventual,
    Transparent,
}

impl Class {
    pub fn of_tag(tag: Tag) -> Class {
        match tag {
            Tag::Heading(_)
            | Tag::Pre
            | Tag::Rule
            | Tag::Table
            | Tag::List(_)
            | Tag::Unsupported(_) => Class::Immediate,

            Tag::Paragraph | Tag::Div | Tag::Blockquote | Tag::ListItem => Class::Eventual,

            Tag::Code
            | Tag::Image
            | Tag::Anchor
            | Tag::Break
            | Tag::Emphasis
            | Tag::Strong
            | Tag::Strikethrough
            | Tag::Block
            | Tag::Hidden
            | Tag::Other => Class::Transparent,
        }
    }

    /// Classify any arena node. Only comments that look like media
    /// placeholders are immediate; other comments are inert.
    pub fn of_node(dom: &ArenaDom, id: NodeId) -> Class {
        match dom.get(id).map(|n| &n.data) {
            Some(NodeData::Element { name, .. }) => Class::of_tag(Tag::from_local_name(&name.local)),
            Some(NodeData::Comment(text)) if media::Placeholder::parse(text).is_some() => {
                Class::Immediate
            }
            _ => Class::Transparent,
        }
    }
}

/// Converts article markup into components.
///
/// A parser holds only immutable configuration and can be shared freely
/// between threads; each call builds and discards its own tree.
#[derive(Debug, Clone, Default)]
pub struct ArticleParser {
    options: MarkdownOptions,
}

impl ArticleParser {
    pub fn new(options: MarkdownOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &MarkdownOptions {
        &self.options
    }

    /// Parse markup with no media context. Placeholder comments degrade to
    /// unsupported components.
    pub fn parse(&self, html: &str) -> Vec<MarticleComponent> {
        self.run(html, None, None)
    }

    /// Parse a legacy parser article, resolving placeholders against its
    /// media maps and relative sources against its `given_url`.
    pub fn parse_article(&self, article: &ArticleData) -> Vec<MarticleComponent> {
        self.parse_with_media(&article.html, &article.media, article.given_url.as_deref())
    }

    pub fn parse_with_media(
        &self,
        html: &str,
        media: &MediaMaps,
        base_url: Option<&str>,
    ) -> Vec<MarticleComponent> {
        let base_url = base_url.and_then(|base| match Url::parse(base) {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::debug!(base, error = %e, "ignoring unparsable base url");
                None
            }
        });
        self.run(html, Some(media), base_url)
    }

    fn run(
        &self,
        html: &str,
        media: Option<&MediaMaps>,
        base_url: Option<Url>,
    ) -> Vec<MarticleComponent> {
        let fragment = parse_fragment(html);
        let mut traversal = Traversal::new(&fragment.dom, &self.options, media, base_url);
        traversal.run(fragment.root);
        let components = traversal.finish();

        tracing::debug!(
            input_len = html.len(),
            components = components.len(),
            "parsed article"
        );
        components
    }
}
