//! Maps HTML element names to the tags the parser and markdown writer know.

use html5ever::LocalName;

/// Elements that cannot be represented by any article component and are
/// passed through as raw markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedTag {
    DefinitionList,
    Audio,
    Script,
    Iframe,
    Math,
    Details,
    Dialog,
    Menu,
}

/// The kind of list an `<ol>`/`<ul>` element opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Ordered,
    Unordered,
}

/// Recognized element names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Heading(u8),
    Paragraph,
    Div,
    Blockquote,
    ListItem,
    List(ListKind),
    Pre,
    Code,
    Rule,
    Table,
    Image,
    Anchor,
    Break,
    Emphasis,
    Strong,
    Strikethrough,
    Unsupported(UnsupportedTag),
    /// Block-level containers without a dedicated rule (`section`, `figure`, ...).
    Block,
    /// Elements whose text is never article content (`style`, `template`, ...).
    Hidden,
    /// Anything else: inline or unknown, rendered as its content.
    Other,
}

impl Tag {
    /// Map an HTML element name to its tag.
    pub fn from_local_name(local_name: &LocalName) -> Tag {
        Self::from_name(local_name.as_ref())
    }

    pub fn from_name(name: &str) -> Tag {
        match name {
            "h1" => Tag::Heading(1),
            "h2" => Tag::Heading(2),
            "h3" => Tag::Heading(3),
            "h4" => Tag::Heading(4),
            "h5" => Tag::Heading(5),
            "h6" => Tag::Heading(6),

            "p" => Tag::Paragraph,
            "div" => Tag::Div,
            "blockquote" => Tag::Blockquote,
            "li" => Tag::ListItem,
            "ol" => Tag::List(ListKind::Ordered),
            "ul" => Tag::List(ListKind::Unordered),

            "pre" => Tag::Pre,
            "code" => Tag::Code,
            "hr" => Tag::Rule,
            "table" => Tag::Table,
            "img" => Tag::Image,
            "a" => Tag::Anchor,
            "br" => Tag::Break,

            "em" | "i" => Tag::Emphasis,
            "strong" | "b" => Tag::Strong,
            "del" | "s" | "strike" => Tag::Strikethrough,

            "dl" => Tag::Unsupported(UnsupportedTag::DefinitionList),
            "audio" => Tag::Unsupported(UnsupportedTag::Audio),
            "script" => Tag::Unsupported(UnsupportedTag::Script),
            "iframe" => Tag::Unsupported(UnsupportedTag::Iframe),
            "math" => Tag::Unsupported(UnsupportedTag::Math),
            "details" => Tag::Unsupported(UnsupportedTag::Details),
            "dialog" => Tag::Unsupported(UnsupportedTag::Dialog),
            "menu" => Tag::Unsupported(UnsupportedTag::Menu),

            "address" | "article" | "aside" | "center" | "dd" | "dt" | "fieldset"
            | "figcaption" | "figure" | "footer" | "form" | "header" | "hgroup" | "main"
            | "nav" | "section" | "summary" | "tbody" | "td" | "tfoot" | "th" | "thead"
            | "tr" => Tag::Block,

            "style" | "template" | "head" | "title" | "meta" | "link" => Tag::Hidden,

            _ => Tag::Other,
        }
    }

    /// Whether the markdown writer separates this element from its
    /// neighbours with a blank line.
    pub fn is_block(self) -> bool {
        matches!(
            self,
            Tag::Heading(_)
                | Tag::Paragraph
                | Tag::Div
                | Tag::Blockquote
                | Tag::ListItem
                | Tag::List(_)
                | Tag::Pre
                | Tag::Rule
                | Tag::Table
                | Tag::Unsupported(_)
                | Tag::Block
        )
    }
}
