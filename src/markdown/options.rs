//! Conversion settings for the markdown writer.

use crate::dom::{ListKind, Tag};

/// How headings are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum HeadingStyle {
    /// `# Heading`
    #[default]
    Atx,
    /// `Heading` underlined with `===` / `---` (levels 1 and 2 only).
    Setext,
}

/// Immutable markdown conversion settings.
///
/// Built once and shared by reference with every conversion. The default
/// suppresses every element that the article parser turns into its own
/// component, so that content never shows up twice.
#[derive(Debug, Clone)]
pub struct MarkdownOptions {
    pub heading_style: HeadingStyle,
    pub em_delimiter: String,
    pub strong_delimiter: String,
    /// GFM strikethrough (`~text~`) for `del`, `s` and `strike`.
    pub strikethrough: bool,
    suppressed: Vec<Tag>,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self {
            heading_style: HeadingStyle::Atx,
            em_delimiter: "_".to_string(),
            strong_delimiter: "**".to_string(),
            strikethrough: true,
            suppressed: vec![
                Tag::Image,
                Tag::Table,
                Tag::Rule,
                Tag::Pre,
                Tag::List(ListKind::Ordered),
                Tag::List(ListKind::Unordered),
            ],
        }
    }
}

impl MarkdownOptions {
    pub fn with_heading_style(mut self, style: HeadingStyle) -> Self {
        self.heading_style = style;
        self
    }

    pub fn with_em_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.em_delimiter = delimiter.into();
        self
    }

    pub fn with_strong_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.strong_delimiter = delimiter.into();
        self
    }

    pub fn with_strikethrough(mut self, enabled: bool) -> Self {
        self.strikethrough = enabled;
        self
    }

    /// Render `tag` to nothing.
    pub fn suppress(mut self, tag: Tag) -> Self {
        if !self.suppressed.contains(&tag) {
            self.suppressed.push(tag);
        }
        self
    }

    /// Render `tag` with its normal markdown rule again.
    pub fn unsuppress(mut self, tag: Tag) -> Self {
        self.suppressed.retain(|&t| t != tag);
        self
    }

    pub fn suppresses(&self, tag: Tag) -> bool {
        self.suppressed.contains(&tag)
    }
}
