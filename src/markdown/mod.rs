//! HTML → Markdown conversion for article text.
//!
//! - [`escape`]: pure string escaping helpers
//! - [`options`]: the immutable [`MarkdownOptions`] shared by every conversion
//! - [`render`]: the [`MarkdownWriter`] over arena nodes
//!
//! Conversion never sees elements that were turned into their own
//! components: they are either consumed before the writer runs or rendered
//! to nothing through the suppression set. Anchors whose text is empty
//! (typically because a media placeholder was lifted out of them) also
//! render to nothing.

mod escape;
mod options;
mod render;

pub use escape::{calculate_fence_length, calculate_inline_code_ticks, escape_markdown};
pub use options::{HeadingStyle, MarkdownOptions};
pub use render::{MarkdownWriter, render_element, render_nodes};
