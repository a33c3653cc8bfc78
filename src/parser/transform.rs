//! Atomic transformers: one immediate element → one component.

use crate::dom::{ArenaDom, ConsumedSet, NodeId, Tag, outer_html};
use crate::markdown::{MarkdownOptions, render_element};
use crate::model::MarticleComponent;

/// Build the component for an immediate, non-list element.
pub(super) fn atomic(
    dom: &ArenaDom,
    consumed: &ConsumedSet,
    id: NodeId,
    tag: Tag,
    options: &MarkdownOptions,
) -> Option<MarticleComponent> {
    let component = match tag {
        Tag::Heading(level) => {
            MarticleComponent::heading(render_element(dom, consumed, id, options), level)
        }
        Tag::Rule => MarticleComponent::divider(),
        Tag::Table => MarticleComponent::Table {
            html: markup(dom, id),
        },
        Tag::Pre => MarticleComponent::CodeBlock {
            text: dom.text_content(id),
        },
        Tag::Unsupported(_) => MarticleComponent::unsupported(markup(dom, id)),
        _ => return None,
    };
    Some(component)
}

/// Verbatim outer markup of an element, or its bare text if serialization
/// fails.
fn markup(dom: &ArenaDom, id: NodeId) -> String {
    match outer_html(dom, id) {
        Ok(html) => html,
        Err(e) => {
            tracing::warn!(error = %e, "falling back to text content");
            dom.text_content(id)
        }
    }
}
