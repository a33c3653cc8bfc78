//! Eventual containers: accumulated markdown → text component.

use crate::dom::{ArenaDom, NodeId, Tag};
use crate::model::MarticleComponent;

/// Wrap markdown accumulated for `container` in the component its tag calls
/// for. Empty markdown produces nothing.
///
/// `p`, `li` and `blockquote` content becomes a blockquote when the
/// container is, or sits inside, a `<blockquote>`. `div` content is always
/// plain text, even inside a quote.
pub(super) fn container_component(
    dom: &ArenaDom,
    container: NodeId,
    content: String,
) -> Option<MarticleComponent> {
    if content.is_empty() {
        return None;
    }

    let tag = dom
        .element_name(container)
        .map(Tag::from_local_name)
        .unwrap_or(Tag::Other);

    let component = match tag {
        Tag::Paragraph | Tag::ListItem | Tag::Blockquote if in_blockquote(dom, container) => {
            MarticleComponent::blockquote(content)
        }
        _ => MarticleComponent::text(content),
    };
    Some(component)
}

fn in_blockquote(dom: &ArenaDom, id: NodeId) -> bool {
    dom.is_tag(id, "blockquote") || dom.closest_ancestor(id, "blockquote").is_some()
}
