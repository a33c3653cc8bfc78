//! Depth-first driver.

use url::Url;

use crate::dom::{ArenaDom, ConsumedSet, NodeData, NodeId, Tag};
use crate::markdown::{MarkdownOptions, render_nodes};
use crate::model::{MarticleComponent, MediaMaps};

use super::Class;
use super::container::container_component;
use super::media::Placeholder;
use super::transform;

/// State of one parse: the tree, what has been consumed, and the output.
pub(super) struct Traversal<'a> {
    pub(super) dom: &'a ArenaDom,
    pub(super) consumed: ConsumedSet,
    pub(super) options: &'a MarkdownOptions,
    /// `None` when parsing without media context.
    pub(super) media: Option<&'a MediaMaps>,
    pub(super) base_url: Option<Url>,
    output: Vec<MarticleComponent>,
}

impl<'a> Traversal<'a> {
    pub(super) fn new(
        dom: &'a ArenaDom,
        options: &'a MarkdownOptions,
        media: Option<&'a MediaMaps>,
        base_url: Option<Url>,
    ) -> Self {
        Self {
            dom,
            consumed: ConsumedSet::new(dom),
            options,
            media,
            base_url,
            output: Vec::new(),
        }
    }

    /// Visit the synthetic root. The root is itself an eventual `div`, so
    /// whatever top-level content is left once its subtree is done becomes
    /// a final text component.
    pub(super) fn run(&mut self, root: NodeId) {
        self.visit(root, root);
        self.flush_container(root);
        self.consumed.consume_subtree(self.dom, root);
    }

    pub(super) fn finish(self) -> Vec<MarticleComponent> {
        self.output
    }

    pub(super) fn emit(&mut self, component: MarticleComponent) {
        tracing::trace!(typename = component.typename(), "emit component");
        self.output.push(component);
    }

    /// Visit the live children of `node`. `container` is the nearest
    /// eventual node enclosing them, which owns any text they contribute.
    fn visit(&mut self, node: NodeId, container: NodeId) {
        let children: Vec<_> = self.consumed.live_children(self.dom, node).collect();

        for child in children {
            if self.consumed.is_consumed(child) {
                continue;
            }

            match Class::of_node(self.dom, child) {
                Class::Immediate => {
                    self.flush_preceding(container, child);
                    self.emit_immediate(child);
                    self.consumed.consume_subtree(self.dom, child);
                }
                Class::Eventual => {
                    self.flush_preceding(container, child);
                    self.visit(child, child);
                    self.flush_container(child);
                    self.consumed.consume_subtree(self.dom, child);
                }
                Class::Transparent => self.visit(child, container),
            }
        }
    }

    /// Emit the component(s) for an immediate node.
    pub(super) fn emit_immediate(&mut self, id: NodeId) {
        let dom = self.dom;
        let Some(node) = dom.get(id) else {
            return;
        };

        match &node.data {
            NodeData::Comment(text) => {
                if let Some(placeholder) = Placeholder::parse(text) {
                    let component = self.resolve_placeholder(placeholder, id);
                    self.emit(component);
                }
            }
            NodeData::Element { name, .. } => match Tag::from_local_name(&name.local) {
                Tag::List(kind) => self.visit_list(id, kind),
                tag => {
                    if let Some(component) =
                        transform::atomic(dom, &self.consumed, id, tag, self.options)
                    {
                        self.emit(component);
                    }
                }
            },
            _ => {}
        }
    }

    /// Turn the live content of `container` that precedes `child` into a
    /// component, before `child` splits the container.
    pub(super) fn flush_preceding(&mut self, container: NodeId, child: NodeId) {
        let nodes = self.preceding_live(container, child);
        if nodes.is_empty() {
            return;
        }

        let content = self.render(&nodes);
        tracing::trace!(nodes = nodes.len(), "flush before split");
        if let Some(component) = container_component(self.dom, container, content) {
            self.emit(component);
        }
    }

    /// Turn whatever is still live under `container` into a component.
    pub(super) fn flush_container(&mut self, container: NodeId) {
        let nodes: Vec<_> = self.consumed.live_children(self.dom, container).collect();
        if nodes.is_empty() {
            return;
        }

        let content = self.render(&nodes);
        if let Some(component) = container_component(self.dom, container, content) {
            self.emit(component);
        }
    }

    /// Render nodes to markdown and mark them consumed.
    pub(super) fn render(&mut self, nodes: &[NodeId]) -> String {
        let content = render_nodes(self.dom, &self.consumed, nodes, self.options);
        for &id in nodes {
            self.consumed.consume_subtree(self.dom, id);
        }
        content
    }

    /// Live nodes under `container` that come before `child` in document
    /// order, outermost first. `child` may sit below transparent wrappers;
    /// the wrappers themselves stay live since part of them follows `child`.
    pub(super) fn preceding_live(&self, container: NodeId, child: NodeId) -> Vec<NodeId> {
        let mut levels = Vec::new();
        let mut current = child;

        while current != container {
            let Some(parent) = self.dom.parent(current) else {
                break;
            };
            let before: Vec<_> = self
                .consumed
                .live_children(self.dom, parent)
                .take_while(|&c| c != current)
                .collect();
            levels.push(before);
            current = parent;
        }

        levels.into_iter().rev().flatten().collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::dom::parse_fragment;
    use crate::markdown::MarkdownOptions;
    use crate::model::MarticleComponent;

    use super::*;

    fn run(html: &str) -> Vec<MarticleComponent> {
        let fragment = parse_fragment(html);
        let options = MarkdownOptions::default();
        let mut traversal = Traversal::new(&fragment.dom, &options, None, None);
        traversal.run(fragment.root);
        traversal.finish()
    }

    #[test]
    fn test_split_around_immediate() {
        assert_eq!(
            run("<p>A</p><h1>B</h1><p>C</p>"),
            vec![
                MarticleComponent::text("A"),
                MarticleComponent::heading("# B", 1),
                MarticleComponent::text("C"),
            ]
        );
    }

    #[test]
    fn test_rule_between_text() {
        assert_eq!(
            run("<p>before<hr>after</p>"),
            vec![
                MarticleComponent::text("before"),
                MarticleComponent::divider(),
                MarticleComponent::text("after"),
            ]
        );
    }

    #[test]
    fn test_nested_eventual_flushes_parent_text() {
        assert_eq!(
            run("<div>intro<p>para</p>outro</div>"),
            vec![
                MarticleComponent::text("intro"),
                MarticleComponent::text("para"),
                MarticleComponent::text("outro"),
            ]
        );
    }

    #[test]
    fn test_top_level_text_becomes_text() {
        assert_eq!(
            run("loose <em>text</em>"),
            vec![MarticleComponent::text("loose _text_")]
        );
    }

    #[test]
    fn test_split_inside_transparent_wrapper_keeps_order() {
        assert_eq!(
            run("<p>one <span>two <script>x</script> three</span> four</p>"),
            vec![
                MarticleComponent::text("one two"),
                MarticleComponent::unsupported("<script>x</script>"),
                MarticleComponent::text("three four"),
            ]
        );
    }

    #[test]
    fn test_empty_paragraphs_emit_nothing() {
        assert!(run("<p></p><p>   </p><div><br></div>").is_empty());
    }

    #[test]
    fn test_inert_comment_stays_in_text() {
        assert_eq!(
            run("<p>a <!-- editor note --> b</p>"),
            vec![MarticleComponent::text("a b")]
        );
    }
}
