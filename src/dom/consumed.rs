//! Traversal state kept beside the arena.

use super::arena::{ArenaDom, NodeId};

/// Per-node "consumed" flags for one traversal.
///
/// A node is consumed once its content has been emitted as a component (or
/// folded into one). Consumed nodes are invisible to [`live_children`] and to
/// the markdown writer, which is what keeps content from being emitted twice.
///
/// [`live_children`]: ConsumedSet::live_children
#[derive(Debug, Clone)]
pub struct ConsumedSet {
    flags: Vec<bool>,
}

impl ConsumedSet {
    /// Create an empty set sized for `dom`.
    pub fn new(dom: &ArenaDom) -> Self {
        Self {
            flags: vec![false; dom.len()],
        }
    }

    pub fn is_consumed(&self, id: NodeId) -> bool {
        id.is_some() && self.flags.get(id.index()).copied().unwrap_or(false)
    }

    pub fn consume(&mut self, id: NodeId) {
        if let Some(flag) = self.flags.get_mut(id.index()) {
            *flag = true;
        }
    }

    /// Mark a node and all of its descendants consumed.
    pub fn consume_subtree(&mut self, dom: &ArenaDom, id: NodeId) {
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            self.consume(id);
            stack.extend(dom.children(id));
        }
    }

    /// Children of `parent` that have not been consumed, in document order.
    pub fn live_children<'a>(
        &'a self,
        dom: &'a ArenaDom,
        parent: NodeId,
    ) -> impl Iterator<Item = NodeId> + 'a {
        dom.children(parent).filter(|&c| !self.is_consumed(c))
    }

    /// Text of every unconsumed descendant text node of `id`.
    pub fn live_text(&self, dom: &ArenaDom, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_live_text(dom, id, &mut out);
        out
    }

    fn collect_live_text(&self, dom: &ArenaDom, id: NodeId, out: &mut String) {
        if self.is_consumed(id) {
            return;
        }
        if let Some(text) = dom.text(id) {
            out.push_str(text);
            return;
        }
        for child in dom.children(id) {
            self.collect_live_text(dom, child, out);
        }
    }
}
