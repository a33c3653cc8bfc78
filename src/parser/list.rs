//! List aggregation.
//!
//! A `<ul>`/`<ol>` subtree becomes one or more list components. Rows are
//! collected into a pending aggregation until something interrupts it:
//!
//! - a nested list of the *same* kind folds its rows into the running
//!   aggregation at a deeper level;
//! - a nested list of the *other* kind closes the running aggregation and
//!   produces its own components before a fresh aggregation resumes;
//! - any other immediate node closes the aggregation, is emitted in place,
//!   and a fresh aggregation resumes after it.
//!
//! Row levels and numbered indexes come from the source tree, so they are
//! unaffected by where a list gets split.

use crate::dom::{ListKind, NodeId, Tag};
use crate::markdown::render_nodes;
use crate::model::{ListRow, MarticleComponent, NumberedListRow};

use super::Class;
use super::visitor::Traversal;

struct Row {
    level: u32,
    index: u32,
    content: String,
}

/// Rows waiting to become one list component.
struct Aggregation {
    kind: ListKind,
    rows: Vec<Row>,
}

impl Aggregation {
    fn new(kind: ListKind) -> Self {
        Self {
            kind,
            rows: Vec::new(),
        }
    }

    /// Take the pending rows as a component, leaving the aggregation empty.
    fn take(&mut self) -> Option<MarticleComponent> {
        if self.rows.is_empty() {
            return None;
        }
        let rows = std::mem::take(&mut self.rows);

        Some(match self.kind {
            ListKind::Unordered => MarticleComponent::BulletedList {
                rows: rows
                    .into_iter()
                    .map(|r| ListRow {
                        level: r.level,
                        content: r.content,
                    })
                    .collect(),
            },
            ListKind::Ordered => MarticleComponent::NumberedList {
                rows: rows
                    .into_iter()
                    .map(|r| NumberedListRow {
                        level: r.level,
                        content: r.content,
                        index: r.index,
                    })
                    .collect(),
            },
        })
    }
}

impl Traversal<'_> {
    /// Emit the components for a root list element.
    pub(super) fn visit_list(&mut self, list: NodeId, kind: ListKind) {
        let mut aggregation = Aggregation::new(kind);
        self.aggregate_list(list, &mut aggregation);
        self.close(&mut aggregation);
    }

    fn close(&mut self, aggregation: &mut Aggregation) {
        if let Some(component) = aggregation.take() {
            self.emit(component);
        }
    }

    /// Walk the children of a list element (or of a stray wrapper inside
    /// one) looking for items.
    fn aggregate_list(&mut self, node: NodeId, aggregation: &mut Aggregation) {
        let children: Vec<_> = self.consumed.live_children(self.dom, node).collect();

        for child in children {
            if self.consumed.is_consumed(child) {
                continue;
            }

            if self.dom.is_tag(child, "li") {
                self.aggregate_item(child, aggregation);
            } else if let Some(kind) = self.list_kind(child) {
                self.nested_list(child, kind, aggregation);
            } else if Class::of_node(self.dom, child) == Class::Immediate {
                self.close(aggregation);
                self.emit_immediate(child);
            } else if self.dom.is_element(child) {
                self.aggregate_list(child, aggregation);
            }
            // Text between items is not part of any row.
            self.consumed.consume_subtree(self.dom, child);
        }
    }

    fn aggregate_item(&mut self, item: NodeId, aggregation: &mut Aggregation) {
        self.scan_item(item, item, aggregation);

        let rest: Vec<_> = self.consumed.live_children(self.dom, item).collect();
        self.push_row(item, &rest, aggregation);
        self.consumed.consume_subtree(self.dom, item);
    }

    /// Visit the content of an item. Block wrappers (`p`, `div`,
    /// `blockquote`) are transparent here: their text joins the row.
    fn scan_item(&mut self, item: NodeId, node: NodeId, aggregation: &mut Aggregation) {
        let children: Vec<_> = self.consumed.live_children(self.dom, node).collect();

        for child in children {
            if self.consumed.is_consumed(child) {
                continue;
            }

            if let Some(kind) = self.list_kind(child) {
                self.flush_row(item, child, aggregation);
                self.nested_list(child, kind, aggregation);
                self.consumed.consume_subtree(self.dom, child);
            } else if Class::of_node(self.dom, child) == Class::Immediate {
                self.flush_row(item, child, aggregation);
                self.close(aggregation);
                self.emit_immediate(child);
                self.consumed.consume_subtree(self.dom, child);
            } else if self.dom.is_element(child) {
                self.scan_item(item, child, aggregation);
            }
        }
    }

    fn nested_list(&mut self, list: NodeId, kind: ListKind, aggregation: &mut Aggregation) {
        if kind == aggregation.kind {
            self.aggregate_list(list, aggregation);
        } else {
            self.close(aggregation);
            self.visit_list(list, kind);
        }
    }

    /// Item content before `child` becomes a row of its own.
    fn flush_row(&mut self, item: NodeId, child: NodeId, aggregation: &mut Aggregation) {
        let nodes = self.preceding_live(item, child);
        self.push_row(item, &nodes, aggregation);
    }

    fn push_row(&mut self, item: NodeId, nodes: &[NodeId], aggregation: &mut Aggregation) {
        if nodes.is_empty() {
            return;
        }

        let content = render_nodes(self.dom, &self.consumed, nodes, self.options);
        for &id in nodes {
            self.consumed.consume_subtree(self.dom, id);
        }
        if content.is_empty() {
            return;
        }

        aggregation.rows.push(Row {
            level: self.level(item),
            index: self.index(item),
            content,
        });
    }

    fn list_kind(&self, id: NodeId) -> Option<ListKind> {
        match self.dom.element_name(id).map(Tag::from_local_name) {
            Some(Tag::List(kind)) => Some(kind),
            _ => None,
        }
    }

    /// Number of enclosing lists, minus one.
    fn level(&self, item: NodeId) -> u32 {
        let lists = self
            .dom
            .ancestors(item)
            .filter(|&a| self.list_kind(a).is_some())
            .count();
        lists.saturating_sub(1) as u32
    }

    /// Position among the `<li>` siblings in the source tree.
    fn index(&self, item: NodeId) -> u32 {
        self.dom
            .preceding_siblings(item)
            .filter(|&s| self.dom.is_tag(s, "li"))
            .count() as u32
    }
}
