//! Verbatim markup output for arena nodes.
//!
//! Tables and unsupported elements are handed to clients as HTML, so they go
//! through html5ever's own serializer: attribute escaping, void elements and
//! raw-text elements (`<script>`, `<style>`) come out the way a browser would
//! write them.

use std::io;

use html5ever::serialize::{Serialize, SerializeOpts, Serializer, TraversalScope, serialize};

use super::arena::{ArenaDom, NodeData, NodeId};
use crate::error::{Error, Result};

/// A subtree of the arena, viewed through html5ever's `Serialize` trait.
struct Subtree<'a> {
    dom: &'a ArenaDom,
    root: NodeId,
}

impl Subtree<'_> {
    fn write_node<S: Serializer>(&self, serializer: &mut S, id: NodeId) -> io::Result<()> {
        let Some(node) = self.dom.get(id) else {
            return Ok(());
        };

        match &node.data {
            NodeData::Element { name, attrs } => {
                serializer.start_elem(
                    name.clone(),
                    attrs.iter().map(|a| (&a.name, a.value.as_str())),
                )?;
                self.write_children(serializer, id)?;
                serializer.end_elem(name.clone())
            }
            NodeData::Text(text) => serializer.write_text(text),
            NodeData::Comment(text) => serializer.write_comment(text),
            NodeData::Document => self.write_children(serializer, id),
            NodeData::Doctype => Ok(()),
        }
    }

    fn write_children<S: Serializer>(&self, serializer: &mut S, id: NodeId) -> io::Result<()> {
        for child in self.dom.children(id) {
            self.write_node(serializer, child)?;
        }
        Ok(())
    }
}

impl Serialize for Subtree<'_> {
    fn serialize<S>(&self, serializer: &mut S, traversal_scope: TraversalScope) -> io::Result<()>
    where
        S: Serializer,
    {
        match traversal_scope {
            TraversalScope::IncludeNode => self.write_node(serializer, self.root),
            TraversalScope::ChildrenOnly(_) => self.write_children(serializer, self.root),
        }
    }
}

/// Serialize a node together with its own tags.
pub fn outer_html(dom: &ArenaDom, id: NodeId) -> Result<String> {
    let mut buf = Vec::new();
    let opts = SerializeOpts {
        traversal_scope: TraversalScope::IncludeNode,
        ..Default::default()
    };
    serialize(&mut buf, &Subtree { dom, root: id }, opts).map_err(Error::Serialize)?;
    Ok(String::from_utf8(buf)?)
}
