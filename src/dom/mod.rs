//! Arena DOM for article fragments.
//!
//! html5ever builds an [`ArenaDom`] through [`ArenaSink`]; the parser then
//! walks it with a [`ConsumedSet`] tracking which nodes have already been
//! turned into components.

mod arena;
mod consumed;
mod serialize;
mod tag;
mod tree_sink;

pub use arena::{ArenaDom, Attribute, Node, NodeData, NodeId};
pub use consumed::ConsumedSet;
pub use serialize::outer_html;
pub use tag::{ListKind, Tag, UnsupportedTag};
pub use tree_sink::ArenaSink;

use html5ever::driver::ParseOpts;
use html5ever::tendril::TendrilSink;
use html5ever::{LocalName, QualName, ns, parse_document};

/// A parsed article fragment with its synthetic root.
pub struct Fragment {
    pub dom: ArenaDom,
    /// The `<div>` that wraps every top-level node of the input.
    pub root: NodeId,
}

/// Parse an HTML fragment and wrap its top-level nodes in a single `<div>`.
///
/// The input is parsed in body context so leading `<script>`, `<style>` or
/// comments stay with the article content instead of moving to `<head>`.
/// Whatever ends up in the body is then reparented under a fresh wrapper
/// element, giving the traversal exactly one root no matter how the fragment
/// was shaped.
pub fn parse_fragment(html: &str) -> Fragment {
    let mut input = String::with_capacity(html.len() + 6);
    input.push_str("<body>");
    input.push_str(html);

    let sink = ArenaSink::new();
    let mut dom = parse_document(sink, ParseOpts::default())
        .from_utf8()
        .one(input.as_bytes())
        .into_dom();

    let body = dom.find_by_tag("body").unwrap_or_else(|| dom.document());
    let root = dom.create_element(QualName::new(None, ns!(html), LocalName::from("div")), vec![]);
    let children: Vec<_> = dom.children(body).collect();
    for child in children {
        dom.detach(child);
        dom.append(root, child);
    }
    dom.append(body, root);

    Fragment { dom, root }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_has_single_root() {
        let fragment = parse_fragment("<p>A</p><h1>B</h1>text");
        let dom = &fragment.dom;

        assert!(dom.is_tag(fragment.root, "div"));
        let tags: Vec<_> = dom
            .children(fragment.root)
            .map(|c| dom.element_name(c).map(|n| n.to_string()))
            .collect();
        assert_eq!(
            tags,
            vec![Some("p".to_string()), Some("h1".to_string()), None]
        );
    }

    #[test]
    fn test_leading_script_stays_in_fragment() {
        let fragment = parse_fragment("<script>alert(1)</script>");
        let script = fragment.dom.find_by_tag("script").unwrap();

        assert_eq!(fragment.dom.parent(script), Some(fragment.root));
    }

    #[test]
    fn test_unbalanced_close_tags_stay_under_root() {
        let fragment = parse_fragment("<p>one</p></div><p>two</p>");
        let dom = &fragment.dom;

        let paragraphs = dom
            .children(fragment.root)
            .filter(|&c| dom.is_tag(c, "p"))
            .count();
        assert_eq!(paragraphs, 2);
    }

    #[test]
    fn test_empty_input() {
        let fragment = parse_fragment("");
        assert_eq!(fragment.dom.children(fragment.root).count(), 0);
    }
}
