//! DOM layer for the rendered ToC fragment.
//!
//! Each pipeline pass parses the fragment text once, mutates the tree in
//! place and serializes it back. The fragment is wrapped in a minimal
//! document so html5ever can parse it, and only the `<body>` subtree is
//! exposed.

pub mod arena;
pub mod serialize;
pub mod tree_sink;

use html5ever::driver::ParseOpts;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;

pub use arena::{Attribute, Dom, Node, NodeData, NodeId, attr_name, html_name};
pub use serialize::serialize_children;
use tree_sink::FragmentSink;

/// A parsed ToC fragment: the backing DOM plus the node holding the
/// fragment's content.
pub struct Fragment {
    pub dom: Dom,
    root: NodeId,
}

impl Fragment {
    /// Parse a rendered HTML fragment.
    pub fn parse(html: &str) -> Self {
        // Wrap in a minimal document structure for parsing
        let wrapped = format!("<html><head></head><body>{}</body></html>", html);
        let sink = parse_document(FragmentSink::new(), ParseOpts::default())
            .from_utf8()
            .one(wrapped.as_bytes());
        let dom = sink.into_dom();
        let root = dom
            .find_by_tag(dom.document(), "body")
            .unwrap_or(dom.document());
        Self { dom, root }
    }

    /// The node whose children are the fragment's content.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Serialize the fragment's content back to HTML text.
    pub fn to_html(&self) -> String {
        serialize_children(&self.dom, self.root)
    }
}
