//! Model of a resolved document tree as handed over by the host.
//!
//! Only the shape the collector cares about is modeled: description blocks
//! (object documentation) carrying a domain and an object type, signature
//! children carrying the anchor identifiers, and plain containers for
//! everything else.

/// A resolved document, identified by its document name.
#[derive(Debug, Clone)]
pub struct DocTree {
    /// Document name, unique within a build (e.g. `api/index`).
    pub docname: String,
    /// Top-level nodes of the document.
    pub nodes: Vec<DocNode>,
}

impl DocTree {
    pub fn new(docname: impl Into<String>) -> Self {
        Self {
            docname: docname.into(),
            nodes: Vec::new(),
        }
    }

    /// Iterate over every description node in the tree, in document order,
    /// including descriptions nested inside other descriptions.
    pub fn descriptions(&self) -> impl Iterator<Item = &DocNode> {
        let mut found = Vec::new();
        for node in &self.nodes {
            collect_descriptions(node, &mut found);
        }
        found.into_iter()
    }
}

fn collect_descriptions<'a>(node: &'a DocNode, found: &mut Vec<&'a DocNode>) {
    if matches!(node, DocNode::Description { .. }) {
        found.push(node);
    }
    for child in node.children() {
        collect_descriptions(child, found);
    }
}

/// A node in the resolved document tree.
#[derive(Debug, Clone)]
pub enum DocNode {
    /// An object-documentation block with its classification.
    Description {
        /// Classification namespace (e.g. `py`, `js`, `cpp`).
        domain: String,
        /// Object kind within the domain (e.g. `function`, `class`).
        objtype: String,
        children: Vec<DocNode>,
    },
    /// A signature line carrying the anchor identifiers assigned to the
    /// documented object.
    Signature { ids: Vec<String> },
    /// Any other structural node (section, paragraph, ...).
    Container { children: Vec<DocNode> },
}

impl DocNode {
    /// Build a description node.
    pub fn description(
        domain: impl Into<String>,
        objtype: impl Into<String>,
        children: Vec<DocNode>,
    ) -> Self {
        DocNode::Description {
            domain: domain.into(),
            objtype: objtype.into(),
            children,
        }
    }

    /// Build a signature node with the given anchor ids.
    pub fn signature(ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        DocNode::Signature {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Build a plain container node.
    pub fn container(children: Vec<DocNode>) -> Self {
        DocNode::Container { children }
    }

    /// Direct children of this node.
    pub fn children(&self) -> &[DocNode] {
        match self {
            DocNode::Description { children, .. } | DocNode::Container { children } => children,
            DocNode::Signature { .. } => &[],
        }
    }
}
