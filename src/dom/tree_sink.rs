//! Glue between html5ever's tree builder and the fragment arena.

use std::borrow::Cow;
use std::cell::{Cell, RefCell};

use html5ever::tendril::StrTendril;
use html5ever::tree_builder::{ElementFlags, NodeOrText, QuirksMode, TreeSink};
use html5ever::{Attribute as ParserAttribute, QualName};

use super::arena::{Attribute, Dom, NodeData, NodeId};

/// Handle handed out to the tree builder; a plain arena id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeHandle(pub NodeId);

impl Default for NodeHandle {
    fn default() -> Self {
        NodeHandle(NodeId::NONE)
    }
}

/// Builds the arena [`Dom`] while html5ever parses the wrapped fragment.
///
/// The `TreeSink` trait takes `&self` everywhere, so the arena sits behind a
/// `RefCell`; every borrow stays confined to a single trait method. The
/// quirks mode is recorded but has no bearing on list rewriting.
pub struct FragmentSink {
    dom: RefCell<Dom>,
    quirks_mode: Cell<QuirksMode>,
}

impl Default for FragmentSink {
    fn default() -> Self {
        Self::new()
    }
}

impl FragmentSink {
    pub fn new() -> Self {
        Self {
            dom: RefCell::new(Dom::new()),
            quirks_mode: Cell::new(QuirksMode::NoQuirks),
        }
    }

    /// Consume the sink and return the finished arena.
    pub fn into_dom(self) -> Dom {
        self.dom.into_inner()
    }

    fn attach(&self, parent: NodeId, child: NodeOrText<NodeHandle>) {
        let mut dom = self.dom.borrow_mut();
        match child {
            NodeOrText::AppendNode(node) => dom.append(parent, node.0),
            NodeOrText::AppendText(text) => dom.append_text(parent, &text),
        }
    }
}

impl TreeSink for FragmentSink {
    type Handle = NodeHandle;
    type Output = Self;
    type ElemName<'a>
        = &'a QualName
    where
        Self: 'a;

    fn finish(self) -> Self::Output {
        self
    }

    fn parse_error(&self, _msg: Cow<'static, str>) {
        // Rendered ToC markup is occasionally sloppy; recovery is the
        // parser's job and the rewrite works on whatever tree comes out.
    }

    fn get_document(&self) -> Self::Handle {
        NodeHandle(self.dom.borrow().document())
    }

    fn elem_name<'a>(&'a self, target: &'a Self::Handle) -> Self::ElemName<'a> {
        static OUTSIDE: QualName = QualName {
            prefix: None,
            ns: html5ever::ns!(),
            local: html5ever::local_name!(""),
        };

        let dom = self.dom.borrow();
        match dom.get(target.0).map(|n| &n.data) {
            Some(NodeData::Element { name, .. }) => {
                // SAFETY: nodes are only ever appended to the arena, never
                // dropped, so the QualName sits at a stable address for the
                // sink's lifetime. The RefCell guard cannot express that,
                // hence the manual lifetime extension.
                unsafe { std::mem::transmute::<&QualName, &'a QualName>(name) }
            }
            _ => &OUTSIDE,
        }
    }

    fn create_element(
        &self,
        name: QualName,
        attrs: Vec<ParserAttribute>,
        _flags: ElementFlags,
    ) -> Self::Handle {
        let attrs = attrs
            .into_iter()
            .map(|a| Attribute {
                name: a.name,
                value: a.value.to_string(),
            })
            .collect();
        NodeHandle(self.dom.borrow_mut().create_element(name, attrs))
    }

    fn create_comment(&self, text: StrTendril) -> Self::Handle {
        NodeHandle(self.dom.borrow_mut().create_comment(text.to_string()))
    }

    fn create_pi(&self, _target: StrTendril, _data: StrTendril) -> Self::Handle {
        // Processing instructions never occur in rendered ToC markup; an
        // empty comment keeps the handle valid without inventing a node kind.
        NodeHandle(self.dom.borrow_mut().create_comment(String::new()))
    }

    fn append(&self, parent: &Self::Handle, child: NodeOrText<Self::Handle>) {
        self.attach(parent.0, child);
    }

    fn append_based_on_parent_node(
        &self,
        element: &Self::Handle,
        prev_element: &Self::Handle,
        child: NodeOrText<Self::Handle>,
    ) {
        let parent = self
            .dom
            .borrow()
            .get(element.0)
            .map_or(NodeId::NONE, |n| n.parent);
        if parent.is_some() {
            self.attach(parent, child);
        } else {
            self.attach(prev_element.0, child);
        }
    }

    fn append_doctype_to_document(
        &self,
        _name: StrTendril,
        _public_id: StrTendril,
        _system_id: StrTendril,
    ) {
        // The wrapper document added around the fragment carries no doctype.
    }

    fn get_template_contents(&self, target: &Self::Handle) -> Self::Handle {
        // Template contents play no role in list rewriting; treat the
        // element as its own content.
        *target
    }

    fn same_node(&self, x: &Self::Handle, y: &Self::Handle) -> bool {
        x.0 == y.0
    }

    fn set_quirks_mode(&self, mode: QuirksMode) {
        self.quirks_mode.set(mode);
    }

    fn append_before_sibling(&self, sibling: &Self::Handle, new_node: NodeOrText<Self::Handle>) {
        let mut dom = self.dom.borrow_mut();
        let node = match new_node {
            NodeOrText::AppendNode(node) => node.0,
            NodeOrText::AppendText(text) => dom.create_text(text.to_string()),
        };
        dom.insert_before(sibling.0, node);
    }

    fn add_attrs_if_missing(&self, target: &Self::Handle, attrs: Vec<ParserAttribute>) {
        let mut dom = self.dom.borrow_mut();
        let Some(node) = dom.get_mut(target.0) else {
            return;
        };
        let NodeData::Element { attrs: existing, .. } = &mut node.data else {
            return;
        };
        for attr in attrs {
            if existing.iter().all(|a| a.name != attr.name) {
                existing.push(Attribute {
                    name: attr.name,
                    value: attr.value.to_string(),
                });
            }
        }
    }

    fn remove_from_parent(&self, target: &Self::Handle) {
        self.dom.borrow_mut().detach(target.0);
    }

    fn reparent_children(&self, node: &Self::Handle, new_parent: &Self::Handle) {
        self.dom.borrow_mut().reparent_children(node.0, new_parent.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use html5ever::driver::ParseOpts;
    use html5ever::parse_document;
    use html5ever::tendril::TendrilSink;

    fn parse(html: &str) -> Dom {
        parse_document(FragmentSink::new(), ParseOpts::default())
            .from_utf8()
            .one(html.as_bytes())
            .into_dom()
    }

    #[test]
    fn test_attributes_and_classes_survive_parsing() {
        let dom = parse(r##"<html><body><a href="#x" class="ref internal">X</a></body></html>"##);

        let a = dom.find_by_tag(dom.document(), "a").unwrap();
        assert_eq!(dom.get_attr(a, "href"), Some("#x"));
        assert_eq!(dom.element_classes(a), ["ref", "internal"]);
    }

    #[test]
    fn test_entity_split_text_lands_in_one_node() {
        let dom = parse("<html><body><li>a&amp;b</li></body></html>");

        let li = dom.find_by_tag(dom.document(), "li").unwrap();
        let children: Vec<_> = dom.children(li).collect();
        assert_eq!(children.len(), 1);
        assert_eq!(dom.text_content(children[0]), Some("a&b"));
    }

    #[test]
    fn test_implied_end_tags_close_list_items() {
        let dom = parse("<html><body><ul><li>a<li>b</ul></body></html>");

        let ul = dom.find_by_tag(dom.document(), "ul").unwrap();
        assert_eq!(dom.collect_by_tag(ul, "li").len(), 2);
    }

    #[test]
    fn test_doctype_leaves_no_node_behind() {
        let dom = parse("<!DOCTYPE html><html><body><ul></ul></body></html>");

        // Exactly the <html> element under the document root
        let top: Vec<_> = dom.children(dom.document()).collect();
        assert_eq!(top.len(), 1);
        assert_eq!(dom.element_name(top[0]).unwrap().as_ref(), "html");
    }
}
