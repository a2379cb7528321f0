//! Depth-first walk over a nested `<ul>`/`<li>` structure.

use crate::dom::{Dom, NodeId};

/// Per-entry record produced by [`ListWalk`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListEntry {
    /// Current nesting level.
    pub depth: usize,
    /// The `<li>` node itself.
    pub item: NodeId,
    /// The nested `<ul>` directly under this `<li>`, if any.
    pub nested: Option<NodeId>,
    /// Whether some `<li>` at this level has a nested `<ul>`.
    pub level_has_nested: bool,
}

/// Lazy pre-order iterator over the entries of a nested list.
///
/// At each `<ul>` level the direct `<li>` children are gathered and a
/// one-step lookahead decides whether any of them owns a nested `<ul>`.
/// That flag is reported for every entry at the level, including leaves,
/// so later logic can align leaf entries with expandable siblings. Each
/// entry's subtree is exhausted before its next sibling is visited.
///
/// The walk is read-only and single-shot.
pub struct ListWalk<'a> {
    dom: &'a Dom,
    stack: Vec<Level>,
    start_depth: usize,
}

struct Level {
    items: Vec<NodeId>,
    next: usize,
    has_nested: bool,
}

impl<'a> ListWalk<'a> {
    /// Walk the list rooted at `root_ul`, reporting the root level at depth 0.
    pub fn new(dom: &'a Dom, root_ul: NodeId) -> Self {
        Self::with_depth(dom, root_ul, 0)
    }

    /// Walk the list rooted at `root_ul`, reporting the root level at
    /// `start_depth`.
    pub fn with_depth(dom: &'a Dom, root_ul: NodeId, start_depth: usize) -> Self {
        let mut walk = Self {
            dom,
            stack: Vec::new(),
            start_depth,
        };
        walk.push_level(root_ul);
        walk
    }

    fn push_level(&mut self, ul: NodeId) {
        let items: Vec<NodeId> = self
            .dom
            .children(ul)
            .filter(|&c| self.dom.element_name(c).is_some_and(|n| n.as_ref() == "li"))
            .collect();

        // One-step lookahead: does any item at this level have a nested list?
        let has_nested = items
            .iter()
            .any(|&li| direct_child_list(self.dom, li).is_some());

        self.stack.push(Level {
            items,
            next: 0,
            has_nested,
        });
    }
}

/// The first `<ul>` that is a direct child of the given `<li>`.
fn direct_child_list(dom: &Dom, li: NodeId) -> Option<NodeId> {
    dom.children(li)
        .find(|&c| dom.element_name(c).is_some_and(|n| n.as_ref() == "ul"))
}

impl<'a> Iterator for ListWalk<'a> {
    type Item = ListEntry;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let level = self.stack.last_mut()?;
            if level.next >= level.items.len() {
                self.stack.pop();
                continue;
            }

            let item = level.items[level.next];
            level.next += 1;

            let has_nested = level.has_nested;
            let nested = if has_nested {
                direct_child_list(self.dom, item)
            } else {
                None
            };
            let depth = self.start_depth + self.stack.len() - 1;

            if let Some(ul) = nested {
                self.push_level(ul);
            }

            return Some(ListEntry {
                depth,
                item,
                nested,
                level_has_nested: has_nested,
            });
        }
    }
}
