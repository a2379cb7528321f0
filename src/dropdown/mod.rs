//! CSS-only dropdown injection for nested ToC sections.
//!
//! Rewrites the rendered ToC fragment by adding:
//! - toggle controls (`<input>` + `<label>`) to entries that contain a
//!   nested list,
//! - alignment classes to sibling leaf entries so everything lines up.
//!
//! The affordance is pure CSS: the checkbox holds the open/closed state and
//! the label is the visible chevron; no scripting is involved.

pub mod walker;

use log::trace;

pub use walker::{ListEntry, ListWalk};

use crate::config::Config;
use crate::dom::{Attribute, Dom, Fragment, NodeId, attr_name, html_name};
use crate::extension::{PageContext, TOC_KEY};

/// Class on the checkbox toggle; doubles as the marker prefix that the
/// ancestor-modified check looks for.
const TOGGLE_CLASS: &str = "slt-dropdown";
/// Class on the label that renders the dropdown chevron.
const ICON_CLASS: &str = "slt-dropdown-icon";
/// Class on the nearest ancestor list of the starting depth level.
const BRANCH_CLASS: &str = "slt-dropdown-branch";
/// Class appended to nested lists under a toggled entry.
const DEPTH_CLASS: &str = "slt-dropdown-depth";
/// Alignment class for leaf entries sitting next to expandable siblings.
const LEAF_CLASS: &str = "slt-dropdown-leaf";

/// Rewrite a page's ToC fragment, adding dropdown toggles and alignment
/// classes. No-op when the feature is disabled or the page has no ToC.
pub fn rewrite_page_toc(config: &Config, context: &mut PageContext) {
    if !config.dropdown {
        return;
    }
    let Some(toc) = context.get(TOC_KEY) else {
        return;
    };

    let mut fragment = Fragment::parse(toc);
    let Some(root_ul) = fragment.dom.find_by_tag(fragment.root(), "ul") else {
        // Nothing list-shaped to annotate
        return;
    };

    let toggles = inject_dropdowns(&mut fragment.dom, root_ul, config.skip_depth());
    trace!("injected {toggles} dropdown toggles");

    context.insert(TOC_KEY.to_string(), fragment.to_html());
}

/// Inject dropdown controls into the list rooted at `root_ul`.
///
/// Entries above `skip_depth` are traversed but left untouched. Returns the
/// number of toggle controls inserted.
///
/// The walk itself is read-only; records are gathered first and mutations
/// applied in walk order, so the ancestor-modified check for an entry sees
/// the injections already performed on shallower levels.
pub fn inject_dropdowns(dom: &mut Dom, root_ul: NodeId, skip_depth: usize) -> usize {
    let entries: Vec<ListEntry> = ListWalk::new(dom, root_ul).collect();

    // Counter used to generate unique IDs for toggle inputs
    let mut toggle_index: usize = 0;

    for entry in entries {
        if entry.depth < skip_depth {
            continue;
        }

        // Mark the starting depth's list so the branch can be customized
        if entry.level_has_nested && entry.depth == skip_depth {
            if let Some(parent_ul) = dom.find_ancestor(entry.item, "ul") {
                dom.add_class(parent_ul, BRANCH_CLASS);
            }
        }

        if let Some(nested_ul) = entry.nested {
            // Expandable entry: pair a checkbox toggle with its label
            toggle_index += 1;
            let toggle_id = format!("{TOGGLE_CLASS}-{toggle_index}");

            let input = dom.create_element(
                html_name("input"),
                vec![
                    attribute("type", "checkbox"),
                    attribute("role", "switch"),
                    attribute("id", &toggle_id),
                    attribute("class", TOGGLE_CLASS),
                ],
            );
            let label = dom.create_element(
                html_name("label"),
                vec![
                    attribute("for", &toggle_id),
                    attribute("class", ICON_CLASS),
                ],
            );

            // Label goes inside the first child (usually the link), the
            // toggle before it, so CSS can reach the nested list via `~`
            if let Some(first_child) = dom.first_element_child(entry.item) {
                dom.insert_first_child(first_child, label);
            }
            dom.insert_first_child(entry.item, input);

            dom.add_class(nested_ul, DEPTH_CLASS);
        } else if entry.level_has_nested
            || ancestor_entry_modified(dom, entry.item, TOGGLE_CLASS, entry.depth, skip_depth)
        {
            // Leaf next to an expandable sibling, or trailing leaf under a
            // modified parent: align it with the toggled entries
            dom.add_class(entry.item, LEAF_CLASS);
        }
    }

    toggle_index
}

/// Determine whether the nearest ancestor `<li>` of an entry was already
/// modified by dropdown injection.
///
/// An ancestor counts as modified when a class starting with `hint` appears
/// either on the ancestor itself or on its first element child (that is
/// where toggle controls are injected). Entries at depth 0 or exactly at the
/// configured skip depth never take this path.
fn ancestor_entry_modified(
    dom: &Dom,
    item: NodeId,
    hint: &str,
    depth: usize,
    skip_depth: usize,
) -> bool {
    if depth == 0 || depth == skip_depth {
        return false;
    }

    let Some(parent_li) = dom.find_ancestor(item, "li") else {
        return false;
    };

    if dom.class_starts_with(parent_li, hint) {
        return true;
    }

    for child in dom.children(parent_li) {
        if dom.is_element(child) {
            // First element child found without the hint (e.g. a bare <a>)
            return dom.class_starts_with(child, hint);
        }
    }

    false
}

fn attribute(name: &str, value: &str) -> Attribute {
    Attribute {
        name: attr_name(name),
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewrite(html: &str, skip_depth: usize) -> String {
        let mut fragment = Fragment::parse(html);
        let root_ul = fragment
            .dom
            .find_by_tag(fragment.root(), "ul")
            .expect("fixture should contain a list");
        inject_dropdowns(&mut fragment.dom, root_ul, skip_depth);
        fragment.to_html()
    }

    #[test]
    fn test_expandable_entry_gets_toggle_and_label() {
        let html = r##"<ul><li><a href="#x">X</a><ul><li><a href="#y">Y</a></li></ul></li></ul>"##;
        let out = rewrite(html, 0);

        // Toggle first in the <li>, label first in the <a>, paired by id
        assert!(out.contains(
            r#"<input type="checkbox" role="switch" id="slt-dropdown-1" class="slt-dropdown">"#
        ));
        assert!(out.contains(r##"<a href="#x"><label for="slt-dropdown-1" class="slt-dropdown-icon"></label>X</a>"##));
        assert!(out.contains(r#"<ul class="slt-dropdown-depth">"#));
    }

    #[test]
    fn test_toggle_label_pairing_is_referential() {
        let html = "<ul>\
             <li><a href=\"#a\">A</a><ul><li><a href=\"#a1\">A1</a></li></ul></li>\
             <li><a href=\"#b\">B</a><ul><li><a href=\"#b1\">B1</a></li></ul></li>\
           </ul>";
        let out = rewrite(html, 0);

        assert!(out.contains(r#"id="slt-dropdown-1""#));
        assert!(out.contains(r#"for="slt-dropdown-1""#));
        assert!(out.contains(r#"id="slt-dropdown-2""#));
        assert!(out.contains(r#"for="slt-dropdown-2""#));
    }

    #[test]
    fn test_branch_class_applied_exactly_once() {
        let html = "<ul>\
             <li><a href=\"#a\">A</a><ul><li><a href=\"#a1\">A1</a></li></ul></li>\
             <li><a href=\"#b\">B</a><ul><li><a href=\"#b1\">B1</a></li></ul></li>\
           </ul>";
        let out = rewrite(html, 0);

        // Two qualifying entries at the skip depth, but the ancestor list is
        // marked only once
        assert_eq!(out.matches("slt-dropdown-branch").count(), 1);
    }

    #[test]
    fn test_leaf_alignment_next_to_expandable_sibling() {
        let html = "<ul>\
             <li><a href=\"#a\">A</a><ul><li><a href=\"#a1\">A1</a></li></ul></li>\
             <li><a href=\"#b\">B</a></li>\
           </ul>";
        let out = rewrite(html, 0);

        assert!(out.contains(r##"<li class="slt-dropdown-leaf"><a href="#b">B</a></li>"##));
    }

    #[test]
    fn test_trailing_leaf_under_modified_parent() {
        // The sole nested entry has no expandable sibling, but its parent
        // was toggled at a shallower depth, so it still gets aligned
        let html = r##"<ul><li><a href="#x">X</a><ul><li><a href="#y">Y</a></li></ul></li></ul>"##;
        let out = rewrite(html, 0);

        assert!(out.contains(r##"<li class="slt-dropdown-leaf"><a href="#y">Y</a></li>"##));
    }

    #[test]
    fn test_skip_depth_leaves_outer_levels_untouched() {
        let html = "<ul>\
             <li><a href=\"#a\">A</a>\
               <ul><li><a href=\"#a1\">A1</a><ul><li><a href=\"#a1x\">A1X</a></li></ul></li></ul>\
             </li>\
           </ul>";
        let out = rewrite(html, 1);

        // Depth 0 gets no toggle even though it has a nested list
        assert!(!out.contains(r##"<a href="#a"><label"##));
        // Depth 1 does
        assert!(out.contains(r##"<a href="#a1"><label for="slt-dropdown-1""##));
        // Only one toggle overall
        assert!(!out.contains("slt-dropdown-2"));
    }

    #[test]
    fn test_no_leaf_class_at_skip_depth_via_ancestor_path() {
        // Depth 1 equals the skip depth here, so the ancestor-modified path
        // must not fire even though the parent was toggled
        let html = "<ul>\
             <li><a href=\"#a\">A</a><ul>\
               <li><a href=\"#a1\">A1</a><ul><li><a href=\"#deep\">D</a></li></ul></li>\
             </ul></li>\
           </ul>";
        let out = rewrite(html, 1);

        // The depth-2 sole leaf aligns via the ancestor-modified path
        assert!(out.contains(r##"<li class="slt-dropdown-leaf"><a href="#deep">D</a></li>"##));
        // The depth-0 entry never gains the leaf class
        assert!(!out.contains(r##"slt-dropdown-leaf"><a href="#a">"##));
    }

    #[test]
    fn test_disabled_flag_is_passthrough() {
        let config = Config {
            dropdown: false,
            ..Default::default()
        };
        let html = r##"<ul><li><a href="#x">X</a></li></ul>"##;
        let mut context = PageContext::new();
        context.insert(TOC_KEY.to_string(), html.to_string());

        rewrite_page_toc(&config, &mut context);
        assert_eq!(context.get(TOC_KEY).unwrap(), html);
    }

    #[test]
    fn test_missing_toc_is_ignored() {
        let config = Config::default();
        let mut context = PageContext::new();
        rewrite_page_toc(&config, &mut context);
        assert!(context.is_empty());
    }

    #[test]
    fn test_fragment_without_list_is_untouched() {
        let config = Config::default();
        let mut context = PageContext::new();
        context.insert(TOC_KEY.to_string(), "<p>no list here</p>".to_string());

        rewrite_page_toc(&config, &mut context);
        assert_eq!(context.get(TOC_KEY).unwrap(), "<p>no list here</p>");
    }

    #[test]
    fn test_rewalk_preserves_structure() {
        let html = "<ul>\
             <li><a href=\"#a\">A</a><ul><li><a href=\"#a1\">A1</a></li></ul></li>\
             <li><a href=\"#b\">B</a></li>\
           </ul>";

        let before = {
            let fragment = Fragment::parse(html);
            let ul = fragment.dom.find_by_tag(fragment.root(), "ul").unwrap();
            ListWalk::new(&fragment.dom, ul)
                .map(|e| e.depth)
                .collect::<Vec<_>>()
        };

        let out = rewrite(html, 0);
        let fragment = Fragment::parse(&out);
        let ul = fragment.dom.find_by_tag(fragment.root(), "ul").unwrap();
        let after: Vec<_> = ListWalk::new(&fragment.dom, ul).map(|e| e.depth).collect();

        assert_eq!(before, after);
    }
}
