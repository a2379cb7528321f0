//! Anchor annotation: inject type markers into the rendered ToC.

use crate::config::Config;
use crate::dom::{Attribute, Fragment, attr_name, html_name};
use crate::extension::{BuildContext, PageContext, TOC_KEY};

use super::{TYPE_CLASS, TYPE_CLASS_PREFIX};

/// Rewrite a page's ToC fragment, prepending a `<span>` type marker to every
/// anchor whose target id is known for this document.
///
/// Matched ids are drained from the mapping, so each object contributes at
/// most one marker across all pages rendered from the same document. No-op
/// when the feature is disabled, the page has no ToC, or no metadata was
/// collected for the document.
pub fn annotate_page_toc(
    config: &Config,
    ctx: &BuildContext,
    docname: &str,
    context: &mut PageContext,
) {
    if !config.type_annotation {
        return;
    }
    let Some(toc) = context.get(TOC_KEY) else {
        return;
    };

    let mut fragment = Fragment::parse(toc);

    let rewritten = ctx.with_metadata(docname, |types| {
        let anchors = fragment.dom.collect_by_tag(fragment.root(), "a");
        for anchor in anchors {
            // Anchor target: strip surrounding whitespace and leading '#'
            let obj_id = fragment
                .dom
                .get_attr(anchor, "href")
                .unwrap_or("#")
                .trim()
                .trim_start_matches('#')
                .to_string();

            let Some(obj_type) = types.remove(&obj_id) else {
                continue;
            };
            if obj_type.is_empty() {
                continue;
            }

            let marker = fragment.dom.create_element(
                html_name("span"),
                vec![Attribute {
                    name: attr_name("class"),
                    value: format!("{TYPE_CLASS} {TYPE_CLASS_PREFIX}-{obj_type}"),
                }],
            );
            fragment.dom.insert_first_child(anchor, marker);
        }
        fragment.to_html()
    });

    if let Some(html) = rewritten {
        context.insert(TOC_KEY.to_string(), html);
    }
}
