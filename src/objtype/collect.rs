//! Per-document object metadata collection.

use log::debug;

use crate::config::Config;
use crate::doctree::{DocNode, DocTree};
use crate::extension::{BuildContext, TypeMap};

/// Scan a resolved document for description blocks and store the resulting
/// anchor-id → object-type mapping in the build context.
///
/// The mapping is consumed (drained) later by the annotation pass for the
/// same document. When a debug report is configured, every `"domain-type"`
/// composite also lands in the build-wide discovered set.
pub fn collect_types(config: &Config, ctx: &BuildContext, doctree: &DocTree) {
    if !config.type_annotation {
        return;
    }

    let collect_composites = config.debug_report_requested();
    let mut types = TypeMap::new();

    for desc in doctree.descriptions() {
        let DocNode::Description {
            domain,
            objtype,
            children,
        } = desc
        else {
            continue;
        };

        // The anchor id comes from the first direct signature child; an
        // object without one is stored under the empty id anyway so later
        // lookups stay total
        let mut obj_id = String::new();
        for child in children {
            if let DocNode::Signature { ids } = child {
                if let Some(first) = ids.first() {
                    obj_id = first.clone();
                }
                break;
            }
        }

        types.insert(obj_id, objtype.clone());

        if collect_composites {
            ctx.record_discovered(format!("{domain}-{objtype}"));
        }
    }

    debug!(
        "collected {} object type entries from {}",
        types.len(),
        doctree.docname
    );
    ctx.store_metadata(&doctree.docname, types);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> DocTree {
        DocTree {
            docname: "api".to_string(),
            nodes: vec![
                DocNode::description("py", "function", vec![DocNode::signature(["helper"])]),
                DocNode::description(
                    "py",
                    "class",
                    vec![DocNode::signature(["MyClass", "alias.MyClass"])],
                ),
                // No signature at all: stored under the empty id
                DocNode::description("js", "function", vec![]),
            ],
        }
    }

    #[test]
    fn test_collects_first_id_per_description() {
        let config = Config::default();
        let ctx = BuildContext::new("/tmp", "proj", "1.0");

        collect_types(&config, &ctx, &sample_tree());

        ctx.with_metadata("api", |map| {
            assert_eq!(map.get("helper").map(String::as_str), Some("function"));
            assert_eq!(map.get("MyClass").map(String::as_str), Some("class"));
            assert_eq!(map.get("").map(String::as_str), Some("function"));
            assert_eq!(map.len(), 3);
        })
        .expect("mapping should be stored");
    }

    #[test]
    fn test_composites_only_recorded_when_report_configured() {
        let ctx = BuildContext::new("/tmp", "proj", "1.0");
        collect_types(&Config::default(), &ctx, &sample_tree());
        assert!(ctx.discovered().is_empty());

        let config = Config {
            type_debug_file: "report.txt".to_string(),
            ..Default::default()
        };
        collect_types(&config, &ctx, &sample_tree());
        let discovered: Vec<_> = ctx.discovered().into_iter().collect();
        assert_eq!(discovered, vec!["js-function", "py-class", "py-function"]);
    }

    #[test]
    fn test_disabled_feature_stores_nothing() {
        let config = Config {
            type_annotation: false,
            ..Default::default()
        };
        let ctx = BuildContext::new("/tmp", "proj", "1.0");

        collect_types(&config, &ctx, &sample_tree());
        assert!(ctx.with_metadata("api", |_| ()).is_none());
    }
}
