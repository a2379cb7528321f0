//! # localtoc
//!
//! Post-processing for rendered documentation table-of-contents fragments.
//!
//! Two independent pipelines rewrite the same per-page ToC HTML:
//!
//! - **Type annotation**: object metadata collected while the host resolves
//!   each document tree is matched against the ToC's anchors, prepending a
//!   `<span>` marker encoding the object's type.
//! - **Dropdowns**: nested sections get CSS-only collapse/expand controls
//!   (a checkbox toggle paired with a label) plus alignment classes for
//!   leaf entries.
//!
//! ## Quick start
//!
//! ```
//! use localtoc::{Config, DocNode, DocTree, LocalToc, PageContext, TOC_KEY};
//!
//! let extension = LocalToc::new(Config::default(), "/project/docs", "demo", "1.0");
//!
//! // Host resolves a document tree
//! let mut doctree = DocTree::new("api");
//! doctree.nodes.push(DocNode::description(
//!     "py",
//!     "function",
//!     vec![DocNode::signature(["helper"])],
//! ));
//! extension.doctree_resolved(&doctree);
//!
//! // Host renders a page for that document
//! let mut context = PageContext::new();
//! context.insert(
//!     TOC_KEY.to_string(),
//!     r##"<ul><li><a href="#helper">helper</a></li></ul>"##.to_string(),
//! );
//! extension.page_context("api", "page.html", &mut context, "api");
//!
//! assert!(context[TOC_KEY].contains("slt-obj-function"));
//!
//! // Host finishes the build
//! extension.build_finished(None).unwrap();
//! ```

pub mod config;
pub mod css;
pub mod doctree;
pub mod dom;
pub mod dropdown;
pub mod error;
pub mod extension;
pub mod objtype;

pub use config::Config;
pub use doctree::{DocNode, DocTree};
pub use error::{Error, Result};
pub use extension::{BuildContext, LocalToc, PageContext, TOC_KEY, TypeMap};
