//! Object-type pipeline: metadata collection, anchor annotation and the
//! build-finish debug report.

pub mod annotate;
pub mod collect;
pub mod report;

pub use annotate::annotate_page_toc;
pub use collect::collect_types;
pub use report::write_debug_report;

// The stylesheet module owns the class vocabulary; the markers injected
// here must target exactly the selectors it generates.
pub(crate) use crate::css::{CLASS_MAIN as TYPE_CLASS, CLASS_PREFIX as TYPE_CLASS_PREFIX};
