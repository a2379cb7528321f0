//! Host-facing lifecycle surface and build-scoped state.
//!
//! The host drives three events per build:
//! - `doctree_resolved` once per document, after cross-reference resolution;
//! - `page_context` once per output page, with the mutable template context;
//! - `build_finished` once at the end.
//!
//! Per-document metadata is not stashed on the document itself; it lives in
//! an explicit keyed store on [`BuildContext`], which both phases receive.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::config::Config;
use crate::doctree::DocTree;
use crate::error::Result;
use crate::{dropdown, objtype};

/// Key under which the rendered ToC fragment appears in the page context.
pub const TOC_KEY: &str = "toc";

/// Mutable template context of one output page.
pub type PageContext = HashMap<String, String>;

/// Per-document mapping from anchor id to object-type label.
pub type TypeMap = HashMap<String, String>;

/// Build-scoped shared state.
///
/// The metadata store and the discovered-type set are mutex-guarded so a
/// host that processes documents in parallel stays safe; the set is
/// append-only and read exactly once, at build finish.
pub struct BuildContext {
    confdir: PathBuf,
    project: String,
    version: String,
    metadata: Mutex<HashMap<String, TypeMap>>,
    discovered: Mutex<BTreeSet<String>>,
}

impl BuildContext {
    pub fn new(
        confdir: impl Into<PathBuf>,
        project: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            confdir: confdir.into(),
            project: project.into(),
            version: version.into(),
            metadata: Mutex::new(HashMap::new()),
            discovered: Mutex::new(BTreeSet::new()),
        }
    }

    /// Base directory against which relative report paths resolve.
    pub fn confdir(&self) -> &Path {
        &self.confdir
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Store the id→type mapping collected for a document, replacing any
    /// previous mapping for the same document name.
    pub fn store_metadata(&self, docname: &str, map: TypeMap) {
        self.metadata
            .lock()
            .expect("metadata store poisoned")
            .insert(docname.to_string(), map);
    }

    /// Run a closure against a document's mapping, if one was collected.
    /// The mapping is mutable so the annotation pass can drain it.
    pub fn with_metadata<R>(&self, docname: &str, f: impl FnOnce(&mut TypeMap) -> R) -> Option<R> {
        let mut store = self.metadata.lock().expect("metadata store poisoned");
        store.get_mut(docname).map(f)
    }

    /// Record a `"domain-type"` composite into the build-wide discovered set.
    pub fn record_discovered(&self, composite: String) {
        self.discovered
            .lock()
            .expect("discovered set poisoned")
            .insert(composite);
    }

    /// Snapshot of everything discovered so far, in sorted order.
    pub fn discovered(&self) -> BTreeSet<String> {
        self.discovered
            .lock()
            .expect("discovered set poisoned")
            .clone()
    }
}

/// The extension: owns the configuration and the build-scoped state, and
/// exposes one entry point per host lifecycle event.
pub struct LocalToc {
    config: Config,
    context: BuildContext,
}

impl LocalToc {
    pub fn new(
        config: Config,
        confdir: impl Into<PathBuf>,
        project: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            config,
            context: BuildContext::new(confdir, project, version),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn build_context(&self) -> &BuildContext {
        &self.context
    }

    /// `tree-resolved`: collect object metadata for one document.
    pub fn doctree_resolved(&self, doctree: &DocTree) {
        objtype::collect_types(&self.config, &self.context, doctree);
    }

    /// `page-render-context`: rewrite the page's ToC fragment. Dropdown
    /// injection runs first, type annotation second, each with its own
    /// parse and serialize of the fragment.
    pub fn page_context(
        &self,
        _pagename: &str,
        _templatename: &str,
        context: &mut PageContext,
        docname: &str,
    ) {
        dropdown::rewrite_page_toc(&self.config, context);
        objtype::annotate_page_toc(&self.config, &self.context, docname, context);
    }

    /// `build-finished`: write the debug report when the build succeeded
    /// and a report path is configured.
    pub fn build_finished(&self, error: Option<&dyn std::error::Error>) -> Result<()> {
        if error.is_some() {
            return Ok(());
        }
        objtype::write_debug_report(&self.config, &self.context)
    }
}
