//! Error types for localtoc operations.

use thiserror::Error;

/// Errors that can occur while writing generated artifacts.
///
/// The page-rewrite pipelines never fail: missing ToC content, missing
/// metadata or disabled features are silent no-ops, not errors. The only
/// fallible surface is the filesystem (debug report, stylesheet output).
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
