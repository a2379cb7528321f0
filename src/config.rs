//! Configuration surface recognized by the extension.

use serde::{Deserialize, Serialize};

/// User-facing options, all optional with defaults matching an enabled
/// extension and no debug output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Enable object-type annotations in the local ToC.
    pub type_annotation: bool,

    /// Absolute or relative path (including filename) for the debug report.
    /// Relative paths resolve against the build's configuration directory.
    /// Empty means disabled.
    pub type_debug_file: String,

    /// Enable the dropdown system in the local ToC.
    pub dropdown: bool,

    /// Number of initial ToC depth levels to skip before applying dropdown
    /// logic. Negative values are treated as 0.
    pub dropdown_depth: i64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            type_annotation: true,
            type_debug_file: String::new(),
            dropdown: true,
            dropdown_depth: 1,
        }
    }
}

impl Config {
    /// The dropdown skip depth, clamped to zero.
    pub fn skip_depth(&self) -> usize {
        self.dropdown_depth.max(0) as usize
    }

    /// Whether a debug report was requested.
    pub fn debug_report_requested(&self) -> bool {
        !self.type_debug_file.trim().is_empty()
    }
}
