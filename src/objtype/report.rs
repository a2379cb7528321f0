//! Build-finish debug report over the discovered object types.

use std::collections::BTreeSet;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use log::debug;

use crate::config::Config;
use crate::css;
use crate::error::Result;
use crate::extension::BuildContext;

/// Fixed marker classes and what they decorate.
const BASE_CLASSES: &[(&str, &str)] = &[
    ("slt-type", "Common class for all object type items"),
    ("slt-dropdown", "<input> items used as checkbox for dropdown system"),
    (
        "slt-dropdown-icon",
        "<label> items used for the arrows of dropdown system",
    ),
    ("slt-dropdown-branch", "Starting depth branch for <ul> items"),
    ("slt-dropdown-depth", "Nested depth branch for <ul> items"),
    ("slt-dropdown-leaf", "Last <li> items in the depth branch"),
];

/// Friendly names for the well-known domain codes.
const DOMAIN_NAMES: &[(&str, &str)] = &[
    ("py", "Python script"),
    ("js", "Java script"),
    ("c", "C language"),
    ("cpp", "C++ language"),
    ("rst", "reStructuredText"),
    ("std", "Standard"),
    ("math", "Math"),
];

const BANNER_WIDTH: usize = 113;
const SECTION_WIDTH: usize = 56;

/// Write the debug report for a finished build.
///
/// Does nothing when no report path is configured or nothing was discovered.
/// Relative paths resolve against the build's configuration directory;
/// parent directories are created and an existing file is overwritten.
pub fn write_debug_report(config: &Config, ctx: &BuildContext) -> Result<()> {
    if !config.debug_report_requested() {
        return Ok(());
    }

    let discovered = ctx.discovered();
    if discovered.is_empty() {
        return Ok(());
    }

    let path = resolve_report_path(config.type_debug_file.trim(), ctx.confdir());
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let report = render_report(&discovered, ctx.project(), ctx.version());
    std::fs::write(&path, report)?;
    debug!("wrote localtoc debug report to {}", path.display());
    Ok(())
}

fn resolve_report_path(configured: &str, confdir: &Path) -> PathBuf {
    let path = PathBuf::from(configured);
    if path.is_absolute() {
        path
    } else {
        confdir.join(path)
    }
}

/// Render the report text from the discovered `"domain-type"` composites.
fn render_report(discovered: &BTreeSet<String>, project: &str, version: &str) -> String {
    let base_classes: Vec<String> = BASE_CLASSES
        .iter()
        .map(|(class, desc)| format!("{class:<19.19} | {desc}"))
        .collect();

    let mut css_classes: BTreeSet<String> = BTreeSet::new();
    let mut domains: BTreeSet<String> = BTreeSet::new();
    let mut pairs: BTreeSet<String> = BTreeSet::new();

    for composite in discovered {
        let (domain, objtype) = composite.split_once('-').unwrap_or((composite.as_str(), ""));

        css_classes.insert(format!("slt-obj-{objtype}"));
        pairs.insert(format!("{domain:<4.4} | {objtype}"));

        match DOMAIN_NAMES.iter().find(|(code, _)| *code == domain) {
            Some((code, name)) => domains.insert(format!("{code:<4.4} | {name}")),
            None => domains.insert(domain.to_string()),
        };
    }

    let mut out = String::new();
    let line = format!("#//|>{}<|", "-".repeat(BANNER_WIDTH));
    write!(
        out,
        "{line}\n#//| Local ToC debug report\n#//| Project: {project}\n#//| Version: {version}\n{line}"
    )
    .unwrap();

    let sections: [(&str, usize, Vec<String>); 4] = [
        ("built-in CSS classes", BASE_CLASSES.len(), base_classes),
        (
            "object type CSS classes",
            css::STYLED_TYPES.len(),
            css_classes.into_iter().collect(),
        ),
        ("domains", DOMAIN_NAMES.len(), domains.into_iter().collect()),
        (
            "domain-type pairs",
            css::STYLED_TYPES.len(),
            pairs.into_iter().collect(),
        ),
    ];

    let short_line = format!("#//|>{}<|", "-".repeat(SECTION_WIDTH));
    for (category, known, values) in sections {
        write!(
            out,
            "\n\n{short_line}\n#//| Used {category}: {} of {known} known\n{short_line}",
            values.len()
        )
        .unwrap();

        for value in values {
            write!(out, "\n\t\u{2022} {value}").unwrap();
        }
        out.push('\n');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn discovered(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_report_sections_and_counts() {
        let report = render_report(
            &discovered(&["py-function", "py-class", "js-function"]),
            "demo",
            "1.2",
        );

        assert!(report.contains("#//| Project: demo"));
        assert!(report.contains("#//| Version: 1.2"));
        assert!(report.contains("#//| Used built-in CSS classes: 6 of 6 known"));

        // function appears in two domains but yields one shared CSS class
        assert!(report.contains(&format!(
            "#//| Used object type CSS classes: 2 of {} known",
            css::STYLED_TYPES.len()
        )));
        assert!(report.contains("\u{2022} slt-obj-function"));
        assert!(report.contains("\u{2022} slt-obj-class"));

        // two domains, both with friendly names
        assert!(report.contains("#//| Used domains: 2 of 7 known"));
        assert!(report.contains("py   | Python script"));
        assert!(report.contains("js   | Java script"));

        // all three full pairs
        assert!(report.contains(&format!(
            "#//| Used domain-type pairs: 3 of {} known",
            css::STYLED_TYPES.len()
        )));
        assert!(report.contains("py   | function"));
        assert!(report.contains("py   | class"));
        assert!(report.contains("js   | function"));
    }

    #[test]
    fn test_unknown_domain_listed_verbatim() {
        let report = render_report(&discovered(&["lua-function"]), "demo", "1.0");
        assert!(report.contains("\u{2022} lua\n") || report.contains("\u{2022} lua"));
        assert!(!report.contains("lua  |  "));
    }

    #[test]
    fn test_relative_path_resolves_against_confdir() {
        let dir = TempDir::new().unwrap();
        let resolved = resolve_report_path("debug/report.txt", dir.path());
        assert_eq!(resolved, dir.path().join("debug/report.txt"));

        let absolute = dir.path().join("abs.txt");
        assert_eq!(
            resolve_report_path(absolute.to_str().unwrap(), Path::new("/elsewhere")),
            absolute
        );
    }

    #[test]
    fn test_write_creates_parents_and_overwrites() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            type_debug_file: "nested/out/report.txt".to_string(),
            ..Default::default()
        };
        let ctx = BuildContext::new(dir.path(), "demo", "0.1");
        ctx.record_discovered("py-function".to_string());

        write_debug_report(&config, &ctx).unwrap();
        let path = dir.path().join("nested/out/report.txt");
        let first = std::fs::read_to_string(&path).unwrap();
        assert!(first.contains("py   | function"));

        ctx.record_discovered("py-class".to_string());
        write_debug_report(&config, &ctx).unwrap();
        let second = std::fs::read_to_string(&path).unwrap();
        assert!(second.contains("py   | class"));
        assert_ne!(first, second);
    }

    #[test]
    fn test_nothing_written_without_discoveries() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            type_debug_file: "report.txt".to_string(),
            ..Default::default()
        };
        let ctx = BuildContext::new(dir.path(), "demo", "0.1");

        write_debug_report(&config, &ctx).unwrap();
        assert!(!dir.path().join("report.txt").exists());
    }

    #[test]
    fn test_no_path_configured_is_a_noop() {
        let ctx = BuildContext::new("/nonexistent", "demo", "0.1");
        ctx.record_discovered("py-function".to_string());
        write_debug_report(&Config::default(), &ctx).unwrap();
    }
}
