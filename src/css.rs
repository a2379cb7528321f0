//! Stylesheet generation for the marker and dropdown classes.
//!
//! The shipped stylesheet is produced offline from a static table mapping
//! each styled object type to an abbreviation (the marker text) and an RGB
//! color. Types sharing an abbreviation or color reference the first type's
//! CSS custom property instead of repeating the literal.

use std::fmt::Write as _;
use std::path::Path;

use crate::error::Result;

/// Shared class prefix.
pub const PREFIX: &str = "slt";
/// Prefix of per-type marker classes.
pub const CLASS_PREFIX: &str = "slt-obj";
/// Base class carried by every marker.
pub const CLASS_MAIN: &str = "slt-type";

/// The styled object types: `(type, abbreviation, rgb color)`.
///
/// Grouped by rough category; types in a group share a color, related types
/// share an abbreviation.
pub const STYLED_TYPES: &[(&str, &str, (u8, u8, u8))] = &[
    // Core / containers
    ("module", "mod", (110, 118, 129)),
    ("namespace", "nsp", (110, 118, 129)),
    ("program", "prog", (110, 118, 129)),
    // Types & structures
    ("class", "cls", (124, 184, 255)),
    ("exception", "expt", (124, 184, 255)),
    ("struct", "str", (124, 184, 255)),
    ("union", "uni", (124, 184, 255)),
    ("type", "type", (124, 184, 255)),
    ("concept", "con", (124, 184, 255)),
    ("template", "tmpl", (124, 184, 255)),
    ("alias", "als", (124, 184, 255)),
    // Enums
    ("enum", "enum", (158, 203, 255)),
    ("enumerator", "enum", (158, 203, 255)),
    // Callables
    ("function", "func", (210, 168, 255)),
    ("method", "meth", (184, 160, 255)),
    ("classmethod", "meth", (184, 160, 255)),
    ("staticmethod", "meth", (184, 160, 255)),
    ("operator", "opr", (210, 168, 255)),
    // Decorators
    ("decorator", "dec", (184, 160, 255)),
    ("decoratormethod", "meth", (184, 160, 255)),
    // Members & data
    ("data", "data", (138, 191, 136)),
    ("var", "var", (138, 191, 136)),
    ("variable", "var", (138, 191, 136)),
    ("member", "mbr", (138, 191, 136)),
    ("attribute", "attr", (158, 203, 255)),
    ("property", "prop", (158, 203, 255)),
    // C-specific
    ("macro", "mcr", (227, 181, 119)),
    // reStructuredText
    ("directive", "dir", (227, 181, 119)),
    ("role", "role", (227, 181, 119)),
    // Standard domain
    ("label", "lbl", (227, 181, 119)),
    ("term", "term", (227, 181, 119)),
    ("glossary", "glos", (227, 181, 119)),
    ("citation", "cit", (227, 181, 119)),
    ("envvar", "env", (138, 191, 136)),
    ("option", "opt", (227, 181, 119)),
    ("cmdoption", "cmd", (227, 181, 119)),
    // Math
    ("equation", "eqn", (255, 202, 128)),
];

/// Generate the complete stylesheet text.
pub fn generate_stylesheet() -> String {
    let mut names = String::new();
    let mut colors = String::new();
    let mut classes = String::new();

    // First type seen with each abbreviation / color owns the literal;
    // later types reference its custom property
    let mut abbr_owner: Vec<(&str, &str)> = Vec::new();
    let mut color_owner: Vec<(&str, (u8, u8, u8))> = Vec::new();

    for &(name, abbr, color) in STYLED_TYPES {
        let abbr_value = match abbr_owner.iter().find(|(_, a)| *a == abbr) {
            Some((owner, _)) => format!("var(--name-{CLASS_PREFIX}-{owner})"),
            None => {
                abbr_owner.push((name, abbr));
                format!("\"{abbr}\"")
            }
        };
        writeln!(names, "    --name-{CLASS_PREFIX}-{name}: {abbr_value};").unwrap();

        let color_value = match color_owner.iter().find(|(_, c)| *c == color) {
            Some((owner, _)) => format!("var(--color-{CLASS_PREFIX}-{owner})"),
            None => {
                color_owner.push((name, color));
                format!("{}, {}, {}", color.0, color.1, color.2)
            }
        };
        writeln!(colors, "    --color-{CLASS_PREFIX}-{name}: {color_value};").unwrap();

        write!(
            classes,
            ".{CLASS_PREFIX}-{name} {{\n    \
               color: rgb(var(--color-{CLASS_PREFIX}-{name}));\n    \
               background-color: rgba(var(--color-{CLASS_PREFIX}-{name}), var(--alpha-{CLASS_PREFIX}-bg));\n\
             }}\n\
             .{CLASS_PREFIX}-{name}::before {{\n    \
               content: var(--name-{CLASS_PREFIX}-{name});\n\
             }}\n"
        )
        .unwrap();
    }

    format!(
        r##"/* Default Local ToC styling */
body {{
    --icon-{PREFIX}-chevron-down: url('data:image/svg+xml;charset=utf-8,<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24"><path d="M10.785 18.355C11.455 19.025 12.545 19.025 13.215 18.355L23.495 8.065C24.165 7.395 24.165 6.315 23.495 5.645C22.825 4.975 21.745 4.975 21.075 5.645L12.005 14.715L2.925 5.645C2.255 4.975 1.175 4.975 0.505 5.645C-0.165 6.315 -0.165 7.405 0.505 8.075L10.785 18.355Z"/></svg>');

{names}
    --color-{PREFIX}-dropdown: 125, 133, 144;
    --color-{PREFIX}-dropdown--hover: 221, 229, 240;
{colors}
    --alpha-{CLASS_PREFIX}-bg: 0.125;
    --alpha-{PREFIX}-dropdown-icon: 0.5;

    --font-size-{CLASS_MAIN}: 87%;
    --font-weight-{CLASS_MAIN}: 600;

    --size-{PREFIX}-dropdown: 1rem;
    --space-{PREFIX}-dropdown: 0.5rem;
    --space-{CLASS_MAIN}: 0.25rem;
    --padding-{CLASS_MAIN}: 0 0.25rem;

    --border-radius-{CLASS_MAIN}: 0.25rem;
    --transform-{PREFIX}-dropdown--closed: rotate(-90deg);

    --mask-{PREFIX}-dropdown: var(--icon-{PREFIX}-chevron-down) no-repeat center / 90%;
}}

/* Base shape */
.{CLASS_MAIN} {{
    display: inline-flex;
    align-items: center;
    justify-content: center;
    vertical-align: middle;
    white-space: nowrap;
    align-self: stretch;
    line-height: 1;
    border-radius: var(--border-radius-{CLASS_MAIN});
    margin-right: var(--space-{CLASS_MAIN});
    font-size: var(--font-size-{CLASS_MAIN});
    font-weight: var(--font-weight-{CLASS_MAIN});
    font-family: ui-monospace, SFMono-Regular, Menlo, Monaco, Consolas, "Liberation Mono", "Courier New", monospace;
    padding: var(--padding-{CLASS_MAIN});
}}

/* Dropdown system */
.{PREFIX}-dropdown {{
    display: none;
}}
.{PREFIX}-dropdown ~ ul {{
    display: block;
}}
.{PREFIX}-dropdown:checked ~ ul {{
    display: none;
}}
.{PREFIX}-dropdown:checked + a .{PREFIX}-dropdown-icon {{
    transform: var(--transform-{PREFIX}-dropdown--closed);
}}
.{PREFIX}-dropdown-icon {{
    display: inline-block;
    vertical-align: middle;
    height: var(--size-{PREFIX}-dropdown);
    width: var(--size-{PREFIX}-dropdown);
    background-color: rgba(var(--color-{PREFIX}-dropdown), var(--alpha-{PREFIX}-dropdown-icon));
    cursor: pointer;
    transition: transform 0.15s;
    mask: var(--mask-{PREFIX}-dropdown);
    -webkit-mask: var(--mask-{PREFIX}-dropdown);
    margin-right: var(--space-{PREFIX}-dropdown);
}}
.{PREFIX}-dropdown-icon:hover {{
    background-color: rgba(var(--color-{PREFIX}-dropdown--hover), var(--alpha-{PREFIX}-dropdown-icon));
}}
.{PREFIX}-dropdown-leaf {{
    margin-left: calc(var(--space-{PREFIX}-dropdown) + var(--size-{PREFIX}-dropdown));
}}

/* Object type */
{classes}"##
    )
}

/// Write the generated stylesheet to a file, overwriting any existing one.
pub fn write_stylesheet(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, generate_stylesheet())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_styled_type_gets_a_class() {
        let css = generate_stylesheet();
        for (name, _, _) in STYLED_TYPES {
            assert!(css.contains(&format!(".slt-obj-{name} {{")), "missing {name}");
            assert!(css.contains(&format!(".slt-obj-{name}::before")));
        }
    }

    #[test]
    fn test_shared_abbreviation_references_owner() {
        let css = generate_stylesheet();

        // "enum" owns its abbreviation, "enumerator" points at it
        assert!(css.contains("--name-slt-obj-enum: \"enum\";"));
        assert!(css.contains("--name-slt-obj-enumerator: var(--name-slt-obj-enum);"));

        // "method" owns "meth", classmethod/staticmethod reference it
        assert!(css.contains("--name-slt-obj-method: \"meth\";"));
        assert!(css.contains("--name-slt-obj-classmethod: var(--name-slt-obj-method);"));
    }

    #[test]
    fn test_shared_color_references_owner() {
        let css = generate_stylesheet();

        assert!(css.contains("--color-slt-obj-module: 110, 118, 129;"));
        assert!(css.contains("--color-slt-obj-namespace: var(--color-slt-obj-module);"));
    }

    #[test]
    fn test_dropdown_rules_present() {
        let css = generate_stylesheet();
        assert!(css.contains(".slt-dropdown:checked ~ ul"));
        assert!(css.contains(".slt-dropdown-icon:hover"));
        assert!(css.contains(".slt-dropdown-leaf"));
    }
}
