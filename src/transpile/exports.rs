// src/transpile/exports.rs
//! Export statement normalization
//!
//! The legacy dialect has no module scope: the host reads a file's top-level
//! bindings off the evaluated script object. Exported `const`/`let` bindings
//! therefore have to become hoistable `var` bindings, and the `export`
//! markers themselves are dropped.
//!
//! Named exports are rewritten by an ordered set of fingerprint rules, each
//! tested independently against the same line.

use regex::Regex;
use std::sync::LazyLock;

const DEFAULT_MARKER: &str = "export default";
const NAMED_MARKER: &str = "export ";

/// Block-scoped declaration keyword followed by a space
static SCOPED_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:const|let) ").unwrap());

/// What a matched fingerprint does to the line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportRewrite {
    /// Every `const `/`let ` on the line becomes `var `
    Hoist,
    /// Replace one literal with another
    Replace(&'static str, &'static str),
}

/// A (fingerprint, rewrite) rule for named export lines
#[derive(Debug, Clone, Copy)]
pub struct ExportRule {
    pub name: &'static str,
    pub fingerprint: &'static str,
    pub rewrite: ExportRewrite,
}

impl ExportRule {
    pub fn matches(&self, line: &str) -> bool {
        line.contains(self.fingerprint)
    }

    pub fn apply(&self, line: &str) -> String {
        match self.rewrite {
            ExportRewrite::Hoist => SCOPED_KEYWORD.replace_all(line, "var ").into_owned(),
            ExportRewrite::Replace(from, to) => line.replace(from, to),
        }
    }
}

const BUILTIN_RULES: &[ExportRule] = &[
    ExportRule {
        name: "class-expression",
        fingerprint: "class {",
        rewrite: ExportRewrite::Hoist,
    },
    ExportRule {
        name: "schema-id",
        fingerprint: "const schemaId",
        rewrite: ExportRewrite::Replace("const schemaId", "var schemaId"),
    },
    ExportRule {
        name: "register-class",
        fingerprint: "registerClass",
        rewrite: ExportRewrite::Hoist,
    },
    ExportRule {
        name: "arrow-function",
        fingerprint: "= () => {",
        rewrite: ExportRewrite::Hoist,
    },
    ExportRule {
        name: "object-literal",
        fingerprint: "= {",
        rewrite: ExportRewrite::Hoist,
    },
];

/// Result of normalizing one export line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedExport {
    pub line: String,
    /// Names of the fingerprint rules that fired, in order
    pub rules: Vec<&'static str>,
}

/// Ordered export rewrite rules
#[derive(Debug, Clone)]
pub struct ExportRules {
    rules: Vec<ExportRule>,
}

impl Default for ExportRules {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ExportRules {
    pub fn builtin() -> Self {
        Self {
            rules: BUILTIN_RULES.to_vec(),
        }
    }

    /// Normalize a line if it starts with an export marker
    ///
    /// Returns `None` for lines that are not exports. Indented exports are
    /// left alone: only module-level statements are expected to carry them.
    pub fn normalize(&self, line: &str) -> Option<NormalizedExport> {
        if let Some(rest) = line.strip_prefix(DEFAULT_MARKER) {
            let rest = rest.strip_prefix(' ').unwrap_or(rest);
            return Some(NormalizedExport {
                line: rest.to_string(),
                rules: Vec::new(),
            });
        }

        if !line.starts_with(NAMED_MARKER) {
            return None;
        }

        let mut current = line.to_string();
        let mut fired = Vec::new();
        for rule in &self.rules {
            if rule.matches(&current) {
                current = rule.apply(&current);
                fired.push(rule.name);
            }
        }

        let line = match current.strip_prefix(NAMED_MARKER) {
            Some(rest) => rest.to_string(),
            None => current,
        };
        Some(NormalizedExport { line, rules: fired })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(line: &str) -> Option<String> {
        ExportRules::builtin().normalize(line).map(|n| n.line)
    }

    #[test]
    fn test_default_export_stripped() {
        assert_eq!(normalize("export default class Foo {}").unwrap(), "class Foo {}");
        assert_eq!(
            normalize("export default class Prefs extends ExtensionPreferences {").unwrap(),
            "class Prefs extends ExtensionPreferences {"
        );
    }

    #[test]
    fn test_object_literal_hoisted() {
        assert_eq!(normalize("export const X = {};").unwrap(), "var X = {};");
        assert_eq!(
            normalize("export const DockPosition = {").unwrap(),
            "var DockPosition = {"
        );
    }

    #[test]
    fn test_register_class_hoisted() {
        assert_eq!(
            normalize("export let Dock = GObject.registerClass(").unwrap(),
            "var Dock = GObject.registerClass("
        );
    }

    #[test]
    fn test_arrow_function_and_class_expression() {
        assert_eq!(
            normalize("export const runTests = () => {").unwrap(),
            "var runTests = () => {"
        );
        assert_eq!(
            normalize("export const Timer = class {").unwrap(),
            "var Timer = class {"
        );
    }

    #[test]
    fn test_schema_id_only_touches_binding() {
        let n = ExportRules::builtin()
            .normalize("export const schemaId = 'org.gnome.shell.extensions.dash2dock-lite';")
            .unwrap();
        assert_eq!(n.line, "var schemaId = 'org.gnome.shell.extensions.dash2dock-lite';");
        assert_eq!(n.rules, vec!["schema-id"]);
    }

    #[test]
    fn test_unfingerprinted_export_keeps_keyword() {
        assert_eq!(normalize("export const LIMIT = 10;").unwrap(), "const LIMIT = 10;");
        assert_eq!(normalize("export function run() {").unwrap(), "function run() {");
        assert_eq!(normalize("export class Style {").unwrap(), "class Style {");
    }

    #[test]
    fn test_keyword_inside_identifier_untouched() {
        assert_eq!(
            normalize("export const settings = { myconst : 1 };").unwrap(),
            "var settings = { myconst : 1 };"
        );
    }

    #[test]
    fn test_non_export_lines() {
        assert!(normalize("const x = {};").is_none());
        assert!(normalize("  export const X = {};").is_none());
        assert!(normalize("exported = true;").is_none());
    }
}
