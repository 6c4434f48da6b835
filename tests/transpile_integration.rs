// tests/transpile_integration.rs
//! End-to-end transpile tests over a temporary extension project
//!
//! These tests validate:
//! - Mirrored output paths and excluded subtrees
//! - Header injection and companion glue for entry points
//! - Import resolution order and verbatim fallback
//! - Export normalization and the settings call patch
//! - metadata.json patching

mod common;

use common::{read_file, setup_project, write_file, EXTENSION_COMPANION, METADATA};
use legacify::{Config, Error, Transpiler};
use std::path::Path;

const HEADER: &str = "const ExtensionUtils = imports.misc.extensionUtils;\n\
                      const Me = ExtensionUtils.getCurrentExtension();\n";

fn run(root: &Path) -> legacify::RunReport {
    Transpiler::new(root, &Config::default()).unwrap().run().unwrap()
}

// =============================================================================
// END-TO-END
// =============================================================================

#[test]
fn test_extension_entry_point() {
    let dir = setup_project();
    let root = dir.path();
    write_file(
        root,
        "extension.js",
        "import { Dock } from './dock.js';\nexport default class DockExtension extends Extension {}\n",
    );

    let report = run(root);

    let out = read_file(root, "build/extension.js");
    let expected = format!(
        "{}const Dock = Me.imports.dock.Dock;\nclass DockExtension extends Extension {{}}\n{}",
        HEADER, EXTENSION_COMPANION
    );
    assert_eq!(out, expected);

    assert_eq!(report.files.len(), 1);
    assert_eq!(report.files[0].stats.imports_mapped, 1);
    assert_eq!(report.files[0].stats.exports_rewritten, 1);
}

#[test]
fn test_prefs_entry_point_gets_prefs_companion() {
    let dir = setup_project();
    let root = dir.path();
    write_file(
        root,
        "prefs.js",
        "import Adw from 'gi://Adw';\n\
         this._settings = this.getSettings(schemaId);\n",
    );

    run(root);

    let out = read_file(root, "build/prefs.js");
    assert!(out.starts_with(HEADER));
    assert!(out.contains("const Adw = imports.gi.Adw;\n"));
    assert!(out.contains("this._settings = ExtensionUtils.getSettings(schemaId);\n"));
    assert!(out.ends_with(common::PREFS_COMPANION));
    assert!(!out.contains(EXTENSION_COMPANION));
}

#[test]
fn test_regular_file_has_no_companion() {
    let dir = setup_project();
    let root = dir.path();
    write_file(root, "timer.js", "export const Timer = class {\n};\n");

    run(root);

    assert_eq!(
        read_file(root, "build/timer.js"),
        format!("{}var Timer = class {{\n}};\n", HEADER)
    );
}

// =============================================================================
// TREE MIRRORING
// =============================================================================

#[test]
fn test_output_tree_mirrors_input() {
    let dir = setup_project();
    let root = dir.path();
    write_file(root, "dock.js", "let a = 1;\n");
    write_file(root, "apps/clock.js", "let b = 2;\n");
    write_file(root, "effects/tint_effect.js", "let c = 3;\n");
    std::fs::create_dir_all(root.join("build/apps")).unwrap();
    std::fs::create_dir_all(root.join("build/effects")).unwrap();

    let report = run(root);

    for rel in ["dock.js", "apps/clock.js", "effects/tint_effect.js"] {
        assert!(root.join("build").join(rel).is_file(), "missing output for {}", rel);
    }
    for file in &report.files {
        let rel = file.input.strip_prefix(root).unwrap();
        assert_eq!(file.output, root.join("build").join(rel));
    }
}

#[test]
fn test_excluded_paths_not_materialized() {
    let dir = setup_project();
    let root = dir.path();
    write_file(root, "dock.js", "let a = 1;\n");
    write_file(root, "tests/dock_test.js", "let t = 1;\n");
    write_file(root, "build/stale.js", "let s = 1;\n");
    write_file(root, "notes.txt", "not a source file\n");

    let report = run(root);

    let inputs: Vec<_> = report
        .files
        .iter()
        .map(|f| f.input.strip_prefix(root).unwrap().to_path_buf())
        .collect();
    assert_eq!(inputs, vec![Path::new("dock.js").to_path_buf()]);

    assert!(!root.join("build/tests").exists());
    assert!(!root.join("build/build").exists());
    assert!(!root.join("build/tools").exists());
    assert!(!root.join("build/notes.txt").exists());
}

#[test]
fn test_missing_output_dir_is_fatal() {
    let dir = setup_project();
    let root = dir.path();
    write_file(root, "apps/clock.js", "let b = 2;\n");

    let err = Transpiler::new(root, &Config::default())
        .unwrap()
        .run()
        .unwrap_err();
    assert!(matches!(err, Error::MissingOutputDir(ref p) if p == &root.join("build/apps")));
}

#[test]
fn test_create_dirs_option() {
    let dir = setup_project();
    let root = dir.path();
    std::fs::remove_dir_all(root.join("build")).unwrap();
    write_file(root, "apps/clock.js", "let b = 2;\n");

    let mut config = Config::default();
    config.build.create_dirs = true;
    Transpiler::new(root, &config).unwrap().run().unwrap();

    assert!(root.join("build/apps/clock.js").is_file());
    assert!(root.join("build/metadata.json").is_file());
}

// =============================================================================
// IMPORTS
// =============================================================================

#[test]
fn test_unmatched_import_passed_through() {
    let dir = setup_project();
    let root = dir.path();
    write_file(
        root,
        "dock.js",
        "import {\n  Unknown,\n  Other,\n} from './unknown.js';\nlet a = 1;\n",
    );

    let report = run(root);

    assert_eq!(
        read_file(root, "build/dock.js"),
        format!("{}import {{Unknown,Other,}} from './unknown.js';\nlet a = 1;\n", HEADER)
    );
    assert_eq!(report.imports_unmatched(), 1);
}

#[test]
fn test_config_mappings_override_builtin() {
    let dir = setup_project();
    let root = dir.path();
    write_file(
        root,
        "legacify.toml",
        r#"
[[import]]
specifier = "./dock.js"
emit = "const Dock = Me.imports.legacy.dock.Dock;"
"#,
    );
    write_file(root, "extension.js", "import { Dock } from './dock.js';\n");

    let config = Config::discover(root).unwrap();
    Transpiler::new(root, &config).unwrap().run().unwrap();

    let out = read_file(root, "build/extension.js");
    assert!(out.contains("const Dock = Me.imports.legacy.dock.Dock;\n"));
    assert!(!out.contains("Me.imports.dock.Dock"));
}

#[test]
fn test_unterminated_import_reported() {
    let dir = setup_project();
    let root = dir.path();
    write_file(root, "dock.js", "import {\n  Dock,\nlet a = 1;\n");

    let report = run(root);

    assert_eq!(report.files[0].unterminated_import, Some(1));
    assert_eq!(report.unterminated().count(), 1);
    assert_eq!(
        read_file(root, "build/dock.js"),
        format!("{}import {{\n  Dock,\nlet a = 1;\n", HEADER)
    );
}

#[test]
fn test_strict_mode_aborts_on_unterminated_import() {
    let dir = setup_project();
    let root = dir.path();
    write_file(root, "dock.js", "import {\n  Dock,\n");

    let mut config = Config::default();
    config.build.strict = true;
    let err = Transpiler::new(root, &config).unwrap().run().unwrap_err();

    assert!(matches!(err, Error::UnterminatedImport { line: 1, .. }));
    assert!(!root.join("build/dock.js").exists());
}

// =============================================================================
// METADATA
// =============================================================================

#[test]
fn test_metadata_patched() {
    let dir = setup_project();
    let root = dir.path();

    let report = run(root);

    let out = read_file(root, "build/metadata.json");
    assert_eq!(out, METADATA.replace("    \"45\"\n", "\"42\", \"43\", \"44\"\n"));
    assert_eq!(report.metadata.unwrap().lines_patched, 1);
}

#[test]
fn test_missing_metadata_is_fatal() {
    let dir = setup_project();
    let root = dir.path();
    std::fs::remove_file(root.join("metadata.json")).unwrap();

    let err = Transpiler::new(root, &Config::default())
        .unwrap()
        .run()
        .unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}
