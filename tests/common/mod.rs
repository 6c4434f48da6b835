// tests/common/mod.rs

//! Shared test utilities and helpers for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const EXTENSION_COMPANION: &str = "\
function init() {
  return new Extension();
}
";

pub const PREFS_COMPANION: &str = "\
function init() {}

function buildPrefsWidget() {
  return new Preferences().widget();
}
";

pub const METADATA: &str = r#"{
  "uuid": "dash2dock-lite@icedman.github.com",
  "name": "Dash2Dock Animated",
  "shell-version": [
    "45"
  ],
  "settings-schema": "org.gnome.shell.extensions.dash2dock-lite",
  "version": 80
}
"#;

/// Write `content` at `rel` below `root`, creating parent directories.
pub fn write_file(root: &Path, rel: &str, content: &str) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// Read a file below `root` as a string.
pub fn read_file(root: &Path, rel: &str) -> String {
    fs::read_to_string(root.join(rel)).unwrap()
}

/// Create a minimal extension project: companion files, metadata.json and
/// an empty `build/` output directory.
///
/// Returns the TempDir - keep it alive to prevent cleanup.
pub fn setup_project() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    write_file(root, "tools/imports_extension.js", EXTENSION_COMPANION);
    write_file(root, "tools/imports_prefs.js", PREFS_COMPANION);
    write_file(root, "metadata.json", METADATA);
    fs::create_dir_all(root.join("build")).unwrap();

    dir
}
