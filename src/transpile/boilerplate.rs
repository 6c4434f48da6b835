// src/transpile/boilerplate.rs
//! Header and footer glue for transpiled files
//!
//! Every output file starts with handles to the host's extension utilities
//! and to the current extension (`Me`), which the rewritten
//! `Me.imports.*` declarations rely on. Entry-point files additionally get a
//! companion fragment appended, because the host finds `enable`/`disable`
//! and preference widgets by convention rather than by export.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Lines written before any content line
pub const HEADER: [&str; 2] = [
    "const ExtensionUtils = imports.misc.extensionUtils;",
    "const Me = ExtensionUtils.getCurrentExtension();",
];

/// Entry-point files the host discovers by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryRole {
    /// `extension.js`: lifecycle entry point
    Extension,
    /// `prefs.js`: preferences dialog entry point
    Prefs,
}

impl EntryRole {
    /// Recognize an entry point from a source file name
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.file_name()?.to_str()? {
            "extension.js" => Some(Self::Extension),
            "prefs.js" => Some(Self::Prefs),
            _ => None,
        }
    }
}

/// Companion fragment paths per entry role, relative to the project root
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Companions {
    #[serde(default = "default_extension_companion")]
    pub extension: PathBuf,
    #[serde(default = "default_prefs_companion")]
    pub prefs: PathBuf,
}

fn default_extension_companion() -> PathBuf {
    PathBuf::from("tools/imports_extension.js")
}

fn default_prefs_companion() -> PathBuf {
    PathBuf::from("tools/imports_prefs.js")
}

impl Default for Companions {
    fn default() -> Self {
        Self {
            extension: default_extension_companion(),
            prefs: default_prefs_companion(),
        }
    }
}

impl Companions {
    pub fn path_for(&self, role: EntryRole) -> &Path {
        match role {
            EntryRole::Extension => &self.extension,
            EntryRole::Prefs => &self.prefs,
        }
    }
}

/// Wraps classified file bodies with header and companion footer
#[derive(Debug, Clone)]
pub struct BoilerplateInjector {
    root: PathBuf,
    companions: Companions,
}

impl BoilerplateInjector {
    pub fn new(root: impl Into<PathBuf>, companions: Companions) -> Self {
        Self {
            root: root.into(),
            companions,
        }
    }

    /// Absolute path of the companion fragment for a role
    pub fn companion_path(&self, role: EntryRole) -> PathBuf {
        self.root.join(self.companions.path_for(role))
    }

    /// Produce the complete output text for one file
    ///
    /// The companion fragment is read on every call so edits between runs
    /// are always picked up.
    pub fn wrap(&self, body: &str, role: Option<EntryRole>) -> Result<String> {
        let mut out = String::with_capacity(body.len() + 128);
        for line in HEADER {
            out.push_str(line);
            out.push('\n');
        }
        out.push_str(body);

        if let Some(role) = role {
            let path = self.companion_path(role);
            let footer = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
            if !out.is_empty() && !out.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(&footer);
        }

        Ok(out)
    }
}
