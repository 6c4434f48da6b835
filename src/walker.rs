// src/walker.rs
//! Source tree discovery
//!
//! Each directory is scanned once: its eligible files are visited first,
//! then its subdirectories are recursed into in the order the scan found
//! them. Excluded directories (the output directory and test directories)
//! are pruned and never descended into. Symbolic links are followed, but a
//! directory whose canonical path was already walked is skipped.

use crate::config::BuildConfig;
use crate::error::{Error, Result};
use std::collections::HashSet;
use std::ffi::OsStr;
use std::path::{Component, Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Enumerates eligible source files below a project root
#[derive(Debug, Clone)]
pub struct FileWalker {
    root: PathBuf,
    output_root: PathBuf,
    output_dir: String,
    extension: String,
    exclude_dirs: Vec<String>,
    exclude_fragment: String,
}

impl FileWalker {
    pub fn new(root: impl Into<PathBuf>, config: &BuildConfig) -> Self {
        let root = root.into();
        Self {
            output_root: root.join(&config.output_dir),
            root,
            output_dir: config.output_dir.clone(),
            extension: config.extension.clone(),
            exclude_dirs: config.exclude_dirs.clone(),
            exclude_fragment: config.exclude_fragment.clone(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Whether a directory name is pruned from the walk
    fn is_excluded_dir(&self, name: &OsStr) -> bool {
        name == OsStr::new(&self.output_dir)
            || self.exclude_dirs.iter().any(|d| name == OsStr::new(d))
    }

    /// Whether a file below the root would be transpiled
    pub fn is_eligible(&self, path: &Path) -> bool {
        let rel = path.strip_prefix(&self.root).unwrap_or(path);

        let Some(name) = rel.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        if rel.extension() != Some(OsStr::new(&self.extension)) {
            return false;
        }
        if !self.exclude_fragment.is_empty() && name.contains(self.exclude_fragment.as_str()) {
            return false;
        }

        let mut dirs = rel.components();
        dirs.next_back();
        !dirs.any(|c| match c {
            Component::Normal(name) => self.is_excluded_dir(name),
            _ => false,
        })
    }

    /// Mirror a source path into the output tree
    pub fn output_path(&self, path: &Path) -> PathBuf {
        match path.strip_prefix(&self.root) {
            Ok(rel) => self.output_root.join(rel),
            Err(_) => self.output_root.join(path),
        }
    }

    /// Collect eligible files in visiting order
    pub fn files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        self.walk(|path| {
            files.push(path.to_path_buf());
            Ok(())
        })?;
        Ok(files)
    }

    /// Visit every eligible file, stopping at the first error
    pub fn walk<F>(&self, mut visit: F) -> Result<()>
    where
        F: FnMut(&Path) -> Result<()>,
    {
        let mut seen = HashSet::new();
        seen.insert(canonical(&self.root)?);
        self.walk_dir(&self.root, &mut seen, &mut visit)
    }

    fn walk_dir<F>(&self, dir: &Path, seen: &mut HashSet<PathBuf>, visit: &mut F) -> Result<()>
    where
        F: FnMut(&Path) -> Result<()>,
    {
        let mut subdirs = Vec::new();

        for entry in WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true) {
            let entry = entry?;
            let path = entry.path();

            if entry.file_type().is_dir() {
                if !self.is_excluded_dir(entry.file_name()) {
                    subdirs.push(path.to_path_buf());
                }
                continue;
            }

            if entry.file_type().is_file() && self.is_eligible(path) {
                visit(path)?;
            }
        }

        for sub in subdirs {
            if !seen.insert(canonical(&sub)?) {
                debug!("Skipping {}: directory already walked", sub.display());
                continue;
            }
            self.walk_dir(&sub, seen, visit)?;
        }
        Ok(())
    }

    /// Ensure the directory an output file goes into exists
    ///
    /// Missing directories are fatal unless `create` is set.
    pub fn prepare_output_dir(&self, output: &Path, create: bool) -> Result<()> {
        let Some(parent) = output.parent() else {
            return Ok(());
        };
        if parent.is_dir() {
            return Ok(());
        }
        if create {
            std::fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))
        } else {
            Err(Error::MissingOutputDir(parent.to_path_buf()))
        }
    }
}

fn canonical(dir: &Path) -> Result<PathBuf> {
    std::fs::canonicalize(dir).map_err(|e| Error::io(dir, e))
}
