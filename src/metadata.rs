// src/metadata.rs
//! Extension descriptor patching
//!
//! `metadata.json` advertises the shell versions an extension supports. The
//! module-based sources target the newest shell, while the legacy output
//! only runs on older ones, so the version line is swapped. The file is
//! handled as plain lines: everything except the trigger line is copied
//! byte-for-byte, including formatting and line endings.

use crate::config::MetadataConfig;
use crate::error::{Error, Result};
use std::path::Path;
use tracing::debug;

/// Rewrites the shell-version line of a descriptor
#[derive(Debug, Clone)]
pub struct MetadataPatcher {
    trigger: String,
    replacement: String,
}

impl Default for MetadataPatcher {
    fn default() -> Self {
        Self::from_config(&MetadataConfig::default())
    }
}

impl MetadataPatcher {
    pub fn new(trigger: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            trigger: trigger.into(),
            replacement: replacement.into(),
        }
    }

    pub fn from_config(config: &MetadataConfig) -> Self {
        Self::new(&config.trigger, &config.replacement)
    }

    /// Patch descriptor text, returning the new text and the number of replaced lines
    pub fn patch_str(&self, content: &str) -> (String, usize) {
        let mut out = String::with_capacity(content.len());
        let mut patched = 0;

        for line in content.split_inclusive('\n') {
            if line.contains(self.trigger.as_str()) {
                let eol = if line.ends_with("\r\n") {
                    "\r\n"
                } else if line.ends_with('\n') {
                    "\n"
                } else {
                    ""
                };
                out.push_str(&self.replacement);
                out.push_str(eol);
                patched += 1;
            } else {
                out.push_str(line);
            }
        }

        (out, patched)
    }

    /// Patch `input` into `output`
    pub fn patch_file(&self, input: &Path, output: &Path) -> Result<usize> {
        let content = std::fs::read_to_string(input).map_err(|e| Error::io(input, e))?;
        let (patched_content, patched) = self.patch_str(&content);
        std::fs::write(output, patched_content).map_err(|e| Error::io(output, e))?;
        debug!(
            "Patched {} -> {} ({} line(s) replaced)",
            input.display(),
            output.display(),
            patched
        );
        Ok(patched)
    }
}
