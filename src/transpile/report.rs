// src/transpile/report.rs
//! Run reports

use super::boilerplate::EntryRole;
use super::classifier::FileStats;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

/// Outcome of transpiling one source file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub input: PathBuf,
    pub output: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<EntryRole>,
    pub stats: FileStats,
    /// Opening line of an import statement that never closed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unterminated_import: Option<usize>,
}

/// Outcome of patching the descriptor
#[derive(Debug, Clone, Serialize)]
pub struct MetadataReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub lines_patched: usize,
}

/// Outcome of a whole run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub files: Vec<FileReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<MetadataReport>,
}

impl RunReport {
    pub fn imports_mapped(&self) -> usize {
        self.files.iter().map(|f| f.stats.imports_mapped).sum()
    }

    pub fn imports_unmatched(&self) -> usize {
        self.files.iter().map(|f| f.stats.imports_unmatched).sum()
    }

    pub fn exports_rewritten(&self) -> usize {
        self.files.iter().map(|f| f.stats.exports_rewritten).sum()
    }

    /// Files with an import statement left open at end of file
    pub fn unterminated(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| f.unterminated_import.is_some())
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Transpiled {} file(s)", self.files.len())?;
        writeln!(
            f,
            "  Imports: {} mapped, {} passed through",
            self.imports_mapped(),
            self.imports_unmatched()
        )?;
        writeln!(f, "  Exports rewritten: {}", self.exports_rewritten())?;

        for file in self.unterminated() {
            if let Some(line) = file.unterminated_import {
                writeln!(
                    f,
                    "  [WARN] {}: import at line {} never closed",
                    file.input.display(),
                    line
                )?;
            }
        }

        if let Some(meta) = &self.metadata {
            writeln!(
                f,
                "  Metadata: {} -> {} ({} line(s) patched)",
                meta.input.display(),
                meta.output.display(),
                meta.lines_patched
            )?;
        }
        Ok(())
    }
}
