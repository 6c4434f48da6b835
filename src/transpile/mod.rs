// src/transpile/mod.rs
//! ES module to legacy extension transpiler
//!
//! Rewrites a GNOME Shell extension written with `import`/`export` into the
//! pre-45 dialect, where dependencies are read from the global `imports`
//! object and the extension's own files from `Me.imports`.
//!
//! There is no parser. Files are processed line by line:
//!
//! 1. `this.getSettings(schemaId)` is routed through `ExtensionUtils`
//! 2. `import` statements (possibly multi-line) are replaced through the
//!    ordered [`ImportTable`]
//! 3. `export` markers are stripped, hoisting exported bindings to `var`
//!    where the host needs to see them
//!
//! Every file then gets the `ExtensionUtils`/`Me` header, and entry points
//! (`extension.js`, `prefs.js`) get their companion glue appended. After the
//! tree walk `metadata.json` is copied with its shell-version line patched.

pub mod boilerplate;
pub mod classifier;
pub mod exports;
pub mod imports;
mod report;

pub use boilerplate::{BoilerplateInjector, Companions, EntryRole, HEADER};
pub use classifier::{Classified, FileStats, FromKeyword, ImportTerminator, LineClassifier};
pub use exports::{ExportRewrite, ExportRule, ExportRules};
pub use imports::{ImportMapping, ImportMatcher, ImportTable};
pub use report::{FileReport, MetadataReport, RunReport};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::metadata::MetadataPatcher;
use crate::walker::FileWalker;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Drives a full transpile run over a project tree
pub struct Transpiler {
    walker: FileWalker,
    imports: ImportTable,
    exports: ExportRules,
    injector: BoilerplateInjector,
    metadata: MetadataPatcher,
    metadata_file: PathBuf,
    create_dirs: bool,
    strict: bool,
}

impl Transpiler {
    /// Build a transpiler for the project at `root`
    pub fn new(root: impl Into<PathBuf>, config: &Config) -> Result<Self> {
        let root = root.into();
        let imports = ImportTable::builtin().with_overrides(config.import_overrides()?);

        Ok(Self {
            walker: FileWalker::new(&root, &config.build),
            imports,
            exports: ExportRules::builtin(),
            injector: BoilerplateInjector::new(&root, config.companions.clone()),
            metadata: MetadataPatcher::from_config(&config.metadata),
            metadata_file: PathBuf::from(&config.metadata.file),
            create_dirs: config.build.create_dirs,
            strict: config.build.strict,
        })
    }

    pub fn import_table(&self) -> &ImportTable {
        &self.imports
    }

    /// Transpile every eligible file, then patch the descriptor
    pub fn run(&self) -> Result<RunReport> {
        info!(
            "Transpiling {} -> {}",
            self.walker.root().display(),
            self.walker.output_root().display()
        );

        let mut report = RunReport::default();
        self.walker.walk(|path| {
            report.files.push(self.transpile_file(path)?);
            Ok(())
        })?;

        report.metadata = Some(self.patch_metadata()?);

        info!(
            "Transpiled {} file(s), {} import(s) mapped",
            report.files.len(),
            report.imports_mapped()
        );
        Ok(report)
    }

    /// Rewrite source text, returning the complete output file content
    ///
    /// `path` is used to pick the entry role and for diagnostics only.
    pub fn transpile_source(&self, path: &Path, source: &str) -> Result<(String, Classified)> {
        let classified = LineClassifier::new(&self.imports, &self.exports).classify_source(source);

        if let Some(line) = classified.unterminated_import {
            if self.strict {
                return Err(Error::UnterminatedImport {
                    path: path.to_path_buf(),
                    line,
                });
            }
            warn!(
                "{}: import statement at line {} never closed, copying remaining lines unchanged",
                path.display(),
                line
            );
        }

        let output = self
            .injector
            .wrap(&classified.body, EntryRole::from_path(path))?;
        Ok((output, classified))
    }

    /// Transpile one source file into its mirrored output path
    pub fn transpile_file(&self, path: &Path) -> Result<FileReport> {
        let output = self.walker.output_path(path);
        debug!("Transpiling {} -> {}", path.display(), output.display());

        let source = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let (content, classified) = self.transpile_source(path, &source)?;

        self.walker.prepare_output_dir(&output, self.create_dirs)?;
        std::fs::write(&output, content).map_err(|e| Error::io(&output, e))?;

        Ok(FileReport {
            input: path.to_path_buf(),
            output,
            role: EntryRole::from_path(path),
            stats: classified.stats,
            unterminated_import: classified.unterminated_import,
        })
    }

    /// Copy the descriptor into the output root with its version line patched
    pub fn patch_metadata(&self) -> Result<MetadataReport> {
        let input = self.walker.root().join(&self.metadata_file);
        let output = self.walker.output_root().join(&self.metadata_file);

        self.walker.prepare_output_dir(&output, self.create_dirs)?;
        let lines_patched = self.metadata.patch_file(&input, &output)?;

        Ok(MetadataReport {
            input,
            output,
            lines_patched,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transpiler() -> Transpiler {
        Transpiler::new("/nonexistent", &Config::default()).unwrap()
    }

    #[test]
    fn test_transpile_source_plain_file() {
        let source = "import Clutter from 'gi://Clutter';\n\nexport const Timer = class {\n};\n";
        let (out, classified) = transpiler()
            .transpile_source(Path::new("/nonexistent/timer.js"), source)
            .unwrap();
        assert_eq!(
            out,
            "const ExtensionUtils = imports.misc.extensionUtils;\n\
             const Me = ExtensionUtils.getCurrentExtension();\n\
             const Clutter = imports.gi.Clutter;\n\
             \n\
             var Timer = class {\n\
             };\n"
        );
        assert_eq!(classified.stats.imports_mapped, 1);
        assert_eq!(classified.stats.exports_rewritten, 1);
    }

    #[test]
    fn test_strict_rejects_unterminated_import() {
        let mut config = Config::default();
        config.build.strict = true;
        let t = Transpiler::new("/nonexistent", &config).unwrap();
        let err = t
            .transpile_source(Path::new("/nonexistent/dock.js"), "import {\n  Dock,\n")
            .unwrap_err();
        assert!(matches!(err, Error::UnterminatedImport { line: 1, .. }));
    }

    #[test]
    fn test_lenient_keeps_unterminated_import() {
        let (out, classified) = transpiler()
            .transpile_source(Path::new("/nonexistent/dock.js"), "import {\n  Dock,\n")
            .unwrap();
        assert!(out.ends_with("import {\n  Dock,\n"));
        assert_eq!(classified.unterminated_import, Some(1));
    }
}
