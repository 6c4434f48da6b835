// src/lib.rs

//! Legacify
//!
//! Rewrites a GNOME Shell extension written as ES modules into the legacy
//! dialect loaded by older shells, where dependencies come from the global
//! `imports` object instead of `import` statements.
//!
//! # Architecture
//!
//! - Line-based: no parser, statement boundaries found by textual cues
//! - Ordered rule tables: imports and exports, first match wins
//! - Mirrored output: `<root>/a/b.js` is written to `<root>/build/a/b.js`
//! - Descriptor patch: `metadata.json` shell versions swapped for old shells

pub mod config;
mod error;
pub mod metadata;
pub mod transpile;
pub mod walker;

pub use config::{BuildConfig, Config, ImportEntry, MetadataConfig, CONFIG_FILE_NAME};
pub use error::{Error, Result};
pub use metadata::MetadataPatcher;
pub use transpile::{
    BoilerplateInjector, Classified, Companions, EntryRole, ExportRules, FileReport, FileStats,
    FromKeyword, ImportMapping, ImportMatcher, ImportTable, ImportTerminator, LineClassifier,
    MetadataReport, RunReport, Transpiler,
};
pub use walker::FileWalker;
