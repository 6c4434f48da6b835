// src/config.rs

//! Project configuration
//!
//! Configuration is optional. Without a `legacify.toml` at the project root
//! every setting falls back to the built-in behavior, so a bare invocation
//! from the extension's source directory just works.
//!
//! # Example legacify.toml
//!
//! ```toml
//! [build]
//! output_dir = "build"
//! exclude_dirs = ["tests", "node_modules"]
//! create_dirs = true
//!
//! [metadata]
//! trigger = '"46"'
//! replacement = '"43", "44", "45"'
//!
//! # Evaluated before the built-in import table
//! [[import]]
//! fragment = "import { Hints }"
//! emit = "const Hints = Me.imports.hints.Hints;"
//!
//! [[import]]
//! specifier = "./search.js"
//! emit = "const Search = Me.imports.search.Search;"
//!
//! [companions]
//! extension = "tools/imports_extension.js"
//! prefs = "tools/imports_prefs.js"
//! ```

use crate::error::{Error, Result};
use crate::transpile::boilerplate::Companions;
use crate::transpile::imports::ImportMapping;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name looked up in the project root
pub const CONFIG_FILE_NAME: &str = "legacify.toml";

/// Complete project configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub build: BuildConfig,

    #[serde(default)]
    pub metadata: MetadataConfig,

    /// Extra import mappings, evaluated before the built-in table
    #[serde(default, rename = "import")]
    pub imports: Vec<ImportEntry>,

    #[serde(default)]
    pub companions: Companions,
}

/// Source tree and output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Output directory name, created under the project root
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Source file extension, without the dot
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Directory names never descended into
    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: Vec<String>,

    /// Files whose name contains this fragment are skipped
    #[serde(default = "default_exclude_fragment")]
    pub exclude_fragment: String,

    /// Create missing output directories instead of failing
    #[serde(default)]
    pub create_dirs: bool,

    /// Treat an unterminated import statement as an error
    #[serde(default)]
    pub strict: bool,
}

fn default_output_dir() -> String {
    "build".to_string()
}

fn default_extension() -> String {
    "js".to_string()
}

fn default_exclude_dirs() -> Vec<String> {
    vec!["tests".to_string()]
}

fn default_exclude_fragment() -> String {
    "imports_".to_string()
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            extension: default_extension(),
            exclude_dirs: default_exclude_dirs(),
            exclude_fragment: default_exclude_fragment(),
            create_dirs: false,
            strict: false,
        }
    }
}

/// Descriptor (`metadata.json`) patch settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataConfig {
    /// Descriptor path relative to the project root
    #[serde(default = "default_metadata_file")]
    pub file: String,

    /// Lines containing this text are replaced
    #[serde(default = "default_trigger")]
    pub trigger: String,

    /// Replacement line, without terminator
    #[serde(default = "default_replacement")]
    pub replacement: String,
}

fn default_metadata_file() -> String {
    "metadata.json".to_string()
}

fn default_trigger() -> String {
    r#""45""#.to_string()
}

fn default_replacement() -> String {
    r#""42", "43", "44""#.to_string()
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            file: default_metadata_file(),
            trigger: default_trigger(),
            replacement: default_replacement(),
        }
    }
}

/// A user-supplied import mapping
///
/// Exactly one of `fragment`, `specifier` or `pattern` must be set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragment: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specifier: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,

    pub emit: String,
}

impl ImportEntry {
    fn to_mapping(&self) -> Result<ImportMapping> {
        match (&self.fragment, &self.specifier, &self.pattern) {
            (Some(fragment), None, None) => Ok(ImportMapping::fragment(fragment, &self.emit)),
            (None, Some(path), None) => Ok(ImportMapping::specifier(path, &self.emit)),
            (None, None, Some(pattern)) => {
                Ok(ImportMapping::pattern(Regex::new(pattern)?, &self.emit))
            }
            _ => Err(Error::Config(format!(
                "import mapping for '{}' needs exactly one of fragment, specifier or pattern",
                self.emit
            ))),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::parse(&content)
    }

    /// Load `legacify.toml` from the project root, or defaults if absent
    pub fn discover(root: &Path) -> Result<Self> {
        let path = root.join(CONFIG_FILE_NAME);
        if path.is_file() {
            tracing::debug!("Loading config from {}", path.display());
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Check the configuration for consistency
    pub fn validate(&self) -> Result<()> {
        let out = &self.build.output_dir;
        if out.is_empty() || out.contains(['/', '\\']) || out == "." || out == ".." {
            return Err(Error::Config(format!(
                "output_dir must be a single directory name, got '{}'",
                out
            )));
        }

        if self.build.extension.is_empty() {
            return Err(Error::Config("extension must not be empty".to_string()));
        }

        if self.metadata.trigger.is_empty() {
            return Err(Error::Config("metadata trigger must not be empty".to_string()));
        }

        for entry in &self.imports {
            entry.to_mapping()?;
        }

        Ok(())
    }

    /// User import mappings in evaluation order
    pub fn import_overrides(&self) -> Result<Vec<ImportMapping>> {
        self.imports.iter().map(ImportEntry::to_mapping).collect()
    }
}
