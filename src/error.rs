// src/error.rs
//! Error types for the transpiler

use std::path::PathBuf;
use thiserror::Error;

/// Result type for transpiler operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can abort a transpile run
#[derive(Error, Debug)]
pub enum Error {
    /// Reading or writing a file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The mirrored output directory for a file does not exist
    #[error("output directory does not exist: {0}")]
    MissingOutputDir(PathBuf),

    /// An import statement was opened but never closed before end of file
    #[error("unterminated import statement in {path} starting at line {line}")]
    UnterminatedImport { path: PathBuf, line: usize },

    /// Directory traversal failed
    #[error("failed to walk source tree: {0}")]
    Walk(#[from] walkdir::Error),

    /// Configuration file could not be parsed
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Configuration is syntactically valid but inconsistent
    #[error("invalid config: {0}")]
    Config(String),

    /// A rewrite pattern failed to compile
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl Error {
    /// Wrap an I/O error with the path it occurred on
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
