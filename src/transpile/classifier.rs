// src/transpile/classifier.rs
//! Per-file line classifier
//!
//! A small state machine over the lines of one source file:
//!
//! - `Idle`: lines are patched, export-normalized and written through.
//!   A line starting with `import ` switches to `Accumulating`.
//! - `Accumulating`: every line is buffered (trimmed and concatenated) and
//!   nothing is written until a line satisfies the [`ImportTerminator`].
//!   The buffered statement is then replaced by its [`ImportTable`] entry,
//!   or written verbatim when no entry matches.
//!
//! The closing predicate is a heuristic (`from` anywhere on the line), so it
//! is pluggable and tested on its own.

use super::exports::ExportRules;
use super::imports::ImportTable;
use serde::Serialize;
use tracing::{debug, trace};

const IMPORT_MARKER: &str = "import ";
const SETTINGS_CALL: &str = "this.getSettings(schemaId)";
const SETTINGS_RECEIVER: &str = "this.getSettings";
const SETTINGS_FACADE: &str = "ExtensionUtils.getSettings";

/// Decides which line closes an open import statement
pub trait ImportTerminator {
    fn closes(&self, line: &str) -> bool;
}

/// Closes on any line containing `from`
#[derive(Debug, Clone, Copy, Default)]
pub struct FromKeyword;

impl ImportTerminator for FromKeyword {
    fn closes(&self, line: &str) -> bool {
        line.contains("from")
    }
}

impl<F> ImportTerminator for F
where
    F: Fn(&str) -> bool,
{
    fn closes(&self, line: &str) -> bool {
        self(line)
    }
}

/// Rewrite `this.getSettings(schemaId)` to go through the extension utils facade
pub fn patch_settings_call(line: &str) -> Option<String> {
    if line.contains(SETTINGS_CALL) {
        Some(line.replace(SETTINGS_RECEIVER, SETTINGS_FACADE))
    } else {
        None
    }
}

/// Rewrite counters for one file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileStats {
    pub lines: usize,
    pub imports_mapped: usize,
    pub imports_unmatched: usize,
    pub exports_rewritten: usize,
    pub settings_patched: usize,
}

#[derive(Debug)]
enum State {
    Idle,
    Accumulating {
        /// Trimmed lines concatenated since the statement opened
        statement: String,
        /// Original lines with terminators, kept for the end-of-file flush
        raw: String,
        /// 1-based line number of the opening line
        start_line: usize,
    },
}

/// Output of classifying a whole file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classified {
    pub body: String,
    pub stats: FileStats,
    /// Opening line of an import statement that never closed
    pub unterminated_import: Option<usize>,
}

/// Line-by-line rewriter for one source file
pub struct LineClassifier<'a> {
    imports: &'a ImportTable,
    exports: &'a ExportRules,
    terminator: &'a dyn ImportTerminator,
    state: State,
    body: String,
    stats: FileStats,
}

impl<'a> LineClassifier<'a> {
    pub fn new(imports: &'a ImportTable, exports: &'a ExportRules) -> Self {
        Self {
            imports,
            exports,
            terminator: &FromKeyword,
            state: State::Idle,
            body: String::new(),
            stats: FileStats::default(),
        }
    }

    /// Replace the closing predicate for multi-line imports
    pub fn with_terminator(mut self, terminator: &'a dyn ImportTerminator) -> Self {
        self.terminator = terminator;
        self
    }

    /// Classify a complete source text
    pub fn classify_source(mut self, source: &str) -> Classified {
        for line in source.split_inclusive('\n') {
            self.push_line(line);
        }
        self.finish()
    }

    /// Feed one line, including its terminator if it has one
    pub fn push_line(&mut self, line: &str) {
        self.stats.lines += 1;
        let line_no = self.stats.lines;

        let (text, eol) = split_eol(line);

        let patched = patch_settings_call(text);
        if patched.is_some() {
            self.stats.settings_patched += 1;
        }
        let text = patched.as_deref().unwrap_or(text);

        if matches!(self.state, State::Idle) && text.starts_with(IMPORT_MARKER) {
            self.state = State::Accumulating {
                statement: String::new(),
                raw: String::new(),
                start_line: line_no,
            };
        }

        if let State::Accumulating { statement, raw, .. } = &mut self.state {
            statement.push_str(text.trim());
            raw.push_str(text);
            raw.push_str(eol);

            if self.terminator.closes(text) {
                let statement = std::mem::take(statement);
                self.state = State::Idle;
                self.close_import(&statement);
            }
            return;
        }

        match self.exports.normalize(text) {
            Some(normalized) => {
                trace!(line = line_no, rules = ?normalized.rules, "normalized export");
                self.stats.exports_rewritten += 1;
                self.body.push_str(&normalized.line);
            }
            None => self.body.push_str(text),
        }
        self.body.push_str(eol);
    }

    fn close_import(&mut self, statement: &str) {
        match self.imports.resolve(statement) {
            Some(mapping) => {
                self.stats.imports_mapped += 1;
                self.body.push_str(&mapping.emit);
            }
            None => {
                debug!(statement, "no import mapping, passing statement through");
                self.stats.imports_unmatched += 1;
                self.body.push_str(statement);
            }
        }
        self.body.push('\n');
    }

    /// Finish the file
    ///
    /// An import left open at end of file is reported, and its buffered
    /// lines are written through unchanged instead of being dropped.
    pub fn finish(mut self) -> Classified {
        let unterminated_import = match std::mem::replace(&mut self.state, State::Idle) {
            State::Idle => None,
            State::Accumulating {
                raw, start_line, ..
            } => {
                self.body.push_str(&raw);
                Some(start_line)
            }
        };

        Classified {
            body: self.body,
            stats: self.stats,
            unterminated_import,
        }
    }
}

fn split_eol(line: &str) -> (&str, &str) {
    if let Some(text) = line.strip_suffix("\r\n") {
        (text, "\r\n")
    } else if let Some(text) = line.strip_suffix('\n') {
        (text, "\n")
    } else {
        (line, "")
    }
}
