//! Errors raised while turning a document into a page.
//!
//! Navigation itself never fails: out-of-range jumps and unmatched scroll positions are
//! silent no-ops. Only loading, parsing and configuration can go wrong.

use std::io;
use std::path::PathBuf;

/// Shorthand for results carrying a [`PageError`].
pub type PageResult<T> = Result<T, PageError>;

#[derive(thiserror::Error, Debug)]
/// Failures encountered while loading a document or its configuration.
pub enum PageError {
    /// Reading the document from disk failed.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O failure.
        source: io::Error,
    },

    /// The tree-sitter grammar could not be loaded into the parser.
    #[error("language error: {0}")]
    Language(String),

    /// A heading query failed to compile against the grammar.
    #[error("query error: {0}")]
    Query(String),

    /// The parser produced no tree for the document.
    #[error("failed to parse document")]
    Parse,

    /// The document has no headings, so there is nothing to navigate.
    #[error("no sections found in document")]
    NoSections,

    /// The configuration file exists but could not be parsed.
    #[error("config error: {0}")]
    Config(String),

    /// A geometry update did not match the fixed number of sections.
    #[error("expected geometry for {expected} sections, got {actual}")]
    SectionCount {
        /// Number of sections the navigator was built with.
        expected: usize,
        /// Number of geometry entries supplied.
        actual: usize,
    },
}

impl PageError {
    /// Wraps an I/O error together with the path that caused it.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
