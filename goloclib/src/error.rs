//! Error types for goloclib

use std::path::PathBuf;
use thiserror::Error;

/// A pair of classification flags that must never be set together on one line.
///
/// Seeing one of these means the classifier produced an inconsistent result,
/// so the stream being scanned cannot be trusted past that line.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("line is classified as both only-comment and inline-comment")]
    OnlyAndInlineComment,

    #[error("line both starts and ends a block comment")]
    BlockCommentStartAndEnd,

    #[error("line both starts and ends a multi-line string")]
    MultilineStringStartAndEnd,
}

/// Failure while scanning a single line stream.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The classifier broke one of its own invariants.
    #[error("line {line}: {violation}")]
    Invariant {
        line: usize,
        violation: InvariantViolation,
    },

    /// The underlying reader failed before end of stream.
    #[error("line {line}: read failed: {source}")]
    Read {
        line: usize,
        source: std::io::Error,
    },
}

impl ScanError {
    /// Line number at which the stream was aborted.
    pub fn line(&self) -> usize {
        match self {
            ScanError::Invariant { line, .. } | ScanError::Read { line, .. } => *line,
        }
    }
}

/// Errors that can occur while measuring a source tree
#[derive(Error, Debug)]
pub enum GolocError {
    /// Failed to open a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Scanning a file's contents failed
    #[error("file '{path}': {source}")]
    Scan { path: PathBuf, source: ScanError },

    /// A path expected to be a regular file is something else
    #[error("not a file: {0}")]
    NotAFile(PathBuf),

    /// Path does not exist
    #[error("path does not exist: {0}")]
    PathNotFound(PathBuf),

    /// Directory traversal failed
    #[error("failed to walk '{path}': {message}")]
    Walk { path: PathBuf, message: String },

    /// Invalid glob pattern
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidGlob { pattern: String, message: String },

    /// Config file could not be read or parsed
    #[error("invalid config '{path}': {message}")]
    Config { path: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
