//! # goloclib
//!
//! A Go source metrics library that separates code, error handling,
//! comments, and blank lines, and tracks how deeply code is nested.
//!
//! ## Overview
//!
//! Every line of a Go file lands in exactly one primary bucket:
//!
//! - **Blank**: Whitespace-only lines
//! - **Comments**: Lines holding nothing but comment text (`//`, `/* */`)
//! - **Error checks**: `if err != nil` blocks, from the condition line through
//!   the closing brace
//! - **Code**: Everything else
//!
//! Alongside the buckets it counts lines carrying a trailing comment and
//! records the deepest brace nesting together with the first place it was
//! reached.
//!
//! The scanner is line-based, not a Go parser: it understands comments,
//! interpreted and raw string literals, and rune literals well enough to
//! ignore braces and `//` inside them.
//!
//! ## Pipeline
//!
//! 1. **source**: decide which `.go` files to measure ([`FilterConfig`])
//! 2. **data**: classify lines, scan files and merge [`Results`]
//! 3. **output**: shape the numbers into a [`MetricsTable`]
//!
//! ## Example
//!
//! ```rust
//! use goloclib::{count_directory, gather_stats, Aggregation, CountOptions};
//! use std::fs;
//! use tempfile::tempdir;
//!
//! // Scan source text directly
//! let stats = gather_stats("package main\n\n// entry point\nfunc main() {}\n").unwrap();
//! assert_eq!(stats.code, 2);
//! assert_eq!(stats.comments, 1);
//! assert_eq!(stats.blanks, 1);
//!
//! // Count a whole tree
//! let dir = tempdir().unwrap();
//! fs::write(dir.path().join("main.go"), "package main\n\nfunc main() {\n}\n").unwrap();
//! let options = CountOptions::new().aggregation(Aggregation::ByFile);
//! let result = count_directory(dir.path(), &options).unwrap();
//! assert_eq!(result.total.files, 1);
//! assert_eq!(result.files.len(), 1);
//! ```

pub mod config;
pub mod data;
pub mod error;
pub mod options;
pub mod output;
pub mod source;

pub use config::{Config, CONFIG_FILE_NAME};
pub use data::{
    classify, count_directory, count_file, gather_stats, gather_stats_for_path, CountOptions,
    CountResult, DirStats, FileStats, LineClassification, Location, Results, ScanState, Visitor,
};
pub use error::{GolocError, InvariantViolation, ScanError};
pub use options::Aggregation;
pub use output::{MetricsTable, TableRow};
pub use source::FilterConfig;

/// Result type for goloclib operations
pub type Result<T> = std::result::Result<T, GolocError>;
