//! Data collection: scan files and collect statistics.
//!
//! This module handles the core of the pipeline - reading Go source files
//! line by line and collecting metrics. It provides:
//!
//! - **Classification**: per-line comment/string/brace analysis
//! - **Scanning**: the stateful visitor that accumulates one file's results
//! - **Statistics**: `Results` and its merge
//! - **Counting**: High-level API (`count_directory`, `count_file`)
//!
//! ## Example
//!
//! ```rust,ignore
//! use goloclib::data::{count_directory, CountOptions};
//!
//! let result = count_directory(".", &CountOptions::new())?;
//! println!("Total code lines: {}", result.total.code);
//! ```

pub mod classify;
pub mod counter;
pub mod stats;
pub mod visitor;

pub use classify::{classify, LineClassification, ScanState};
pub use counter::{count_directory, count_file, CountOptions, CountResult};
pub use stats::{DirStats, FileStats, Location, Results};
pub use visitor::{gather_stats, gather_stats_for_path, Visitor};
