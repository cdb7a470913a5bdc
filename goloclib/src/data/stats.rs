//! Core data structures for Go source metrics.
//!
//! [`Results`] is the unit of measurement: produced once per file by the
//! visitor and then folded upward into directory and tree totals with
//! [`Results::merge`]. Every counter adds. The deepest nesting level is a
//! max, and on a tie the right-hand operand's location wins, so the order in
//! which results are folded is observable.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};
use std::path::PathBuf;

/// Where a maximum brace depth was first reached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// File the line belongs to (empty until the caller attaches it).
    pub file: PathBuf,
    /// 1-based line number, 0 if no scope was ever opened.
    pub line: usize,
}

impl Location {
    pub fn new(file: impl Into<PathBuf>, line: usize) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }
}

/// Metrics for one file, or the merged metrics of many.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Results {
    /// Number of files measured
    pub files: u64,
    /// Lines of ordinary code
    pub code: u64,
    /// Lines belonging to error-check blocks (`if err != nil { ... }`)
    pub error_checks: u64,
    /// Lines that hold nothing but comments
    pub comments: u64,
    /// Blank/whitespace-only lines
    pub blanks: u64,
    /// Every line read
    pub total: u64,
    /// Code lines that also carry a comment
    pub inline_comments: u64,
    /// Deepest brace nesting seen
    pub max_depth: u64,
    /// Where `max_depth` was first reached
    pub max_depth_location: Location,
}

impl Results {
    /// Create a new Results with all zeros.
    pub fn new() -> Self {
        Self::default()
    }

    /// Combine two results.
    ///
    /// Counters are summed. The max depth is the larger of the two; its
    /// location is `self`'s only when `self` is strictly deeper, otherwise
    /// `other`'s.
    ///
    /// ```rust
    /// use goloclib::{Location, Results};
    ///
    /// let a = Results { max_depth: 3, max_depth_location: Location::new("a.go", 7), ..Default::default() };
    /// let b = Results { max_depth: 3, max_depth_location: Location::new("b.go", 2), ..Default::default() };
    ///
    /// assert_eq!(a.merge(b).max_depth_location, Location::new("b.go", 2));
    /// ```
    pub fn merge(self, other: Self) -> Self {
        let max_depth_location = if self.max_depth > other.max_depth {
            self.max_depth_location
        } else {
            other.max_depth_location
        };

        Self {
            files: self.files + other.files,
            code: self.code + other.code,
            error_checks: self.error_checks + other.error_checks,
            comments: self.comments + other.comments,
            blanks: self.blanks + other.blanks,
            total: self.total + other.total,
            inline_comments: self.inline_comments + other.inline_comments,
            max_depth: self.max_depth.max(other.max_depth),
            max_depth_location,
        }
    }
}

impl Add for Results {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.merge(other)
    }
}

impl AddAssign for Results {
    fn add_assign(&mut self, other: Self) {
        *self = std::mem::take(self).merge(other);
    }
}

/// Statistics for a single file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileStats {
    /// Path to the file.
    pub path: PathBuf,
    /// Metrics for this file.
    pub stats: Results,
}

impl FileStats {
    pub fn new(path: PathBuf, stats: Results) -> Self {
        Self { path, stats }
    }
}

/// Merged statistics for a directory and everything below it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirStats {
    /// Path to the directory.
    pub path: PathBuf,
    /// Subtree total.
    pub stats: Results,
}

impl DirStats {
    pub fn new(path: PathBuf, stats: Results) -> Self {
        Self { path, stats }
    }
}
