//! Go source stream visitor for metric collection.
//!
//! The visitor reads one line at a time, classifies it with
//! [`classify`](super::classify::classify) using the state left by the
//! previous line, and folds the classification into a running [`Results`].
//!
//! Besides the [`ScanState`] it tracks two things across lines:
//!
//! - the cumulative brace depth, whose maximum (and the first line reaching
//!   it) ends up in the results;
//! - whether the scan is inside an error-check block. A block is entered on
//!   a line containing the error-check idiom and left on the line that
//!   brings the depth back to the level the check was written at. Every
//!   line in between counts as error-check, however deeply it nests.
//!
//! A line counts as code when the scan is outside an error-check block after
//! it, which includes the line closing a block.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use tracing::{debug, trace};

use crate::error::{GolocError, ScanError};
use crate::Result;

use super::classify::{classify, LineClassification, ScanState};
use super::stats::Results;

/// Error-check block tracking.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum ErrorCheck {
    #[default]
    Outside,
    /// Inside a block that closes when the depth returns to `anchor`.
    Inside { anchor: i64 },
}

impl ErrorCheck {
    /// Enter a block anchored one level below `depth`.
    ///
    /// A check written at the top level of a file has nothing to return to,
    /// so it never opens a block.
    fn enter(depth: i64) -> Self {
        let anchor = depth - 1;
        if anchor > 0 {
            ErrorCheck::Inside { anchor }
        } else {
            ErrorCheck::Outside
        }
    }
}

/// A visitor that scans a Go source stream and collects [`Results`].
pub struct Visitor<T: Read> {
    reader: BufReader<T>,
    state: ScanState,
    depth: i64,
    error_check: ErrorCheck,
    stats: Results,
    curr_line_no: usize,
}

impl Visitor<File> {
    /// Create a new visitor for a file at the given path.
    pub fn new(file_path: impl AsRef<Path>) -> Result<Self> {
        let path = file_path.as_ref();
        let file = File::open(path).map_err(|e| GolocError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let metadata = file.metadata().map_err(|e| GolocError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        if !metadata.is_file() {
            return Err(GolocError::NotAFile(path.to_path_buf()));
        }

        Ok(Self::from_reader(file))
    }
}

impl<T: Read> Visitor<T> {
    /// Create a visitor from any reader.
    ///
    /// This is useful for testing without actual files.
    pub fn from_reader(reader: T) -> Self {
        Self {
            reader: BufReader::new(reader),
            state: ScanState::default(),
            depth: 0,
            error_check: ErrorCheck::Outside,
            stats: Results {
                files: 1,
                ..Default::default()
            },
            curr_line_no: 0,
        }
    }

    /// Read the stream to the end and return its metrics.
    ///
    /// The reader is dropped on every exit path, including failures.
    pub fn visit_file(mut self) -> std::result::Result<Results, ScanError> {
        let mut buf = Vec::new();

        loop {
            buf.clear();
            let line = self.curr_line_no + 1;
            let read = self
                .reader
                .read_until(b'\n', &mut buf)
                .map_err(|source| ScanError::Read { line, source })?;
            if read == 0 {
                break;
            }

            self.curr_line_no = line;
            self.visit_line(&String::from_utf8_lossy(&buf))?;
        }

        Ok(self.stats)
    }

    fn visit_line(&mut self, text: &str) -> std::result::Result<(), ScanError> {
        let class = classify(text, self.state);
        trace!(line = self.curr_line_no, ?class, "classified line");
        self.fold_line(class)
    }

    /// Fold one classified line into the running results.
    fn fold_line(&mut self, class: LineClassification) -> std::result::Result<(), ScanError> {
        let line = self.curr_line_no;
        self.stats.total += 1;

        if class.is_whitespace {
            self.stats.blanks += 1;
            return Ok(());
        }

        class
            .check()
            .map_err(|violation| ScanError::Invariant { line, violation })?;

        // Comment-only lines can open or close a block comment, so the
        // state moves before they are set aside.
        self.state = class.next_state(self.state);

        if class.is_only_comment {
            self.stats.comments += 1;
            return Ok(());
        }

        if class.is_inline_comment {
            self.stats.inline_comments += 1;
        }

        self.track_depth(&class);
        self.track_error_check(&class);

        Ok(())
    }

    fn track_depth(&mut self, class: &LineClassification) {
        self.depth += class.braces_delta;

        if let Ok(depth) = u64::try_from(self.depth) {
            if depth > self.stats.max_depth {
                self.stats.max_depth = depth;
                self.stats.max_depth_location.line = self.curr_line_no;
            }
        }
    }

    fn track_error_check(&mut self, class: &LineClassification) {
        let is_error_check = match self.error_check {
            ErrorCheck::Outside if class.starts_error_check => {
                self.error_check = ErrorCheck::enter(self.depth);
                true
            }
            ErrorCheck::Inside { anchor } if class.braces_delta < 0 && self.depth == anchor => {
                self.error_check = ErrorCheck::Outside;
                true
            }
            ErrorCheck::Inside { .. } => true,
            ErrorCheck::Outside => false,
        };

        if is_error_check {
            self.stats.error_checks += 1;
        }
        if self.error_check == ErrorCheck::Outside {
            self.stats.code += 1;
        }
    }
}

/// Gather metrics for a file at the given path.
///
/// The file path is attached to the max-depth location of the result.
///
/// # Example
///
/// ```rust
/// use goloclib::gather_stats_for_path;
/// use std::fs;
/// use tempfile::tempdir;
///
/// let dir = tempdir().unwrap();
/// let file_path = dir.path().join("main.go");
/// fs::write(&file_path, "func main() {\n\tfmt.Println(\"hi\")\n}\n").unwrap();
///
/// let stats = gather_stats_for_path(&file_path).unwrap();
/// assert_eq!(stats.code, 3);
/// assert_eq!(stats.max_depth_location.file, file_path);
/// ```
pub fn gather_stats_for_path(path: impl AsRef<Path>) -> Result<Results> {
    let path = path.as_ref();
    debug!(file = %path.display(), "scanning file");

    let visitor = Visitor::new(path)?;
    let mut stats = visitor.visit_file().map_err(|source| GolocError::Scan {
        path: path.to_path_buf(),
        source,
    })?;
    stats.max_depth_location.file = path.to_path_buf();

    Ok(stats)
}

/// Gather metrics from a string of Go source code.
///
/// # Example
///
/// ```rust
/// use goloclib::gather_stats;
///
/// let source = "func f() {\n}\n";
///
/// let stats = gather_stats(source).unwrap();
/// assert_eq!(stats.code, 2);
/// assert_eq!(stats.max_depth, 1);
/// ```
pub fn gather_stats(source: &str) -> std::result::Result<Results, ScanError> {
    Visitor::from_reader(source.as_bytes()).visit_file()
}
