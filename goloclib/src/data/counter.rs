//! High-level counting API.
//!
//! This module provides the main entry points for measuring Go source
//! trees: a depth-first walk that scans every selected file and folds the
//! per-file results into per-directory and whole-tree totals.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::error::GolocError;
use crate::options::Aggregation;
use crate::source::filter::FilterConfig;
use crate::Result;

use super::stats::{DirStats, FileStats, Results};
use super::visitor::gather_stats_for_path;

/// Options for counting.
#[derive(Debug, Clone, Default)]
pub struct CountOptions {
    /// File filter configuration
    pub file_filter: FilterConfig,
    /// Aggregation level for results
    pub aggregation: Aggregation,
    /// Skip files that fail to scan instead of aborting
    pub keep_going: bool,
}

impl CountOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set file filter.
    pub fn filter(mut self, filter: FilterConfig) -> Self {
        self.file_filter = filter;
        self
    }

    /// Set aggregation level.
    pub fn aggregation(mut self, level: Aggregation) -> Self {
        self.aggregation = level;
        self
    }

    /// Log and skip files that fail to scan.
    pub fn keep_going(mut self, keep_going: bool) -> Self {
        self.keep_going = keep_going;
        self
    }
}

/// Result of counting a directory tree.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct CountResult {
    /// Path the count started from
    pub root: PathBuf,
    /// Merged results for the whole tree
    pub total: Results,
    /// Per-directory subtree totals, sorted by path (if requested)
    pub directories: Vec<DirStats>,
    /// Per-file results in traversal order (if requested)
    pub files: Vec<FileStats>,
    /// Files skipped because they failed to scan
    pub skipped: Vec<PathBuf>,
}

impl CountResult {
    /// Create a new empty result.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }
}

/// Count a directory tree.
///
/// Directories are walked depth-first with entries in file-name order, and
/// every directory's total is folded left to right over its children. When
/// two files tie on max depth, the later one in that order is reported.
///
/// # Example
///
/// ```rust
/// use goloclib::{count_directory, CountOptions};
/// use std::fs;
/// use tempfile::tempdir;
///
/// let dir = tempdir().unwrap();
/// fs::write(dir.path().join("a.go"), "package a\n\nfunc A() {\n}\n").unwrap();
/// fs::write(dir.path().join("a_test.go"), "package a\n").unwrap();
///
/// let result = count_directory(dir.path(), &CountOptions::new()).unwrap();
/// assert_eq!(result.total.files, 1);
/// assert_eq!(result.total.code, 3);
/// ```
pub fn count_directory(path: impl AsRef<Path>, options: &CountOptions) -> Result<CountResult> {
    let root = path.as_ref();

    if !root.exists() {
        return Err(GolocError::PathNotFound(root.to_path_buf()));
    }

    let mut result = CountResult::new(root);

    if root.is_file() {
        if options.file_filter.matches(root) {
            if let Some(stats) = scan_file(root, options, &mut result)? {
                result.total = stats;
            }
        }
        return Ok(result);
    }

    result.total = walk_tree(root, options, &mut result)?;

    if matches!(options.aggregation, Aggregation::ByDirectory) {
        result.directories.sort_by(|a, b| a.path.cmp(&b.path));
    }

    Ok(result)
}

/// Count a single file.
///
/// # Example
///
/// ```rust
/// use goloclib::count_file;
/// use std::fs;
/// use tempfile::tempdir;
///
/// let dir = tempdir().unwrap();
/// let file_path = dir.path().join("main.go");
/// fs::write(&file_path, "func main() {\n\tif err != nil {\n\t\treturn\n\t}\n}\n").unwrap();
///
/// let stats = count_file(&file_path).unwrap();
/// assert_eq!(stats.files, 1);
/// assert_eq!(stats.error_checks, 3);
/// ```
pub fn count_file(path: impl AsRef<Path>) -> Result<Results> {
    gather_stats_for_path(path)
}

/// Walk `root` once, depth-first in file-name order, folding each file into
/// its directory and each finished directory into its parent.
///
/// `open` holds the running totals of the directories on the current path,
/// root first. An entry at depth `d` closes every open directory deeper
/// than `d - 1`, so children are folded left to right in visit order.
fn walk_tree(root: &Path, options: &CountOptions, result: &mut CountResult) -> Result<Results> {
    let filter = &options.file_filter;
    let mut open: Vec<(PathBuf, Results)> = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            // The root is always entered, even if its own name looks hidden.
            e.depth() == 0 || !e.file_type().is_dir() || !filter.skips_dir(e.path())
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().unwrap_or(root).to_path_buf();
                if e.loop_ancestor().is_some() {
                    warn!(dir = %path.display(), "skipping symlink loop");
                    continue;
                }
                if options.keep_going {
                    warn!(path = %path.display(), error = %e, "skipping unreadable entry");
                    result.skipped.push(path);
                    continue;
                }
                return Err(GolocError::Walk {
                    path,
                    message: e.to_string(),
                });
            }
        };

        while open.len() > entry.depth() {
            close_dir(&mut open, options, result);
        }

        let path = entry.path();
        if entry.file_type().is_dir() {
            debug!(dir = %path.display(), "opening directory");
            open.push((path.to_path_buf(), Results::new()));
        } else if entry.file_type().is_file() && filter.matches(path) {
            if let Some(stats) = scan_file(path, options, result)? {
                if let Some((_, total)) = open.last_mut() {
                    *total += stats;
                }
            }
        }
    }

    while open.len() > 1 {
        close_dir(&mut open, options, result);
    }

    Ok(match open.pop() {
        Some((dir, total)) => {
            record_dir(dir, &total, options, result);
            total
        }
        None => Results::new(),
    })
}

/// Pop the deepest open directory and fold its total into its parent.
fn close_dir(
    open: &mut Vec<(PathBuf, Results)>,
    options: &CountOptions,
    result: &mut CountResult,
) {
    if let Some((dir, total)) = open.pop() {
        record_dir(dir, &total, options, result);
        if let Some((_, parent)) = open.last_mut() {
            *parent += total;
        }
    }
}

fn record_dir(dir: PathBuf, total: &Results, options: &CountOptions, result: &mut CountResult) {
    if matches!(options.aggregation, Aggregation::ByDirectory) {
        result.directories.push(DirStats::new(dir, total.clone()));
    }
}

/// Scan one file, honouring keep-going. `None` means the file was skipped.
fn scan_file(
    path: &Path,
    options: &CountOptions,
    result: &mut CountResult,
) -> Result<Option<Results>> {
    match count_file(path) {
        Ok(stats) => {
            if matches!(options.aggregation, Aggregation::ByFile) {
                result
                    .files
                    .push(FileStats::new(path.to_path_buf(), stats.clone()));
            }
            Ok(Some(stats))
        }
        Err(err) if options.keep_going => {
            warn!(file = %path.display(), error = %err, "skipping file");
            result.skipped.push(path.to_path_buf());
            Ok(None)
        }
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::stats::Location;
    use std::fs;
    use tempfile::tempdir;

    fn create_go_file(path: &Path, content: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    const SHALLOW: &str = "package x\n\nfunc f() {\n}\n";
    const DEEP: &str = "package x\n\nfunc g() {\n\tif ok {\n\t\tdo()\n\t}\n}\n";

    fn create_tree(root: &Path) {
        create_go_file(&root.join("main.go"), SHALLOW);
        create_go_file(&root.join("main_test.go"), DEEP);
        create_go_file(&root.join("pkg/a.go"), DEEP);
        create_go_file(&root.join("pkg/b.go"), DEEP);
        create_go_file(&root.join("pkg/util/c.go"), SHALLOW);
        create_go_file(&root.join("vendor/dep/d.go"), DEEP);
        create_go_file(&root.join(".git/hooks.go"), DEEP);
        create_go_file(&root.join("README.md"), "# readme\n");
    }

    #[test]
    fn test_count_directory_totals() {
        let temp = tempdir().unwrap();
        create_tree(temp.path());

        let result = count_directory(temp.path(), &CountOptions::new()).unwrap();

        // main.go, pkg/a.go, pkg/b.go, pkg/util/c.go
        assert_eq!(result.total.files, 4);
        assert_eq!(result.total.code, 3 + 6 + 6 + 3);
        assert_eq!(result.total.blanks, 4);
        assert_eq!(result.total.total, 4 + 7 + 7 + 4);
        assert_eq!(result.total.max_depth, 2);
        assert!(result.directories.is_empty());
        assert!(result.files.is_empty());
    }

    #[test]
    fn test_tie_reports_later_file() {
        let temp = tempdir().unwrap();
        create_tree(temp.path());

        let result = count_directory(temp.path(), &CountOptions::new()).unwrap();

        assert_eq!(
            result.total.max_depth_location,
            Location::new(temp.path().join("pkg/b.go"), 4)
        );
    }

    #[test]
    fn test_by_directory() {
        let temp = tempdir().unwrap();
        create_tree(temp.path());

        let options = CountOptions::new().aggregation(Aggregation::ByDirectory);
        let result = count_directory(temp.path(), &options).unwrap();

        let dirs: Vec<&Path> = result.directories.iter().map(|d| d.path.as_path()).collect();
        assert_eq!(
            dirs,
            vec![
                temp.path().to_path_buf(),
                temp.path().join("pkg"),
                temp.path().join("pkg/util"),
            ]
        );

        assert_eq!(result.directories[0].stats, result.total);
        assert_eq!(result.directories[1].stats.files, 3);
        assert_eq!(result.directories[2].stats.files, 1);
        assert_eq!(result.directories[2].stats.max_depth, 1);
    }

    #[test]
    fn test_by_file_traversal_order() {
        let temp = tempdir().unwrap();
        create_tree(temp.path());

        let options = CountOptions::new().aggregation(Aggregation::ByFile);
        let result = count_directory(temp.path(), &options).unwrap();

        let files: Vec<PathBuf> = result.files.iter().map(|f| f.path.clone()).collect();
        assert_eq!(
            files,
            vec![
                temp.path().join("main.go"),
                temp.path().join("pkg/a.go"),
                temp.path().join("pkg/b.go"),
                temp.path().join("pkg/util/c.go"),
            ]
        );
    }

    #[test]
    fn test_include_tests() {
        let temp = tempdir().unwrap();
        create_tree(temp.path());

        let options = CountOptions::new().filter(FilterConfig::new().include_tests(true));
        let result = count_directory(temp.path(), &options).unwrap();

        assert_eq!(result.total.files, 5);
    }

    #[test]
    fn test_exclude_lists() {
        let temp = tempdir().unwrap();
        create_tree(temp.path());

        let filter = FilterConfig::new()
            .exclude_dir(temp.path().join("pkg/util"))
            .exclude_file(temp.path().join("pkg/b.go"));
        let options = CountOptions::new().filter(filter);
        let result = count_directory(temp.path(), &options).unwrap();

        assert_eq!(result.total.files, 2);
        assert_eq!(
            result.total.max_depth_location,
            Location::new(temp.path().join("pkg/a.go"), 4)
        );
    }

    #[test]
    fn test_count_single_file_root() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("one.go");
        create_go_file(&file, DEEP);

        let options = CountOptions::new().aggregation(Aggregation::ByFile);
        let result = count_directory(&file, &options).unwrap();

        assert_eq!(result.total.files, 1);
        assert_eq!(result.files.len(), 1);
        assert_eq!(result.total.max_depth_location, Location::new(&file, 4));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_loop_is_skipped() {
        let temp = tempdir().unwrap();
        create_tree(temp.path());
        std::os::unix::fs::symlink("..", temp.path().join("pkg/loop")).unwrap();

        let options = CountOptions::new().aggregation(Aggregation::ByDirectory);
        let result = count_directory(temp.path(), &options).unwrap();

        assert_eq!(result.total.files, 4);
        assert_eq!(result.directories.len(), 3);
        assert!(result.skipped.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_is_followed() {
        let temp = tempdir().unwrap();
        let outside = tempdir().unwrap();
        create_go_file(&temp.path().join("main.go"), SHALLOW);
        create_go_file(&outside.path().join("ext.go"), DEEP);
        std::os::unix::fs::symlink(outside.path(), temp.path().join("linked")).unwrap();

        let result = count_directory(temp.path(), &CountOptions::new()).unwrap();

        assert_eq!(result.total.files, 2);
        assert_eq!(
            result.total.max_depth_location,
            Location::new(temp.path().join("linked/ext.go"), 4)
        );
    }

    #[test]
    fn test_count_empty_directory() {
        let temp = tempdir().unwrap();
        let result = count_directory(temp.path(), &CountOptions::new()).unwrap();

        assert_eq!(result.total, Results::new());
    }

    #[test]
    fn test_count_directory_nonexistent() {
        let result = count_directory("/nonexistent/path", &CountOptions::new());
        assert!(matches!(result, Err(GolocError::PathNotFound(_))));
    }

    #[cfg(unix)]
    #[test]
    fn test_keep_going_skips_unreadable_file() {
        use std::os::unix::fs::PermissionsExt;

        let temp = tempdir().unwrap();
        create_go_file(&temp.path().join("ok.go"), SHALLOW);
        let locked = temp.path().join("locked.go");
        create_go_file(&locked, SHALLOW);
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

        // Privileged users can read it anyway.
        if fs::read(&locked).is_ok() {
            return;
        }

        let strict = count_directory(temp.path(), &CountOptions::new());
        assert!(matches!(strict, Err(GolocError::FileRead { .. })));

        let options = CountOptions::new().keep_going(true);
        let result = count_directory(temp.path(), &options).unwrap();
        assert_eq!(result.total.files, 1);
        assert_eq!(result.skipped, vec![locked]);
    }

    #[test]
    fn test_count_file() {
        let temp = tempdir().unwrap();
        let file = temp.path().join("f.go");
        create_go_file(
            &file,
            r#"// Package f does things.
package f

/* Open reads
   a file. */
func Open(p string) error {
	f, err := os.Open(p) // open it
	if err != nil {
		return err
	}
	return f.Close()
}
"#,
        );

        let stats = count_file(&file).unwrap();

        assert_eq!(stats.files, 1);
        assert_eq!(stats.comments, 3);
        assert_eq!(stats.blanks, 1);
        assert_eq!(stats.inline_comments, 1);
        assert_eq!(stats.error_checks, 3);
        // package, func, f :=, closing brace of the check, return, }
        assert_eq!(stats.code, 6);
        assert_eq!(stats.total, 12);
    }
}
