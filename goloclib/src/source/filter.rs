//! File filtering with glob pattern and exclude-list support.
//!
//! Decides which files are measured and which directories are descended
//! into. Only `.go` files are candidates; `_test.go` files are skipped
//! unless tests are explicitly included.

use std::path::{Component, Path, PathBuf};

use glob::Pattern;

use crate::error::GolocError;
use crate::Result;

const SOURCE_EXTENSION: &str = "go";
const TEST_FILE_SUFFIX: &str = "_test.go";

/// Configuration for file filtering.
#[derive(Debug, Clone, Default)]
pub struct FilterConfig {
    /// Glob patterns to include (if empty, include all .go files)
    pub include: Vec<Pattern>,
    /// Glob patterns to exclude (applies to files and directories)
    pub exclude: Vec<Pattern>,
    /// Exact file paths to skip
    pub exclude_files: Vec<PathBuf>,
    /// Exact directory paths to skip
    pub exclude_dirs: Vec<PathBuf>,
    /// Count `_test.go` files too
    pub include_tests: bool,
}

impl FilterConfig {
    /// Create a new empty filter config (all non-test .go files).
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an include pattern.
    pub fn include(mut self, pattern: &str) -> Result<Self> {
        self.include.push(compile(pattern)?);
        Ok(self)
    }

    /// Add an exclude pattern.
    pub fn exclude(mut self, pattern: &str) -> Result<Self> {
        self.exclude.push(compile(pattern)?);
        Ok(self)
    }

    /// Add multiple include patterns.
    pub fn include_many(mut self, patterns: &[&str]) -> Result<Self> {
        for pattern in patterns {
            self = self.include(pattern)?;
        }
        Ok(self)
    }

    /// Add multiple exclude patterns.
    pub fn exclude_many(mut self, patterns: &[&str]) -> Result<Self> {
        for pattern in patterns {
            self = self.exclude(pattern)?;
        }
        Ok(self)
    }

    /// Skip one specific file.
    pub fn exclude_file(mut self, path: impl AsRef<Path>) -> Self {
        self.exclude_files.push(normalize(path.as_ref()));
        self
    }

    /// Skip one specific directory and everything below it.
    pub fn exclude_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.exclude_dirs.push(normalize(path.as_ref()));
        self
    }

    /// Count `_test.go` files.
    pub fn include_tests(mut self, include: bool) -> Self {
        self.include_tests = include;
        self
    }

    /// Check if a file should be measured.
    ///
    /// A path matches if:
    /// 1. It's a .go file (and not a test file, unless tests are included)
    /// 2. It isn't on the exclude list
    /// 3. It matches at least one include pattern (or include is empty)
    /// 4. It doesn't match any exclude pattern
    pub fn matches(&self, path: &Path) -> bool {
        if path.extension().map_or(true, |ext| ext != SOURCE_EXTENSION) {
            return false;
        }

        if !self.include_tests && is_test_file(path) {
            return false;
        }

        if self.exclude_files.contains(&normalize(path)) {
            return false;
        }

        let path_str = path.to_string_lossy();

        if self.exclude.iter().any(|p| p.matches(&path_str)) {
            return false;
        }

        self.include.is_empty() || self.include.iter().any(|p| p.matches(&path_str))
    }

    /// Check if a directory should be skipped during traversal.
    ///
    /// Hidden directories and `vendor/` are always skipped.
    pub fn skips_dir(&self, path: &Path) -> bool {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default();
        if name.starts_with('.') || name == "vendor" {
            return true;
        }

        if self.exclude_dirs.contains(&normalize(path)) {
            return true;
        }

        let path_str = path.to_string_lossy();
        self.exclude.iter().any(|p| p.matches(&path_str))
    }
}

fn compile(pattern: &str) -> Result<Pattern> {
    Pattern::new(pattern).map_err(|e| GolocError::InvalidGlob {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

fn is_test_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.len() > TEST_FILE_SUFFIX.len() && n.ends_with(TEST_FILE_SUFFIX))
}

/// Drop `.` components so `./pkg/a.go` and `pkg/a.go` compare equal.
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_matches_go_files() {
        let filter = FilterConfig::new();

        assert!(filter.matches(Path::new("cmd/main.go")));
        assert!(filter.matches(Path::new("lib.go")));
        assert!(!filter.matches(Path::new("README.md")));
        assert!(!filter.matches(Path::new("go.mod")));
        assert!(!filter.matches(Path::new("main.rs")));
    }

    #[test]
    fn test_filter_skips_test_files() {
        let filter = FilterConfig::new();
        assert!(!filter.matches(Path::new("pkg/server_test.go")));
        // Nothing before the suffix: an ordinary file named "_test.go"
        assert!(filter.matches(Path::new("pkg/_test.go")));

        let filter = FilterConfig::new().include_tests(true);
        assert!(filter.matches(Path::new("pkg/server_test.go")));
    }

    #[test]
    fn test_filter_with_include_pattern() {
        let filter = FilterConfig::new().include("**/pkg/*.go").unwrap();

        assert!(filter.matches(Path::new("src/pkg/util.go")));
        assert!(!filter.matches(Path::new("src/cmd/main.go")));
    }

    #[test]
    fn test_filter_with_exclude_pattern() {
        let filter = FilterConfig::new().exclude("**/generated/**").unwrap();

        assert!(filter.matches(Path::new("pkg/api.go")));
        assert!(!filter.matches(Path::new("pkg/generated/api.pb.go")));
    }

    #[test]
    fn test_filter_with_multiple_patterns() {
        let filter = FilterConfig::new()
            .include_many(&["**/pkg/**", "**/cmd/**"])
            .unwrap()
            .exclude_many(&["**/internal/**"])
            .unwrap();

        assert!(filter.matches(Path::new("project/pkg/a.go")));
        assert!(filter.matches(Path::new("project/cmd/main.go")));
        assert!(!filter.matches(Path::new("project/pkg/internal/b.go")));
        assert!(!filter.matches(Path::new("project/tools/gen.go")));
    }

    #[test]
    fn test_exclude_file_ignores_current_dir_prefix() {
        let filter = FilterConfig::new().exclude_file("./cmd/legacy.go");

        assert!(!filter.matches(Path::new("cmd/legacy.go")));
        assert!(!filter.matches(Path::new("./cmd/legacy.go")));
        assert!(filter.matches(Path::new("cmd/main.go")));
    }

    #[test]
    fn test_skips_dir() {
        let filter = FilterConfig::new()
            .exclude_dir("third_party")
            .exclude("**/testdata")
            .unwrap();

        assert!(filter.skips_dir(Path::new("repo/.git")));
        assert!(filter.skips_dir(Path::new("repo/vendor")));
        assert!(filter.skips_dir(Path::new("./third_party")));
        assert!(filter.skips_dir(Path::new("repo/pkg/testdata")));
        assert!(!filter.skips_dir(Path::new("repo/pkg")));
        assert!(!filter.skips_dir(Path::new("repo/third_party")));
    }

    #[test]
    fn test_invalid_glob_pattern() {
        let result = FilterConfig::new().include("[invalid");

        assert!(result.is_err());
        if let Err(GolocError::InvalidGlob { pattern, .. }) = result {
            assert_eq!(pattern, "[invalid");
        } else {
            panic!("Expected InvalidGlob error");
        }
    }
}
