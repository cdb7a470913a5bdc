//! Optional `goloc.toml` configuration.
//!
//! The file mirrors the command-line options so a project can pin its
//! exclusions:
//!
//! ```toml
//! include_tests = false
//! exclude = ["**/generated/**"]
//! exclude_files = ["cmd/legacy/main.go"]
//! exclude_dirs = ["third_party"]
//! keep_going = false
//! ```
//!
//! Relative `exclude_files`/`exclude_dirs` entries in a loaded file are
//! resolved against the directory holding that file, so a config keeps
//! working whatever the current directory is.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::data::counter::CountOptions;
use crate::error::GolocError;
use crate::source::filter::FilterConfig;
use crate::Result;

/// File name looked up by [`Config::discover`].
pub const CONFIG_FILE_NAME: &str = "goloc.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Count `_test.go` files
    pub include_tests: bool,
    /// Glob patterns to include
    pub include: Vec<String>,
    /// Glob patterns to exclude
    pub exclude: Vec<String>,
    /// Exact file paths to skip
    pub exclude_files: Vec<PathBuf>,
    /// Exact directory paths to skip
    pub exclude_dirs: Vec<PathBuf>,
    /// Skip files that fail to scan
    pub keep_going: bool,
}

impl Config {
    /// Parse a config from TOML text. `path` is only used for error messages.
    pub fn parse(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| GolocError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Load a config file, resolving relative exclude paths against its
    /// directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| GolocError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        debug!(config = %path.display(), "loaded config");
        let base = path.parent().unwrap_or(Path::new(""));
        Ok(Self::parse(&content, path)?.relative_to(base))
    }

    /// Anchor relative `exclude_files`/`exclude_dirs` entries at `base`.
    pub fn relative_to(mut self, base: &Path) -> Self {
        let anchor = |p: PathBuf| if p.is_relative() { base.join(p) } else { p };
        self.exclude_files = self.exclude_files.into_iter().map(anchor).collect();
        self.exclude_dirs = self.exclude_dirs.into_iter().map(anchor).collect();
        self
    }

    /// Load `goloc.toml` from `root` if it exists.
    pub fn discover(root: impl AsRef<Path>) -> Result<Option<Self>> {
        let candidate = root.as_ref().join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            Self::load(candidate).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Build the file filter described by this config.
    pub fn filter(&self) -> Result<FilterConfig> {
        let mut filter = FilterConfig::new().include_tests(self.include_tests);
        for pattern in &self.include {
            filter = filter.include(pattern)?;
        }
        for pattern in &self.exclude {
            filter = filter.exclude(pattern)?;
        }
        for file in &self.exclude_files {
            filter = filter.exclude_file(file);
        }
        for dir in &self.exclude_dirs {
            filter = filter.exclude_dir(dir);
        }
        Ok(filter)
    }

    /// Build counting options from this config.
    pub fn count_options(&self) -> Result<CountOptions> {
        Ok(CountOptions::new()
            .filter(self.filter()?)
            .keep_going(self.keep_going))
    }
}
