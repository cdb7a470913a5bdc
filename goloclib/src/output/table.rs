//! Table-ready data structures for metrics output.
//!
//! `MetricsTable` is a pure presentation layer: it turns a [`CountResult`]
//! into header/row/footer strings that can be printed directly or
//! serialized to JSON. No counting happens here.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::data::counter::CountResult;
use crate::data::stats::Results;
use crate::options::Aggregation;

/// Metric columns, in display order.
pub const METRIC_HEADERS: [&str; 7] = [
    "Code",
    "Err Check",
    "Comments",
    "Inline",
    "Blanks",
    "Total",
    "Max Depth",
];

/// A single row in the table (data row or footer).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Row label (file path, directory, "Total (N files)")
    pub label: String,
    /// Values for each metric column
    pub values: Vec<String>,
}

/// Table-ready metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsTable {
    /// Column headers: [label_header, metric1, ..., Max Depth]
    pub headers: Vec<String>,
    /// Data rows
    pub rows: Vec<TableRow>,
    /// Summary/footer row
    pub footer: TableRow,
}

impl MetricsTable {
    /// Build a table from a count result at the given aggregation level.
    ///
    /// Paths in labels and in the max-depth cell are shown relative to the
    /// result's root.
    pub fn from_count_result(result: &CountResult, aggregation: Aggregation) -> Self {
        let root = result.root.as_path();

        let rows: Vec<TableRow> = match aggregation {
            Aggregation::Total => Vec::new(),
            Aggregation::ByDirectory => result
                .directories
                .iter()
                .map(|d| TableRow {
                    label: dir_label(&d.path, root),
                    values: format_results(&d.stats, root),
                })
                .collect(),
            Aggregation::ByFile => result
                .files
                .iter()
                .map(|f| TableRow {
                    label: relative(&f.path, root),
                    values: format_results(&f.stats, root),
                })
                .collect(),
        };

        let footer = TableRow {
            label: footer_label(aggregation, rows.len(), result.total.files),
            values: format_results(&result.total, root),
        };

        let mut headers = vec![label_header(aggregation).to_string()];
        headers.extend(METRIC_HEADERS.iter().map(|h| h.to_string()));

        MetricsTable {
            headers,
            rows,
            footer,
        }
    }
}

fn label_header(aggregation: Aggregation) -> &'static str {
    match aggregation {
        Aggregation::Total => "Name",
        Aggregation::ByDirectory => "Directory",
        Aggregation::ByFile => "File",
    }
}

fn footer_label(aggregation: Aggregation, items_count: usize, file_count: u64) -> String {
    match aggregation {
        Aggregation::ByDirectory => format!("Total ({} directories)", items_count),
        Aggregation::Total | Aggregation::ByFile => format!("Total ({} files)", file_count),
    }
}

/// Format a Results record into one string per metric column.
fn format_results(stats: &Results, root: &Path) -> Vec<String> {
    vec![
        stats.code.to_string(),
        stats.error_checks.to_string(),
        stats.comments.to_string(),
        stats.inline_comments.to_string(),
        stats.blanks.to_string(),
        stats.total.to_string(),
        format_max_depth(stats, root),
    ]
}

fn format_max_depth(stats: &Results, root: &Path) -> String {
    let location = &stats.max_depth_location;
    if stats.max_depth == 0 || location.file.as_os_str().is_empty() {
        return stats.max_depth.to_string();
    }
    format!(
        "{} ({}:{})",
        stats.max_depth,
        relative(&location.file, root),
        location.line
    )
}

fn relative(path: &Path, root: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) if !rel.as_os_str().is_empty() => rel.to_string_lossy().to_string(),
        // A single-file root strips to nothing; keep the file name.
        _ => path
            .file_name()
            .filter(|_| path == root)
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string()),
    }
}

fn dir_label(path: &Path, root: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(rel) if rel.as_os_str().is_empty() => ".".to_string(),
        Ok(rel) => rel.to_string_lossy().to_string(),
        Err(_) => path.to_string_lossy().to_string(),
    }
}
