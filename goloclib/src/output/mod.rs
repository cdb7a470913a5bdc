//! Output formatting: present data as tables.
//!
//! - **MetricsTable**: Table-ready data structure with headers, rows, and footer
//! - **TableRow**: Individual row with label and formatted values
//!
//! MetricsTable is a pure presentation layer - it only formats data into
//! strings. All counting and aggregation happens in the data stage.
//!
//! ## Example
//!
//! ```rust,ignore
//! use goloclib::output::MetricsTable;
//!
//! let table = MetricsTable::from_count_result(&result, Aggregation::ByFile);
//! // table.headers: ["File", "Code", "Err Check", ..., "Max Depth"]
//! // table.rows: [TableRow { label: "pkg/a.go", values: ["100", "12", ...] }]
//! // table.footer: TableRow { label: "Total (5 files)", ... }
//! ```

pub mod table;

pub use table::{MetricsTable, TableRow, METRIC_HEADERS};
