//! Template rendering for CLI output using outstanding

use console::Style;
use goloclib::{MetricsTable, TableRow};
use outstanding::{render_auto, render_with_output, Theme};
use serde::Serialize;

/// Re-export OutputMode for callers
pub use outstanding::OutputMode;

/// Values accepted by `--output`
pub const OUTPUT_MODES: [&str; 5] = ["auto", "term", "text", "term-debug", "json"];

/// Stats table template. Cells arrive pre-padded, so the template only
/// joins them and applies styles.
const STATS_TABLE_TEMPLATE: &str = r#"{{ name_header_formatted | style("category") }}{% for column in columns %} {{ column | style("category") }}{% endfor %}
{{ separator }}
{% for row in rows %}{{ row.name }}{% for cell in row.cells %} {{ cell }}{% endfor %}
{% endfor %}{% if rows %}{{ separator }}
{% endif %}{{ total.name | style("category") }}{% for cell in total.cells %} {{ cell | style("category") }}{% endfor %}
"#;

/// Minimum width of a metric column
const CELL_WIDTH: usize = 10;

/// Row data for template rendering (pre-formatted)
#[derive(Debug, Serialize)]
struct TemplateRow {
    /// Pre-padded name (left-aligned, padded to name_width)
    name: String,
    /// Pre-padded cells (right-aligned, padded to each column's width)
    cells: Vec<String>,
}

/// Data context for stats table template
#[derive(Debug, Serialize)]
struct StatsTableContext {
    /// Pre-padded name column header
    name_header_formatted: String,
    /// Pre-padded metric column headers
    columns: Vec<String>,
    /// Separator line (dashes)
    separator: String,
    /// Data rows
    rows: Vec<TemplateRow>,
    /// Total row
    total: TemplateRow,
}

/// Map an `--output` value to an output mode.
pub fn parse_output_mode(value: &str) -> OutputMode {
    match value {
        "json" => OutputMode::Json,
        "text" => OutputMode::Text,
        "term-debug" => OutputMode::TermDebug,
        "term" => OutputMode::Term,
        _ => OutputMode::Auto,
    }
}

/// Truncate a name to fit within max_len, adding ".." prefix if needed
fn truncate_name(name: &str, max_len: usize) -> String {
    let len = name.chars().count();
    if len > max_len {
        let tail: String = name.chars().skip(len - max_len + 2).collect();
        format!("..{}", tail)
    } else {
        name.to_string()
    }
}

/// File paths get a wider label column than directory names.
fn name_width(label_header: &str) -> usize {
    if label_header == "File" {
        60
    } else {
        40
    }
}

/// Width of each metric column: at least CELL_WIDTH, wide enough for the
/// longest header or value (the max-depth cell carries a location).
fn cell_widths(table: &MetricsTable) -> Vec<usize> {
    table.headers[1..]
        .iter()
        .enumerate()
        .map(|(i, header)| {
            table
                .rows
                .iter()
                .chain(std::iter::once(&table.footer))
                .filter_map(|row| row.values.get(i))
                .map(|v| v.chars().count())
                .chain([header.len(), CELL_WIDTH])
                .max()
                .unwrap_or(CELL_WIDTH)
        })
        .collect()
}

/// Convert a TableRow to a TemplateRow, pre-formatting cells
fn to_template_row(row: &TableRow, name_width: usize, widths: &[usize]) -> TemplateRow {
    let cells = row
        .values
        .iter()
        .zip(widths)
        .map(|(value, width)| format!("{:>width$}", value, width = width))
        .collect();

    let truncated = truncate_name(&row.label, name_width - 2);

    TemplateRow {
        name: format!("{:<width$}", truncated, width = name_width),
        cells,
    }
}

/// Build StatsTableContext from a metrics table
fn build_stats_context(table: &MetricsTable) -> StatsTableContext {
    let name_header = table.headers.first().map(String::as_str).unwrap_or("");
    let name_width = name_width(name_header);
    let widths = cell_widths(table);

    let columns = table.headers[1..]
        .iter()
        .zip(&widths)
        .map(|(name, width)| format!("{:>width$}", name, width = width))
        .collect();

    let separator = "-".repeat(name_width + widths.iter().map(|w| w + 1).sum::<usize>());

    StatsTableContext {
        name_header_formatted: format!("{:<width$}", name_header, width = name_width),
        columns,
        separator,
        rows: table
            .rows
            .iter()
            .map(|r| to_template_row(r, name_width, &widths))
            .collect(),
        total: to_template_row(&table.footer, name_width, &widths),
    }
}

/// Create the theme with styles
fn create_theme() -> Theme {
    Theme::new().add("category", Style::new().bold())
}

/// Render a metrics table in the given output mode.
///
/// Structured modes serialize the table itself; terminal and text modes
/// render the pre-formatted template context.
pub fn render_table(table: &MetricsTable, output_mode: OutputMode) -> anyhow::Result<String> {
    let theme = create_theme();

    if output_mode.is_structured() {
        return render_auto(STATS_TABLE_TEMPLATE, table, &theme, output_mode)
            .map_err(|e| anyhow::anyhow!("failed to render output: {e}"));
    }

    let context = build_stats_context(table);
    render_with_output(STATS_TABLE_TEMPLATE, &context, &theme, output_mode)
        .map_err(|e| anyhow::anyhow!("failed to render output: {e}"))
}
