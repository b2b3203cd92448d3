// ============================================================
// EXPLORATION REPORT
// ============================================================
// Render the fixed-format report for one loaded dataset

use std::collections::BTreeMap;
use std::fmt::Write;

use tabled::builder::Builder;
use tabled::settings::Style;

use crate::domain::dataset::{ColumnType, DatasetDescriptor, Table};

/// Number of rows shown in the sample section
pub const HEAD_ROWS: usize = 5;

/// Longest cell rendered in the sample rows before truncation
const MAX_CELL_CHARS: usize = 50;

const MISSING_CELL: &str = "NaN";

/// Build the report for a loaded table. Pure: no I/O.
pub fn render_report(descriptor: &DatasetDescriptor, table: &Table) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "=== Exploring `{}` ===", descriptor.name);
    let _ = writeln!(out, "Columns: {:?}", table.column_names());

    let _ = writeln!(out, "\n[Info]");
    out.push_str(&render_info(table));

    let _ = writeln!(out, "\n[First {} rows]", HEAD_ROWS);
    out.push_str(&render_head(table, HEAD_ROWS));

    out.push_str(&render_sample_text(table, descriptor.text_col));
    out.push_str(&render_label_distribution(table, descriptor.label_col));

    let _ = writeln!(out, "\n[Missing values per column]");
    for column in table.columns() {
        let _ = writeln!(out, "{}: {}", column.name, column.null_count());
    }

    out
}

/// Row/column counts, per-column non-null counts and dtypes
pub fn render_info(table: &Table) -> String {
    let mut out = String::new();
    let n_rows = table.n_rows();
    if n_rows == 0 {
        let _ = writeln!(out, "RangeIndex: 0 entries");
    } else {
        let _ = writeln!(out, "RangeIndex: {} entries, 0 to {}", n_rows, n_rows - 1);
    }
    let _ = writeln!(out, "Data columns (total {} columns):", table.n_cols());

    let mut builder = Builder::default();
    builder.push_record(["#", "Column", "Non-Null Count", "Dtype"]);

    let mut tally: BTreeMap<ColumnType, usize> = BTreeMap::new();
    for (idx, column) in table.columns().iter().enumerate() {
        let dtype = column.dtype();
        *tally.entry(dtype).or_insert(0) += 1;
        builder.push_record([
            idx.to_string(),
            column.name.clone(),
            format!("{} non-null", column.non_null_count()),
            dtype.to_string(),
        ]);
    }

    let mut rendered = builder.build();
    rendered.with(Style::blank());
    let _ = writeln!(out, "{}", rendered);

    let dtypes = tally
        .iter()
        .map(|(dtype, count)| format!("{}({})", dtype, count))
        .collect::<Vec<_>>()
        .join(", ");
    let _ = writeln!(out, "dtypes: {}", dtypes);
    out
}

/// First `n` rows as a text table with a leading row index
pub fn render_head(table: &Table, n: usize) -> String {
    let rows = table.head(n);
    if rows.is_empty() {
        return format!("Empty table\nColumns: {:?}\n", table.column_names());
    }

    let mut builder = Builder::default();
    let mut header = vec![String::new()];
    header.extend(table.column_names());
    builder.push_record(header);

    for (idx, row) in rows.iter().enumerate() {
        let mut record = vec![idx.to_string()];
        record.extend(row.iter().map(|cell| display_cell(*cell)));
        builder.push_record(record);
    }

    let mut rendered = builder.build();
    rendered.with(Style::blank());
    format!("{}\n", rendered)
}

fn render_sample_text(table: &Table, text_col: &str) -> String {
    match table.column(text_col) {
        Some(column) => {
            let sample = if column.is_empty() {
                "(no rows)"
            } else {
                column.get(0).unwrap_or(MISSING_CELL)
            };
            format!("\n[Sample text ({})]\n{}\n", text_col, sample)
        }
        None => format!("WARNING: Missing text column: {}\n", text_col),
    }
}

fn render_label_distribution(table: &Table, label_col: &str) -> String {
    let Some(column) = table.column(label_col) else {
        return format!("WARNING: Missing label column: {}\n", label_col);
    };

    let mut out = format!("\n[Label distribution ({})]\n", label_col);
    let counts = column.value_counts();
    if counts.is_empty() {
        out.push_str("(no values)\n");
    }
    for (value, count) in counts {
        let _ = writeln!(out, "{}: {}", value, count);
    }
    out
}

/// Single-line, length-capped rendering of one cell
fn display_cell(cell: Option<&str>) -> String {
    let Some(value) = cell else {
        return MISSING_CELL.to_string();
    };
    let flat = value.replace('\r', "").replace('\n', "\\n");
    if flat.chars().count() <= MAX_CELL_CHARS {
        return flat;
    }
    let kept: String = flat.chars().take(MAX_CELL_CHARS - 3).collect();
    format!("{}...", kept)
}
