// ============================================================
// TABLE TYPES
// ============================================================
// Column-oriented in-memory table parsed from a delimited file

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::{HashMap, HashSet};

use super::ColumnType;

/// Field values that load as missing
static NA_TOKENS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
        "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
    ]
    .into_iter()
    .collect()
});

/// Whether a raw field value counts as a missing value
pub fn is_na_token(value: &str) -> bool {
    NA_TOKENS.contains(value)
}

/// A named column. `None` cells are missing values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub name: String,
    pub cells: Vec<Option<String>>,
}

impl Column {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: Vec::new(),
        }
    }

    /// Append a raw field, mapping NA tokens to a missing cell
    pub fn push_raw(&mut self, raw: &str) {
        if is_na_token(raw) {
            self.cells.push(None);
        } else {
            self.cells.push(Some(raw.to_string()));
        }
    }

    pub fn push_missing(&mut self) {
        self.cells.push(None);
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<&str> {
        self.cells.get(row).and_then(|cell| cell.as_deref())
    }

    pub fn dtype(&self) -> ColumnType {
        ColumnType::infer(self.cells.iter().map(|cell| cell.as_deref()))
    }

    pub fn non_null_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    pub fn null_count(&self) -> usize {
        self.len() - self.non_null_count()
    }

    /// Distinct present values with their counts, most frequent first.
    /// Ties keep first-appearance order.
    pub fn value_counts(&self) -> Vec<(String, usize)> {
        let mut order: Vec<&str> = Vec::new();
        let mut counts: HashMap<&str, usize> = HashMap::new();

        for value in self.cells.iter().flatten() {
            let entry = counts.entry(value.as_str()).or_insert_with(|| {
                order.push(value.as_str());
                0
            });
            *entry += 1;
        }

        let mut result: Vec<(String, usize)> = order
            .into_iter()
            .map(|value| (value.to_string(), counts[value]))
            .collect();
        // stable sort keeps first-appearance order among equal counts
        result.sort_by(|a, b| b.1.cmp(&a.1));
        result
    }
}

/// Rows × named columns
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    columns: Vec<Column>,
    n_rows: usize,
}

impl Table {
    /// Build a table from columns of equal length
    pub fn from_columns(columns: Vec<Column>) -> Self {
        let n_rows = columns.first().map(|c| c.len()).unwrap_or(0);
        debug_assert!(columns.iter().all(|c| c.len() == n_rows));
        Self { columns, n_rows }
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.columns.len()
    }

    /// Set `name` to `value` on every row, appending the column if it is new
    pub fn push_constant_column(&mut self, name: &str, value: &str) {
        let cells = vec![Some(value.to_string()); self.n_rows];
        match self.columns.iter_mut().find(|c| c.name == name) {
            Some(existing) => existing.cells = cells,
            None => self.columns.push(Column {
                name: name.to_string(),
                cells,
            }),
        }
    }

    /// Row-major view of the first `n` rows
    pub fn head(&self, n: usize) -> Vec<Vec<Option<&str>>> {
        (0..self.n_rows.min(n))
            .map(|row| self.columns.iter().map(|c| c.get(row)).collect())
            .collect()
    }
}
