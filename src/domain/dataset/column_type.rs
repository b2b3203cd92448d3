use serde::{Deserialize, Serialize};

/// Inferred data type of a loaded column
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ColumnType {
    Bool,
    Float64,
    Int64,
    Object,
}

impl ColumnType {
    /// Infer the type from a column's cells. `None` cells are missing values.
    ///
    /// Integers with missing cells widen to `Float64`, booleans with missing
    /// cells fall back to `Object`, and an all-missing column is `Float64`.
    pub fn infer<'a, I>(cells: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut has_missing = false;
        let mut all_int = true;
        let mut all_float = true;
        let mut all_bool = true;
        let mut present = 0usize;

        for cell in cells {
            let Some(value) = cell else {
                has_missing = true;
                continue;
            };
            present += 1;
            let trimmed = value.trim();
            if all_int && trimmed.parse::<i64>().is_err() {
                all_int = false;
            }
            if all_float && trimmed.parse::<f64>().is_err() {
                all_float = false;
            }
            if all_bool && !is_bool_literal(trimmed) {
                all_bool = false;
            }
        }

        if present == 0 {
            return ColumnType::Float64;
        }
        if all_int {
            return if has_missing {
                ColumnType::Float64
            } else {
                ColumnType::Int64
            };
        }
        if all_float {
            return ColumnType::Float64;
        }
        if all_bool && !has_missing {
            return ColumnType::Bool;
        }
        ColumnType::Object
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Bool => "bool",
            ColumnType::Float64 => "float64",
            ColumnType::Int64 => "int64",
            ColumnType::Object => "object",
        }
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn is_bool_literal(value: &str) -> bool {
    value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false")
}
