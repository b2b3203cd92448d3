// ============================================================
// CSV INFRASTRUCTURE LAYER
// ============================================================
// Delimited-file parsing and UTF-8 decoding

mod csv_parser;

pub use csv_parser::{ColumnSource, CsvParser};
