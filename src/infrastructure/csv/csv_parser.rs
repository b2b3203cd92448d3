// ============================================================
// CSV PARSER
// ============================================================
// Parse delimited files into column-oriented tables

use std::borrow::Cow;
use std::collections::HashMap;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use encoding_rs::{Encoding, UTF_8};
use tracing::debug;

use crate::domain::dataset::{Column, DatasetDescriptor, Layout, Table, LIAR_COLUMNS};
use crate::domain::error::AppError;

/// Where column names come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSource {
    /// First record is the header
    Header,

    /// No header; every record must carry exactly these columns
    Fixed(Vec<String>),
}

/// Delimited-text parser producing a `Table`
pub struct CsvParser {
    /// Delimiter character (default: comma)
    delimiter: u8,

    columns: ColumnSource,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self {
            delimiter: b',',
            columns: ColumnSource::Header,
        }
    }
}

impl CsvParser {
    /// Create a new CSV parser with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom delimiter
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Use a fixed, headerless schema
    pub fn with_fixed_columns<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = ColumnSource::Fixed(names.into_iter().map(Into::into).collect());
        self
    }

    /// Parser configured for a registered dataset
    pub fn for_descriptor(descriptor: &DatasetDescriptor) -> Self {
        let parser = Self::new().with_delimiter(descriptor.separator);
        match descriptor.layout() {
            Layout::FixedSchema => parser.with_fixed_columns(LIAR_COLUMNS),
            Layout::Header { .. } => parser,
        }
    }

    /// Parse a file into a table
    pub fn parse_file(&self, path: &Path) -> Result<Table, AppError> {
        let bytes = std::fs::read(path)
            .map_err(|e| AppError::IoError(format!("Failed to read {}: {}", path.display(), e)))?;
        let content = decode_utf8(&bytes)?;
        debug!(path = %path.display(), bytes = bytes.len(), "Read dataset file");
        self.parse_content(&content)
    }

    /// Parse delimited content from a string
    pub fn parse_content(&self, content: &str) -> Result<Table, AppError> {
        let has_header = self.columns == ColumnSource::Header;
        let mut reader = ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(has_header)
            // Column counts are checked below with line numbers in the message
            .flexible(true)
            .from_reader(content.as_bytes());

        let names: Vec<String> = match &self.columns {
            ColumnSource::Fixed(names) => names.clone(),
            ColumnSource::Header => reader
                .headers()
                .map(normalize_headers)
                .map_err(|e| AppError::ParseError(format!("Failed to read CSV headers: {}", e)))?,
        };

        if names.is_empty() {
            return Err(AppError::ParseError(
                "No columns to parse from file".to_string(),
            ));
        }

        let mut columns: Vec<Column> = names.iter().map(Column::new).collect();
        let mut record = StringRecord::new();

        loop {
            let more = reader.read_record(&mut record).map_err(|e| {
                AppError::ParseError(format!("Failed to parse CSV record: {}", e))
            })?;
            if !more {
                break;
            }
            self.check_width(&record, names.len())?;
            append_record(&mut columns, &record);
        }

        Ok(Table::from_columns(columns))
    }

    /// Fixed schemas need an exact match; header layouts only reject extra fields
    fn check_width(&self, record: &StringRecord, expected: usize) -> Result<(), AppError> {
        let saw = record.len();
        let ok = match self.columns {
            ColumnSource::Fixed(_) => saw == expected,
            ColumnSource::Header => saw <= expected,
        };
        if ok {
            return Ok(());
        }
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        Err(AppError::ParseError(format!(
            "Expected {} fields in line {}, saw {}",
            expected, line, saw
        )))
    }
}

/// Blank header names become `Unnamed: <idx>`; repeats get `.1`, `.2`, ... suffixes
fn normalize_headers(raw: &StringRecord) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    raw.iter()
        .enumerate()
        .map(|(idx, header)| {
            let mut name = if header.is_empty() {
                format!("Unnamed: {}", idx)
            } else {
                header.to_string()
            };
            let mut count = seen.get(&name).copied().unwrap_or(0);
            while count > 0 {
                seen.insert(name.clone(), count + 1);
                name = format!("{}.{}", name, count);
                count = seen.get(&name).copied().unwrap_or(0);
            }
            seen.insert(name.clone(), 1);
            name
        })
        .collect()
}

/// Append one record, padding short records with missing cells
fn append_record(columns: &mut [Column], record: &StringRecord) {
    for (idx, column) in columns.iter_mut().enumerate() {
        match record.get(idx) {
            Some(value) => column.push_raw(value),
            None => column.push_missing(),
        }
    }
}

/// Strict UTF-8 decode, dropping a leading BOM
fn decode_utf8(bytes: &[u8]) -> Result<Cow<'_, str>, AppError> {
    let bom_len = match Encoding::for_bom(bytes) {
        Some((encoding, len)) if encoding == UTF_8 => len,
        Some((encoding, _)) => {
            return Err(AppError::ParseError(format!(
                "Unsupported encoding {}, expected UTF-8",
                encoding.name()
            )))
        }
        None => 0,
    };
    UTF_8
        .decode_without_bom_handling_and_without_replacement(&bytes[bom_len..])
        .ok_or_else(|| AppError::ParseError("File is not valid UTF-8".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dataset::find_descriptor;

    fn liar_row(id: &str, label: &str, statement: &str) -> String {
        format!(
            "{id}\t{label}\t{statement}\teconomy\tjane-doe\tSenator\tOhio\trepublican\t1\t2\t3\t4\t5\ta speech"
        )
    }

    #[test]
    fn test_parse_simple_csv() {
        let content = "name,age,city\nAlice,30,NYC\nBob,25,LA";
        let table = CsvParser::new().parse_content(content).unwrap();

        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.column_names(), vec!["name", "age", "city"]);
        assert_eq!(table.column("name").unwrap().get(0), Some("Alice"));
    }

    #[test]
    fn test_blank_and_duplicate_headers_are_renamed() {
        let content = ",text,text,label,text\n0,a,b,real,c\n";
        let table = CsvParser::new().parse_content(content).unwrap();

        assert_eq!(
            table.column_names(),
            vec!["Unnamed: 0", "text", "text.1", "label", "text.2"]
        );
        assert_eq!(table.column("text").unwrap().get(0), Some("a"));
        assert_eq!(table.column("text.1").unwrap().get(0), Some("b"));
        assert_eq!(table.column("text.2").unwrap().get(0), Some("c"));
    }

    #[test]
    fn test_renamed_duplicate_does_not_clash_with_existing_name() {
        let content = "a,a.1,a\n1,2,3\n";
        let table = CsvParser::new().parse_content(content).unwrap();
        assert_eq!(table.column_names(), vec!["a", "a.1", "a.1.1"]);
    }

    #[test]
    fn test_short_rows_are_padded() {
        let content = "a,b,c\n1,2\n4,5,6\n";
        let table = CsvParser::new().parse_content(content).unwrap();
        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.column("c").unwrap().null_count(), 1);
    }

    #[test]
    fn test_long_rows_fail() {
        let content = "a,b\n1,2\n3,4,5\n";
        let err = CsvParser::new().parse_content(content).unwrap_err();
        assert!(matches!(err, AppError::ParseError(ref msg) if msg.contains("Expected 2 fields in line 3, saw 3")));
    }

    #[test]
    fn test_quoted_fields_keep_delimiters() {
        let content = "text,label\n\"Hello, world\",real\n";
        let table = CsvParser::new().parse_content(content).unwrap();
        assert_eq!(table.column("text").unwrap().get(0), Some("Hello, world"));
    }

    #[test]
    fn test_fixed_schema_yields_fourteen_columns() {
        let parser = CsvParser::for_descriptor(find_descriptor("liar_train").unwrap());
        let content = format!(
            "{}\n{}\n",
            liar_row("1.json", "false", "Says taxes doubled."),
            liar_row("2.json", "true", "Jobs went up.")
        );
        let table = parser.parse_content(&content).unwrap();

        assert_eq!(table.n_cols(), 14);
        assert_eq!(table.n_rows(), 2);
        assert_eq!(table.column_names(), LIAR_COLUMNS.to_vec());
        assert_eq!(table.column("statement").unwrap().get(1), Some("Jobs went up."));
    }

    #[test]
    fn test_fixed_schema_rejects_wrong_width() {
        let parser = CsvParser::for_descriptor(find_descriptor("liar_valid").unwrap());
        let content = format!("{}\nbroken\trow\n", liar_row("1.json", "false", "x"));
        let err = parser.parse_content(&content).unwrap_err();
        assert!(matches!(err, AppError::ParseError(ref msg) if msg.contains("Expected 14 fields in line 2, saw 2")));
    }

    #[test]
    fn test_empty_content_has_no_columns() {
        let err = CsvParser::new().parse_content("").unwrap_err();
        assert!(matches!(err, AppError::ParseError(_)));
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let content = "a,b\n1,2\n\n3,4\n";
        let table = CsvParser::new().parse_content(content).unwrap();
        assert_eq!(table.n_rows(), 2);
    }

    #[test]
    fn test_decode_strips_bom_and_rejects_invalid() {
        let with_bom = b"\xEF\xBB\xBFtext\nhi\n";
        assert_eq!(decode_utf8(with_bom).unwrap(), "text\nhi\n");
        assert!(decode_utf8(b"text\n\xFF\xFE\n").is_err());
    }
}
