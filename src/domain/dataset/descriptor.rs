// ============================================================
// DATASET DESCRIPTORS
// ============================================================
// Static registry of the datasets the explorer knows about

use serde::Serialize;

/// Name prefix shared by the LIAR (literal-fact) datasets
pub const LIAR_PREFIX: &str = "liar_";

/// Column names for the headerless LIAR TSV files
pub const LIAR_COLUMNS: [&str; 14] = [
    "id",
    "label",
    "statement",
    "subjects",
    "speaker",
    "speaker_job",
    "state_info",
    "party_affiliation",
    "count_pantsfire",
    "count_false",
    "count_barelytrue",
    "count_halftrue",
    "count_mostlytrue",
    "context",
];

/// How a dataset file is laid out on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Layout {
    /// No header row; columns are `LIAR_COLUMNS` and every row must have all of them
    FixedSchema,

    /// First row names the columns. `synthesized_label` fills the label column
    /// with a constant when the source has none.
    Header {
        synthesized_label: Option<&'static str>,
    },
}

/// Static description of one dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DatasetDescriptor {
    /// Registry key, e.g. `liar_train`
    pub name: &'static str,

    /// File name relative to the data directory
    pub filename: &'static str,

    /// Field separator byte
    pub separator: u8,

    /// Column sampled for the "sample text" section
    pub text_col: &'static str,

    /// Column used for the label distribution
    pub label_col: &'static str,
}

impl DatasetDescriptor {
    const fn new(
        name: &'static str,
        filename: &'static str,
        separator: u8,
        text_col: &'static str,
        label_col: &'static str,
    ) -> Self {
        Self {
            name,
            filename,
            separator,
            text_col,
            label_col,
        }
    }

    pub fn is_literal_fact(&self) -> bool {
        self.name.starts_with(LIAR_PREFIX)
    }

    /// Derive the on-disk layout from the dataset name
    pub fn layout(&self) -> Layout {
        if self.is_literal_fact() {
            return Layout::FixedSchema;
        }

        let synthesized_label = match self.name {
            "true" => Some("real"),
            "fake" => Some("fake"),
            _ => None,
        };
        Layout::Header { synthesized_label }
    }
}

/// All known datasets, in processing order
pub const DATASETS: [DatasetDescriptor; 9] = [
    DatasetDescriptor::new("liar_train", "train.tsv", b'\t', "statement", "label"),
    DatasetDescriptor::new("liar_valid", "valid.tsv", b'\t', "statement", "label"),
    DatasetDescriptor::new("liar_test", "test.tsv", b'\t', "statement", "label"),
    DatasetDescriptor::new("true", "True.csv", b',', "text", "label"),
    DatasetDescriptor::new("fake", "Fake.csv", b',', "text", "label"),
    DatasetDescriptor::new("politifact_real", "politifact_real.csv", b',', "text", "label"),
    DatasetDescriptor::new("politifact_fake", "politifact_fake.csv", b',', "text", "label"),
    DatasetDescriptor::new("gossipcop_real", "gossipcop_real.csv", b',', "text", "label"),
    DatasetDescriptor::new("gossipcop_fake", "gossipcop_fake.csv", b',', "text", "label"),
];

pub fn find_descriptor(name: &str) -> Option<&'static DatasetDescriptor> {
    DATASETS.iter().find(|d| d.name == name)
}
