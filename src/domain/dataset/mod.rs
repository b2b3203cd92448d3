// ============================================================
// DATASET DOMAIN LAYER
// ============================================================
// Dataset registry and in-memory table types
// No I/O, no async

mod column_type;
mod descriptor;
mod table;

pub use column_type::ColumnType;
pub use descriptor::{
    find_descriptor, DatasetDescriptor, Layout, DATASETS, LIAR_COLUMNS, LIAR_PREFIX,
};
pub use table::{is_na_token, Column, Table};
