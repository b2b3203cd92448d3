pub mod use_cases;

pub use use_cases::dataset_explorer::{DatasetExplorer, DatasetOutcome, RunSummary};
pub use use_cases::exploration_report::render_report;
