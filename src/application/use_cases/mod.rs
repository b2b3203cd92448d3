pub mod dataset_explorer;
pub mod exploration_report;
