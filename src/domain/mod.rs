pub mod error;

// Dataset exploration types
pub mod dataset;
