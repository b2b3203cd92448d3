pub mod app;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;

pub use app::{init_tracing, init_tracing_stderr, run_explorer, run_server};
pub use domain::error::{AppError, Result};
pub use infrastructure::config::Settings;
