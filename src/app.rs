use std::io::Write;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::application::use_cases::dataset_explorer::{exit_status, DatasetExplorer};
use crate::domain::error::Result;
use crate::infrastructure::config::Settings;
use crate::interfaces::http::start_server;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the fmt subscriber; no-op if one is already set
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_env_filter(env_filter()).try_init();
}

/// Same as `init_tracing`, but log to stderr so stdout carries only the report
pub fn init_tracing_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

/// Serve the greeter until shutdown
pub async fn run_server(settings: Settings) -> Result<()> {
    let server = start_server(&settings.server)?;
    server.await?;
    info!("Greeter stopped");
    Ok(())
}

/// Run the explorer against the configured data directory and return the exit status
pub fn run_explorer<W: Write>(settings: &Settings, out: &mut W) -> u8 {
    let explorer = DatasetExplorer::new(settings.explorer.data_dir.clone());
    let result = explorer.run(out);
    if let Err(err) = &result {
        error!(error = %err, "Dataset exploration aborted");
    }
    exit_status(&result)
}
