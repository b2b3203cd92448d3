use std::process::ExitCode;

use fakenews_lib::{init_tracing, run_server, Settings};
use tracing::error;

#[actix_web::main]
async fn main() -> ExitCode {
    init_tracing();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(err) => {
            error!(error = %err, "Failed to load settings");
            return ExitCode::FAILURE;
        }
    };

    match run_server(settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Greeter failed");
            ExitCode::FAILURE
        }
    }
}
