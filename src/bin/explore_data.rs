use std::io::Write;
use std::process::ExitCode;

use fakenews_lib::{init_tracing_stderr, run_explorer, Settings};
use tracing::error;

fn main() -> ExitCode {
    init_tracing_stderr();

    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(err) => {
            error!(error = %err, "Failed to load settings");
            return ExitCode::FAILURE;
        }
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let status = run_explorer(&settings, &mut out);
    let _ = out.flush();
    ExitCode::from(status)
}
