use std::process::ExitCode;

use launchdeck::ui::output;

fn main() -> ExitCode {
    match launchdeck::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}
