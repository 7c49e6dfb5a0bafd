//! dataviz binary

use std::process::ExitCode;

fn main() -> ExitCode {
    match dataviz_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        // Help, version and usage errors are printed by clap itself
        Err(dataviz_cli::CliError::Usage(err)) => err.exit(),
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
