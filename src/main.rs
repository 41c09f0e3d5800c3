//! Binary entrypoint for the `commit-scout` CLI.

use std::process::ExitCode;

fn main() -> ExitCode {
    // A .env file may supply the API key environment variables.
    let _ = dotenvy::dotenv();

    match commit_scout::run(std::env::args()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
