//! Command dispatch and handlers.

pub mod key_status;
pub mod search;
pub mod set_key;

use crate::cli::Command;

/// Dispatch a parsed command to its handler.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    match command {
        Command::Search { query, repo, log_file, sample, api_key } => {
            search::run(query, repo, log_file.as_deref(), *sample, api_key.as_deref())
        }
        Command::SetKey { key } => set_key::run(key),
        Command::KeyStatus => key_status::run(),
    }
}
