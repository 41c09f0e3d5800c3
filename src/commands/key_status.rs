//! `commit-scout key-status` command.

use crate::credentials::{self, KeyStore};

/// Execute the `key-status` command.
///
/// Reports the credential source a search would use, without printing the
/// key itself.
///
/// # Errors
///
/// Never fails; the `Result` keeps the dispatch signature uniform.
pub fn run() -> Result<(), String> {
    let store = KeyStore::new(&credentials::store_root());
    match credentials::resolve(None, &store) {
        Some((_, source)) => println!("API key configured ({source})."),
        None => println!(
            "No API key configured. Use `commit-scout set-key <KEY>` or set {}.",
            credentials::KEY_ENV_VARS[0]
        ),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_status_runs_without_a_store() {
        std::env::set_var("COMMIT_SCOUT_STORE", "/tmp/scout_key_status_nonexistent");
        let result = run();
        std::env::remove_var("COMMIT_SCOUT_STORE");
        assert!(result.is_ok());
    }
}
