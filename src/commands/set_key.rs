//! `commit-scout set-key` command.

use crate::credentials::{self, KeyStore};

/// Execute the `set-key` command.
///
/// # Errors
///
/// Returns an error string when the key is blank or the store cannot be
/// written.
pub fn run(key: &str) -> Result<(), String> {
    if key.trim().is_empty() {
        return Err("refusing to store a blank API key".to_string());
    }

    let store = KeyStore::new(&credentials::store_root());
    store.save(key.trim())?;
    println!("API key saved to the local store.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_key_is_rejected() {
        let result = run("   ");
        assert!(result.unwrap_err().contains("blank"));
    }
}
