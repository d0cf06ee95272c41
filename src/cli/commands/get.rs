//! `credvault get` — retrieve and print a single secret's value.

use crate::cli::{authenticate, open_vault, vault_path, Cli};
use crate::config::Settings;
use crate::errors::{CredVaultError, Result};

/// Execute the `get` command.
pub fn execute(cli: &Cli, account: &str) -> Result<()> {
    let settings = Settings::load(&std::env::current_dir()?)?;

    let owner = authenticate(cli, &settings)?;
    let store = open_vault(&vault_path(cli, &settings))?;

    // Print the secret value to stdout (and nothing else, so the
    // output pipes cleanly).
    match store.lookup(&owner, account) {
        Some(value) => {
            println!("{value}");
            Ok(())
        }
        None => Err(CredVaultError::AccountNotFound(account.to_string())),
    }
}
