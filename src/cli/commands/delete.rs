//! `credvault delete` — remove a secret from the vault.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{authenticate, open_vault, vault_path, Cli};
use crate::config::Settings;
use crate::errors::{CredVaultError, Result};
use crate::store::RemoveOutcome;

/// Execute the `delete` command.
pub fn execute(cli: &Cli, account: &str, force: bool) -> Result<()> {
    let settings = Settings::load(&std::env::current_dir()?)?;

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete the secret for '{account}'?"))
            .default(false)
            .interact()
            .map_err(|e| CredVaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    let owner = authenticate(cli, &settings)?;
    let path = vault_path(cli, &settings);
    let mut store = open_vault(&path)?;

    match store.remove(&owner, account) {
        RemoveOutcome::Removed => {
            store.flush()?;
            output::success(&format!("Deleted the secret for '{account}'"));
            Ok(())
        }
        RemoveOutcome::NotFound => Err(CredVaultError::AccountNotFound(account.to_string())),
    }
}
