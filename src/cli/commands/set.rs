//! `credvault set` — store or update a secret in the vault.

use std::io::{self, IsTerminal, Read};

use crate::cli::output;
use crate::cli::{authenticate, open_vault, vault_path, Cli};
use crate::config::Settings;
use crate::errors::{CredVaultError, Result};
use crate::generate::PasswordGenerator;
use crate::store::{SecretStore, UpsertOutcome};

/// Execute the `set` command.
pub fn execute(
    cli: &Cli,
    account: &str,
    value: Option<&str>,
    generate: bool,
    length: Option<usize>,
) -> Result<()> {
    let settings = Settings::load(&std::env::current_dir()?)?;

    // Determine the secret value from one of four sources.
    let secret_value = if generate {
        // Source 1: Freshly generated password.
        let mut generator = PasswordGenerator::new();
        let password = generator.generate(length.unwrap_or(settings.generate_length));
        output::info(&format!("Generated password: {password}"));
        password
    } else if let Some(v) = value {
        // Source 2: Inline value on the command line.
        output::warning("Value provided on command line — it may appear in shell history.");
        v.to_string()
    } else if !io::stdin().is_terminal() {
        // Source 3: Piped input (stdin is not a terminal).
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf.trim_end().to_string()
    } else {
        // Source 4: Interactive secure prompt (default).
        dialoguer::Password::new()
            .with_prompt(format!("Enter value for {account}"))
            .interact()
            .map_err(|e| CredVaultError::CommandFailed(format!("input prompt: {e}")))?
    };

    // Sign in, then open the vault, starting a fresh one if the file
    // does not exist yet.
    let owner = authenticate(cli, &settings)?;
    let path = vault_path(cli, &settings);
    let mut store = match open_vault(&path) {
        Ok(store) => store,
        Err(CredVaultError::VaultNotFound(_)) => {
            output::info(&format!("Starting a new vault at {}", path.display()));
            SecretStore::empty(&path)
        }
        Err(e) => return Err(e),
    };

    let outcome = store.upsert(&owner, account, &secret_value)?;
    store.flush()?;

    match outcome {
        UpsertOutcome::Created => output::success(&format!(
            "Secret for '{}' added to {} ({} total)",
            account,
            path.display(),
            store.record_count()
        )),
        UpsertOutcome::Updated => output::success(&format!(
            "Secret for '{}' updated in {} ({} total)",
            account,
            path.display(),
            store.record_count()
        )),
    }

    Ok(())
}
