//! `credvault list` — display the operator's account labels in a table.

use crate::cli::output;
use crate::cli::{authenticate, open_vault, vault_path, Cli};
use crate::config::Settings;
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let settings = Settings::load(&std::env::current_dir()?)?;

    let owner = authenticate(cli, &settings)?;
    let path = vault_path(cli, &settings);
    let store = open_vault(&path)?;

    let accounts = store.accounts(&owner);

    output::info(&format!(
        "{} — {} account(s) for {}",
        path.display(),
        accounts.len(),
        owner
    ));
    output::print_accounts_table(&accounts);

    Ok(())
}
