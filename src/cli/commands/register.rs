//! `credvault register` — create a new operator account.

use crate::cli::output;
use crate::cli::{open_registry, prompt_new_password, users_path, Cli};
use crate::config::Settings;
use crate::errors::{CredVaultError, Result};

/// Execute the `register` command.
pub fn execute(cli: &Cli, username: &str) -> Result<()> {
    let settings = Settings::load(&std::env::current_dir()?)?;
    let mut registry = open_registry(cli, &settings)?;

    // Fail before prompting for a password if the name is taken.
    if registry.contains(username) {
        output::tip("Pick a different username and try again.");
        return Err(CredVaultError::DuplicateUsername(username.to_string()));
    }

    let password = prompt_new_password()?;
    registry.register(username, &password)?;

    output::success(&format!(
        "Account '{}' registered in {}",
        username,
        users_path(cli, &settings).display()
    ));
    output::tip("Store a secret: credvault --user <NAME> set <ACCOUNT>");

    Ok(())
}
