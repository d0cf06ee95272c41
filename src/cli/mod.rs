//! CLI module — Clap argument parser, output helpers, and command implementations.

pub mod commands;
pub mod output;

use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{CredVaultError, Result};
use crate::store::{SecretStore, UserRegistry};

/// Minimum password length to prevent trivially weak passwords.
const MIN_PASSWORD_LEN: usize = 8;

/// CredVault CLI: local credential vault with hashed operator accounts.
#[derive(Parser)]
#[command(
    name = "credvault",
    about = "Local credential vault with hashed operator accounts",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Operator username (prompted if omitted)
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    /// Vault file holding secret records (default from .credvault.toml)
    #[arg(long, global = true)]
    pub vault: Option<String>,

    /// Users file holding the credential registry
    #[arg(long, global = true)]
    pub users_file: Option<String>,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Register a new operator account
    Register {
        /// Username for the new account
        username: String,
    },

    /// Store or update a secret (add or update)
    Set {
        /// Account label (e.g. a website name)
        account: String,
        /// Secret value (omit for interactive prompt)
        value: Option<String>,
        /// Fill the value with a generated password instead
        #[arg(short, long, conflicts_with = "value")]
        generate: bool,
        /// Length of the generated password
        #[arg(short, long, requires = "generate")]
        length: Option<usize>,
    },

    /// Retrieve a secret's value
    Get {
        /// Account label
        account: String,
    },

    /// Delete a secret
    Delete {
        /// Account label
        account: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// List your account labels in the vault
    List,

    /// Generate a random password (no sign-in required)
    Generate {
        /// Password length
        #[arg(short, long)]
        length: Option<usize>,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell)
        shell: String,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Get the operator password, trying in order:
/// 1. `CREDVAULT_PASSWORD` env var (CI/scripted use)
/// 2. Interactive prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("CREDVAULT_PASSWORD") {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter password")
        .interact()
        .map_err(|e| CredVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Prompt for a new password with confirmation (used during `register`).
///
/// Also respects `CREDVAULT_PASSWORD` for scripted usage.
/// Enforces a minimum password length.
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_new_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var("CREDVAULT_PASSWORD") {
        if !pw.is_empty() {
            if pw.len() < MIN_PASSWORD_LEN {
                return Err(CredVaultError::CommandFailed(format!(
                    "password must be at least {MIN_PASSWORD_LEN} characters"
                )));
            }
            return Ok(Zeroizing::new(pw));
        }
    }

    loop {
        let password = dialoguer::Password::new()
            .with_prompt("Choose a password")
            .with_confirmation("Confirm password", "Passwords do not match, try again")
            .interact()
            .map_err(|e| CredVaultError::CommandFailed(format!("password prompt: {e}")))?;

        if password.len() < MIN_PASSWORD_LEN {
            output::warning(&format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters. Try again."
            ));
            continue;
        }

        return Ok(Zeroizing::new(password));
    }
}

/// The operator username: `--user` if given, otherwise an interactive prompt.
pub fn resolve_user(cli: &Cli) -> Result<String> {
    if let Some(user) = &cli.user {
        return Ok(user.clone());
    }

    dialoguer::Input::new()
        .with_prompt("Username")
        .interact_text()
        .map_err(|e| CredVaultError::CommandFailed(format!("username prompt: {e}")))
}

/// Build the path to the users file from CLI args and settings.
pub fn users_path(cli: &Cli, settings: &Settings) -> PathBuf {
    PathBuf::from(cli.users_file.as_deref().unwrap_or(&settings.users_file))
}

/// Build the path to the vault file from CLI args and settings.
pub fn vault_path(cli: &Cli, settings: &Settings) -> PathBuf {
    PathBuf::from(cli.vault.as_deref().unwrap_or(&settings.default_vault))
}

/// Open the credential registry, warning about any malformed lines.
pub fn open_registry(cli: &Cli, settings: &Settings) -> Result<UserRegistry> {
    let registry = UserRegistry::open(&users_path(cli, settings), settings.argon2_params())?;
    if registry.skipped_lines() > 0 {
        output::warning(&format!(
            "Skipped {} malformed line(s) in the users file",
            registry.skipped_lines()
        ));
    }
    Ok(registry)
}

/// Load a vault file, warning about any malformed lines.
///
/// A missing vault is an error here; commands that want to start a
/// fresh vault instead (`set`) handle `VaultNotFound` themselves.
pub fn open_vault(path: &std::path::Path) -> Result<SecretStore> {
    let store = SecretStore::load(path)?;
    if store.skipped_lines() > 0 {
        output::warning(&format!(
            "Skipped {} malformed line(s) in {}",
            store.skipped_lines(),
            path.display()
        ));
    }
    Ok(store)
}

/// Sign the operator in: resolve the username, take the password, and
/// verify against the registry.  Returns the authenticated username.
pub fn authenticate(cli: &Cli, settings: &Settings) -> Result<String> {
    let registry = open_registry(cli, settings)?;
    let username = resolve_user(cli)?;
    let password = prompt_password()?;

    if !registry.verify(&username, &password) {
        return Err(CredVaultError::AuthenticationFailed);
    }

    Ok(username)
}
