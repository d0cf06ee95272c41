use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in CredVault.
#[derive(Debug, Error)]
pub enum CredVaultError {
    // --- Registration / authentication errors ---
    #[error("Username '{0}' is already taken")]
    DuplicateUsername(String),

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid username or password")]
    AuthenticationFailed,

    // --- Store errors ---
    #[error("Vault file not found at {0}")]
    VaultNotFound(PathBuf),

    #[error("Account '{0}' not found")]
    AccountNotFound(String),

    #[error("Invalid {field}: {reason}")]
    InvalidField {
        field: &'static str,
        reason: String,
    },

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Convenience type alias for CredVault results.
pub type Result<T> = std::result::Result<T, CredVaultError>;
