//! Argon2id password hashing and verification.
//!
//! Operator passwords are hashed into PHC-format strings: the salt and
//! all cost parameters ride along inside the stored string, so
//! verification needs nothing beyond the string itself.  Parameters are
//! configurable via `Argon2Params` (loaded from `.credvault.toml` or
//! sensible defaults).

use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::errors::{CredVaultError, Result};

/// Minimum safe memory cost in KiB (8 MB).
const MIN_MEMORY_KIB: u32 = 8_192;

/// Configurable Argon2id parameters.
///
/// These map 1:1 to the fields in `Settings` so the CLI can pass
/// whatever the user configured in `.credvault.toml`.
#[derive(Debug, Clone, Copy)]
pub struct Argon2Params {
    /// Memory cost in KiB (default: 65 536 = 64 MB).
    pub memory_kib: u32,
    /// Number of iterations (default: 3).
    pub iterations: u32,
    /// Parallelism lanes (default: 4).
    pub parallelism: u32,
}

impl Default for Argon2Params {
    fn default() -> Self {
        Self {
            memory_kib: 65_536,
            iterations: 3,
            parallelism: 4,
        }
    }
}

/// Build an Argon2id instance from explicit parameters.
///
/// Enforces minimum parameters to prevent dangerously weak settings.
fn build_hasher(argon2_params: &Argon2Params) -> Result<Argon2<'static>> {
    if argon2_params.memory_kib < MIN_MEMORY_KIB {
        return Err(CredVaultError::HashingFailed(format!(
            "Argon2 memory_kib must be at least {MIN_MEMORY_KIB} (got {})",
            argon2_params.memory_kib
        )));
    }
    if argon2_params.iterations < 1 {
        return Err(CredVaultError::HashingFailed(
            "Argon2 iterations must be at least 1".into(),
        ));
    }
    if argon2_params.parallelism < 1 {
        return Err(CredVaultError::HashingFailed(
            "Argon2 parallelism must be at least 1".into(),
        ));
    }

    let params = Params::new(
        argon2_params.memory_kib,
        argon2_params.iterations,
        argon2_params.parallelism,
        None,
    )
    .map_err(|e| CredVaultError::HashingFailed(format!("invalid Argon2 params: {e}")))?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hash a password into a PHC string using the default parameters.
///
/// Prefer `hash_password_with_params` when you have a `Settings`.
pub fn hash_password(password: &str) -> Result<String> {
    hash_password_with_params(password, &Argon2Params::default())
}

/// Hash a password into a PHC string with explicit Argon2id parameters.
///
/// A fresh random salt is generated per call, so hashing the same
/// password twice produces two different strings.
pub fn hash_password_with_params(password: &str, argon2_params: &Argon2Params) -> Result<String> {
    let argon2 = build_hasher(argon2_params)?;
    let salt = SaltString::generate(&mut OsRng);

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| CredVaultError::HashingFailed(format!("Argon2id hashing failed: {e}")))?;

    Ok(hash.to_string())
}

/// Verify a password against a stored PHC string.
///
/// The salt and cost parameters are read back out of the string, so no
/// side channel is needed.  Returns `false` for a wrong password and
/// for an unparseable stored hash alike; the authentication layer
/// treats both the same way.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}
