//! Record stores backed by line-oriented text files.
//!
//! This module provides:
//! - `UserRegistry` — operator credentials, `username:hash` per line (`users`)
//! - `SecretStore` — per-operator secrets, `owner:account:value` per line (`secrets`)
//!
//! Both stores keep the authoritative state in memory and treat the file
//! as a snapshot: `load` replaces the whole in-memory set, `flush`
//! rewrites the whole file.  Malformed lines are skipped on load and
//! counted for diagnostics.

pub mod secrets;
pub mod users;

pub use secrets::{RemoveOutcome, SecretRecord, SecretStore, UpsertOutcome};
pub use users::{UserCredential, UserRegistry};

use std::fs;
use std::io;
use std::path::Path;

/// Field separator used by both on-disk formats.
pub const SEP: char = ':';

/// Rewrite a store file in full, via temp-file + rename so a crash
/// mid-write never leaves a half-written snapshot behind.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Reject field values that would corrupt the line format.
///
/// `allow_sep` is true only for the trailing secret-value field, which
/// may contain the separator because parsing stops splitting before it.
pub(crate) fn validate_field(
    field: &'static str,
    value: &str,
    allow_sep: bool,
) -> crate::errors::Result<()> {
    use crate::errors::CredVaultError;

    if value.is_empty() {
        return Err(CredVaultError::InvalidField {
            field,
            reason: "must not be empty".into(),
        });
    }
    if value.contains('\n') || value.contains('\r') {
        return Err(CredVaultError::InvalidField {
            field,
            reason: "must not contain line breaks".into(),
        });
    }
    if !allow_sep && value.contains(SEP) {
        return Err(CredVaultError::InvalidField {
            field,
            reason: format!("must not contain '{SEP}'"),
        });
    }
    Ok(())
}
