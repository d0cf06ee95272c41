//! Operator credential registry.
//!
//! `UserRegistry` owns the set of registered operators and their
//! Argon2id password hashes, persisted one record per line as
//! `username:hash`.  The hash is a PHC string and may itself contain
//! the separator, so parsing splits on the *first* `:` only.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::crypto::{hash_password_with_params, verify_password, Argon2Params};
use crate::errors::{CredVaultError, Result};

use super::{validate_field, write_atomic, SEP};

/// A single registered operator.
#[derive(Debug, Clone)]
pub struct UserCredential {
    /// Operator-chosen login name, unique within the registry.
    pub username: String,
    /// Argon2id PHC string (salt and params embedded).
    pub password_hash: String,
}

/// The operator registry.  Open one with `UserRegistry::open`, then use
/// `register` and `verify`.
pub struct UserRegistry {
    /// Path to the users file on disk.
    path: PathBuf,

    /// In-memory list of credentials; small, scanned linearly.
    users: Vec<UserCredential>,

    /// Argon2 parameters used for new registrations.
    params: Argon2Params,

    /// Malformed lines skipped by the last `load`.
    skipped_lines: usize,
}

impl UserRegistry {
    /// Open the registry at `path`, loading any existing users.
    ///
    /// A missing file is treated as an empty registry; the file is
    /// created on the first successful registration.  Any other read
    /// failure is surfaced.
    pub fn open(path: &Path, params: Argon2Params) -> Result<Self> {
        let mut registry = Self {
            path: path.to_path_buf(),
            users: Vec::new(),
            params,
            skipped_lines: 0,
        };
        registry.load()?;
        Ok(registry)
    }

    // ------------------------------------------------------------------
    // Registration and verification
    // ------------------------------------------------------------------

    /// Register a new operator.
    ///
    /// Hashes the password with Argon2id (fresh salt per call), appends
    /// the credential, and immediately rewrites the backing file so the
    /// in-memory and on-disk sets never diverge.
    ///
    /// Fails with `DuplicateUsername` if the name is taken; the
    /// existing credential is left untouched.
    pub fn register(&mut self, username: &str, password: &str) -> Result<()> {
        validate_field("username", username, false)?;
        if password.is_empty() {
            return Err(CredVaultError::InvalidField {
                field: "password",
                reason: "must not be empty".into(),
            });
        }

        if self.users.iter().any(|u| u.username == username) {
            return Err(CredVaultError::DuplicateUsername(username.to_string()));
        }

        let password_hash = hash_password_with_params(password, &self.params)?;
        self.users.push(UserCredential {
            username: username.to_string(),
            password_hash,
        });
        self.flush()
    }

    /// Check a username/password pair against the registry.
    ///
    /// Returns `false` for an unknown username and for a wrong
    /// password, with no way to tell the two apart: a failed sign-in
    /// must not reveal which usernames exist.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        match self.users.iter().find(|u| u.username == username) {
            Some(user) => verify_password(password, &user.password_hash),
            None => false,
        }
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Replace the in-memory set with the contents of the backing file.
    ///
    /// Lines without a separator or with an empty username are skipped
    /// leniently; `skipped_lines` reports how many.
    pub fn load(&mut self) -> Result<()> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                self.users.clear();
                self.skipped_lines = 0;
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        self.users.clear();
        self.skipped_lines = 0;

        for line in contents.lines() {
            if line.is_empty() {
                continue;
            }
            // First separator only: the PHC hash is opaque and must not
            // be assumed free of ':'.
            match line.split_once(SEP) {
                Some((username, hash)) if !username.is_empty() && !hash.is_empty() => {
                    self.users.push(UserCredential {
                        username: username.to_string(),
                        password_hash: hash.to_string(),
                    });
                }
                _ => self.skipped_lines += 1,
            }
        }

        Ok(())
    }

    /// Serialize every credential and rewrite the backing file.
    pub fn flush(&self) -> Result<()> {
        let mut out = String::new();
        for user in &self.users {
            out.push_str(&user.username);
            out.push(SEP);
            out.push_str(&user.password_hash);
            out.push('\n');
        }
        write_atomic(&self.path, &out)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the number of registered operators.
    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    /// Returns `true` if a credential with this exact username exists.
    pub fn contains(&self, username: &str) -> bool {
        self.users.iter().any(|u| u.username == username)
    }

    /// Malformed lines skipped by the last `load`.
    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }
}
