//! Per-operator secret store.
//!
//! `SecretStore` owns the `(owner, account, secret)` records of one
//! vault file, persisted one record per line as `owner:account:value`.
//! Parsing splits on the first two separators; everything after the
//! second belongs to the value verbatim, so values may contain `:`.
//!
//! Secret values are stored in plaintext.  That is the documented
//! contract of this store, not an accident — see DESIGN.md.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::errors::{CredVaultError, Result};

use super::{validate_field, write_atomic, SEP};

/// One stored secret, scoped to the operator who created it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretRecord {
    /// The authenticated username that owns this record.
    pub owner: String,
    /// Operator-chosen label (e.g. a website name); unique per owner.
    pub account: String,
    /// The secret value, stored verbatim.
    pub secret: String,
}

/// Result of an `upsert`: did the record exist before the call?
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Created,
    Updated,
}

/// Result of a `remove`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NotFound,
}

/// The secret store for one vault file.
///
/// Mutations do not write to disk by themselves; callers flush after
/// each mutation, which keeps the file a faithful snapshot of memory
/// at every point the CLI reports success.
#[derive(Debug)]
pub struct SecretStore {
    /// Path to the vault file on disk.
    path: PathBuf,

    /// In-memory records; small, scanned linearly, file order preserved.
    records: Vec<SecretRecord>,

    /// Malformed lines skipped by the last `load`.
    skipped_lines: usize,
}

impl SecretStore {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Load the store from an existing vault file.
    ///
    /// A missing file is a recoverable `VaultNotFound` error; the
    /// caller decides whether that means "abort" or "start fresh".
    pub fn load(path: &Path) -> Result<Self> {
        let contents = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(CredVaultError::VaultNotFound(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };

        let mut records = Vec::new();
        let mut skipped_lines = 0;

        for line in contents.lines() {
            if line.is_empty() {
                continue;
            }
            // Split on the first two separators; the rest of the line,
            // further separators included, is the secret value.
            let parsed = line
                .split_once(SEP)
                .and_then(|(owner, rest)| {
                    rest.split_once(SEP).map(|(account, secret)| SecretRecord {
                        owner: owner.to_string(),
                        account: account.to_string(),
                        secret: secret.to_string(),
                    })
                })
                .filter(|r| !r.owner.is_empty() && !r.account.is_empty());

            match parsed {
                Some(record) => records.push(record),
                None => skipped_lines += 1,
            }
        }

        Ok(Self {
            path: path.to_path_buf(),
            records,
            skipped_lines,
        })
    }

    /// Create an empty store for a vault file that does not exist yet.
    /// The file appears on the first `flush`.
    pub fn empty(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            records: Vec::new(),
            skipped_lines: 0,
        }
    }

    // ------------------------------------------------------------------
    // Record operations
    // ------------------------------------------------------------------

    /// Add a record, or replace the value of an existing one.
    ///
    /// `(owner, account)` is the natural key; at most one record per
    /// pair ever exists.
    pub fn upsert(&mut self, owner: &str, account: &str, secret: &str) -> Result<UpsertOutcome> {
        validate_field("owner", owner, false)?;
        validate_field("account", account, false)?;
        validate_field("secret value", secret, true)?;

        match self
            .records
            .iter_mut()
            .find(|r| r.owner == owner && r.account == account)
        {
            Some(existing) => {
                existing.secret = secret.to_string();
                Ok(UpsertOutcome::Updated)
            }
            None => {
                self.records.push(SecretRecord {
                    owner: owner.to_string(),
                    account: account.to_string(),
                    secret: secret.to_string(),
                });
                Ok(UpsertOutcome::Created)
            }
        }
    }

    /// Look up the secret value for `(owner, account)`.
    /// Absence is a normal outcome, not an error.
    pub fn lookup(&self, owner: &str, account: &str) -> Option<&str> {
        self.records
            .iter()
            .find(|r| r.owner == owner && r.account == account)
            .map(|r| r.secret.as_str())
    }

    /// Remove the record for `(owner, account)` if present.
    /// `NotFound` leaves the store untouched.
    pub fn remove(&mut self, owner: &str, account: &str) -> RemoveOutcome {
        match self
            .records
            .iter()
            .position(|r| r.owner == owner && r.account == account)
        {
            Some(idx) => {
                self.records.remove(idx);
                RemoveOutcome::Removed
            }
            None => RemoveOutcome::NotFound,
        }
    }

    /// All account labels belonging to `owner`, sorted.
    pub fn accounts(&self, owner: &str) -> Vec<&str> {
        let mut list: Vec<&str> = self
            .records
            .iter()
            .filter(|r| r.owner == owner)
            .map(|r| r.account.as_str())
            .collect();
        list.sort_unstable();
        list
    }

    // ------------------------------------------------------------------
    // Persistence
    // ------------------------------------------------------------------

    /// Serialize every record and rewrite the vault file.
    pub fn flush(&self) -> Result<()> {
        let mut out = String::new();
        for record in &self.records {
            out.push_str(&record.owner);
            out.push(SEP);
            out.push_str(&record.account);
            out.push(SEP);
            out.push_str(&record.secret);
            out.push('\n');
        }
        write_atomic(&self.path, &out)?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the path to the vault file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the total number of records (all owners).
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Malformed lines skipped by the last `load`.
    pub fn skipped_lines(&self) -> usize {
        self.skipped_lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, SecretStore) {
        let dir = TempDir::new().unwrap();
        let store = SecretStore::empty(&dir.path().join("vault.txt"));
        (dir, store)
    }

    #[test]
    fn upsert_creates_then_updates() {
        let (_dir, mut store) = store();

        let out = store.upsert("alice", "email", "p@ss1").unwrap();
        assert_eq!(out, UpsertOutcome::Created);

        let out = store.upsert("alice", "email", "p@ss2").unwrap();
        assert_eq!(out, UpsertOutcome::Updated);

        assert_eq!(store.record_count(), 1);
        assert_eq!(store.lookup("alice", "email"), Some("p@ss2"));
    }

    #[test]
    fn records_are_scoped_by_owner() {
        let (_dir, mut store) = store();
        store.upsert("alice", "email", "alice-pw").unwrap();
        store.upsert("bob", "email", "bob-pw").unwrap();

        assert_eq!(store.record_count(), 2);
        assert_eq!(store.lookup("alice", "email"), Some("alice-pw"));
        assert_eq!(store.lookup("bob", "email"), Some("bob-pw"));
        assert_eq!(store.lookup("carol", "email"), None);
    }

    #[test]
    fn remove_then_lookup_is_none() {
        let (_dir, mut store) = store();
        store.upsert("alice", "email", "pw").unwrap();

        assert_eq!(store.remove("alice", "email"), RemoveOutcome::Removed);
        assert_eq!(store.lookup("alice", "email"), None);
    }

    #[test]
    fn remove_missing_key_does_not_mutate() {
        let (_dir, mut store) = store();
        store.upsert("alice", "email", "pw").unwrap();

        assert_eq!(store.remove("alice", "bank"), RemoveOutcome::NotFound);
        assert_eq!(store.record_count(), 1);
        assert_eq!(store.lookup("alice", "email"), Some("pw"));
    }

    #[test]
    fn flush_then_load_roundtrips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vault.txt");

        let mut store = SecretStore::empty(&path);
        store.upsert("alice", "email", "p@ss1").unwrap();
        store.upsert("alice", "bank", "1234").unwrap();
        store.upsert("bob", "email", "hunter2").unwrap();
        store.flush().unwrap();

        let loaded = SecretStore::load(&path).unwrap();
        assert_eq!(loaded.record_count(), 3);
        assert_eq!(loaded.lookup("alice", "email"), Some("p@ss1"));
        assert_eq!(loaded.lookup("alice", "bank"), Some("1234"));
        assert_eq!(loaded.lookup("bob", "email"), Some("hunter2"));
    }

    #[test]
    fn secret_values_may_contain_separators() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vault.txt");

        let mut store = SecretStore::empty(&path);
        store
            .upsert("alice", "db", "postgres://user:pw@host:5432/db")
            .unwrap();
        store.flush().unwrap();

        let loaded = SecretStore::load(&path).unwrap();
        assert_eq!(
            loaded.lookup("alice", "db"),
            Some("postgres://user:pw@host:5432/db")
        );
    }

    #[test]
    fn owner_and_account_reject_separators() {
        let (_dir, mut store) = store();
        assert!(store.upsert("a:b", "email", "pw").is_err());
        assert!(store.upsert("alice", "e:mail", "pw").is_err());
        assert!(store.upsert("alice", "email", "pw\nextra").is_err());
    }

    #[test]
    fn load_on_missing_file_is_recoverable_error() {
        let dir = TempDir::new().unwrap();
        let err = SecretStore::load(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, CredVaultError::VaultNotFound(_)));
    }

    #[test]
    fn malformed_lines_are_skipped_and_counted() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("vault.txt");
        fs::write(
            &path,
            "alice:email:pw\nonly-one:field\nno-separators\nbob:bank:123:45\n",
        )
        .unwrap();

        let store = SecretStore::load(&path).unwrap();
        assert_eq!(store.record_count(), 2);
        assert_eq!(store.skipped_lines(), 2);
        // Trailing separators belong to the value.
        assert_eq!(store.lookup("bob", "bank"), Some("123:45"));
    }

    #[test]
    fn accounts_lists_only_the_owners_labels_sorted() {
        let (_dir, mut store) = store();
        store.upsert("alice", "zoo", "1").unwrap();
        store.upsert("alice", "bank", "2").unwrap();
        store.upsert("bob", "email", "3").unwrap();

        assert_eq!(store.accounts("alice"), vec!["bank", "zoo"]);
        assert_eq!(store.accounts("bob"), vec!["email"]);
        assert!(store.accounts("carol").is_empty());
    }
}
