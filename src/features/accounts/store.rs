use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const APP_CONFIG_DIR_ENV: &str = "IGSAVER_CONFIG_DIR";
const APP_NAME: &str = "igsaver-cli";
const ACCOUNTS_FILE: &str = "accounts.json";

/// A saved username/password pair enabling quick re-login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedAccount {
    pub username: String,
    pub password: String,
}

/// Ordered saved-account list persisted as plaintext JSON in the config
/// directory.
///
/// WARNING: passwords are stored unencrypted on disk. This matches the
/// documented storage contract of the client; encryption-at-rest is an
/// extension, not an assumption callers may make.
#[derive(Debug, Clone)]
pub struct AccountStore {
    dir: PathBuf,
}

impl AccountStore {
    pub fn open_default() -> AppResult<Self> {
        Ok(Self { dir: config_dir()? })
    }

    pub fn at(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Saved accounts in insertion order. A missing or empty file reads as
    /// the empty list, never an error.
    pub fn list(&self) -> AppResult<Vec<SavedAccount>> {
        let path = self.accounts_path();
        if !path.exists() {
            return Ok(Vec::new());
        }

        let raw = fs::read_to_string(&path).map_err(|err| {
            AppError::storage(format!("Failed to read {}: {err}", path.display()))
        })?;
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&raw).map_err(|err| {
            AppError::storage(format!("Failed to decode {}: {err}", path.display()))
        })
    }

    /// Upsert by exact username: update the password in place when present,
    /// append otherwise. Insertion order of existing entries is preserved.
    pub fn upsert(&self, username: &str, password: &str) -> AppResult<()> {
        let mut accounts = self.list()?;
        match accounts.iter_mut().find(|account| account.username == username) {
            Some(existing) => existing.password = password.to_string(),
            None => accounts.push(SavedAccount {
                username: username.to_string(),
                password: password.to_string(),
            }),
        }
        self.persist(&accounts)
    }

    /// Remove by exact username. Removing an unknown username is a no-op.
    pub fn remove(&self, username: &str) -> AppResult<()> {
        let mut accounts = self.list()?;
        accounts.retain(|account| account.username != username);
        self.persist(&accounts)
    }

    fn persist(&self, accounts: &[SavedAccount]) -> AppResult<()> {
        fs::create_dir_all(&self.dir).map_err(|err| {
            AppError::storage(format!(
                "Failed to create config directory {}: {err}",
                self.dir.display()
            ))
        })?;

        let path = self.accounts_path();
        let serialized = serde_json::to_string_pretty(accounts)
            .map_err(|err| AppError::storage(format!("Failed to serialize accounts: {err}")))?;
        fs::write(&path, format!("{serialized}\n")).map_err(|err| {
            AppError::storage(format!("Failed to write {}: {err}", path.display()))
        })?;
        lock_down_permissions(&path)
    }

    fn accounts_path(&self) -> PathBuf {
        self.dir.join(ACCOUNTS_FILE)
    }
}

fn config_dir() -> AppResult<PathBuf> {
    if let Ok(path) = env::var(APP_CONFIG_DIR_ENV) {
        return Ok(PathBuf::from(path));
    }

    #[cfg(target_os = "windows")]
    {
        if let Ok(path) = env::var("APPDATA") {
            return Ok(PathBuf::from(path).join(APP_NAME));
        }
        if let Ok(path) = env::var("LOCALAPPDATA") {
            return Ok(PathBuf::from(path).join(APP_NAME));
        }
    }

    if let Ok(path) = env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(path).join(APP_NAME));
    }

    if let Ok(path) = env::var("HOME") {
        return Ok(PathBuf::from(path).join(".config").join(APP_NAME));
    }

    Err(AppError::storage(
        "Could not determine config directory. Set HOME, XDG_CONFIG_HOME, or IGSAVER_CONFIG_DIR.",
    ))
}

fn lock_down_permissions(path: &Path) -> AppResult<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;

        fs::set_permissions(path, fs::Permissions::from_mode(0o600)).map_err(|err| {
            AppError::storage(format!(
                "Failed to set file permissions on {}: {err}",
                path.display()
            ))
        })?;
    }

    #[cfg(not(unix))]
    {
        let _ = path;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, AccountStore) {
        let dir = TempDir::new().unwrap();
        let store = AccountStore::at(dir.path());
        (dir, store)
    }

    #[test]
    fn missing_file_reads_as_empty_list() {
        let (_dir, store) = store();
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn upsert_is_idempotent_by_username() {
        let (_dir, store) = store();
        store.upsert("alice", "pw1").unwrap();
        store.upsert("alice", "pw2").unwrap();

        let accounts = store.list().unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].username, "alice");
        assert_eq!(accounts[0].password, "pw2");
    }

    #[test]
    fn upsert_preserves_insertion_order() {
        let (_dir, store) = store();
        store.upsert("alice", "pw1").unwrap();
        store.upsert("bob", "pw2").unwrap();
        store.upsert("alice", "pw3").unwrap();

        let usernames: Vec<_> = store
            .list()
            .unwrap()
            .into_iter()
            .map(|account| account.username)
            .collect();
        assert_eq!(usernames, vec!["alice", "bob"]);
    }

    #[test]
    fn remove_unknown_username_is_a_noop() {
        let (_dir, store) = store();
        store.upsert("alice", "pw1").unwrap();
        store.remove("nobody").unwrap();

        let accounts = store.list().unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].username, "alice");
    }

    #[test]
    fn remove_deletes_only_the_matching_entry() {
        let (_dir, store) = store();
        store.upsert("alice", "pw1").unwrap();
        store.upsert("bob", "pw2").unwrap();
        store.remove("alice").unwrap();

        let accounts = store.list().unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].username, "bob");
    }
}
