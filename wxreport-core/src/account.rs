use anyhow::{Context, Result, anyhow};
use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

/// Local account store: a flat username → password map persisted as JSON.
///
/// Passwords are compared as plain text, matching the original scheme this
/// replaces. A salted-hash comparison should take over before any real
/// deployment.
#[derive(Debug)]
pub struct AccountStore {
    path: PathBuf,
    users: HashMap<String, String>,
}

impl AccountStore {
    /// Load the store from disk, creating an empty file on first use.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.exists() {
            let store = Self {
                path,
                users: HashMap::new(),
            };
            store.save()?;
            return Ok(store);
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read user store: {}", path.display()))?;

        let users: HashMap<String, String> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse user store: {}", path.display()))?;

        Ok(Self { path, users })
    }

    /// Save the store to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create user store directory: {}", parent.display())
            })?;
        }

        let json =
            serde_json::to_string_pretty(&self.users).context("Failed to serialize user store")?;

        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write user store: {}", self.path.display()))?;

        Ok(())
    }

    /// Register a new account and persist the store.
    pub fn register(&mut self, username: &str, password: &str) -> Result<()> {
        if username.trim().is_empty() {
            return Err(anyhow!("Username must not be empty."));
        }
        if password.is_empty() {
            return Err(anyhow!("Password must not be empty."));
        }
        if self.users.contains_key(username) {
            return Err(anyhow!("Username '{username}' already exists."));
        }

        self.users
            .insert(username.to_string(), password.to_string());
        self.save()
    }

    /// Check a username/password pair. Unknown users simply fail the check.
    pub fn verify(&self, username: &str, password: &str) -> bool {
        self.users
            .get(username)
            .is_some_and(|stored| stored == password)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn load_creates_empty_store_when_file_absent() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("users.json");

        let store = AccountStore::load(&path).expect("load");

        assert!(path.exists());
        assert!(!store.verify("anyone", "anything"));
    }

    #[test]
    fn register_then_verify() {
        let dir = tempdir().expect("tempdir");
        let mut store = AccountStore::load(dir.path().join("users.json")).expect("load");

        store.register("alice", "s3cret").expect("register");

        assert!(store.verify("alice", "s3cret"));
        assert!(!store.verify("alice", "wrong"));
        assert!(!store.verify("bob", "s3cret"));
    }

    #[test]
    fn register_rejects_duplicates_and_blanks() {
        let dir = tempdir().expect("tempdir");
        let mut store = AccountStore::load(dir.path().join("users.json")).expect("load");

        store.register("alice", "pw").expect("register");

        let dup = store.register("alice", "other").unwrap_err();
        assert!(dup.to_string().contains("already exists"));

        assert!(store.register("  ", "pw").is_err());
        assert!(store.register("bob", "").is_err());
    }

    #[test]
    fn accounts_survive_reload() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("users.json");

        {
            let mut store = AccountStore::load(&path).expect("load");
            store.register("alice", "pw").expect("register");
        }

        let reloaded = AccountStore::load(&path).expect("reload");
        assert!(reloaded.verify("alice", "pw"));
    }
}
